//! Reporting flags on entries: DRE inclusion and per-partner income tax.
//!
//! SQLite accepts a single change per `ALTER TABLE`, so each column is added
//! on its own.

use sea_orm_migration::prelude::*;

use crate::m20250820_000002_lancamentos::Lancamento;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden, Clone, Copy)]
enum Flags {
    Dre,
    IrEduardo,
    IrRoberto,
}

const FLAGS: [Flags; 3] = [Flags::Dre, Flags::IrEduardo, Flags::IrRoberto];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for flag in FLAGS {
            manager
                .alter_table(
                    Table::alter()
                        .table(Lancamento::Table)
                        .add_column(
                            ColumnDef::new(flag)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for flag in FLAGS {
            manager
                .alter_table(
                    Table::alter()
                        .table(Lancamento::Table)
                        .drop_column(flag)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
