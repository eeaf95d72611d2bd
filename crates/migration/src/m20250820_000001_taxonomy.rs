//! Taxonomy tables.
//!
//! - `natureza`: income/expense families keyed by code (RO, RNO, DO, DNO)
//! - `conta`: accounts under a natureza
//! - `categoria`: sub-accounts under a conta
//! - `centro`: cost centers

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Natureza {
    Table,
    Code,
    Nome,
}

#[derive(Iden)]
pub(crate) enum Conta {
    Table,
    Id,
    NaturezaCode,
    Nome,
    Ativo,
}

#[derive(Iden)]
pub(crate) enum Categoria {
    Table,
    Id,
    ContaId,
    Nome,
    Ativo,
}

#[derive(Iden)]
pub(crate) enum Centro {
    Table,
    Id,
    Nome,
    AreaCentesimos,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Natureza::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Natureza::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Natureza::Nome).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Conta::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conta::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Conta::NaturezaCode).string().not_null())
                    .col(ColumnDef::new(Conta::Nome).string().not_null())
                    .col(
                        ColumnDef::new(Conta::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-conta-natureza_code")
                            .from(Conta::Table, Conta::NaturezaCode)
                            .to(Natureza::Table, Natureza::Code)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categoria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categoria::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categoria::ContaId).integer().not_null())
                    .col(ColumnDef::new(Categoria::Nome).string().not_null())
                    .col(
                        ColumnDef::new(Categoria::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categoria-conta_id")
                            .from(Categoria::Table, Categoria::ContaId)
                            .to(Conta::Table, Conta::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categoria-conta_id")
                    .table(Categoria::Table)
                    .col(Categoria::ContaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Centro::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Centro::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Centro::Nome)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Centro::AreaCentesimos)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Centro::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categoria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Conta::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Natureza::Table).to_owned())
            .await
    }
}
