//! Partners and their opening capital balance.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Socio {
    Table,
    Id,
    Nome,
    SaldoInicialCentavos,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Socio::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Socio::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Socio::Nome).string().not_null())
                    .col(
                        ColumnDef::new(Socio::SaldoInicialCentavos)
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
            .drop_table(Table::drop().table(Socio::Table).to_owned())
            .await
    }
}
