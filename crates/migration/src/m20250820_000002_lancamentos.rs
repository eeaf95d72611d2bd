//! Ledger entries table.

use sea_orm_migration::prelude::*;

use crate::m20250820_000001_taxonomy::{Categoria, Centro, Conta, Natureza};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Lancamento {
    Table,
    Id,
    Data,
    NaturezaCode,
    ContaId,
    CategoriaId,
    CentroId,
    Pagamento,
    Descricao,
    FornecedorCliente,
    ValorCentavos,
    AnexoNome,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lancamento::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lancamento::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lancamento::Data).date().not_null())
                    .col(ColumnDef::new(Lancamento::NaturezaCode).string().not_null())
                    .col(ColumnDef::new(Lancamento::ContaId).integer().null())
                    .col(ColumnDef::new(Lancamento::CategoriaId).integer().null())
                    .col(ColumnDef::new(Lancamento::CentroId).integer().null())
                    .col(ColumnDef::new(Lancamento::Pagamento).string().null())
                    .col(ColumnDef::new(Lancamento::Descricao).string().null())
                    .col(ColumnDef::new(Lancamento::FornecedorCliente).string().null())
                    .col(
                        ColumnDef::new(Lancamento::ValorCentavos)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Lancamento::AnexoNome).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lancamento-natureza_code")
                            .from(Lancamento::Table, Lancamento::NaturezaCode)
                            .to(Natureza::Table, Natureza::Code)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lancamento-conta_id")
                            .from(Lancamento::Table, Lancamento::ContaId)
                            .to(Conta::Table, Conta::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lancamento-categoria_id")
                            .from(Lancamento::Table, Lancamento::CategoriaId)
                            .to(Categoria::Table, Categoria::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lancamento-centro_id")
                            .from(Lancamento::Table, Lancamento::CentroId)
                            .to(Centro::Table, Centro::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-lancamento-data")
                    .table(Lancamento::Table)
                    .col(Lancamento::Data)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-lancamento-centro_id")
                    .table(Lancamento::Table)
                    .col(Lancamento::CentroId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lancamento::Table).to_owned())
            .await
    }
}
