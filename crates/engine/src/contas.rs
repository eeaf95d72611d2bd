//! Contas: second level of the taxonomy, children of a natureza.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conta {
    pub id: i32,
    pub natureza_code: String,
    pub name: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "conta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub natureza_code: String,
    pub nome: String,
    pub ativo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::naturezas::Entity",
        from = "Column::NaturezaCode",
        to = "super::naturezas::Column::Code",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Natureza,
    #[sea_orm(has_many = "super::categorias::Entity")]
    Categorias,
}

impl Related<super::naturezas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Natureza.def()
    }
}

impl Related<super::categorias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorias.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Conta {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            natureza_code: model.natureza_code,
            name: model.nome,
            active: model.ativo,
        }
    }
}
