//! Categorias: leaves of the taxonomy, children of a conta.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: i32,
    pub conta_id: i32,
    pub name: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categoria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub conta_id: i32,
    pub nome: String,
    pub ativo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contas::Entity",
        from = "Column::ContaId",
        to = "super::contas::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Conta,
}

impl Related<super::contas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conta.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Categoria {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            conta_id: model.conta_id,
            name: model.nome,
            active: model.ativo,
        }
    }
}
