//! Naturezas: the root of the taxonomy (RO, RNO, DO, DNO).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level income/expense family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Natureza {
    pub code: String,
    pub name: String,
}

/// Classification rule shared by every report: `R*` is income, anything else
/// is expense.
pub fn is_income_code(code: &str) -> bool {
    code.starts_with('R')
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "natureza")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub nome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contas::Entity")]
    Contas,
}

impl Related<super::contas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Natureza {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            name: model.nome,
        }
    }
}
