//! Partners (sócios) and their capital accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i32,
    pub name: String,
    pub initial_balance: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "socio")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub saldo_inicial_centavos: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Partner {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.nome,
            initial_balance: MoneyCents::new(model.saldo_inicial_centavos),
        }
    }
}
