//! Cost centers, orthogonal to the taxonomy.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A cost center. `area_hundredths` is the area in hundredths of a hectare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centro {
    pub id: i32,
    pub name: String,
    pub area_hundredths: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "centro")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nome: String,
    pub area_centesimos: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Centro {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.nome,
            area_hundredths: model.area_centesimos,
        }
    }
}
