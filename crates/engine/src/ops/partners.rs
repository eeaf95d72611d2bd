use sea_orm::{ActiveValue, QueryOrder, prelude::*};

use crate::{EngineError, MoneyCents, Partner, ResultEngine, socios};

use super::Engine;

impl Engine {
    /// All partners, ordered by name.
    pub async fn list_partners(&self) -> ResultEngine<Vec<Partner>> {
        Ok(socios::Entity::find()
            .order_by_asc(socios::Column::Nome)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Partner::from)
            .collect())
    }

    pub async fn partner(&self, partner_id: i32) -> ResultEngine<Partner> {
        socios::Entity::find_by_id(partner_id)
            .one(&self.database)
            .await?
            .map(Partner::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("socio {partner_id}")))
    }

    /// Replace the opening balance of a partner's capital account.
    pub async fn set_initial_balance(
        &self,
        partner_id: i32,
        balance: MoneyCents,
    ) -> ResultEngine<Partner> {
        self.partner(partner_id).await?;
        let model = socios::ActiveModel {
            id: ActiveValue::Unchanged(partner_id),
            saldo_inicial_centavos: ActiveValue::Set(balance.cents()),
            ..Default::default()
        }
        .update(&self.database)
        .await?;
        Ok(Partner::from(model))
    }
}
