use std::collections::HashMap;

use sea_orm::prelude::*;

use crate::{
    CapitalAccount, DateRange, EngineError, EntryFilter, Partner, ResultEngine, Statement, Summary,
    SummaryItem, categorias, compute_statement, contas, naturezas, summarize,
};

use super::Engine;

fn attach_labels(items: &mut [SummaryItem], labels: &HashMap<String, String>) {
    for item in items {
        item.label = labels.get(&item.key).cloned();
    }
}

impl Engine {
    /// Totals and per-level groups for the entries matching `filter`, with
    /// taxonomy names attached as labels.
    pub async fn summary(&self, filter: &EntryFilter) -> ResultEngine<Summary> {
        let entries = self.fetch_entries(filter).await?;
        let mut summary = summarize(&entries)?;

        let natureza_labels: HashMap<String, String> = naturezas::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|m| (m.code, m.nome))
            .collect();
        let conta_labels: HashMap<String, String> = contas::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|m| (m.id.to_string(), m.nome))
            .collect();
        let categoria_labels: HashMap<String, String> = categorias::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|m| (m.id.to_string(), m.nome))
            .collect();

        attach_labels(&mut summary.by_natureza, &natureza_labels);
        attach_labels(&mut summary.by_conta, &conta_labels);
        attach_labels(&mut summary.by_categoria, &categoria_labels);
        Ok(summary)
    }

    /// Resolve the capital account categorias configured for `partner`.
    pub async fn capital_account(&self, partner: &Partner) -> ResultEngine<CapitalAccount> {
        let names = self.partners.categories_for(partner)?;

        let contribution = self
            .categoria_by_name(&names.contribution)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("categoria {}", names.contribution)))?;
        let withdrawal = self
            .categoria_by_name(&names.withdrawal)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("categoria {}", names.withdrawal)))?;

        Ok(CapitalAccount {
            contribution_id: contribution.id,
            withdrawal_id: withdrawal.id,
        })
    }

    /// Monthly capital statement of a partner over `range`.
    pub async fn partner_statement(
        &self,
        partner_id: i32,
        range: DateRange,
    ) -> ResultEngine<Statement> {
        let partner = self.partner(partner_id).await?;
        let account = self.capital_account(&partner).await?;
        let entries = self
            .fetch_entries(&EntryFilter {
                from: Some(range.start),
                to: Some(range.end),
                ..Default::default()
            })
            .await?;

        tracing::debug!(
            partner = %partner.name,
            entries = entries.len(),
            "building partner statement"
        );
        compute_statement(&partner, account, &entries, range)
    }
}
