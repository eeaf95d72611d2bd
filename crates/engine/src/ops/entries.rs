use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Entry, EntryFlag, EntryPatch, EngineError, NewEntry, ResultEngine, lancamentos,
    util::normalize_optional_text,
};

use super::Engine;

/// Filters for fetching entries.
///
/// `from` and `to` are both inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub centro_id: Option<i32>,
    /// If present, only entries carrying this flag are returned.
    pub flag: Option<EntryFlag>,
}

impl EntryFilter {
    fn validate(&self) -> ResultEngine<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(EngineError::InvalidRange(format!(
                "start {from} is after end {to}"
            )));
        }
        Ok(())
    }
}

trait ApplyEntryFilters: QueryFilter + Sized {
    fn apply_entry_filters(self, filter: &EntryFilter) -> Self;
}

impl<T> ApplyEntryFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_entry_filters(mut self, filter: &EntryFilter) -> Self {
        if let Some(from) = filter.from {
            self = self.filter(lancamentos::Column::Data.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(lancamentos::Column::Data.lte(to));
        }
        if let Some(centro_id) = filter.centro_id {
            self = self.filter(lancamentos::Column::CentroId.eq(centro_id));
        }
        if let Some(flag) = filter.flag {
            self = self.filter(flag.column().eq(true));
        }
        self
    }
}

fn clean_text(entry: &mut NewEntry) {
    entry.natureza_code = entry.natureza_code.trim().to_string();
    entry.description = normalize_optional_text(entry.description.as_deref());
    entry.payment = normalize_optional_text(entry.payment.as_deref());
    entry.counterparty = normalize_optional_text(entry.counterparty.as_deref());
    entry.attachment_name = normalize_optional_text(entry.attachment_name.as_deref());
}

impl Engine {
    /// Entries matching `filter`, newest first.
    pub async fn fetch_entries(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        filter.validate()?;
        Ok(lancamentos::Entity::find()
            .apply_entry_filters(filter)
            .order_by_desc(lancamentos::Column::Data)
            .order_by_desc(lancamentos::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Entry::from)
            .collect())
    }

    pub async fn entry(&self, entry_id: i32) -> ResultEngine<Entry> {
        lancamentos::Entity::find_by_id(entry_id)
            .one(&self.database)
            .await?
            .map(Entry::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("lancamento {entry_id}")))
    }

    /// Record a new entry after checking its taxonomy references.
    pub async fn create_entry(&self, mut new: NewEntry) -> ResultEngine<Entry> {
        clean_text(&mut new);
        self.validate_entry(&new).await?;

        let model = lancamentos::ActiveModel::from(&new)
            .insert(&self.database)
            .await?;
        Ok(Entry::from(model))
    }

    /// Apply `patch` to an entry; the merged entry goes through the same
    /// checks as a new one.
    pub async fn update_entry(&self, entry_id: i32, patch: EntryPatch) -> ResultEngine<Entry> {
        let current = self.entry(entry_id).await?;
        let mut merged = patch.apply(current);
        clean_text(&mut merged);
        self.validate_entry(&merged).await?;

        let mut active = lancamentos::ActiveModel::from(&merged);
        active.id = ActiveValue::Unchanged(entry_id);
        let model = active.update(&self.database).await?;
        Ok(Entry::from(model))
    }

    pub async fn delete_entry(&self, entry_id: i32) -> ResultEngine<()> {
        let result = lancamentos::Entity::delete_by_id(entry_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("lancamento {entry_id}")));
        }
        Ok(())
    }

    /// The amount must be within `MoneyCents::MAX_ENTRY`, the natureza must
    /// exist, the conta must hang under it and the categoria under the conta.
    /// A categoria without a conta is rejected.
    async fn validate_entry(&self, entry: &NewEntry) -> ResultEngine<()> {
        entry.amount.check_entry_bounds()?;
        if entry.natureza_code.is_empty() {
            return Err(EngineError::InvalidEntry(
                "natureza_code must not be empty".to_string(),
            ));
        }
        self.natureza(&entry.natureza_code).await?;

        if let Some(conta_id) = entry.conta_id {
            let conta = self.conta(conta_id).await?;
            if conta.natureza_code != entry.natureza_code {
                return Err(EngineError::InvalidEntry(format!(
                    "conta {conta_id} does not belong to natureza {}",
                    entry.natureza_code
                )));
            }
        }

        if let Some(categoria_id) = entry.categoria_id {
            let Some(conta_id) = entry.conta_id else {
                return Err(EngineError::InvalidEntry(
                    "categoria requires a conta".to_string(),
                ));
            };
            let categoria = self.categoria(categoria_id).await?;
            if categoria.conta_id != conta_id {
                return Err(EngineError::InvalidEntry(format!(
                    "categoria {categoria_id} does not belong to conta {conta_id}"
                )));
            }
        }

        if let Some(centro_id) = entry.centro_id {
            self.centro(centro_id).await?;
        }
        Ok(())
    }
}
