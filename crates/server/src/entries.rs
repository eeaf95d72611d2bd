//! Ledger entry endpoints.

use api_types::entry::{EntryNew, EntryQuery, EntryUpdate, EntryView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::{EngineError, EntryFilter, EntryFlag, EntryFlags, EntryPatch, MoneyCents, NewEntry};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_entry(entry: engine::Entry) -> EntryView {
    EntryView {
        id: entry.id,
        date: entry.date,
        natureza_code: entry.natureza_code,
        conta_id: entry.conta_id,
        categoria_id: entry.categoria_id,
        centro_id: entry.centro_id,
        amount_minor: entry.amount.cents(),
        dre: entry.flags.dre,
        ir_eduardo: entry.flags.ir_eduardo,
        ir_roberto: entry.flags.ir_roberto,
        description: entry.description,
        payment: entry.payment,
        counterparty: entry.counterparty,
        attachment_name: entry.attachment_name,
    }
}

fn parse_day(raw: Option<&str>) -> Result<Option<NaiveDate>, EngineError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| EngineError::InvalidRange(format!("invalid date: {value}"))),
    }
}

/// Translate the query string into an engine filter.
pub(crate) fn entry_filter(query: &EntryQuery) -> Result<EntryFilter, ServerError> {
    let flag = query
        .flag
        .as_deref()
        .map(EntryFlag::try_from)
        .transpose()?;
    Ok(EntryFilter {
        from: parse_day(query.start_date.as_deref())?,
        to: parse_day(query.end_date.as_deref())?,
        centro_id: query.centro_id,
        flag,
    })
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let filter = entry_filter(&query)?;
    let entries = state
        .engine
        .fetch_entries(&filter)
        .await?
        .into_iter()
        .map(map_entry)
        .collect();
    Ok(Json(entries))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let new = NewEntry {
        date: payload.date,
        natureza_code: payload.natureza_code,
        conta_id: payload.conta_id,
        categoria_id: payload.categoria_id,
        centro_id: payload.centro_id,
        amount: MoneyCents::new(payload.amount_minor),
        flags: EntryFlags {
            dre: payload.dre,
            ir_eduardo: payload.ir_eduardo,
            ir_roberto: payload.ir_roberto,
        },
        description: payload.description,
        payment: payload.payment,
        counterparty: payload.counterparty,
        attachment_name: payload.attachment_name,
    };
    let entry = state.engine.create_entry(new).await?;
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<EntryUpdate>,
) -> Result<Json<EntryView>, ServerError> {
    let flags_touched =
        payload.dre.is_some() || payload.ir_eduardo.is_some() || payload.ir_roberto.is_some();
    let flags = if flags_touched {
        let current = state.engine.entry(id).await?.flags;
        Some(EntryFlags {
            dre: payload.dre.unwrap_or(current.dre),
            ir_eduardo: payload.ir_eduardo.unwrap_or(current.ir_eduardo),
            ir_roberto: payload.ir_roberto.unwrap_or(current.ir_roberto),
        })
    } else {
        None
    };

    let patch = EntryPatch {
        date: payload.date,
        natureza_code: payload.natureza_code,
        conta_id: payload.conta_id,
        categoria_id: payload.categoria_id,
        centro_id: payload.centro_id,
        amount: payload.amount_minor.map(MoneyCents::new),
        flags,
        description: payload.description,
        payment: payload.payment,
        counterparty: payload.counterparty,
        attachment_name: payload.attachment_name,
    };
    if patch == EntryPatch::default() {
        return Err(ServerError::Generic(
            "provide at least one field to update".to_string(),
        ));
    }

    let entry = state.engine.update_entry(id, patch).await?;
    Ok(Json(map_entry(entry)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
