//! Summary endpoint.

use api_types::{
    entry::EntryQuery,
    summary::{SummaryItemView, SummaryResponse},
};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, entries::entry_filter, server::ServerState};

fn map_item(item: engine::SummaryItem) -> SummaryItemView {
    SummaryItemView {
        key: item.key,
        label: item.label,
        income_minor: item.income.cents(),
        expense_minor: item.expense.cents(),
        result_minor: item.result.cents(),
        percent: item.percent,
    }
}

/// Totals by natureza, conta and categoria for the filtered entries.
pub async fn get_summary(
    State(state): State<ServerState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let filter = entry_filter(&query)?;
    let summary = state.engine.summary(&filter).await?;

    Ok(Json(SummaryResponse {
        totals: map_item(summary.totals),
        by_natureza: summary.by_natureza.into_iter().map(map_item).collect(),
        by_conta: summary.by_conta.into_iter().map(map_item).collect(),
        by_categoria: summary.by_categoria.into_iter().map(map_item).collect(),
    }))
}
