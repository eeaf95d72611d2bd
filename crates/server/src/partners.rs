//! Partner (sócio) endpoints.

use api_types::partner::{
    InitialBalanceUpdate, PartnerView, PeriodView, StatementLineView, StatementQuery,
    StatementResponse,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::{DateRange, MoneyCents};

use crate::{ServerError, server::ServerState};

fn map_partner(partner: engine::Partner) -> PartnerView {
    PartnerView {
        id: partner.id,
        name: partner.name,
        initial_balance_minor: partner.initial_balance.cents(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PartnerView>>, ServerError> {
    let partners = state
        .engine
        .list_partners()
        .await?
        .into_iter()
        .map(map_partner)
        .collect();
    Ok(Json(partners))
}

pub async fn set_initial_balance(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<InitialBalanceUpdate>,
) -> Result<Json<PartnerView>, ServerError> {
    let partner = state
        .engine
        .set_initial_balance(id, MoneyCents::new(payload.initial_balance_minor))
        .await?;
    Ok(Json(map_partner(partner)))
}

/// Monthly capital statement. Without bounds the statement runs from the
/// first entry up to today.
pub async fn statement(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<StatementQuery>,
) -> Result<Json<StatementResponse>, ServerError> {
    let today = chrono::Local::now().date_naive();
    let range = DateRange::parse(query.start.as_deref(), query.end.as_deref(), today)?;
    let statement = state.engine.partner_statement(id, range).await?;

    Ok(Json(StatementResponse {
        partner_name: statement.partner_name,
        initial_balance_minor: statement.initial_balance.cents(),
        period: PeriodView {
            start: statement.period.start,
            end: statement.period.end,
        },
        statement: statement
            .statement
            .into_iter()
            .map(|line| StatementLineView {
                month: line.month.to_string(),
                inflow_minor: line.inflow.cents(),
                outflow_minor: line.outflow.cents(),
                balance_after_minor: line.balance_after.cents(),
            })
            .collect(),
    }))
}
