//! Taxonomy and cost center endpoints.

use api_types::taxonomy::{
    CategoriaView, CentroNew, CentroView, ContaView, NaturezaView, TaxonomyQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_centro(centro: engine::Centro) -> CentroView {
    CentroView {
        id: centro.id,
        name: centro.name,
        area_hundredths: centro.area_hundredths,
    }
}

pub async fn list_naturezas(
    State(state): State<ServerState>,
) -> Result<Json<Vec<NaturezaView>>, ServerError> {
    let naturezas = state
        .engine
        .list_naturezas()
        .await?
        .into_iter()
        .map(|n| NaturezaView {
            code: n.code,
            name: n.name,
        })
        .collect();
    Ok(Json(naturezas))
}

pub async fn list_contas(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Query(query): Query<TaxonomyQuery>,
) -> Result<Json<Vec<ContaView>>, ServerError> {
    let contas = state
        .engine
        .list_contas(&code, query.include_inactive.unwrap_or(false))
        .await?
        .into_iter()
        .map(|c| ContaView {
            id: c.id,
            natureza_code: c.natureza_code,
            name: c.name,
            active: c.active,
        })
        .collect();
    Ok(Json(contas))
}

pub async fn list_categorias(
    State(state): State<ServerState>,
    Path(conta_id): Path<i32>,
    Query(query): Query<TaxonomyQuery>,
) -> Result<Json<Vec<CategoriaView>>, ServerError> {
    let categorias = state
        .engine
        .list_categorias(conta_id, query.include_inactive.unwrap_or(false))
        .await?
        .into_iter()
        .map(|c| CategoriaView {
            id: c.id,
            conta_id: c.conta_id,
            name: c.name,
            active: c.active,
        })
        .collect();
    Ok(Json(categorias))
}

pub async fn list_centros(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CentroView>>, ServerError> {
    let centros = state
        .engine
        .list_centros()
        .await?
        .into_iter()
        .map(map_centro)
        .collect();
    Ok(Json(centros))
}

pub async fn create_centro(
    State(state): State<ServerState>,
    Json(payload): Json<CentroNew>,
) -> Result<(StatusCode, Json<CentroView>), ServerError> {
    let centro = state
        .engine
        .create_centro(&payload.name, payload.area_hundredths.unwrap_or(0))
        .await?;
    Ok((StatusCode::CREATED, Json(map_centro(centro))))
}
