use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::CorsLayer;

use std::sync::Arc;

use crate::{entries, partners, summary, taxonomy};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/naturezas", get(taxonomy::list_naturezas))
        .route("/naturezas/{code}/contas", get(taxonomy::list_contas))
        .route("/contas/{conta_id}/categorias", get(taxonomy::list_categorias))
        .route(
            "/centros",
            get(taxonomy::list_centros).post(taxonomy::create_centro),
        )
        .route("/lancamentos", get(entries::list).post(entries::create))
        .route(
            "/lancamentos/{id}",
            axum::routing::patch(entries::update).delete(entries::delete),
        )
        .route("/summary", get(summary::get_summary))
        .route("/socios", get(partners::list))
        .route("/socios/{id}/saldo_inicial", put(partners::set_initial_balance))
        .route("/socios/{id}/extrato", get(partners::statement))
}

/// The full application router, API under `/api`.
pub fn app(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
