use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run_with_listener, spawn_with_listener};

mod entries;
mod partners;
mod server;
mod summary;
mod taxonomy;

pub mod types {
    pub mod taxonomy {
        pub use api_types::taxonomy::{
            CategoriaView, CentroNew, CentroView, ContaView, NaturezaView, TaxonomyQuery,
        };
    }

    pub mod entry {
        pub use api_types::entry::{EntryNew, EntryQuery, EntryUpdate, EntryView};
    }

    pub mod summary {
        pub use api_types::summary::{SummaryItemView, SummaryResponse};
    }

    pub mod partner {
        pub use api_types::partner::{
            InitialBalanceUpdate, PartnerView, PeriodView, StatementLineView, StatementQuery,
            StatementResponse,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::InvalidSeed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::InvalidRange(_)
        | EngineError::UnmappedPartner(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidEntry(_)
        | EngineError::InvalidName(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
