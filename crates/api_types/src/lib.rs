//! Request and response bodies of the HTTP API.
//!
//! Money travels as integer centavos in `*_minor` fields; dates as
//! `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod taxonomy {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NaturezaView {
        pub code: String,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContaView {
        pub id: i32,
        pub natureza_code: String,
        pub name: String,
        pub active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriaView {
        pub id: i32,
        pub conta_id: i32,
        pub name: String,
        pub active: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TaxonomyQuery {
        /// If true, inactive contas/categorias are listed too (default: false).
        pub include_inactive: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CentroView {
        pub id: i32,
        pub name: String,
        /// Area in hundredths of a hectare.
        pub area_hundredths: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CentroNew {
        pub name: String,
        pub area_hundredths: Option<i64>,
    }
}

pub mod entry {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub date: NaiveDate,
        pub natureza_code: String,
        pub conta_id: Option<i32>,
        pub categoria_id: Option<i32>,
        pub centro_id: Option<i32>,
        pub amount_minor: i64,
        #[serde(default)]
        pub dre: bool,
        #[serde(default)]
        pub ir_eduardo: bool,
        #[serde(default)]
        pub ir_roberto: bool,
        pub description: Option<String>,
        pub payment: Option<String>,
        pub counterparty: Option<String>,
        pub attachment_name: Option<String>,
    }

    /// Partial update. Omitted fields are kept; `null` clears a nullable field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryUpdate {
        pub date: Option<NaiveDate>,
        pub natureza_code: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub conta_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "double_option")]
        pub categoria_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "double_option")]
        pub centro_id: Option<Option<i32>>,
        pub amount_minor: Option<i64>,
        pub dre: Option<bool>,
        pub ir_eduardo: Option<bool>,
        pub ir_roberto: Option<bool>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub payment: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub counterparty: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub attachment_name: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i32,
        pub date: NaiveDate,
        pub natureza_code: String,
        pub conta_id: Option<i32>,
        pub categoria_id: Option<i32>,
        pub centro_id: Option<i32>,
        pub amount_minor: i64,
        pub dre: bool,
        pub ir_eduardo: bool,
        pub ir_roberto: bool,
        pub description: Option<String>,
        pub payment: Option<String>,
        pub counterparty: Option<String>,
        pub attachment_name: Option<String>,
    }

    /// Query string shared by the entry listing and the summary.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryQuery {
        /// Inclusive, `YYYY-MM-DD`.
        pub start_date: Option<String>,
        /// Inclusive, `YYYY-MM-DD`.
        pub end_date: Option<String>,
        pub centro_id: Option<i32>,
        /// One of `dre`, `ir_eduardo`, `ir_roberto`.
        pub flag: Option<String>,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryItemView {
        pub key: String,
        pub label: Option<String>,
        pub income_minor: i64,
        pub expense_minor: i64,
        pub result_minor: i64,
        pub percent: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub totals: SummaryItemView,
        pub by_natureza: Vec<SummaryItemView>,
        pub by_conta: Vec<SummaryItemView>,
        pub by_categoria: Vec<SummaryItemView>,
    }
}

pub mod partner {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnerView {
        pub id: i32,
        pub name: String,
        pub initial_balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InitialBalanceUpdate {
        pub initial_balance_minor: i64,
    }

    /// Bounds are `YYYY-MM-DD` or `YYYY-MM`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatementQuery {
        pub start: Option<String>,
        pub end: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodView {
        pub start: NaiveDate,
        pub end: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementLineView {
        /// `YYYY-MM`.
        pub month: String,
        pub inflow_minor: i64,
        pub outflow_minor: i64,
        pub balance_after_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementResponse {
        pub partner_name: String,
        pub initial_balance_minor: i64,
        pub period: PeriodView,
        pub statement: Vec<StatementLineView>,
    }
}
