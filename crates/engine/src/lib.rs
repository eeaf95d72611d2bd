//! Ledger engine for Sinuelo Finance.
//!
//! The crate has two layers:
//!
//! - pure reports over in-memory entries: [`summary`] (income/expense/result
//!   per taxonomy level) and [`statement`] (partner capital statement);
//! - the [`Engine`], an async facade over the SQLite store that fetches the
//!   data, validates writes, and feeds the reports.

pub use categorias::Categoria;
pub use centros::Centro;
pub use contas::Conta;
pub use error::EngineError;
pub use lancamentos::{Entry, EntryFlag, EntryFlags, EntryPatch, NewEntry};
pub use money::MoneyCents;
pub use naturezas::{Natureza, is_income_code};
pub use ops::{Engine, EngineBuilder, EntryFilter};
pub use seed::Seed;
pub use socios::Partner;
pub use statement::{
    CapitalAccount, DateRange, PartnerAccounts, PartnerCategories, Statement, StatementLine,
    YearMonth, compute_statement,
};
pub use summary::{
    Dimension, Summary, SummaryItem, SummaryResult, TOTAL_KEY, compute_summary, summarize,
};

pub mod categorias;
pub mod centros;
pub mod contas;
mod error;
pub mod lancamentos;
mod money;
pub mod naturezas;
mod ops;
pub mod seed;
pub mod socios;
pub mod statement;
pub mod summary;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
