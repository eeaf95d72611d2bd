use sea_orm::DatabaseConnection;

use crate::{PartnerAccounts, ResultEngine};

mod entries;
mod partners;
mod reports;
mod taxonomy;

pub use entries::EntryFilter;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Store facade: owns the connection pool and the partner account mapping.
///
/// Every method is a short-lived read or write; the struct holds no cached
/// ledger state, so it can be shared behind an `Arc` between requests.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    partners: PartnerAccounts,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    partners: PartnerAccounts,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Pass the partner capital account mapping
    pub fn partner_accounts(mut self, partners: PartnerAccounts) -> EngineBuilder {
        self.partners = partners;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            partners: self.partners,
        })
    }
}
