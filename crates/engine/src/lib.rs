//! Read-side engine for the transactions dashboard.
//!
//! The engine owns the database handle and exposes the list, statistics,
//! histogram, distribution and combined dashboard reads, plus the bulk
//! replace used at startup to seed the store.

use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use filter::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PageRequest, TransactionFilter, parse_month};
pub use ops::{Dashboard, PRICE_BUCKETS, PriceBucket, SalesStatistics, TransactionPage};
pub use transactions::Transaction;

mod error;
mod filter;
mod ops;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

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

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
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
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
