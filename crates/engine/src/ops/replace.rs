use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};

use crate::{Engine, ResultEngine, Transaction, transactions, with_tx};

/// Rows per INSERT statement, well below SQLite's bound-variable limit.
const INSERT_CHUNK: usize = 100;

impl Engine {
    /// Replaces the whole store with `records`.
    ///
    /// Delete and inserts share one DB transaction: on error the previous
    /// contents are kept. Returns the number of rows inserted.
    pub async fn replace_transactions(&self, records: &[Transaction]) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let removed = transactions::Entity::delete_many()
                .exec(&db_tx)
                .await?
                .rows_affected;

            for chunk in records.chunks(INSERT_CHUNK) {
                transactions::Entity::insert_many(chunk.iter().map(transactions::ActiveModel::from))
                    .exec(&db_tx)
                    .await?;
            }

            tracing::info!(removed, inserted = records.len(), "transactions replaced");
            Ok(records.len() as u64)
        })
    }

    /// Number of stored transactions.
    pub async fn count_transactions(&self) -> ResultEngine<u64> {
        Ok(transactions::Entity::find().count(&self.database).await?)
    }
}
