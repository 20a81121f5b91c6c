use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Engine, ResultEngine, Transaction,
    filter::{ApplyTransactionFilter, PageRequest, TransactionFilter},
    transactions,
};

/// One page of matching transactions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    /// Number of matches across all pages.
    pub total: u64,
}

impl Engine {
    /// Lists transactions matching `filter`, one page at a time.
    ///
    /// Results follow insertion order, so walking `page = 1..` with the same
    /// filter visits every match exactly once.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> ResultEngine<TransactionPage> {
        let total = transactions::Entity::find()
            .apply_filter(filter)
            .count(&self.database)
            .await?;

        let transactions = transactions::Entity::find()
            .apply_filter(filter)
            .order_by_asc(transactions::Column::Id)
            .offset(page.offset())
            .limit(page.per_page)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::from)
            .collect();

        Ok(TransactionPage {
            transactions,
            total,
        })
    }
}
