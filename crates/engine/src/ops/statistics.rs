use sea_orm::{PaginatorTrait, QueryFilter, QuerySelect, prelude::*, sea_query::Expr};

use crate::{
    Engine, ResultEngine,
    filter::{ApplyTransactionFilter, TransactionFilter},
    transactions,
};

/// Sales totals for one calendar month.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SalesStatistics {
    /// Sum of `price` over sold transactions.
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

impl Engine {
    /// Computes the sales totals for the filter's month.
    ///
    /// A month is required. A month without transactions yields all zeros.
    pub async fn statistics(&self, filter: &TransactionFilter) -> ResultEngine<SalesStatistics> {
        filter.require_month()?;

        let sold = || {
            transactions::Entity::find()
                .apply_filter(filter)
                .filter(transactions::Column::Sold.eq(true))
        };

        let total_sale_amount = sold()
            .select_only()
            .column_as(Expr::col(transactions::Column::Price).sum(), "total_sale_amount")
            .into_tuple::<Option<f64>>()
            .one(&self.database)
            .await?
            .flatten()
            .unwrap_or_default();
        let total_sold_items = sold().count(&self.database).await?;
        let total_not_sold_items = transactions::Entity::find()
            .apply_filter(filter)
            .filter(transactions::Column::Sold.eq(false))
            .count(&self.database)
            .await?;

        Ok(SalesStatistics {
            total_sale_amount,
            total_sold_items,
            total_not_sold_items,
        })
    }
}
