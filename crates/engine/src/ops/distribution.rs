use std::collections::BTreeMap;

use sea_orm::{QuerySelect, prelude::*, sea_query::Expr};

use crate::{
    Engine, ResultEngine,
    filter::{ApplyTransactionFilter, TransactionFilter},
    transactions,
};

impl Engine {
    /// Counts matching transactions per category.
    ///
    /// Only categories present in the filtered set appear as keys.
    pub async fn category_distribution(
        &self,
        filter: &TransactionFilter,
    ) -> ResultEngine<BTreeMap<String, u64>> {
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(Expr::col(transactions::Column::Id).count(), "count")
            .apply_filter(filter)
            .group_by(transactions::Column::Category)
            .into_tuple::<(String, i64)>()
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| (category, u64::try_from(count).unwrap_or_default()))
            .collect())
    }
}
