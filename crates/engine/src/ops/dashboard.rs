use std::collections::BTreeMap;

use crate::{Engine, EngineError, ResultEngine, filter::TransactionFilter};

use super::{PriceBucket, SalesStatistics};

/// Statistics, histogram and distribution for one month.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub statistics: SalesStatistics,
    pub histogram: Vec<PriceBucket>,
    pub distribution: BTreeMap<String, u64>,
}

impl Engine {
    /// Runs the three aggregates for the filter's month concurrently.
    ///
    /// The month is checked up front; any failure after that is reported as
    /// [`EngineError::UpstreamFailure`].
    pub async fn dashboard(&self, filter: &TransactionFilter) -> ResultEngine<Dashboard> {
        filter.require_month()?;

        let (statistics, histogram, distribution) = tokio::try_join!(
            self.statistics(filter),
            self.price_histogram(filter),
            self.category_distribution(filter),
        )
        .map_err(EngineError::upstream)?;

        Ok(Dashboard {
            statistics,
            histogram,
            distribution,
        })
    }
}
