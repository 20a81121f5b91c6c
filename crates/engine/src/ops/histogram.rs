use sea_orm::{PaginatorTrait, QueryFilter, prelude::*};

use crate::{
    Engine, ResultEngine,
    filter::{ApplyTransactionFilter, TransactionFilter},
    transactions,
};

/// Upper label of the open-ended last bucket (2^53 - 1).
const UNBOUNDED_PRICE: u64 = 9_007_199_254_740_991;

/// Labelled price ranges, inclusive on both ends, in display order.
pub const PRICE_BUCKETS: [(u64, u64); 10] = [
    (0, 100),
    (101, 200),
    (201, 300),
    (301, 400),
    (401, 500),
    (501, 600),
    (601, 700),
    (701, 800),
    (801, 900),
    (901, UNBOUNDED_PRICE),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceBucket {
    pub min: u64,
    pub max: u64,
    pub count: u64,
}

impl PriceBucket {
    /// Label as shown on the chart axis, e.g. `"101-200"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Bounds actually queried for bucket `index`: `(lower exclusive, upper inclusive)`.
///
/// Each bucket starts where the previous one ended, so fractional prices such
/// as 100.5 land in exactly one bucket. The first bucket has no lower bound and
/// the last no upper bound.
fn bucket_bounds(index: usize) -> (Option<f64>, Option<f64>) {
    let lower = index
        .checked_sub(1)
        .map(|prev| PRICE_BUCKETS[prev].1 as f64);
    let upper = (index + 1 < PRICE_BUCKETS.len()).then(|| PRICE_BUCKETS[index].1 as f64);
    (lower, upper)
}

impl Engine {
    /// Counts matching transactions per price range.
    ///
    /// Always returns the ten buckets of [`PRICE_BUCKETS`] in order, including
    /// empty ones. The counts add up to the number of matching transactions.
    pub async fn price_histogram(
        &self,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<PriceBucket>> {
        let mut buckets = Vec::with_capacity(PRICE_BUCKETS.len());

        for (index, &(min, max)) in PRICE_BUCKETS.iter().enumerate() {
            let mut query = transactions::Entity::find().apply_filter(filter);
            let (lower, upper) = bucket_bounds(index);
            if let Some(lower) = lower {
                query = query.filter(transactions::Column::Price.gt(lower));
            }
            if let Some(upper) = upper {
                query = query.filter(transactions::Column::Price.lte(upper));
            }

            let count = query.count(&self.database).await?;
            buckets.push(PriceBucket { min, max, count });
        }

        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_for_price(price: f64) -> usize {
        (0..PRICE_BUCKETS.len())
            .find(|&index| match bucket_bounds(index) {
                (_, Some(upper)) => price <= upper,
                (_, None) => true,
            })
            .unwrap_or(PRICE_BUCKETS.len() - 1)
    }

    #[test]
    fn labels_follow_the_fixed_ranges() {
        let labels: Vec<String> = PRICE_BUCKETS
            .iter()
            .map(|&(min, max)| PriceBucket { min, max, count: 0 }.label())
            .collect();
        assert_eq!(labels[0], "0-100");
        assert_eq!(labels[1], "101-200");
        assert_eq!(labels[8], "801-900");
        assert_eq!(labels[9], "901-9007199254740991");
    }

    #[test]
    fn boundaries_fall_in_one_bucket() {
        assert_eq!(bucket_for_price(0.0), 0);
        assert_eq!(bucket_for_price(100.0), 0);
        assert_eq!(bucket_for_price(101.0), 1);
        assert_eq!(bucket_for_price(200.0), 1);
        assert_eq!(bucket_for_price(900.0), 8);
        assert_eq!(bucket_for_price(901.0), 9);
    }

    #[test]
    fn fractional_prices_between_labels_go_up() {
        assert_eq!(bucket_for_price(100.5), 1);
        assert_eq!(bucket_for_price(900.01), 9);
    }

    #[test]
    fn open_ended_buckets() {
        assert_eq!(bucket_bounds(0), (None, Some(100.0)));
        assert_eq!(bucket_bounds(9), (Some(900.0), None));
        assert_eq!(bucket_for_price(-5.0), 0);
        assert_eq!(bucket_for_price(1.0e12), 9);
    }
}
