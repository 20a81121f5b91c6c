//! Aggregate API endpoints: statistics, bar chart, pie chart and the
//! combined view of all three.

use api_types::stats::{CategoryCounts, CombinedData, MonthQuery, PriceRange, Statistic};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use engine::{PriceBucket, SalesStatistics, TransactionFilter};

use crate::{ServerError, server::ServerState};

fn map_statistics(stats: SalesStatistics) -> Statistic {
    Statistic {
        total_sale_amount: stats.total_sale_amount,
        total_sold_items: stats.total_sold_items,
        total_not_sold_items: stats.total_not_sold_items,
    }
}

fn map_buckets(buckets: Vec<PriceBucket>) -> Vec<PriceRange> {
    buckets
        .into_iter()
        .map(|bucket| PriceRange {
            range: bucket.label(),
            count: bucket.count,
        })
        .collect()
}

fn month_filter(
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<TransactionFilter, ServerError> {
    let Query(params) = query.map_err(|err| ServerError::Generic(err.body_text()))?;
    tracing::debug!(month = ?params.month, "aggregate request");
    Ok(TransactionFilter::for_month(params.month.as_deref())?)
}

/// Handle requests for the monthly sales statistics
pub async fn get_stats(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Statistic>, ServerError> {
    let filter = month_filter(query)?;
    let stats = state.engine.statistics(&filter).await?;
    Ok(Json(map_statistics(stats)))
}

/// Handle requests for the price-range bar chart
pub async fn bar_chart(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceRange>>, ServerError> {
    let filter = month_filter(query)?;
    let buckets = state.engine.price_histogram(&filter).await?;
    Ok(Json(map_buckets(buckets)))
}

/// Handle requests for the category pie chart
pub async fn pie_chart(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CategoryCounts>, ServerError> {
    let filter = month_filter(query)?;
    let distribution = state.engine.category_distribution(&filter).await?;
    Ok(Json(distribution))
}

/// Handle requests for statistics, bar chart and pie chart in one response
pub async fn combined(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CombinedData>, ServerError> {
    let filter = month_filter(query)?;
    let dashboard = state.engine.dashboard(&filter).await?;

    Ok(Json(CombinedData {
        statistics: map_statistics(dashboard.statistics),
        bar_chart: map_buckets(dashboard.histogram),
        pie_chart: dashboard.distribution,
    }))
}
