//! JSON and query-string types of the transactions HTTP API.
//!
//! Field names are camelCase on the wire, matching what the dashboard
//! frontend sends and reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod transaction {
    use super::*;

    /// Query string of the list endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionList {
        /// 1-based page number (default 1).
        pub page: Option<u64>,
        /// Page size (default 10).
        pub per_page: Option<u64>,
        /// Free text matched against title, description, category and price.
        pub search: Option<String>,
        /// English month name, e.g. `March`.
        pub month: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        pub title: String,
        pub description: String,
        pub price: f64,
        pub date_of_sale: Option<DateTime<Utc>>,
        pub category: String,
        pub sold: bool,
        pub image: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        /// Matches across all pages.
        pub total: u64,
        pub page: u64,
        pub per_page: u64,
    }
}

pub mod stats {
    use std::collections::BTreeMap;

    use super::*;

    /// Query string of the aggregate endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MonthQuery {
        pub month: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Statistic {
        pub total_sale_amount: f64,
        pub total_sold_items: u64,
        pub total_not_sold_items: u64,
    }

    /// One bar of the price-range chart.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PriceRange {
        /// Inclusive range label such as `"101-200"`.
        pub range: String,
        pub count: u64,
    }

    /// Pie chart slices: category name to number of transactions.
    pub type CategoryCounts = BTreeMap<String, u64>;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CombinedData {
        pub statistics: Statistic,
        pub bar_chart: Vec<PriceRange>,
        pub pie_chart: CategoryCounts,
    }
}

#[cfg(test)]
mod tests {
    use super::{stats::*, transaction::*};

    #[test]
    fn list_response_uses_camel_case() {
        let body = TransactionListResponse {
            transactions: Vec::new(),
            total: 0,
            page: 1,
            per_page: 10,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"transactions": [], "total": 0, "page": 1, "perPage": 10})
        );
    }

    #[test]
    fn combined_data_field_names() {
        let body = CombinedData {
            statistics: Statistic {
                total_sale_amount: 12.5,
                total_sold_items: 1,
                total_not_sold_items: 2,
            },
            bar_chart: vec![PriceRange {
                range: "0-100".to_string(),
                count: 3,
            }],
            pie_chart: CategoryCounts::from([("electronics".to_string(), 3)]),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statistics"]["totalSaleAmount"], 12.5);
        assert_eq!(json["statistics"]["totalNotSoldItems"], 2);
        assert_eq!(json["barChart"][0]["range"], "0-100");
        assert_eq!(json["pieChart"]["electronics"], 3);
    }
}
