//! Startup seeding: download the transactions feed and replace the store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use engine::{Engine, EngineError, Transaction};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::settings;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to store transactions: {0}")]
    Store(#[from] EngineError),
}

/// One element of the feed's JSON array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecord {
    #[serde(default, deserialize_with = "external_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub date_of_sale: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub image: String,
}

// The feed sends numeric ids; strings are kept as they are.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExternalId {
    Text(String),
    Number(serde_json::Number),
}

fn external_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ExternalId>::deserialize(deserializer)? {
        Some(ExternalId::Text(text)) => text,
        Some(ExternalId::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

impl From<FeedRecord> for Transaction {
    fn from(record: FeedRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            price: record.price,
            date_of_sale: record.date_of_sale,
            category: record.category,
            sold: record.sold,
            image: record.image,
        }
    }
}

/// Download and decode the feed at `url`. Non-2xx responses are errors.
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Transaction>, SeedError> {
    let records = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<FeedRecord>>()
        .await?;

    Ok(records.into_iter().map(Transaction::from).collect())
}

/// Replace the store with the current feed contents.
///
/// Must not run while the server is answering requests: readers could see
/// the store empty or half filled.
pub async fn seed(engine: &Engine, settings: &settings::Seed) -> Result<u64, SeedError> {
    tracing::info!(url = %settings.url, "fetching transactions feed");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    let records = fetch_feed(&client, &settings.url).await?;
    tracing::debug!(records = records.len(), "feed downloaded");

    Ok(engine.replace_transactions(&records).await?)
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use migration::MigratorTrait;
    use serde_json::{Value, json};

    use super::*;

    fn feed() -> Value {
        json!([
            {
                "id": 1,
                "title": "Fjallraven Foldsack No. 1 Backpack",
                "price": 329.85,
                "description": "Your perfect pack for everyday use",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
                "sold": false,
                "dateOfSale": "2021-11-27T20:29:54+05:30"
            },
            {
                "id": "2",
                "title": "Mens Casual Premium Slim Fit T-Shirts",
                "price": 44.6,
                "description": "Slim-fitting style",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
                "sold": true,
                "dateOfSale": "2021-10-27T20:29:54Z"
            },
            {
                "title": "Solid Gold Petite Micropave",
                "price": 168,
                "category": "jewelery"
            }
        ])
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn engine() -> Engine {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    #[test]
    fn decodes_feed_records() {
        let records: Vec<FeedRecord> = serde_json::from_value(feed()).unwrap();
        let txs: Vec<Transaction> = records.into_iter().map(Transaction::from).collect();

        assert_eq!(txs[0].id, "1");
        assert_eq!(txs[1].id, "2");
        assert_eq!(txs[0].price, 329.85);
        assert!(!txs[0].sold);
        assert!(txs[1].sold);
        // +05:30 offset is normalised to UTC
        assert_eq!(
            txs[0].date_of_sale.unwrap().to_rfc3339(),
            "2021-11-27T14:59:54+00:00"
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let records: Vec<FeedRecord> = serde_json::from_value(feed()).unwrap();
        let tx = Transaction::from(records.into_iter().nth(2).unwrap());

        assert_eq!(tx.id, "");
        assert_eq!(tx.price, 168.0);
        assert_eq!(tx.description, "");
        assert!(!tx.sold);
        assert!(tx.date_of_sale.is_none());
    }

    #[tokio::test]
    async fn fetches_feed_over_http() {
        let base = serve(Router::new().route("/feed.json", get(|| async { Json(feed()) }))).await;

        let txs = fetch_feed(&reqwest::Client::new(), &format!("{base}/feed.json"))
            .await
            .unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[1].title, "Mens Casual Premium Slim Fit T-Shirts");
    }

    #[tokio::test]
    async fn error_status_is_a_fetch_error() {
        let base = serve(Router::new().route(
            "/feed.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        ))
        .await;

        let err = fetch_feed(&reqwest::Client::new(), &format!("{base}/feed.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Fetch(_)));
    }

    #[tokio::test]
    async fn seed_replaces_store_with_feed() {
        let base = serve(Router::new().route("/feed.json", get(|| async { Json(feed()) }))).await;
        let engine = engine().await;
        let settings = settings::Seed {
            enabled: true,
            url: format!("{base}/feed.json"),
            timeout_secs: 5,
        };

        assert_eq!(seed(&engine, &settings).await.unwrap(), 3);
        // seeding again replaces rather than appends
        assert_eq!(seed(&engine, &settings).await.unwrap(), 3);
        assert_eq!(engine.count_transactions().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn failed_seed_keeps_previous_contents() {
        let engine = engine().await;
        let good = serve(Router::new().route("/feed.json", get(|| async { Json(feed()) }))).await;
        let mut settings = settings::Seed {
            enabled: true,
            url: format!("{good}/feed.json"),
            timeout_secs: 5,
        };
        seed(&engine, &settings).await.unwrap();

        settings.url = format!("{good}/missing.json");
        assert!(seed(&engine, &settings).await.is_err());
        assert_eq!(engine.count_transactions().await.unwrap(), 3);
    }
}
