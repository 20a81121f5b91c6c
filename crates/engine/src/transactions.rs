//! Transaction records.
//!
//! A `Transaction` is one product sale as delivered by the feed. Records are
//! only ever written in bulk by [`Engine::replace_transactions`] and are read
//! back unchanged by every query.
//!
//! [`Engine::replace_transactions`]: crate::Engine::replace_transactions

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Identifier assigned by the feed. Not unique and not the storage key.
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date_of_sale: Option<DateTime<Utc>>,
    pub category: String,
    pub sold: bool,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub external_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date_of_sale: Option<DateTimeUtc>,
    pub category: String,
    pub sold: bool,
    pub image: String,
    /// Lowercased title, description and category, matched by text search.
    pub search_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::NotSet,
            external_id: ActiveValue::Set(tx.id.clone()),
            title: ActiveValue::Set(tx.title.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            price: ActiveValue::Set(tx.price),
            date_of_sale: ActiveValue::Set(tx.date_of_sale),
            category: ActiveValue::Set(tx.category.clone()),
            sold: ActiveValue::Set(tx.sold),
            image: ActiveValue::Set(tx.image.clone()),
            search_key: ActiveValue::Set(search_key(tx)),
        }
    }
}

/// Folds a string for text search. SQLite's `LIKE` only folds ASCII, so the
/// stored key and the search text are both lowercased up front.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn search_key(tx: &Transaction) -> String {
    [&tx.title, &tx.description, &tx.category]
        .map(|field| fold_case(field))
        .join(SEARCH_KEY_SEPARATOR)
}

// Keeps a search from matching across two fields.
const SEARCH_KEY_SEPARATOR: &str = "\u{1f}";

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.external_id,
            title: model.title,
            description: model.description,
            price: model.price,
            date_of_sale: model.date_of_sale,
            category: model.category,
            sold: model.sold,
            image: model.image,
        }
    }
}
