//! Typed query filters.
//!
//! Every read operation takes a [`TransactionFilter`]. Raw query-string values
//! are validated once in [`TransactionFilter::parse`], so an unknown month
//! name is rejected before the database is touched.

use chrono::Month;
use sea_orm::{
    Condition, QueryFilter,
    prelude::*,
    sea_query::{Expr, LikeExpr, SimpleExpr},
};

use crate::{EngineError, ResultEngine, transactions};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

const LIKE_ESCAPE: char = '\\';
const MAX_SQL_INT: u64 = i64::MAX as u64;

/// Filters shared by the list and aggregate operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    /// Calendar month of `date_of_sale`, in any year.
    pub month: Option<Month>,
    /// Case-insensitive substring matched against title, description and
    /// category. Case folding covers non-ASCII letters.
    pub search_text: Option<String>,
    /// Exact price match, OR-ed with the text conditions.
    pub price_equals: Option<f64>,
}

impl TransactionFilter {
    /// Builds a filter from raw query-string values.
    ///
    /// Empty values count as absent. `search` is trimmed and, when it parses
    /// as a finite number, also matches on price.
    pub fn parse(month: Option<&str>, search: Option<&str>) -> ResultEngine<Self> {
        let month = month
            .filter(|name| !name.is_empty())
            .map(parse_month)
            .transpose()?;

        let search_text = search
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string);
        let price_equals = search_text
            .as_deref()
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|price| price.is_finite());

        Ok(Self {
            month,
            search_text,
            price_equals,
        })
    }

    /// Shorthand for the aggregate endpoints, which only filter by month.
    pub fn for_month(month: Option<&str>) -> ResultEngine<Self> {
        Self::parse(month, None)
    }

    pub fn require_month(&self) -> ResultEngine<Month> {
        self.month
            .ok_or_else(|| EngineError::InvalidParameter("month is required".to_string()))
    }

    pub(crate) fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(text) = &self.search_text {
            condition = condition.add(search_condition(text, self.price_equals));
        }
        if let Some(month) = self.month {
            condition = condition.add(month_condition(month));
        }
        condition
    }
}

/// Resolves an English month name, matched exactly (`"March"`, not `"march"`
/// or `"Mar"`).
pub fn parse_month(name: &str) -> ResultEngine<Month> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|month| month.name() == name)
        .ok_or_else(|| EngineError::InvalidParameter(format!("invalid month value: {name}")))
}

/// Page window for the list operation. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> ResultEngine<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page == 0 {
            return Err(EngineError::InvalidParameter(
                "page must be >= 1".to_string(),
            ));
        }
        if per_page == 0 {
            return Err(EngineError::InvalidParameter(
                "perPage must be >= 1".to_string(),
            ));
        }
        // LIMIT and OFFSET are bound as signed 64-bit integers.
        if page > MAX_SQL_INT || per_page > MAX_SQL_INT {
            return Err(EngineError::InvalidParameter(
                "page and perPage must be <= 9223372036854775807".to_string(),
            ));
        }
        let in_range = (page - 1)
            .checked_mul(per_page)
            .is_some_and(|offset| offset <= MAX_SQL_INT);
        if !in_range {
            return Err(EngineError::InvalidParameter(
                "page is out of range".to_string(),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub(crate) fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

pub(crate) trait ApplyTransactionFilter: QueryFilter + Sized {
    fn apply_filter(self, filter: &TransactionFilter) -> Self;
}

impl<T> ApplyTransactionFilter for T
where
    T: QueryFilter + Sized,
{
    fn apply_filter(self, filter: &TransactionFilter) -> Self {
        self.filter(filter.condition())
    }
}

fn search_condition(text: &str, price_equals: Option<f64>) -> Condition {
    let pattern = format!("%{}%", escape_like(&transactions::fold_case(text)));

    let mut any = Condition::any().add(
        transactions::Column::SearchKey.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
    );
    if let Some(price) = price_equals {
        any = any.add(transactions::Column::Price.eq(price));
    }
    any
}

// SQLite keeps timestamps as text; strftime reads the month back out of it.
fn month_condition(month: Month) -> SimpleExpr {
    Expr::cust_with_values(
        "CAST(strftime('%m', \"date_of_sale\") AS INTEGER) = ?",
        [month.number_from_month() as i32],
    )
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
