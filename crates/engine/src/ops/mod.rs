mod dashboard;
mod distribution;
mod histogram;
mod list;
mod replace;
mod statistics;

pub use dashboard::Dashboard;
pub use histogram::{PRICE_BUCKETS, PriceBucket};
pub use list::TransactionPage;
pub use statistics::SalesStatistics;
