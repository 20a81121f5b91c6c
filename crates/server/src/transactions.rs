//! Transactions list endpoint

use api_types::transaction::{TransactionList, TransactionListResponse, TransactionView};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use engine::{PageRequest, TransactionFilter};

use crate::{ServerError, server::ServerState};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        title: tx.title,
        description: tx.description,
        price: tx.price,
        date_of_sale: tx.date_of_sale,
        category: tx.category,
        sold: tx.sold,
        image: tx.image,
    }
}

/// Handle requests for a page of transactions, optionally searched and
/// filtered by month.
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionList>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let Query(params) = query.map_err(|err| ServerError::Generic(err.body_text()))?;
    tracing::debug!(?params, "list transactions");

    let filter = TransactionFilter::parse(params.month.as_deref(), params.search.as_deref())?;
    let page = PageRequest::new(params.page, params.per_page)?;

    let result = state.engine.list_transactions(&filter, page).await?;

    Ok(Json(TransactionListResponse {
        transactions: result
            .transactions
            .into_iter()
            .map(map_transaction)
            .collect(),
        total: result.total,
        page: page.page,
        per_page: page.per_page,
    }))
}
