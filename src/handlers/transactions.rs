use super::sessions::AppState;
use crate::{
    error::CryptoTapError,
    models::{ApiResponse, TransactionRecord},
};
use axum::{extract::State, Json};

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionRecord>>>, CryptoTapError> {
    let records = state.controller.recorder().list_recent().await?;

    tracing::info!("Transaction history served: {} records", records.len());

    Ok(Json(ApiResponse::ok(records)))
}
