use alloy::primitives::Address;
use axum::{Router, routing::post, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::SwapApiState;

use super::error_status;

#[derive(Deserialize)]
pub struct BuildSwapRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub recipient: String,
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

#[derive(Serialize)]
pub struct BuildSwapResponse {
    pub description: String,
    pub expected_output_raw: String,
    pub amount_out_minimum: String,
    /// Submit in order: approval (ERC-20 input only), then the router call.
    pub transactions: Vec<TransactionEntry>,
}

#[derive(Serialize)]
pub struct TransactionEntry {
    pub to: String,
    pub data: String,
    pub value: String,
}

pub fn router() -> Router<Arc<SwapApiState>> {
    Router::new().route("/swap/build", post(build_swap))
}

async fn build_swap(
    State(state): State<Arc<SwapApiState>>,
    Json(request): Json<BuildSwapRequest>,
) -> Result<Json<BuildSwapResponse>, (StatusCode, String)> {
    let recipient: Address = request
        .recipient
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid recipient: {e}")))?;

    let bundle = state
        .service
        .build_swap(
            &request.from,
            &request.to,
            &request.amount,
            recipient,
            request.slippage_bps,
        )
        .await
        .map_err(error_status)?;

    let transactions = bundle
        .transactions
        .iter()
        .map(|tx| TransactionEntry {
            to: tx.to.to_string(),
            data: format!("0x{}", hex::encode(&tx.calldata)),
            value: tx.value.to_string(),
        })
        .collect();

    Ok(Json(BuildSwapResponse {
        description: bundle.plan.description,
        expected_output_raw: bundle.plan.expected_output_amount.to_string(),
        amount_out_minimum: bundle.amount_out_minimum.to_string(),
        transactions,
    }))
}
