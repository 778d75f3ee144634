use axum::{Router, routing::post, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swap_runtime::{RouteKind, RouteOutcome, RoutePlan};
use crate::SwapApiState;

use super::error_status;

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub from: String,
    pub to: String,
    /// Whole-token decimal amount, e.g. "1.5"
    pub amount: String,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub kind: RouteKind,
    pub description: String,
    pub legs: Vec<LegEntry>,
    pub amount_in: String,
    pub expected_output: String,
    pub expected_output_raw: String,
    pub exchange_rate: Option<String>,
    pub encoded_path: String,
}

#[derive(Serialize)]
pub struct LegEntry {
    pub token_in: String,
    pub token_out: String,
    pub fee: u32,
}

impl QuoteResponse {
    fn new(plan: &RoutePlan, amount_in: String, expected_output: String, rate: Option<String>) -> Self {
        Self {
            kind: plan.kind,
            description: plan.description.clone(),
            legs: plan
                .legs
                .iter()
                .map(|leg| LegEntry {
                    token_in: leg.token_in.symbol.clone(),
                    token_out: leg.token_out.symbol.clone(),
                    fee: leg.fee.as_u32(),
                })
                .collect(),
            amount_in,
            expected_output,
            expected_output_raw: plan.expected_output_amount.to_string(),
            exchange_rate: rate,
            encoded_path: format!("0x{}", hex::encode(&plan.encoded_path)),
        }
    }
}

pub fn router() -> Router<Arc<SwapApiState>> {
    Router::new().route("/quote", post(quote))
}

async fn quote(
    State(state): State<Arc<SwapApiState>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, (StatusCode, String)> {
    let quote = state
        .service
        .quote(&request.from, &request.to, &request.amount)
        .await
        .map_err(error_status)?;

    match &quote.outcome {
        RouteOutcome::Found(plan) => Ok(Json(QuoteResponse::new(
            plan,
            quote.amount_in.to_string(),
            quote.expected_output.clone().unwrap_or_default(),
            quote.exchange_rate.map(|r| r.normalize().to_string()),
        ))),
        RouteOutcome::NoRouteFound => Err((StatusCode::NOT_FOUND, "No route found".into())),
    }
}
