use axum::{Router, routing::get, extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use crate::SwapApiState;

#[derive(Serialize)]
pub struct TokenEntry {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
    pub native: bool,
    pub protocol_only: bool,
}

pub fn router() -> Router<Arc<SwapApiState>> {
    Router::new().route("/tokens", get(list_tokens))
}

async fn list_tokens(State(state): State<Arc<SwapApiState>>) -> Json<Vec<TokenEntry>> {
    let config = state.service.config();
    let tokens = state
        .service
        .registry()
        .tokens()
        .iter()
        .map(|t| TokenEntry {
            symbol: t.symbol.clone(),
            address: t.address.to_string(),
            decimals: t.decimals,
            native: t.native,
            protocol_only: config.is_protocol_only(&t.symbol),
        })
        .collect();
    Json(tokens)
}
