//! Routing configuration: the candidate sets and periphery addresses a
//! discovery run is parameterised with.

use std::path::Path;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::discovery::QuoteConcurrency;
use crate::error::RoutingError;
use crate::oracle::UNISWAP_V3_QUOTER;
use crate::registry::TokenRegistry;
use crate::swap::UNISWAP_V3_ROUTER;
use crate::types::{FeeTier, Token};

/// Default swap deadline: 30 minutes after the transaction is built.
pub const DEFAULT_DEADLINE_SECS: u64 = 1800;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Tried in this order; earlier tiers win ties.
    pub fee_tiers: Vec<FeeTier>,
    /// Intermediary symbols for two-hop fallback routes, tried in this order.
    pub intermediaries: Vec<String>,
    pub quoter_address: Address,
    pub router_address: Address,
    /// Destination symbols without pool liquidity, acquired from their protocol instead.
    pub protocol_only_tokens: Vec<String>,
    pub quote_concurrency: QuoteConcurrency,
    pub deadline_secs: u64,
    pub default_slippage_bps: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            fee_tiers: FeeTier::ALL.to_vec(),
            intermediaries: ["WETH", "USDC", "USDT", "WSTETH"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quoter_address: UNISWAP_V3_QUOTER,
            router_address: UNISWAP_V3_ROUTER,
            protocol_only_tokens: Vec::new(),
            quote_concurrency: QuoteConcurrency::Sequential,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            default_slippage_bps: 0,
        }
    }
}

impl RoutingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RoutingError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RoutingError::ConfigError(format!("Invalid routing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RoutingError::ConfigError(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.fee_tiers.is_empty() {
            return Err(RoutingError::ConfigError("fee_tiers must not be empty".into()));
        }
        if self.intermediaries.is_empty() {
            return Err(RoutingError::ConfigError(
                "intermediaries must not be empty".into(),
            ));
        }
        if self.default_slippage_bps > 10_000 {
            return Err(RoutingError::ConfigError(format!(
                "default_slippage_bps {} exceeds 10000",
                self.default_slippage_bps
            )));
        }
        Ok(())
    }

    /// Resolve intermediary symbols against the registry, preserving order.
    pub fn resolve_intermediaries(&self, registry: &TokenRegistry) -> Result<Vec<Token>, RoutingError> {
        self.intermediaries
            .iter()
            .map(|symbol| registry.get(symbol).cloned())
            .collect()
    }

    pub fn is_protocol_only(&self, symbol: &str) -> bool {
        self.protocol_only_tokens
            .iter()
            .any(|s| s.eq_ignore_ascii_case(symbol))
    }
}
