//! Read-only chain access for quoting.
//!
//! Quotes are plain `eth_call`s, so the provider carries no signer and no
//! transaction fillers.

use alloy::network::Ethereum;
use alloy::providers::RootProvider;

use crate::error::RoutingError;

/// The concrete provider type used by the on-chain quoter.
pub type HttpProvider = RootProvider<Ethereum>;

/// Create a read-only HTTP provider from an RPC URL.
pub fn read_only_provider(rpc_url: &str) -> Result<HttpProvider, RoutingError> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| RoutingError::ConfigError(format!("Invalid RPC URL: {e}")))?;

    Ok(RootProvider::new_http(url))
}
