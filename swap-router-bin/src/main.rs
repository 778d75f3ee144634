use std::sync::Arc;

use anyhow::Context;
use swap_http_api::{SwapApiState, build_router};
use swap_runtime::chain::read_only_provider;
use swap_runtime::config::RoutingConfig;
use swap_runtime::registry::TokenRegistry;
use swap_runtime::{QuoterClient, SwapService};

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}

fn load_routing_config() -> anyhow::Result<RoutingConfig> {
    match std::env::var("SWAP_ROUTING_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading routing config from {path}");
            RoutingConfig::from_json_file(&path).context("routing config")
        }
        Err(_) => Ok(RoutingConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_log();

    let rpc_url = std::env::var("SWAP_RPC_URL")
        .or_else(|_| std::env::var("RPC_URL"))
        .unwrap_or_else(|_| "http://localhost:8545".to_string());

    let port: u16 = std::env::var("SWAP_API_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(9200);

    let api_token = std::env::var("SWAP_API_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());

    let config = load_routing_config()?;
    let provider = read_only_provider(&rpc_url).context("rpc provider")?;
    let oracle = QuoterClient::with_quoter(provider, config.quoter_address);

    tracing::info!(
        rpc_url = %rpc_url,
        quoter = %config.quoter_address,
        router = %config.router_address,
        fee_tiers = ?config.fee_tiers,
        intermediaries = ?config.intermediaries,
        concurrency = ?config.quote_concurrency,
        auth = api_token.is_some(),
        "Swap router configured"
    );

    let service = SwapService::new(TokenRegistry::mainnet(), config, Arc::new(oracle))
        .context("swap service")?;
    let state = Arc::new(SwapApiState { service, api_token });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("bind 0.0.0.0:{port}"))?;
    tracing::info!("Swap router API listening on 0.0.0.0:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down swap router");
        })
        .await
        .context("http server")?;

    Ok(())
}
