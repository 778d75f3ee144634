//! Symbol-level quoting and swap building for the dashboard.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;

use crate::amounts::{exchange_rate, format_amount, min_output_with_slippage, parse_amount};
use crate::config::RoutingConfig;
use crate::discovery::RouteDiscoverer;
use crate::error::RoutingError;
use crate::oracle::QuoteOracle;
use crate::registry::TokenRegistry;
use crate::swap::{SwapCallBuilder, SwapParams, SwapTransaction};
use crate::types::{DiscoveryRequest, RouteOutcome, RoutePlan, Token};

/// Result of quoting a human-entered amount.
#[derive(Debug, Clone)]
pub struct SwapQuote {
    pub from: Token,
    pub to: Token,
    pub amount_in: U256,
    pub outcome: RouteOutcome,
    /// Expected output in whole destination tokens, when a route exists.
    pub expected_output: Option<String>,
    pub exchange_rate: Option<Decimal>,
}

/// Transactions to submit in order to perform a quoted swap.
#[derive(Debug, Clone)]
pub struct SwapBundle {
    pub plan: RoutePlan,
    pub amount_out_minimum: U256,
    pub transactions: Vec<SwapTransaction>,
}

pub struct SwapService {
    registry: TokenRegistry,
    config: RoutingConfig,
    intermediaries: Vec<Token>,
    discoverer: RouteDiscoverer,
    builder: SwapCallBuilder,
}

impl SwapService {
    pub fn new(
        registry: TokenRegistry,
        config: RoutingConfig,
        oracle: Arc<dyn QuoteOracle>,
    ) -> Result<Self, RoutingError> {
        config.validate()?;
        let intermediaries = config.resolve_intermediaries(&registry)?;
        let discoverer = RouteDiscoverer::new(oracle).with_concurrency(config.quote_concurrency);
        let builder = SwapCallBuilder::with_router(config.router_address);
        Ok(Self {
            registry,
            config,
            intermediaries,
            discoverer,
            builder,
        })
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Quote swapping `amount` (whole-token decimal string) of `from` into `to`.
    pub async fn quote(&self, from: &str, to: &str, amount: &str) -> Result<SwapQuote, RoutingError> {
        let source = self.registry.get(from)?.clone();
        let destination = self.registry.get(to)?.clone();
        // The router pays out the pool token; there is no unwrap step.
        if destination.native {
            return Err(RoutingError::InvalidRequest(format!(
                "{} cannot be a swap destination, use WETH",
                destination.symbol
            )));
        }
        if self.config.is_protocol_only(&destination.symbol) {
            return Err(RoutingError::ProtocolOnlyToken(destination.symbol));
        }

        let amount_in = parse_amount(amount, source.decimals)?;
        let request = DiscoveryRequest {
            source: source.clone(),
            destination: destination.clone(),
            amount_in,
            intermediaries: self.intermediaries.clone(),
            fee_tiers: self.config.fee_tiers.clone(),
        };
        let outcome = self.discoverer.discover_route(&request).await?;

        let (expected_output, rate) = match outcome.plan() {
            Some(plan) => {
                let out = format_amount(plan.expected_output_amount, destination.decimals)?;
                let rate = exchange_rate(&format_amount(amount_in, source.decimals)?, &out)?;
                (Some(out), Some(rate))
            }
            None => (None, None),
        };

        Ok(SwapQuote {
            from: source,
            to: destination,
            amount_in,
            outcome,
            expected_output,
            exchange_rate: rate,
        })
    }

    /// Quote, then build the approval (for non-native input) and router call.
    ///
    /// `slippage_bps` defaults to the configured tolerance.
    pub async fn build_swap(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        recipient: Address,
        slippage_bps: Option<u32>,
    ) -> Result<SwapBundle, RoutingError> {
        let quote = self.quote(from, to, amount).await?;
        let plan = quote.outcome.into_plan().ok_or_else(|| RoutingError::NoRoute {
            from: quote.from.symbol.clone(),
            to: quote.to.symbol.clone(),
        })?;

        let slippage = slippage_bps.unwrap_or(self.config.default_slippage_bps);
        let amount_out_minimum = min_output_with_slippage(plan.expected_output_amount, slippage)?;
        let params = SwapParams::with_deadline_from_now(
            recipient,
            quote.amount_in,
            amount_out_minimum,
            self.config.deadline_secs,
        );

        let mut transactions = Vec::with_capacity(2);
        if !quote.from.native {
            transactions.push(self.builder.approval(quote.from.address, quote.amount_in));
        }
        transactions.push(self.builder.build(&plan, &params)?);

        tracing::info!(
            route = %plan.description,
            amount_in = %quote.amount_in,
            min_out = %amount_out_minimum,
            "swap transactions built"
        );

        Ok(SwapBundle {
            plan,
            amount_out_minimum,
            transactions,
        })
    }
}
