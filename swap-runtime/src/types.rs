use std::fmt;

use alloy::primitives::{Address, Bytes, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// A tradable asset known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
    /// Chain gas token. Quotes and routes through `address` (the wrapped token)
    /// while swaps sourced from it carry a transaction value.
    #[serde(default)]
    pub native: bool,
}

impl Token {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
            native: false,
        }
    }

    pub fn native(symbol: impl Into<String>, wrapped: Address, decimals: u8) -> Self {
        Self {
            native: true,
            ..Self::new(symbol, wrapped, decimals)
        }
    }
}

/// Uniswap V3 pool fee tiers, in hundredths of a basis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    /// 0.01%
    Lowest,
    /// 0.05%
    Low,
    /// 0.3%
    Medium,
    /// 1%
    High,
}

impl FeeTier {
    pub const ALL: [FeeTier; 4] = [FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High];

    pub const fn as_u32(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }

    /// Fee as a percentage, e.g. `0.3` for the 3000 tier.
    pub fn percent(self) -> Decimal {
        Decimal::new(i64::from(self.as_u32()), 4).normalize()
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = RoutingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(FeeTier::Lowest),
            500 => Ok(FeeTier::Low),
            3000 => Ok(FeeTier::Medium),
            10000 => Ok(FeeTier::High),
            other => Err(RoutingError::UnsupportedFeeTier(other)),
        }
    }
}

impl From<FeeTier> for u32 {
    fn from(fee: FeeTier) -> Self {
        fee.as_u32()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    DirectSingleHop,
    MultiHop,
}

/// One pool traversal of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub token_in: Token,
    pub token_out: Token,
    pub fee: FeeTier,
}

/// The best route found for a discovery request.
///
/// `expected_output_amount` is always non-zero; a failed discovery is
/// [`RouteOutcome::NoRouteFound`], never a zero-output plan. `encoded_path`
/// holds the packed router path for every plan (a single hop encodes as
/// `tokenIn ++ fee ++ tokenOut`), though only `MultiHop` plans submit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub kind: RouteKind,
    pub legs: Vec<RouteLeg>,
    pub expected_output_amount: U256,
    pub encoded_path: Bytes,
    pub description: String,
}

impl RoutePlan {
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }

    pub fn token_in(&self) -> &Token {
        &self.legs[0].token_in
    }

    pub fn token_out(&self) -> &Token {
        &self.legs[self.legs.len() - 1].token_out
    }

    pub fn fees(&self) -> Vec<FeeTier> {
        self.legs.iter().map(|leg| leg.fee).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Found(RoutePlan),
    NoRouteFound,
}

impl RouteOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::NoRouteFound => None,
        }
    }

    pub fn into_plan(self) -> Option<RoutePlan> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::NoRouteFound => None,
        }
    }
}

/// Input to a single discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    pub source: Token,
    pub destination: Token,
    /// In the source token's smallest unit.
    pub amount_in: U256,
    /// Enumerated in order; intermediary is the outer loop of the multi-hop search.
    pub intermediaries: Vec<Token>,
    /// Enumerated in order for both the direct and the multi-hop search.
    pub fee_tiers: Vec<FeeTier>,
}
