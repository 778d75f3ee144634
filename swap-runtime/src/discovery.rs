//! Best-route search over Uniswap V3 pools.
//!
//! Direct pools are tried on every configured fee tier and the largest quote
//! wins. Two-hop routes through an intermediary are only searched when no
//! direct pool quotes at all, so a direct route is preferred even when a
//! two-hop route would return more. Ties on output go to the candidate
//! enumerated first (fee tiers in configured order; for two-hop routes the
//! intermediary is the outer loop, then first-leg fee, then second-leg fee).

use std::sync::Arc;

use alloy::primitives::{Bytes, U256};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, RoutingError};
use crate::oracle::QuoteOracle;
use crate::path::encode_path;
use crate::types::{DiscoveryRequest, FeeTier, RouteKind, RouteLeg, RouteOutcome, RoutePlan, Token};

/// How the candidates of one search phase are sent to the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteConcurrency {
    /// One quote at a time, in enumeration order.
    #[default]
    Sequential,
    /// All candidates of a phase in flight at once. Results are still scanned
    /// in enumeration order, so the selected route is the same.
    Concurrent,
}

/// A candidate route, prior to quoting.
struct Candidate {
    tokens: Vec<Token>,
    fees: Vec<FeeTier>,
    path: Bytes,
}

pub struct RouteDiscoverer {
    oracle: Arc<dyn QuoteOracle>,
    concurrency: QuoteConcurrency,
}

impl RouteDiscoverer {
    pub fn new(oracle: Arc<dyn QuoteOracle>) -> Self {
        Self {
            oracle,
            concurrency: QuoteConcurrency::Sequential,
        }
    }

    pub fn with_concurrency(mut self, concurrency: QuoteConcurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Find the best route for `request`.
    ///
    /// Quote failures for individual candidates are skipped; if every
    /// candidate fails the result is [`RouteOutcome::NoRouteFound`]. Only a
    /// malformed request is an error, and it is raised before any quote.
    pub async fn discover_route(&self, request: &DiscoveryRequest) -> Result<RouteOutcome, RoutingError> {
        validate(request)?;

        let direct = direct_candidates(request)?;
        let quotes = self.quote_all(&direct, request.amount_in, true).await;
        if let Some((index, amount)) = select_best(&quotes) {
            let plan = assemble(RouteKind::DirectSingleHop, &direct[index], amount);
            tracing::info!(route = %plan.description, amount_out = %amount, "direct route selected");
            return Ok(RouteOutcome::Found(plan));
        }

        let multi_hop = multi_hop_candidates(request)?;
        let quotes = self.quote_all(&multi_hop, request.amount_in, false).await;
        if let Some((index, amount)) = select_best(&quotes) {
            let plan = assemble(RouteKind::MultiHop, &multi_hop[index], amount);
            tracing::info!(route = %plan.description, amount_out = %amount, "multi-hop route selected");
            return Ok(RouteOutcome::Found(plan));
        }

        tracing::info!(
            from = %request.source.symbol,
            to = %request.destination.symbol,
            candidates = direct.len() + multi_hop.len(),
            "no route found"
        );
        Ok(RouteOutcome::NoRouteFound)
    }

    /// Quote every candidate; the returned vector is index-aligned with `candidates`.
    async fn quote_all(
        &self,
        candidates: &[Candidate],
        amount_in: U256,
        single_hop: bool,
    ) -> Vec<Option<U256>> {
        match self.concurrency {
            QuoteConcurrency::Sequential => {
                let mut quotes = Vec::with_capacity(candidates.len());
                for candidate in candidates {
                    quotes.push(self.quote(candidate, amount_in, single_hop).await);
                }
                quotes
            }
            QuoteConcurrency::Concurrent => {
                let futures = candidates
                    .iter()
                    .map(|candidate| self.quote(candidate, amount_in, single_hop));
                join_all(futures).await
            }
        }
    }

    async fn quote(&self, candidate: &Candidate, amount_in: U256, single_hop: bool) -> Option<U256> {
        let result = if single_hop {
            self.oracle
                .quote_single_hop(
                    candidate.tokens[0].address,
                    candidate.tokens[1].address,
                    candidate.fees[0],
                    amount_in,
                )
                .await
        } else {
            self.oracle.quote_multi_hop(&candidate.path, amount_in).await
        };

        match result {
            Ok(amount) if !amount.is_zero() => Some(amount),
            Ok(_) => {
                log_no_quote(candidate, &QuoteError::Empty);
                None
            }
            Err(e) => {
                log_no_quote(candidate, &e);
                None
            }
        }
    }
}

fn log_no_quote(candidate: &Candidate, error: &QuoteError) {
    tracing::debug!(
        route = %route_symbols(&candidate.tokens),
        fees = ?candidate.fees,
        "no quote: {error}"
    );
}

fn validate(request: &DiscoveryRequest) -> Result<(), RoutingError> {
    if request.source.address == request.destination.address {
        return Err(RoutingError::InvalidRequest(format!(
            "source and destination are the same token ({} → {})",
            request.source.symbol, request.destination.symbol
        )));
    }
    if request.amount_in.is_zero() {
        return Err(RoutingError::InvalidRequest(
            "input amount must be positive".into(),
        ));
    }
    if request.fee_tiers.is_empty() {
        return Err(RoutingError::InvalidRequest(
            "no candidate fee tiers".into(),
        ));
    }
    if request.intermediaries.is_empty() {
        return Err(RoutingError::InvalidRequest(
            "no candidate intermediary tokens".into(),
        ));
    }
    Ok(())
}

fn direct_candidates(request: &DiscoveryRequest) -> Result<Vec<Candidate>, RoutingError> {
    request
        .fee_tiers
        .iter()
        .map(|&fee| {
            candidate(
                vec![request.source.clone(), request.destination.clone()],
                vec![fee],
            )
        })
        .collect()
}

fn multi_hop_candidates(request: &DiscoveryRequest) -> Result<Vec<Candidate>, RoutingError> {
    let mut candidates = Vec::new();
    for intermediary in &request.intermediaries {
        if intermediary.address == request.source.address
            || intermediary.address == request.destination.address
        {
            continue;
        }
        for &first in &request.fee_tiers {
            for &second in &request.fee_tiers {
                candidates.push(candidate(
                    vec![
                        request.source.clone(),
                        intermediary.clone(),
                        request.destination.clone(),
                    ],
                    vec![first, second],
                )?);
            }
        }
    }
    Ok(candidates)
}

fn candidate(tokens: Vec<Token>, fees: Vec<FeeTier>) -> Result<Candidate, RoutingError> {
    let addresses: Vec<_> = tokens.iter().map(|t| t.address).collect();
    let path = encode_path(&addresses, &fees)?;
    Ok(Candidate { tokens, fees, path })
}

/// Index and amount of the strictly greatest quote; the earliest index wins ties.
fn select_best(quotes: &[Option<U256>]) -> Option<(usize, U256)> {
    let mut best: Option<(usize, U256)> = None;
    for (index, quote) in quotes.iter().enumerate() {
        if let Some(amount) = *quote {
            if best.is_none_or(|(_, current)| amount > current) {
                best = Some((index, amount));
            }
        }
    }
    best
}

fn assemble(kind: RouteKind, candidate: &Candidate, amount: U256) -> RoutePlan {
    let legs = candidate
        .tokens
        .windows(2)
        .zip(&candidate.fees)
        .map(|(pair, &fee)| RouteLeg {
            token_in: pair[0].clone(),
            token_out: pair[1].clone(),
            fee,
        })
        .collect();

    RoutePlan {
        kind,
        legs,
        expected_output_amount: amount,
        encoded_path: candidate.path.clone(),
        description: describe(kind, &candidate.tokens, &candidate.fees),
    }
}

fn route_symbols(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.symbol.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// `Direct: A → B (0.3% fee)` or `Multi-hop: A → I → B (0.3% + 0.05% fees)`.
fn describe(kind: RouteKind, tokens: &[Token], fees: &[FeeTier]) -> String {
    let fee_list = fees
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    match kind {
        RouteKind::DirectSingleHop => format!("Direct: {} ({fee_list} fee)", route_symbols(tokens)),
        RouteKind::MultiHop => format!("Multi-hop: {} ({fee_list} fees)", route_symbols(tokens)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::hop_count;
    use alloy::primitives::Address;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    fn token(symbol: &str, byte: u8) -> Token {
        Token::new(symbol, Address::repeat_byte(byte), 18)
    }

    fn usdc() -> Token {
        token("USDC", 0x01)
    }
    fn dai() -> Token {
        token("DAI", 0x02)
    }
    fn weth() -> Token {
        token("WETH", 0x03)
    }
    fn usdt() -> Token {
        token("USDT", 0x04)
    }

    /// Scripted oracle that records every query it receives.
    #[derive(Default)]
    struct MockOracle {
        single: HashMap<(Address, Address, FeeTier), U256>,
        multi: HashMap<Bytes, U256>,
        /// Per-call artificial latency, keyed by fee of the first hop.
        delays: HashMap<FeeTier, u64>,
        single_calls: Mutex<Vec<FeeTier>>,
        multi_calls: Mutex<Vec<Bytes>>,
    }

    impl MockOracle {
        fn direct(mut self, from: &Token, to: &Token, fee: FeeTier, amount: u64) -> Self {
            self.single
                .insert((from.address, to.address, fee), U256::from(amount));
            self
        }

        fn two_hop(mut self, tokens: [&Token; 3], fees: [FeeTier; 2], amount: u64) -> Self {
            let path = encode_path(&tokens.map(|t| t.address), &fees).unwrap();
            self.multi.insert(path, U256::from(amount));
            self
        }

        fn delay(mut self, fee: FeeTier, millis: u64) -> Self {
            self.delays.insert(fee, millis);
            self
        }

        fn single_call_count(&self) -> usize {
            self.single_calls.lock().unwrap().len()
        }

        fn multi_call_count(&self) -> usize {
            self.multi_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QuoteOracle for MockOracle {
        async fn quote_single_hop(
            &self,
            token_in: Address,
            token_out: Address,
            fee: FeeTier,
            _amount_in: U256,
        ) -> Result<U256, QuoteError> {
            self.single_calls.lock().unwrap().push(fee);
            if let Some(ms) = self.delays.get(&fee) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.single
                .get(&(token_in, token_out, fee))
                .copied()
                .ok_or_else(|| QuoteError::Reverted("no pool".into()))
        }

        async fn quote_multi_hop(&self, path: &Bytes, _amount_in: U256) -> Result<U256, QuoteError> {
            self.multi_calls.lock().unwrap().push(path.clone());
            self.multi
                .get(path)
                .copied()
                .ok_or_else(|| QuoteError::Transport("connection reset".into()))
        }
    }

    fn request(source: Token, destination: Token) -> DiscoveryRequest {
        DiscoveryRequest {
            source,
            destination,
            amount_in: U256::from(1_000_000u64),
            intermediaries: vec![weth(), usdc(), usdt()],
            fee_tiers: FeeTier::ALL.to_vec(),
        }
    }

    async fn discover(oracle: MockOracle, request: &DiscoveryRequest) -> (RouteOutcome, Arc<MockOracle>) {
        let oracle = Arc::new(oracle);
        let outcome = RouteDiscoverer::new(oracle.clone())
            .discover_route(request)
            .await
            .unwrap();
        (outcome, oracle)
    }

    #[tokio::test]
    async fn test_selects_greatest_direct_quote() {
        let oracle = MockOracle::default()
            .direct(&usdc(), &dai(), FeeTier::Low, 100)
            .direct(&usdc(), &dai(), FeeTier::Medium, 105)
            .direct(&usdc(), &dai(), FeeTier::High, 103);

        let (outcome, oracle) = discover(oracle, &request(usdc(), dai())).await;
        let plan = outcome.into_plan().unwrap();

        assert_eq!(plan.kind, RouteKind::DirectSingleHop);
        assert_eq!(plan.fees(), vec![FeeTier::Medium]);
        assert_eq!(plan.expected_output_amount, U256::from(105u64));
        assert_eq!(plan.description, "Direct: USDC → DAI (0.3% fee)");
        // Every tier is tried even after a hit.
        assert_eq!(oracle.single_call_count(), 4);
    }

    #[tokio::test]
    async fn test_direct_route_short_circuits_multi_hop() {
        let oracle = MockOracle::default()
            .direct(&usdc(), &dai(), FeeTier::High, 10)
            .two_hop([&usdc(), &weth(), &dai()], [FeeTier::Low, FeeTier::Low], 1_000);

        let (outcome, oracle) = discover(oracle, &request(usdc(), dai())).await;
        let plan = outcome.into_plan().unwrap();

        assert_eq!(plan.kind, RouteKind::DirectSingleHop);
        assert_eq!(plan.expected_output_amount, U256::from(10u64));
        assert_eq!(oracle.multi_call_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_tie_keeps_first_enumerated() {
        let oracle = MockOracle::default()
            .direct(&usdc(), &dai(), FeeTier::Low, 200)
            .direct(&usdc(), &dai(), FeeTier::High, 200);

        let mut req = request(usdc(), dai());
        req.fee_tiers = vec![FeeTier::High, FeeTier::Medium, FeeTier::Low];
        let (outcome, _) = discover(oracle, &req).await;

        assert_eq!(outcome.into_plan().unwrap().fees(), vec![FeeTier::High]);
    }

    #[tokio::test]
    async fn test_multi_hop_fallback() {
        let oracle = MockOracle::default()
            .two_hop([&usdc(), &weth(), &dai()], [FeeTier::Low, FeeTier::Medium], 90)
            .two_hop([&usdc(), &usdt(), &dai()], [FeeTier::Lowest, FeeTier::Lowest], 95);

        let (outcome, oracle) = discover(oracle, &request(usdc(), dai())).await;
        let plan = outcome.into_plan().unwrap();

        assert_eq!(plan.kind, RouteKind::MultiHop);
        assert_eq!(plan.expected_output_amount, U256::from(95u64));
        assert_eq!(plan.description, "Multi-hop: USDC → USDT → DAI (0.01% + 0.01% fees)");
        assert_eq!(plan.legs.len(), hop_count(&plan.encoded_path).unwrap());
        assert_eq!(plan.token_in().symbol, "USDC");
        assert_eq!(plan.token_out().symbol, "DAI");
        assert_eq!(plan.legs[0].token_out.symbol, "USDT");

        // USDC is the source, so only WETH and USDT are tried: 2 × 4 × 4.
        assert_eq!(oracle.single_call_count(), 4);
        assert_eq!(oracle.multi_call_count(), 32);
    }

    #[tokio::test]
    async fn test_multi_hop_description_names_both_fees() {
        let oracle = MockOracle::default().two_hop(
            [&usdc(), &weth(), &dai()],
            [FeeTier::Medium, FeeTier::Low],
            7,
        );
        let (outcome, _) = discover(oracle, &request(usdc(), dai())).await;
        assert_eq!(
            outcome.into_plan().unwrap().description,
            "Multi-hop: USDC → WETH → DAI (0.3% + 0.05% fees)"
        );
    }

    #[tokio::test]
    async fn test_multi_hop_tie_keeps_canonical_order() {
        // Same output via WETH (outer loop first) and via USDT.
        let oracle = MockOracle::default()
            .two_hop([&usdc(), &usdt(), &dai()], [FeeTier::Lowest, FeeTier::Lowest], 50)
            .two_hop([&usdc(), &weth(), &dai()], [FeeTier::High, FeeTier::High], 50);

        let (outcome, _) = discover(oracle, &request(usdc(), dai())).await;
        let plan = outcome.into_plan().unwrap();
        assert_eq!(plan.legs[0].token_out.symbol, "WETH");
        assert_eq!(plan.fees(), vec![FeeTier::High, FeeTier::High]);
    }

    #[tokio::test]
    async fn test_no_route_found() {
        let (outcome, oracle) = discover(MockOracle::default(), &request(usdc(), dai())).await;
        assert_eq!(outcome, RouteOutcome::NoRouteFound);
        assert_eq!(oracle.single_call_count(), 4);
        assert_eq!(oracle.multi_call_count(), 32);
    }

    #[tokio::test]
    async fn test_zero_quote_is_no_quote() {
        let oracle = MockOracle::default().direct(&usdc(), &dai(), FeeTier::Low, 0);
        let (outcome, _) = discover(oracle, &request(usdc(), dai())).await;
        assert_eq!(outcome, RouteOutcome::NoRouteFound);
    }

    #[tokio::test]
    async fn test_same_token_rejected_before_quoting() {
        let oracle = Arc::new(MockOracle::default());
        let result = RouteDiscoverer::new(oracle.clone())
            .discover_route(&request(usdc(), usdc()))
            .await;

        assert!(matches!(result, Err(RoutingError::InvalidRequest(_))));
        assert_eq!(oracle.single_call_count(), 0);
        assert_eq!(oracle.multi_call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_requests_rejected() {
        let discoverer = RouteDiscoverer::new(Arc::new(MockOracle::default()));

        let mut zero = request(usdc(), dai());
        zero.amount_in = U256::ZERO;
        assert!(matches!(
            discoverer.discover_route(&zero).await,
            Err(RoutingError::InvalidRequest(_))
        ));

        let mut no_fees = request(usdc(), dai());
        no_fees.fee_tiers.clear();
        assert!(matches!(
            discoverer.discover_route(&no_fees).await,
            Err(RoutingError::InvalidRequest(_))
        ));

        let mut no_intermediaries = request(usdc(), dai());
        no_intermediaries.intermediaries.clear();
        assert!(matches!(
            discoverer.discover_route(&no_intermediaries).await,
            Err(RoutingError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential_regardless_of_completion_order() {
        // The first tier answers last; it must still win the tie.
        let build = || {
            MockOracle::default()
                .direct(&usdc(), &dai(), FeeTier::Lowest, 500)
                .direct(&usdc(), &dai(), FeeTier::High, 500)
                .delay(FeeTier::Lowest, 30)
        };
        let req = request(usdc(), dai());

        let sequential = RouteDiscoverer::new(Arc::new(build()))
            .discover_route(&req)
            .await
            .unwrap();
        let concurrent = RouteDiscoverer::new(Arc::new(build()))
            .with_concurrency(QuoteConcurrency::Concurrent)
            .discover_route(&req)
            .await
            .unwrap();

        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent.into_plan().unwrap().fees(), vec![FeeTier::Lowest]);
    }

    #[test]
    fn test_select_best() {
        let quotes = [None, Some(U256::from(3u64)), Some(U256::from(5u64)), Some(U256::from(5u64))];
        assert_eq!(select_best(&quotes), Some((2, U256::from(5u64))));
        assert_eq!(select_best(&[None, None]), None);
    }
}
