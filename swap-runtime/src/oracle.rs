//! Quote oracle seam and its on-chain implementation.

use alloy::primitives::{Address, Bytes, U256, Uint, address};
use alloy::providers::Provider;
use async_trait::async_trait;

use crate::contracts::IQuoter;
use crate::error::QuoteError;
use crate::types::FeeTier;

/// Alloy type alias for uint24 (Uniswap fee tiers)
type Uint24 = Uint<24, 1>;
/// Alloy type alias for uint160 (sqrtPriceLimitX96)
type Uint160 = Uint<160, 3>;

/// Uniswap V3 QuoterV1 (canonical deployment)
pub const UNISWAP_V3_QUOTER: Address = address!("0xb27308f9F90D607463bb33eA1BeBb41C27CE5AB6");

/// Read-only source of exchange output amounts.
///
/// A failed or empty quote means "no pool or not enough liquidity for this
/// candidate"; callers decide whether that is fatal.
#[async_trait]
pub trait QuoteOracle: Send + Sync {
    /// Output of swapping `amount_in` through the single pool `(token_in, token_out, fee)`.
    async fn quote_single_hop(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<U256, QuoteError>;

    /// Output of swapping `amount_in` along a packed router path.
    async fn quote_multi_hop(&self, path: &Bytes, amount_in: U256) -> Result<U256, QuoteError>;
}

/// [`QuoteOracle`] backed by the Uniswap V3 Quoter contract via `eth_call`.
pub struct QuoterClient<P> {
    provider: P,
    quoter_address: Address,
}

impl<P: Provider + Clone> QuoterClient<P> {
    pub fn new(provider: P) -> Self {
        Self::with_quoter(provider, UNISWAP_V3_QUOTER)
    }

    pub fn with_quoter(provider: P, quoter_address: Address) -> Self {
        Self {
            provider,
            quoter_address,
        }
    }

    pub fn quoter_address(&self) -> Address {
        self.quoter_address
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> QuoteOracle for QuoterClient<P> {
    async fn quote_single_hop(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<U256, QuoteError> {
        let quoter = IQuoter::new(self.quoter_address, self.provider.clone());
        let amount_out = quoter
            .quoteExactInputSingle(
                token_in,
                token_out,
                Uint24::from(fee.as_u32()),
                amount_in,
                Uint160::ZERO, // No price limit
            )
            .call()
            .await
            .map_err(classify_call_error)?;
        non_zero(amount_out)
    }

    async fn quote_multi_hop(&self, path: &Bytes, amount_in: U256) -> Result<U256, QuoteError> {
        let quoter = IQuoter::new(self.quoter_address, self.provider.clone());
        let amount_out = quoter
            .quoteExactInput(path.clone(), amount_in)
            .call()
            .await
            .map_err(classify_call_error)?;
        non_zero(amount_out)
    }
}

fn non_zero(amount: U256) -> Result<U256, QuoteError> {
    if amount.is_zero() {
        Err(QuoteError::Empty)
    } else {
        Ok(amount)
    }
}

/// A JSON-RPC error response means the node executed the call and it failed;
/// anything else never reached the quoter.
fn classify_call_error(e: alloy::contract::Error) -> QuoteError {
    if let Some(data) = e.as_revert_data() {
        return QuoteError::Reverted(data.to_string());
    }
    match &e {
        alloy::contract::Error::TransportError(transport) => match transport.as_error_resp() {
            Some(resp) => QuoteError::Reverted(resp.message.to_string()),
            None => QuoteError::Transport(e.to_string()),
        },
        _ => QuoteError::Transport(e.to_string()),
    }
}
