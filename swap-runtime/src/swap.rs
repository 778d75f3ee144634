use alloy::primitives::{Address, Bytes, U256, Uint, address};
use alloy::sol_types::SolCall;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Alloy type alias for uint24 (used for Uniswap fee tiers)
type Uint24 = Uint<24, 1>;
/// Alloy type alias for uint160 (used for sqrtPriceLimitX96)
type Uint160 = Uint<160, 3>;

use crate::contracts::{IERC20, ISwapRouter, IWETH9};
use crate::error::RoutingError;
use crate::path::hop_count;
use crate::types::{RouteKind, RoutePlan};

/// Uniswap V3 SwapRouter address (canonical deployment)
pub const UNISWAP_V3_ROUTER: Address = address!("0xE592427A0AEce92De3Edee1F18E0157C05861564");

/// Unsigned transaction ready to hand to the caller's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTransaction {
    pub to: Address,
    pub calldata: Bytes,
    pub value: U256,
}

/// Caller-chosen parameters of a swap.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    /// Unix timestamp after which the router rejects the swap.
    pub deadline: U256,
}

impl SwapParams {
    /// Params whose deadline is `secs` seconds from now.
    pub fn with_deadline_from_now(
        recipient: Address,
        amount_in: U256,
        amount_out_minimum: U256,
        secs: u64,
    ) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self {
            recipient,
            amount_in,
            amount_out_minimum,
            deadline: U256::from(now.saturating_add(secs)),
        }
    }
}

pub struct SwapCallBuilder {
    router_address: Address,
}

impl SwapCallBuilder {
    pub fn new() -> Self {
        Self::with_router(UNISWAP_V3_ROUTER)
    }

    pub fn with_router(router_address: Address) -> Self {
        Self { router_address }
    }

    pub fn router_address(&self) -> Address {
        self.router_address
    }

    /// Router call executing `plan`. Direct plans use `exactInputSingle`,
    /// multi-hop plans `exactInput` with the plan's packed path.
    pub fn build(&self, plan: &RoutePlan, params: &SwapParams) -> Result<SwapTransaction, RoutingError> {
        if params.amount_in.is_zero() {
            return Err(RoutingError::InvalidRequest(
                "swap amount must be positive".into(),
            ));
        }

        let calldata = match plan.kind {
            RouteKind::DirectSingleHop => {
                let [leg] = plan.legs.as_slice() else {
                    return Err(RoutingError::InvalidRequest(format!(
                        "direct route has {} legs",
                        plan.legs.len()
                    )));
                };
                self.encode_exact_input_single(
                    leg.token_in.address,
                    leg.token_out.address,
                    leg.fee.as_u32(),
                    params,
                )
            }
            RouteKind::MultiHop => {
                let hops = hop_count(&plan.encoded_path)?;
                if plan.legs.is_empty() || hops != plan.legs.len() {
                    return Err(RoutingError::InvalidRequest(format!(
                        "multi-hop route has {} legs but its path has {hops} hops",
                        plan.legs.len()
                    )));
                }
                self.encode_exact_input(plan.encoded_path.clone(), params)
            }
        };

        // Native input is wrapped by the router from the attached value.
        let value = if plan.token_in().native {
            params.amount_in
        } else {
            U256::ZERO
        };

        Ok(SwapTransaction {
            to: self.router_address,
            calldata,
            value,
        })
    }

    /// ERC-20 approval letting the router pull `amount` of `token`.
    pub fn approval(&self, token: Address, amount: U256) -> SwapTransaction {
        let call = IERC20::approveCall {
            spender: self.router_address,
            amount,
        };
        SwapTransaction {
            to: token,
            calldata: Bytes::from(call.abi_encode()),
            value: U256::ZERO,
        }
    }

    /// WETH9 `deposit()` wrapping `amount` of native ETH.
    pub fn wrap_native(&self, weth: Address, amount: U256) -> SwapTransaction {
        SwapTransaction {
            to: weth,
            calldata: Bytes::from(IWETH9::depositCall {}.abi_encode()),
            value: amount,
        }
    }

    fn encode_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee_tier: u32,
        params: &SwapParams,
    ) -> Bytes {
        let call = ISwapRouter::exactInputSingleCall {
            params: ISwapRouter::ExactInputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee: Uint24::from(fee_tier),
                recipient: params.recipient,
                deadline: params.deadline,
                amountIn: params.amount_in,
                amountOutMinimum: params.amount_out_minimum,
                sqrtPriceLimitX96: Uint160::ZERO, // No price limit
            },
        };
        Bytes::from(call.abi_encode())
    }

    fn encode_exact_input(&self, path: Bytes, params: &SwapParams) -> Bytes {
        let call = ISwapRouter::exactInputCall {
            params: ISwapRouter::ExactInputParams {
                path,
                recipient: params.recipient,
                deadline: params.deadline,
                amountIn: params.amount_in,
                amountOutMinimum: params.amount_out_minimum,
            },
        };
        Bytes::from(call.abi_encode())
    }
}

impl Default for SwapCallBuilder {
    fn default() -> Self {
        Self::new()
    }
}
