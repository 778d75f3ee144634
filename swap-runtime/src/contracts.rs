//! Solidity bindings for the Uniswap V3 periphery and token contracts the
//! swapper talks to.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders.

use alloy::sol;

sol! {
    /// Uniswap V3 QuoterV1. Both functions revert on-chain and return the
    /// amount through `eth_call`, so they are declared `view` here.
    #[sol(rpc)]
    interface IQuoter {
        function quoteExactInputSingle(
            address tokenIn,
            address tokenOut,
            uint24 fee,
            uint256 amountIn,
            uint160 sqrtPriceLimitX96
        ) external view returns (uint256 amountOut);

        function quoteExactInput(bytes path, uint256 amountIn) external view returns (uint256 amountOut);
    }

    interface ISwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);

        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }
        function exactInput(ExactInputParams calldata params) external payable returns (uint256 amountOut);
    }

    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IWETH9 {
        function deposit() external payable;
    }
}
