//! Startup token registry: symbol → address and decimals.

use alloy::primitives::{Address, address};

use crate::error::RoutingError;
use crate::types::Token;

pub const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
pub const USDT: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");
pub const WSTETH: Address = address!("0x7f39c581f595b53c5cb19bd0b3f8da6c935e2ca0");

/// Ethereum mainnet tokens offered by the vault dashboard.
const MAINNET_TOKENS: &[(&str, Address, u8)] = &[
    ("WETH", WETH, 18),
    ("USDC", USDC, 6),
    ("USDT", USDT, 6),
    ("WBTC", address!("0x2260fac5e5542a773aa44fbcfedf7c193bc2c599"), 8),
    ("DAI", address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"), 18),
    ("CBETH", address!("0xBe9895146f7AF43049ca1c1AE358B0541Ea49704"), 18),
    ("STETH", address!("0xae7ab96520de3a18e5e111b5eaab095312d7fe84"), 18),
    ("WSTETH", WSTETH, 18),
    ("RETH", address!("0xae78736Cd615f374D3085123A210448E74Fc6393"), 18),
    ("PYUSD", address!("0x6c3ea9036406852006290770bedfcaba0e23a0e8"), 6),
    ("USDE", address!("0x4c9edd5852cd905f086c759e8383e09bff1e68b3"), 18),
    ("USDS", address!("0xdc035d45d973e3ec169d2276ddab16f1e407384f"), 18),
    ("WEETH", address!("0xcd5fe23c85820f7b72d0926fc9b05b43e359b7ee"), 18),
    ("WBETH", address!("0xa2e3356610840701bdf5611a53974510ae27e2e1"), 18),
    ("ETHX", address!("0xa35b1b31ce002fbf2058d22f30f95d405200a15b"), 18),
    ("RSETH", address!("0xa1290d69c65a6fe4df752f95823fae25cb99e5a7"), 18),
    ("SWETH", address!("0xf951e335afb289353dc249e82926178eac7ded78"), 18),
    ("OSETH", address!("0xf1c9acdc66974dfb6decb12aa385b9cd01190e38"), 18),
    ("EZETH", address!("0xbf5495efe5db9ce00f80364c8b423567e58d2110"), 18),
    ("ANKRETH", address!("0xE95A203B1a91a908F9B9CE46459d101078c2c3cb"), 18),
    ("UNIETH", address!("0xF1376bceF0f78459C0Ed0ba5ddce976F1ddF51F4"), 18),
    ("METH", address!("0xd5F7838F5C461fefF7FE49ea5ebaF7728bB0ADfa"), 18),
    ("SUSDE", address!("0x9d39a5de30e57443bff2a8307a4256c8797a3497"), 18),
];

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    /// Mainnet registry. `ETH` is a native alias quoting through WETH.
    pub fn mainnet() -> Self {
        let mut tokens = vec![Token::native("ETH", WETH, 18)];
        tokens.extend(
            MAINNET_TOKENS
                .iter()
                .map(|(symbol, addr, decimals)| Token::new(*symbol, *addr, *decimals)),
        );
        Self { tokens }
    }

    /// Build a registry from explicit entries. Symbols must be unique.
    pub fn from_entries(tokens: Vec<Token>) -> Result<Self, RoutingError> {
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i]
                .iter()
                .any(|t| t.symbol.eq_ignore_ascii_case(&token.symbol))
            {
                return Err(RoutingError::ConfigError(format!(
                    "Duplicate token symbol: {}",
                    token.symbol
                )));
            }
        }
        Ok(Self { tokens })
    }

    /// Case-insensitive symbol lookup.
    pub fn get(&self, symbol: &str) -> Result<&Token, RoutingError> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| RoutingError::UnknownToken(symbol.to_string()))
    }

    /// First non-native token registered at `address`.
    pub fn by_address(&self, address: Address) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| !t.native && t.address == address)
    }

    pub fn symbol_for(&self, address: Address) -> Option<&str> {
        self.by_address(address).map(|t| t.symbol.as_str())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
