use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Path shape mismatch: {tokens} tokens need {expected} fees, got {fees}")]
    ShapeMismatch {
        tokens: usize,
        fees: usize,
        expected: usize,
    },

    #[error("Malformed path: {0}")]
    MalformedPath(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Unsupported fee tier: {0}")]
    UnsupportedFeeTier(u32),

    #[error("{0} needs to be acquired directly from its protocol, pool routing is not available")]
    ProtocolOnlyToken(String),

    #[error("No route found: {from} → {to}")]
    NoRoute { from: String, to: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RoutingError {
    fn from(e: serde_json::Error) -> Self {
        RoutingError::SerializationError(e.to_string())
    }
}

/// Failure of a single quote query. Never surfaced by route discovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Quote reverted: {0}")]
    Reverted(String),

    #[error("Quoter transport error: {0}")]
    Transport(String),

    #[error("Quoter returned no amount")]
    Empty,
}
