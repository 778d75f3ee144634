pub mod error;
pub mod types;
pub mod path;
pub mod contracts;
pub mod chain;
pub mod oracle;
pub mod discovery;
pub mod registry;
pub mod config;
pub mod amounts;
pub mod swap;
pub mod service;

pub use error::{QuoteError, RoutingError};
pub use types::*;
pub use path::{decode_path, encode_path};
pub use discovery::{QuoteConcurrency, RouteDiscoverer};
pub use oracle::{QuoteOracle, QuoterClient};
pub use service::{SwapBundle, SwapQuote, SwapService};
