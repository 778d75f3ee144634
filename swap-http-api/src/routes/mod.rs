pub mod health;
pub mod quote;
pub mod swap;
pub mod tokens;

use axum::http::StatusCode;
use swap_runtime::RoutingError;

/// Map a routing error onto the HTTP status the dashboard acts on.
pub(crate) fn error_status(e: RoutingError) -> (StatusCode, String) {
    let status = match &e {
        RoutingError::InvalidRequest(_)
        | RoutingError::UnknownToken(_)
        | RoutingError::InvalidAmount { .. }
        | RoutingError::UnsupportedFeeTier(_)
        | RoutingError::ShapeMismatch { .. }
        | RoutingError::MalformedPath(_) => StatusCode::BAD_REQUEST,
        RoutingError::ProtocolOnlyToken(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RoutingError::NoRoute { .. } => StatusCode::NOT_FOUND,
        RoutingError::ConfigError(_) | RoutingError::SerializationError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        tracing::warn!("request failed: {e}");
    }
    (status, e.to_string())
}
