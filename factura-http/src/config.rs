//! Transport configuration.

use std::time::Duration;

/// Configuration for the HTTP transport.
///
/// Passed explicitly at construction; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the API, with a trailing slash.
    pub endpoint: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.factura.dev/".to_string(),
            user_agent: concat!("factura-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}
