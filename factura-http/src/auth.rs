//! Authorization header generation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// API credentials.
///
/// Either an email/password pair or an OAuth access token.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// HTTP Basic authentication.
    Basic { email: String, password: String },
    /// OAuth bearer token.
    Bearer { token: String },
}

impl Credentials {
    /// Email/password credentials.
    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Access-token credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer {
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header for these credentials.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Basic { email, password } => {
                let encoded = STANDARD.encode(format!("{email}:{password}"));
                format!("BASIC {encoded}")
            }
            Credentials::Bearer { token } => format!("BEARER {token}"),
        }
    }
}
