use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the authorization core.
///
/// Cryptographic and parsing failures are normalized into these kinds at the
/// authenticator boundary. `InvalidToken` deliberately carries no detail so a
/// caller cannot tell which decoding step rejected the token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("expiry duration must be a positive number of seconds")]
    InvalidExpiry,

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("unauthorized")]
    Unauthorized,

    #[error("access denied")]
    PolicyDenied,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status a forwarding layer should answer with
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidExpiry | AuthError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::PolicyDenied => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures the client caused and can fix by re-authenticating
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::Unauthorized
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
