use crate::executor::{ExtractError, HttpError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(#[from] HttpError),
    #[error("non success status code: {0}")]
    NonSuccessStatus(u16),
    #[error("invalid token endpoint {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("oauth token exchange failed: {0}")]
    OAuth(String),
    #[error("failed to extract token: {0}")]
    Extract(#[from] ExtractError),
    #[error("token response has no value at {0}")]
    EmptyToken(String),
    #[error("failed to encode credential payload: {0}")]
    Encode(String),
    #[error("token acquisition cancelled")]
    Cancelled,
}
