mod custom;
mod error;
mod oauth;
mod redact;
mod resolver;
mod token;

pub use error::AuthError;
pub use redact::{redact_headers, RedactedHeaders};
pub use resolver::AuthResolver;
pub use token::{AccessToken, CachedCredential};
