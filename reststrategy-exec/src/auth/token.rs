use std::time::Instant;

use zeroize::Zeroizing;

/// Header value carrying a credential; zeroized on drop and never `Debug`-printed.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// A header ready to be attached to requests, plus when it stops being valid.
#[derive(Debug, Clone)]
pub struct CachedCredential {
    pub header_name: String,
    pub header_value: AccessToken,
    pub expires_at: Option<Instant>,
}

impl CachedCredential {
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}
