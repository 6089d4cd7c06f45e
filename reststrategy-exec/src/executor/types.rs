use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Applied to every request, token exchanges included.
    pub request_timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}
