use std::fmt;

/// Status reported when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 999;

/// Outcome record of one failed HTTP exchange.
///
/// Strategy drivers read `proceed_fallback` and `is_fatal` to decide whether the next verb in
/// their sequence may run; callers get the same value back as the action's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub status: u16,
    pub name: String,
    pub message: String,
    pub host_path_method: String,
    pub proceed_fallback: bool,
    pub is_fatal: bool,
}

impl Diagnostic {
    /// A fatal, non-fallback diagnostic; classification refines it.
    pub fn new(name: impl Into<String>, host_path_method: impl Into<String>) -> Self {
        Self {
            status: 0,
            name: name.into(),
            message: String::new(),
            host_path_method: host_path_method.into(),
            proceed_fallback: false,
            is_fatal: true,
        }
    }

    pub fn transport_failure(mut self, cause: impl fmt::Display) -> Self {
        self.status = TRANSPORT_FAILURE_STATUS;
        self.message = cause.to_string();
        self.proceed_fallback = false;
        self.is_fatal = true;
        self
    }

    /// Classify a received response. `None` means the status counts as success.
    pub fn classify(mut self, status: u16, body: &[u8]) -> Option<Self> {
        self.status = status;
        match status {
            0..=299 => None,
            300..=499 => {
                self.message = String::from_utf8_lossy(body).into_owned();
                self.proceed_fallback = true;
                self.is_fatal = false;
                Some(self)
            }
            _ => {
                // Service side failure: a different verb will not fare better.
                self.message = String::from_utf8_lossy(body).into_owned();
                self.proceed_fallback = false;
                self.is_fatal = false;
                Some(self)
            }
        }
    }

    /// Whether a strategy with a fallback path may continue with its next verb.
    pub fn allows_fallback(&self) -> bool {
        self.proceed_fallback && !self.is_fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {}\nname: {}\nmessage: {}\nhostPathMethod: {}\nisRetryAble: {}",
            self.status, self.name, self.message, self.host_path_method, self.proceed_fallback
        )
    }
}

impl std::error::Error for Diagnostic {}

/// `<METHOD> <host><path>?<query>`; the `?` is always present.
pub fn host_path_method(method: &str, url: &url::Url) -> String {
    let host = match (url.host_str(), url.port()) {
        (Some(h), Some(p)) => format!("{h}:{p}"),
        (Some(h), None) => h.to_string(),
        (None, _) => String::new(),
    };
    format!("{method} {host}{}?{}", url.path(), url.query().unwrap_or(""))
}
