use std::fmt;

use crate::executor::diagnostic::Diagnostic;
use crate::executor::extract::ExtractError;

/// Why a single action failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Http(#[from] Diagnostic),
    #[error("action {name}: {source}")]
    Extract {
        name: String,
        #[source]
        source: ExtractError,
    },
    #[error("action {name}: invalid url {url}: {message}")]
    InvalidUrl {
        name: String,
        url: String,
        message: String,
    },
}

impl ActionError {
    pub fn action_name(&self) -> &str {
        match self {
            ActionError::Http(d) => &d.name,
            ActionError::Extract { name, .. } | ActionError::InvalidUrl { name, .. } => name,
        }
    }

    pub fn as_diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ActionError::Http(d) => Some(d),
            _ => None,
        }
    }
}

/// Every action error of one execution, in the order the actions ran.
#[derive(Debug, Clone, thiserror::Error)]
pub struct ExecutionError {
    pub errors: Vec<ActionError>,
}

impl ExecutionError {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter_map(ActionError::as_diagnostic)
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
