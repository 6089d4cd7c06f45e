use serde::Serialize;

use crate::OutputArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputArgs {
    /// True when a command should print its own prose summary instead of a document.
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }

    /// Prints a result document on stdout. Text mode pretty-prints, JSON mode stays on one line.
    pub fn emit<T: Serialize>(&self, result: &T) {
        if self.quiet {
            return;
        }
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(result),
            OutputFormat::Json => serde_json::to_string(result),
        };
        if let Ok(doc) = rendered {
            println!("{doc}");
        }
    }

    /// Reports a failure on stderr.
    pub fn fail(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.format == OutputFormat::Json {
            eprintln!("{}", serde_json::json!({ "error": message }));
        } else {
            eprintln!("error: {message}");
        }
    }
}
