use std::time::Duration;

use clap::Args;
use reststrategy_exec::EngineConfig;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Per-request timeout, token requests included.
    #[arg(long, env = "RESTSTRATEGY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
    #[arg(long, env = "RESTSTRATEGY_MAX_RESPONSE_BYTES", default_value_t = 4_194_304)]
    pub max_response_bytes: usize,
}

impl EngineArgs {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }
}
