//! Logging capability consumed by the engine.
//!
//! The engine only ever needs three severities; formatting happens at the call site with
//! `format!`. [`TracingLogger`] is what binaries use; embedders can plug in their own sink.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Forwards to the `tracing` macros under the `reststrategy` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "reststrategy", "{message}"),
            LogLevel::Info => tracing::info!(target: "reststrategy", "{message}"),
            LogLevel::Error => tracing::error!(target: "reststrategy", "{message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
