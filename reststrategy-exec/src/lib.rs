#![forbid(unsafe_code)]

//! Strategy execution engine: resolves credentials, templates payloads and drives the
//! per-action HTTP sequences described by a recipe.

pub mod auth;
pub mod executor;

pub use crate::auth::{AuthError, AuthResolver};
pub use crate::executor::{
    find_by_json_path, ActionError, Diagnostic, Engine, EngineConfig, ExecutionError,
    ExtractError, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, LogLevel, Logger,
    NoOpLogger, PreparedAction, ReqwestHttpClient, RuntimeVars, TracingLogger,
    TRANSPORT_FAILURE_STATUS,
};
