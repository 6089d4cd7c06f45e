mod diagnostic;
mod engine;
pub mod eval;
mod extract;
pub mod http;
pub mod logger;
mod request;
mod result;
mod runtime_vars;
mod strategy;
mod types;

pub use diagnostic::{host_path_method, Diagnostic, TRANSPORT_FAILURE_STATUS};
pub use engine::Engine;
pub use extract::{find_by_json_path, ExtractError};
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use logger::{LogLevel, Logger, NoOpLogger, TracingLogger};
pub use request::PreparedAction;
pub use result::{ActionError, ExecutionError};
pub use runtime_vars::RuntimeVars;
pub use types::EngineConfig;
