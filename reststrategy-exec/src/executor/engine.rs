use std::sync::Arc;

use indexmap::IndexMap;
use reststrategy_core::types::{Action, AuthConfig, Recipe};
use tokio_util::sync::CancellationToken;

use crate::auth::AuthResolver;
use crate::executor::http::{HttpClient, ReqwestHttpClient};
use crate::executor::logger::Logger;
use crate::executor::request::{PreparedAction, Worker};
use crate::executor::result::ExecutionError;
use crate::executor::runtime_vars::RuntimeVars;
use crate::executor::strategy::run_action;
use crate::executor::types::EngineConfig;

/// Runs the actions of a recipe, one after another, against their REST targets.
///
/// ```no_run
/// # async fn demo(recipe: reststrategy_core::Recipe) {
/// use std::sync::Arc;
/// use reststrategy_exec::{Engine, TracingLogger};
/// use tokio_util::sync::CancellationToken;
///
/// let engine = Engine::new(Arc::new(TracingLogger)).with_recipe(recipe);
/// if let Err(e) = engine.execute(&CancellationToken::new()).await {
///     eprintln!("{e}");
/// }
/// # }
/// ```
pub struct Engine {
    logger: Arc<dyn Logger>,
    http: Arc<dyn HttpClient>,
    auth: IndexMap<String, AuthConfig>,
    actions: Vec<PreparedAction>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            http: Arc::new(ReqwestHttpClient::default()),
            auth: IndexMap::new(),
            actions: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    pub fn with_auth(mut self, auth: IndexMap<String, AuthConfig>) -> Self {
        self.auth = auth;
        self
    }

    /// Replaces the action list. Actions run in ascending `order`; actions without one run
    /// last and ties keep map order.
    pub fn with_actions(mut self, actions: IndexMap<String, Action>) -> Self {
        let mut prepared: Vec<PreparedAction> = actions
            .into_iter()
            .map(|(name, action)| PreparedAction::new(name, action))
            .collect();
        prepared.sort_by_key(|p| (p.action.order.is_none(), p.action.order));
        self.actions = prepared;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_recipe(self, recipe: Recipe) -> Self {
        self.with_auth(recipe.auth).with_actions(recipe.seed)
    }

    /// Prepared actions in execution order.
    pub fn actions(&self) -> &[PreparedAction] {
        &self.actions
    }

    pub async fn execute(&self, cancel: &CancellationToken) -> Result<(), ExecutionError> {
        self.execute_with(&RuntimeVars::new(), cancel).await
    }

    /// Like [`Engine::execute`], but extracted runtime variables land in `runtime_vars` so the
    /// caller can read them afterwards.
    pub async fn execute_with(
        &self,
        runtime_vars: &RuntimeVars,
        cancel: &CancellationToken,
    ) -> Result<(), ExecutionError> {
        let auth = AuthResolver::new(
            self.auth.clone(),
            self.http.clone(),
            self.config.clone(),
            self.logger.clone(),
        );
        let worker = Worker {
            http: self.http.as_ref(),
            auth: &auth,
            runtime_vars,
            logger: self.logger.as_ref(),
            config: &self.config,
            cancel,
        };

        let mut errors = Vec::new();
        for prepared in &self.actions {
            self.logger.info(&format!(
                "running action {} ({})",
                prepared.name, prepared.action.strategy
            ));
            match run_action(&worker, prepared).await {
                Ok(()) => self
                    .logger
                    .debug(&format!("action {} completed", prepared.name)),
                Err(e) => {
                    self.logger
                        .error(&format!("action {} failed: {e}", prepared.name));
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ExecutionError { errors })
        }
    }
}
