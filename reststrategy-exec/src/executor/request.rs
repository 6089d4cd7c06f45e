use std::collections::BTreeMap;

use reststrategy_core::types::{Action, HttpVerb};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::{redact_headers, AuthResolver};
use crate::executor::diagnostic::{host_path_method, Diagnostic};
use crate::executor::eval::render;
use crate::executor::extract::find_scalar;
use crate::executor::http::{HttpClient, HttpRequestParts};
use crate::executor::logger::Logger;
use crate::executor::result::ActionError;
use crate::executor::runtime_vars::RuntimeVars;
use crate::executor::types::EngineConfig;

const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
];

/// An action together with its name and the headers every one of its requests starts from.
#[derive(Debug, Clone)]
pub struct PreparedAction {
    pub name: String,
    pub action: Action,
    pub headers: BTreeMap<String, String>,
}

impl PreparedAction {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        let mut headers: BTreeMap<String, String> = DEFAULT_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (k, v) in &action.http_headers {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(k));
            headers.insert(k.clone(), v.clone());
        }
        Self {
            name: name.into(),
            action,
            headers,
        }
    }
}

pub(crate) struct Worker<'a> {
    pub http: &'a dyn HttpClient,
    pub auth: &'a AuthResolver,
    pub runtime_vars: &'a RuntimeVars,
    pub logger: &'a dyn Logger,
    pub config: &'a EngineConfig,
    pub cancel: &'a CancellationToken,
}

impl Worker<'_> {
    /// Template errors never fail the action; the partially rendered text is used.
    pub fn render(&self, prepared: &PreparedAction, template: &str) -> String {
        match render(template, &prepared.action.variables, self.runtime_vars) {
            Ok(s) => s,
            Err(e) => {
                self.logger
                    .error(&format!("action {}: template error: {e}", prepared.name));
                e.partial
            }
        }
    }

    /// `endpoint + <verb>EndpointSuffix`, then `/<found_id>` when one was found.
    pub fn url(
        &self,
        prepared: &PreparedAction,
        verb: HttpVerb,
        found_id: Option<&str>,
    ) -> Result<Url, ActionError> {
        let suffix = prepared
            .action
            .endpoint_suffix(verb)
            .map(|suffix| self.render(prepared, suffix));
        let raw = compose_url(&prepared.action.endpoint, suffix.as_deref(), found_id);
        Url::parse(&raw).map_err(|e| ActionError::InvalidUrl {
            name: prepared.name.clone(),
            url: raw,
            message: e.to_string(),
        })
    }

    /// Send one request for `prepared`. On a 2xx status the body is returned and runtime
    /// variables are extracted from it; anything else comes back as a [`Diagnostic`].
    pub async fn send(
        &self,
        prepared: &PreparedAction,
        verb: HttpVerb,
        url: Url,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, Diagnostic> {
        let method = verb.as_str();
        let diag = Diagnostic::new(prepared.name.clone(), host_path_method(method, &url));

        let mut req = HttpRequestParts::new(method, url);
        for (k, v) in &prepared.headers {
            req.set_header(k.clone(), v.clone());
        }
        req.body = body;

        let credential_headers = self
            .auth
            .decorate(&prepared.action.auth_map_ref, &mut req, self.cancel)
            .await;

        self.logger.debug(&format!(
            "{}: {} headers [{}]",
            prepared.name,
            diag.host_path_method,
            redact_headers(&req.headers, &credential_headers)
        ));

        let sent = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            res = self.http.send(req, self.config.request_timeout, self.config.max_response_bytes) => Some(res),
        };

        let resp = match sent {
            None => return Err(diag.transport_failure("request cancelled")),
            Some(Ok(resp)) => resp,
            Some(Err(e)) => {
                self.logger
                    .error(&format!("{}: {} failed: {e}", prepared.name, diag.host_path_method));
                return Err(diag.transport_failure(e));
            }
        };

        self.logger.debug(&format!(
            "{}: {} returned {}",
            prepared.name, diag.host_path_method, resp.status
        ));

        if let Some(diag) = diag.classify(resp.status, &resp.body) {
            return Err(diag);
        }

        self.extract_runtime_vars(prepared, &resp.body);
        Ok(resp.body)
    }

    fn extract_runtime_vars(&self, prepared: &PreparedAction, body: &[u8]) {
        for (name, expr) in &prepared.action.runtime_vars {
            match find_scalar(body, expr) {
                Ok(None) => {}
                Ok(Some(value)) => self.runtime_vars.set(name.clone(), value),
                Err(e) => self.logger.error(&format!(
                    "action {}: cannot extract runtime var {name}: {e}",
                    prepared.name
                )),
            }
        }
    }
}

/// Plain concatenation; slashes are not normalised.
fn compose_url(endpoint: &str, suffix: Option<&str>, found_id: Option<&str>) -> String {
    let mut raw = endpoint.to_string();
    if let Some(suffix) = suffix {
        raw.push_str(suffix);
    }
    if let Some(id) = found_id.filter(|id| !id.is_empty()) {
        raw.push('/');
        raw.push_str(id);
    }
    raw
}
