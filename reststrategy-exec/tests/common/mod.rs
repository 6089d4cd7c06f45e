#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reststrategy_exec::{
    Engine, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, LogLevel, Logger,
};

struct Route {
    method: String,
    path: String,
    response: Result<HttpResponseParts, HttpError>,
}

/// Scripted transport: answers by method and path, records everything it was sent.
/// The latest route registered for a method and path wins, so a test can change what the
/// target returns between executions. Unscripted requests get a 404 with an empty body.
#[derive(Default)]
pub struct MockHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl MockHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.on_result(
            method,
            path,
            Ok(HttpResponseParts {
                status,
                headers: BTreeMap::new(),
                body: body.as_bytes().to_vec(),
            }),
        )
    }

    pub fn on_json(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.on_result(
            method,
            path,
            Ok(HttpResponseParts {
                status,
                headers,
                body: body.as_bytes().to_vec(),
            }),
        )
    }

    pub fn on_error(&self, method: &str, path: &str, err: HttpError) -> &Self {
        self.on_result(method, path, Err(err))
    }

    fn on_result(
        &self,
        method: &str,
        path: &str,
        response: Result<HttpResponseParts, HttpError>,
    ) -> &Self {
        self.routes.lock().unwrap().push(Route {
            method: method.to_string(),
            path: path.to_string(),
            response,
        });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    /// `"<METHOD> <path>"` for each recorded request, in send order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<HttpRequestParts> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.url.path() == path)
            .collect()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        let response = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == req.method && r.path == req.url.path())
            .map(|r| r.response.clone());
        self.requests.lock().unwrap().push(req);
        response.unwrap_or_else(|| {
            Ok(HttpResponseParts {
                status: 404,
                headers: BTreeMap::new(),
                body: Vec::new(),
            })
        })
    }
}

/// Keeps every log line so tests can assert on what was reported.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == LogLevel::Error)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn engine_for(yaml: &str, http: Arc<MockHttpClient>) -> Engine {
    engine_with_logger(yaml, http, Arc::new(reststrategy_exec::NoOpLogger))
}

pub fn engine_with_logger(yaml: &str, http: Arc<MockHttpClient>, logger: Arc<dyn Logger>) -> Engine {
    let parsed =
        reststrategy_core::parse_recipe_str(yaml, reststrategy_core::RecipeFormat::Yaml).unwrap();
    Engine::new(logger)
        .with_http_client(http)
        .with_recipe(parsed.recipe)
}

pub fn body_str(req: &HttpRequestParts) -> String {
    String::from_utf8_lossy(&req.body).into_owned()
}
