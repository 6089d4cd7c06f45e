use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use reststrategy_core::types::AuthConfig;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::auth::custom::fetch_custom_token;
use crate::auth::error::AuthError;
use crate::auth::oauth::{fetch_token, Grant};
use crate::auth::token::{AccessToken, CachedCredential};
use crate::executor::{EngineConfig, HttpClient, HttpRequestParts, Logger};

/// Turns an `authMapRef` into request headers. Tokens obtained from an identity provider are
/// cached by auth name for the lifetime of the resolver, which is one execution.
pub struct AuthResolver {
    configs: IndexMap<String, AuthConfig>,
    http: Arc<dyn HttpClient>,
    config: EngineConfig,
    cache: Mutex<HashMap<String, CachedCredential>>,
    logger: Arc<dyn Logger>,
}

impl AuthResolver {
    pub fn new(
        configs: IndexMap<String, AuthConfig>,
        http: Arc<dyn HttpClient>,
        config: EngineConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            configs,
            http,
            config,
            cache: Mutex::new(HashMap::new()),
            logger,
        }
    }

    /// Attach credentials for `auth_ref` to `req` and return the names of the headers that
    /// carry them. Acquisition failures are logged and leave the request uncredentialed.
    pub async fn decorate(
        &self,
        auth_ref: &str,
        req: &mut HttpRequestParts,
        cancel: &CancellationToken,
    ) -> Vec<String> {
        if auth_ref.is_empty() {
            return Vec::new();
        }
        let Some(auth) = self.configs.get(auth_ref) else {
            self.logger.info(&format!(
                "authMapRef {auth_ref} not declared, sending request without credentials"
            ));
            return Vec::new();
        };

        match self.credential_for(auth_ref, auth, cancel).await {
            Ok(None) => Vec::new(),
            Ok(Some((name, value))) => {
                req.set_header(name.clone(), value.expose());
                vec![name]
            }
            Err(e) => {
                self.logger.error(&format!(
                    "failed to obtain credentials for {auth_ref}: {e}"
                ));
                Vec::new()
            }
        }
    }

    async fn credential_for(
        &self,
        auth_ref: &str,
        auth: &AuthConfig,
        cancel: &CancellationToken,
    ) -> Result<Option<(String, AccessToken)>, AuthError> {
        match auth {
            AuthConfig::NoAuth => Ok(None),
            AuthConfig::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                Ok(Some((
                    "Authorization".to_string(),
                    AccessToken::new(format!("Basic {encoded}")),
                )))
            }
            AuthConfig::StaticToken { header, value } => {
                Ok(Some((header.clone(), AccessToken::new(value.clone()))))
            }
            AuthConfig::OAuthClientCredentials { .. }
            | AuthConfig::OAuthPassword { .. }
            | AuthConfig::CustomToToken(_) => {
                let cred = self.cached_or_fetch(auth_ref, auth, cancel).await?;
                Ok(Some((cred.header_name, cred.header_value)))
            }
        }
    }

    async fn cached_or_fetch(
        &self,
        auth_ref: &str,
        auth: &AuthConfig,
        cancel: &CancellationToken,
    ) -> Result<CachedCredential, AuthError> {
        // Held across the exchange so one auth name is never fetched twice concurrently.
        let mut cache = self.cache.lock().await;
        if let Some(cred) = cache.get(auth_ref) {
            if cred.is_fresh(Instant::now()) {
                return Ok(cred.clone());
            }
            self.logger
                .debug(&format!("token for {auth_ref} expired, requesting a new one"));
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AuthError::Cancelled),
            res = self.fetch(auth) => res?,
        };
        self.logger
            .debug(&format!("obtained token for {auth_ref}"));
        cache.insert(auth_ref.to_string(), fetched.clone());
        Ok(fetched)
    }

    async fn fetch(&self, auth: &AuthConfig) -> Result<CachedCredential, AuthError> {
        match auth {
            AuthConfig::OAuthClientCredentials {
                client_id,
                client_secret,
                oauth,
            } => {
                fetch_token(
                    self.http.clone(),
                    &self.config,
                    client_id,
                    client_secret,
                    oauth,
                    Grant::ClientCredentials,
                )
                .await
            }
            AuthConfig::OAuthPassword {
                client_id,
                client_secret,
                oauth,
                owner_user,
                owner_pass,
            } => {
                fetch_token(
                    self.http.clone(),
                    &self.config,
                    client_id,
                    client_secret,
                    oauth,
                    Grant::Password {
                        user: owner_user,
                        pass: owner_pass,
                    },
                )
                .await
            }
            AuthConfig::CustomToToken(custom) => {
                fetch_custom_token(self.http.as_ref(), &self.config, custom).await
            }
            AuthConfig::NoAuth | AuthConfig::Basic { .. } | AuthConfig::StaticToken { .. } => {
                Err(AuthError::OAuth(format!(
                    "{} does not exchange tokens",
                    auth.strategy()
                )))
            }
        }
    }
}
