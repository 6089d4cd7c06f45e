use std::fmt;

use indexmap::IndexMap;

use crate::types::{AnyValue, JsonPathExpression};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AuthStrategy {
    #[default]
    NoAuth,
    BasicAuth,
    OAuthClientCredentials,
    OAuthPassCredentials,
    CustomToToken,
    StaticToken,
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthStrategy::NoAuth => "NoAuth",
            AuthStrategy::BasicAuth => "BasicAuth",
            AuthStrategy::OAuthClientCredentials => "OAuthClientCredentials",
            AuthStrategy::OAuthPassCredentials => "OAuthPassCredentials",
            AuthStrategy::CustomToToken => "CustomToToken",
            AuthStrategy::StaticToken => "StaticToken",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    pub server_url: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub endpoint_params: IndexMap<String, Vec<String>>,

    #[serde(default, rename = "oAuthSendParamsInHeader")]
    pub send_params_in_header: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_owner_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_owner_pass: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomToTokenConfig {
    pub auth_url: String,

    #[serde(default)]
    pub credential: IndexMap<String, AnyValue>,

    /// Send `credential` form-encoded instead of as a JSON body.
    #[serde(default)]
    pub in_header: bool,

    #[serde(default = "default_response_key")]
    pub response_key: JsonPathExpression,

    #[serde(default = "default_header_key")]
    pub header_key: String,

    #[serde(default = "default_token_prefix")]
    pub token_prefix: String,
}

fn default_response_key() -> String {
    "$.access_token".to_string()
}

fn default_header_key() -> String {
    "Authorization".to_string()
}

fn default_token_prefix() -> String {
    "Bearer".to_string()
}

impl CustomToTokenConfig {
    pub fn new(auth_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            credential: IndexMap::new(),
            in_header: false,
            response_key: default_response_key(),
            header_key: default_header_key(),
            token_prefix: default_token_prefix(),
        }
    }
}

/// Document shape of an auth entry: a `type` tag plus the fields every variant may use.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthConfigDoc {
    #[serde(rename = "type", default)]
    pub strategy: AuthStrategy,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomToTokenConfig>,
}

/// Resolved authentication settings, one variant per strategy.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "AuthConfigDoc", into = "AuthConfigDoc")]
pub enum AuthConfig {
    NoAuth,
    Basic {
        username: String,
        password: String,
    },
    OAuthClientCredentials {
        client_id: String,
        client_secret: String,
        oauth: OAuthConfig,
    },
    OAuthPassword {
        client_id: String,
        client_secret: String,
        oauth: OAuthConfig,
        owner_user: String,
        owner_pass: String,
    },
    CustomToToken(CustomToTokenConfig),
    StaticToken {
        header: String,
        value: String,
    },
}

impl AuthConfig {
    pub fn strategy(&self) -> AuthStrategy {
        match self {
            AuthConfig::NoAuth => AuthStrategy::NoAuth,
            AuthConfig::Basic { .. } => AuthStrategy::BasicAuth,
            AuthConfig::OAuthClientCredentials { .. } => AuthStrategy::OAuthClientCredentials,
            AuthConfig::OAuthPassword { .. } => AuthStrategy::OAuthPassCredentials,
            AuthConfig::CustomToToken(_) => AuthStrategy::CustomToToken,
            AuthConfig::StaticToken { .. } => AuthStrategy::StaticToken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthConfigError {
    #[error("auth type {0} requires an `oauth` block")]
    MissingOAuth(AuthStrategy),
    #[error("auth type CustomToToken requires a `custom` block")]
    MissingCustom,
}

impl TryFrom<AuthConfigDoc> for AuthConfig {
    type Error = AuthConfigError;

    fn try_from(doc: AuthConfigDoc) -> Result<Self, Self::Error> {
        Ok(match doc.strategy {
            AuthStrategy::NoAuth => AuthConfig::NoAuth,
            AuthStrategy::BasicAuth => AuthConfig::Basic {
                username: doc.username,
                password: doc.password,
            },
            AuthStrategy::OAuthClientCredentials => AuthConfig::OAuthClientCredentials {
                client_id: doc.username,
                client_secret: doc.password,
                oauth: doc
                    .oauth
                    .ok_or(AuthConfigError::MissingOAuth(doc.strategy))?,
            },
            AuthStrategy::OAuthPassCredentials => {
                let oauth = doc
                    .oauth
                    .ok_or(AuthConfigError::MissingOAuth(doc.strategy))?;
                AuthConfig::OAuthPassword {
                    client_id: doc.username,
                    client_secret: doc.password,
                    owner_user: oauth.resource_owner_user.clone().unwrap_or_default(),
                    owner_pass: oauth.resource_owner_pass.clone().unwrap_or_default(),
                    oauth,
                }
            }
            AuthStrategy::CustomToToken => {
                AuthConfig::CustomToToken(doc.custom.ok_or(AuthConfigError::MissingCustom)?)
            }
            AuthStrategy::StaticToken => AuthConfig::StaticToken {
                header: doc.username,
                value: doc.password,
            },
        })
    }
}

impl From<AuthConfig> for AuthConfigDoc {
    fn from(cfg: AuthConfig) -> Self {
        let strategy = cfg.strategy();
        let mut doc = AuthConfigDoc {
            strategy,
            ..Default::default()
        };
        match cfg {
            AuthConfig::NoAuth => {}
            AuthConfig::Basic { username, password } => {
                doc.username = username;
                doc.password = password;
            }
            AuthConfig::OAuthClientCredentials {
                client_id,
                client_secret,
                oauth,
            } => {
                doc.username = client_id;
                doc.password = client_secret;
                doc.oauth = Some(oauth);
            }
            AuthConfig::OAuthPassword {
                client_id,
                client_secret,
                mut oauth,
                owner_user,
                owner_pass,
            } => {
                doc.username = client_id;
                doc.password = client_secret;
                oauth.resource_owner_user = Some(owner_user);
                oauth.resource_owner_pass = Some(owner_pass);
                doc.oauth = Some(oauth);
            }
            AuthConfig::CustomToToken(custom) => doc.custom = Some(custom),
            AuthConfig::StaticToken { header, value } => {
                doc.username = header;
                doc.password = value;
            }
        }
        doc
    }
}
