//! RFC 6749 token grants (client credentials, resource owner password) via `oauth2`,
//! with the token request routed through the engine's own [`HttpClient`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use oauth2::basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse};
use oauth2::http::header::{HeaderMap, HeaderName, HeaderValue};
use oauth2::http::StatusCode;
use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, RequestTokenError,
    ResourceOwnerPassword, ResourceOwnerUsername, Scope, TokenResponse, TokenUrl,
};
use reststrategy_core::types::OAuthConfig;

use crate::auth::error::AuthError;
use crate::auth::token::{AccessToken, CachedCredential};
use crate::executor::{EngineConfig, HttpClient, HttpRequestParts};

pub(crate) enum Grant<'a> {
    ClientCredentials,
    Password { user: &'a str, pass: &'a str },
}

pub(crate) async fn fetch_token(
    http: Arc<dyn HttpClient>,
    config: &EngineConfig,
    client_id: &str,
    client_secret: &str,
    oauth: &OAuthConfig,
    grant: Grant<'_>,
) -> Result<CachedCredential, AuthError> {
    let client = build_client(client_id, client_secret, oauth)?;
    let timeout = config.request_timeout;
    let max_bytes = config.max_response_bytes;
    let transport = move |req: HttpRequest| send_token_request(http, timeout, max_bytes, req);

    let response: BasicTokenResponse = match grant {
        Grant::ClientCredentials => {
            let mut req = client.exchange_client_credentials();
            for scope in &oauth.scopes {
                req = req.add_scope(Scope::new(scope.clone()));
            }
            for (name, values) in &oauth.endpoint_params {
                for value in values {
                    req = req.add_extra_param(name.clone(), value.clone());
                }
            }
            req.request_async(transport).await.map_err(map_token_error)?
        }
        Grant::Password { user, pass } => {
            let user = ResourceOwnerUsername::new(user.to_string());
            let pass = ResourceOwnerPassword::new(pass.to_string());
            let mut req = client.exchange_password(&user, &pass);
            for scope in &oauth.scopes {
                req = req.add_scope(Scope::new(scope.clone()));
            }
            for (name, values) in &oauth.endpoint_params {
                for value in values {
                    req = req.add_extra_param(name.clone(), value.clone());
                }
            }
            req.request_async(transport).await.map_err(map_token_error)?
        }
    };

    let token_type = token_type_label(response.token_type().as_ref());
    Ok(CachedCredential {
        header_name: "Authorization".to_string(),
        header_value: AccessToken::new(format!(
            "{token_type} {}",
            response.access_token().secret()
        )),
        expires_at: response.expires_in().map(|d| Instant::now() + d),
    })
}

fn build_client(
    client_id: &str,
    client_secret: &str,
    oauth: &OAuthConfig,
) -> Result<BasicClient, AuthError> {
    let invalid = |e: oauth2::url::ParseError| AuthError::InvalidUrl {
        url: oauth.server_url.clone(),
        message: e.to_string(),
    };
    // Only the token endpoint is ever contacted; the authorization URL is a required placeholder.
    let auth_url = AuthUrl::new(oauth.server_url.clone()).map_err(invalid)?;
    let token_url = TokenUrl::new(oauth.server_url.clone()).map_err(invalid)?;
    let secret = (!client_secret.is_empty()).then(|| ClientSecret::new(client_secret.to_string()));

    let auth_type = if oauth.send_params_in_header {
        AuthType::BasicAuth
    } else {
        AuthType::RequestBody
    };

    Ok(BasicClient::new(
        ClientId::new(client_id.to_string()),
        secret,
        auth_url,
        Some(token_url),
    )
    .set_auth_type(auth_type))
}

async fn send_token_request(
    http: Arc<dyn HttpClient>,
    timeout: Duration,
    max_response_bytes: usize,
    req: HttpRequest,
) -> Result<HttpResponse, AuthError> {
    let mut headers = BTreeMap::new();
    for (k, v) in req.headers.iter() {
        if let Ok(s) = v.to_str() {
            headers.insert(k.as_str().to_string(), s.to_string());
        }
    }
    let parts = HttpRequestParts {
        method: req.method.as_str().to_string(),
        url: req.url,
        headers,
        body: req.body,
    };

    let resp = http.send(parts, timeout, max_response_bytes).await?;
    if resp.status > 201 {
        return Err(AuthError::NonSuccessStatus(resp.status));
    }

    let mut out = HeaderMap::new();
    for (k, v) in &resp.headers {
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(v)) {
            out.insert(name, value);
        }
    }
    let status_code =
        StatusCode::from_u16(resp.status).map_err(|e| AuthError::OAuth(e.to_string()))?;

    Ok(HttpResponse {
        status_code,
        headers: out,
        body: resp.body,
    })
}

fn map_token_error(e: BasicRequestTokenError<AuthError>) -> AuthError {
    match e {
        RequestTokenError::Request(inner) => inner,
        RequestTokenError::ServerResponse(r) => AuthError::OAuth(format!("server returned error: {r}")),
        other => AuthError::OAuth(other.to_string()),
    }
}

fn token_type_label(raw: &str) -> String {
    if raw.is_empty() || raw.eq_ignore_ascii_case("bearer") {
        "Bearer".to_string()
    } else {
        raw.to_string()
    }
}
