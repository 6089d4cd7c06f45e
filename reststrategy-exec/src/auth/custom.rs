use reststrategy_core::types::CustomToTokenConfig;

use crate::auth::error::AuthError;
use crate::auth::token::{AccessToken, CachedCredential};
use crate::executor::eval::value_to_string;
use crate::executor::{find_by_json_path, EngineConfig, HttpClient, HttpRequestParts};

/// POST the configured credential to `authUrl` and turn the token found at `responseKey`
/// into a header. No expiry: the credential lives for the rest of the execution.
pub(crate) async fn fetch_custom_token(
    http: &dyn HttpClient,
    config: &EngineConfig,
    custom: &CustomToTokenConfig,
) -> Result<CachedCredential, AuthError> {
    let url = url::Url::parse(&custom.auth_url).map_err(|e| AuthError::InvalidUrl {
        url: custom.auth_url.clone(),
        message: e.to_string(),
    })?;

    let mut req = HttpRequestParts::new("POST", url);
    req.set_header("Accept", "application/json");
    if custom.in_header {
        req.set_header("Content-Type", "application/x-www-form-urlencoded");
        req.body = form_encode(custom).into_bytes();
    } else {
        req.set_header("Content-Type", "application/json");
        req.body =
            serde_json::to_vec(&custom.credential).map_err(|e| AuthError::Encode(e.to_string()))?;
    }

    let resp = http
        .send(req, config.request_timeout, config.max_response_bytes)
        .await?;
    if resp.status > 201 {
        return Err(AuthError::NonSuccessStatus(resp.status));
    }

    let token = find_by_json_path(&resp.body, &custom.response_key)?;
    if token.is_empty() {
        return Err(AuthError::EmptyToken(custom.response_key.clone()));
    }

    let value = if custom.token_prefix.is_empty() {
        token
    } else {
        format!("{} {token}", custom.token_prefix)
    };

    Ok(CachedCredential {
        header_name: custom.header_key.clone(),
        header_value: AccessToken::new(value),
        expires_at: None,
    })
}

fn form_encode(custom: &CustomToTokenConfig) -> String {
    custom
        .credential
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(&value_to_string(v))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_encoding_escapes_and_stringifies_values() {
        let mut c = CustomToTokenConfig::new("http://idp/login");
        c.credential.insert("user".to_string(), serde_json::json!("a b&c"));
        c.credential.insert("pin".to_string(), serde_json::json!(42));
        assert_eq!(form_encode(&c), "user=a%20b%26c&pin=42");
    }
}
