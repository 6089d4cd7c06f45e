use crate::types::AuthConfig;
use crate::validate::validator::Validator;

pub(crate) fn validate_auth(v: &mut Validator, cfg: &AuthConfig, path: &str) {
    match cfg {
        AuthConfig::NoAuth => {}
        AuthConfig::Basic { username, .. } => {
            if username.is_empty() {
                v.push(format!("{path}.username"), "BasicAuth requires a username");
            }
        }
        AuthConfig::OAuthClientCredentials { client_id, oauth, .. } => {
            if client_id.is_empty() {
                v.push(format!("{path}.username"), "OAuth requires a client id in username");
            }
            v.validate_http_url(&format!("{path}.oauth.serverUrl"), &oauth.server_url);
        }
        AuthConfig::OAuthPassword {
            client_id,
            oauth,
            owner_user,
            ..
        } => {
            if client_id.is_empty() {
                v.push(format!("{path}.username"), "OAuth requires a client id in username");
            }
            if owner_user.is_empty() {
                v.push(
                    format!("{path}.oauth.resourceOwnerUser"),
                    "password grant requires a resource owner user",
                );
            }
            v.validate_http_url(&format!("{path}.oauth.serverUrl"), &oauth.server_url);
        }
        AuthConfig::CustomToToken(custom) => {
            v.validate_http_url(&format!("{path}.custom.authUrl"), &custom.auth_url);
            if custom.response_key.trim().is_empty() {
                v.push(format!("{path}.custom.responseKey"), "must not be empty");
            }
            if custom.header_key.trim().is_empty() {
                v.push(format!("{path}.custom.headerKey"), "must not be empty");
            }
        }
        AuthConfig::StaticToken { header, .. } => {
            if header.trim().is_empty() {
                v.push(
                    format!("{path}.username"),
                    "StaticToken requires the header name in username",
                );
            }
        }
    }
}
