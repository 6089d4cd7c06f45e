mod common;

use std::sync::Arc;

use common::{body_str, engine_for, engine_with_logger, MockHttpClient, RecordingLogger};
use reststrategy_exec::LogLevel;
use tokio_util::sync::CancellationToken;

const TOKEN_RESPONSE: &str = r#"{"access_token":"tok-1","token_type":"bearer","expires_in":3600}"#;

fn two_actions(auth_block: &str, auth_ref: &str) -> String {
    format!(
        r#"
auth:
{auth_block}
seed:
  a: {{ strategy: POST, endpoint: "http://api/a", payloadTemplate: "{{}}", authMapRef: {auth_ref} }}
  b: {{ strategy: POST, endpoint: "http://api/b", payloadTemplate: "{{}}", authMapRef: {auth_ref} }}
"#
    )
}

fn ok_targets(http: &MockHttpClient) {
    http.on("POST", "/a", 201, "");
    http.on("POST", "/b", 201, "");
}

#[tokio::test]
async fn basic_auth_header() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    let yaml = two_actions(
        "  basic:\n    type: BasicAuth\n    username: u\n    password: p",
        "basic",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    for req in http.requests() {
        assert_eq!(req.header("Authorization"), Some("Basic dTpw"));
    }
}

#[tokio::test]
async fn static_token_header_is_sent_verbatim() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    let yaml = two_actions(
        "  key:\n    type: StaticToken\n    username: X-Api-Key\n    password: k3y",
        "key",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let reqs = http.requests();
    assert_eq!(reqs[0].header("X-Api-Key"), Some("k3y"));
    assert_eq!(reqs[0].header("Authorization"), None);
}

#[tokio::test]
async fn client_credentials_token_is_fetched_once_and_reused() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on_json("POST", "/token", 200, TOKEN_RESPONSE);
    let yaml = two_actions(
        r#"  cc:
    type: OAuthClientCredentials
    username: my-client
    password: my-secret
    oauth:
      serverUrl: http://idp/token
      scopes: [read, write]
      endpointParams: { audience: [api] }"#,
        "cc",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(http.calls(), vec!["POST /token", "POST /a", "POST /b"]);

    let token_req = &http.requests_to("POST", "/token")[0];
    let form = body_str(token_req);
    assert!(form.contains("grant_type=client_credentials"), "{form}");
    assert!(form.contains("scope=read+write"), "{form}");
    assert!(form.contains("audience=api"), "{form}");
    assert!(form.contains("client_id=my-client"), "{form}");
    assert!(form.contains("client_secret=my-secret"), "{form}");
    assert_eq!(token_req.header("Authorization"), None);

    assert_eq!(http.requests_to("POST", "/a")[0].header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(http.requests_to("POST", "/b")[0].header("Authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn client_credentials_can_travel_in_basic_header() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on_json("POST", "/token", 200, TOKEN_RESPONSE);
    let yaml = two_actions(
        r#"  cc:
    type: OAuthClientCredentials
    username: my-client
    password: my-secret
    oauth:
      serverUrl: http://idp/token
      oAuthSendParamsInHeader: true"#,
        "cc",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let token_req = &http.requests_to("POST", "/token")[0];
    let form = body_str(token_req);
    assert!(!form.contains("client_secret"), "{form}");
    assert!(
        token_req
            .header("Authorization")
            .is_some_and(|v| v.starts_with("Basic ")),
        "{:?}",
        token_req.headers
    );
}

#[tokio::test]
async fn expired_oauth_token_is_requested_again() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on_json(
        "POST",
        "/token",
        200,
        r#"{"access_token":"short","token_type":"bearer","expires_in":0}"#,
    );
    let yaml = two_actions(
        r#"  cc:
    type: OAuthClientCredentials
    username: id
    password: secret
    oauth:
      serverUrl: http://idp/token"#,
        "cc",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        http.calls(),
        vec!["POST /token", "POST /a", "POST /token", "POST /b"]
    );
}

#[tokio::test]
async fn password_grant_sends_resource_owner_credentials() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on_json("POST", "/token", 200, TOKEN_RESPONSE);
    let yaml = two_actions(
        r#"  pw:
    type: OAuthPassCredentials
    username: id
    password: secret
    oauth:
      serverUrl: http://idp/token
      resourceOwnerUser: alice
      resourceOwnerPass: wonderland"#,
        "pw",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let form = body_str(&http.requests_to("POST", "/token")[0]);
    assert!(form.contains("grant_type=password"), "{form}");
    assert!(form.contains("username=alice"), "{form}");
    assert!(form.contains("password=wonderland"), "{form}");
    assert_eq!(http.requests_to("POST", "/a")[0].header("Authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn custom_token_posts_json_credential() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on("POST", "/login", 200, r#"{"data":{"token":"ct-9"}}"#);
    let yaml = two_actions(
        r#"  custom:
    type: CustomToToken
    custom:
      authUrl: http://idp/login
      credential: { user: bob, pin: 1234 }
      responseKey: $.data.token
      headerKey: X-Session
      tokenPrefix: Token"#,
        "custom",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let logins = http.requests_to("POST", "/login");
    assert_eq!(logins.len(), 1);
    assert_eq!(body_str(&logins[0]), r#"{"user":"bob","pin":1234}"#);
    assert_eq!(logins[0].header("Content-Type"), Some("application/json"));

    for path in ["/a", "/b"] {
        let req = &http.requests_to("POST", path)[0];
        assert_eq!(req.header("X-Session"), Some("Token ct-9"));
    }
}

#[tokio::test]
async fn custom_token_can_post_form_credential() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on("POST", "/login", 201, r#"{"access_token":"ct-1"}"#);
    let yaml = two_actions(
        r#"  custom:
    type: CustomToToken
    custom:
      authUrl: http://idp/login
      inHeader: true
      credential: { user: bob, pin: 1234 }"#,
        "custom",
    );

    engine_for(&yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let login = &http.requests_to("POST", "/login")[0];
    assert_eq!(body_str(login), "user=bob&pin=1234");
    assert_eq!(
        login.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(http.requests_to("POST", "/a")[0].header("Authorization"), Some("Bearer ct-1"));
}

#[tokio::test]
async fn failed_token_exchange_sends_request_without_credentials() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on("POST", "/login", 401, "nope");
    let logger = RecordingLogger::new();
    let yaml = two_actions(
        r#"  custom:
    type: CustomToToken
    custom:
      authUrl: http://idp/login
      credential: { user: bob }"#,
        "custom",
    );

    engine_with_logger(&yaml, http.clone(), logger.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(http.requests_to("POST", "/a")[0].header("Authorization"), None);
    assert!(logger.contains(LogLevel::Error, "non success status code: 401"));
}

#[tokio::test]
async fn undeclared_auth_ref_is_treated_as_no_auth() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    let logger = RecordingLogger::new();
    let yaml = two_actions("  other:\n    type: NoAuth", "ghost");

    engine_with_logger(&yaml, http.clone(), logger.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(http.calls(), vec!["POST /a", "POST /b"]);
    assert_eq!(http.requests()[0].header("Authorization"), None);
    assert!(logger.contains(LogLevel::Info, "authMapRef ghost not declared"));
    assert!(logger.errors().is_empty());
}

#[tokio::test]
async fn credentials_do_not_leak_into_unauthenticated_actions() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    let yaml = r#"
auth:
  basic: { type: BasicAuth, username: u, password: p }
seed:
  a: { strategy: POST, endpoint: "http://api/a", payloadTemplate: "{}", authMapRef: basic }
  b: { strategy: POST, endpoint: "http://api/b", payloadTemplate: "{}" }
"#;

    engine_for(yaml, http.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert!(http.requests_to("POST", "/a")[0].header("Authorization").is_some());
    assert_eq!(http.requests_to("POST", "/b")[0].header("Authorization"), None);
}

#[tokio::test]
async fn token_cache_does_not_outlive_an_execution() {
    let http = MockHttpClient::new();
    ok_targets(&http);
    http.on_json("POST", "/token", 200, TOKEN_RESPONSE);
    let yaml = two_actions(
        r#"  cc:
    type: OAuthClientCredentials
    username: id
    password: secret
    oauth:
      serverUrl: http://idp/token"#,
        "cc",
    );
    let engine = engine_with_logger(&yaml, http.clone(), Arc::new(reststrategy_exec::NoOpLogger));

    engine.execute(&CancellationToken::new()).await.unwrap();
    engine.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(http.requests_to("POST", "/token").len(), 2);
}
