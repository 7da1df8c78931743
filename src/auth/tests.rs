//! Tests for the auth module

use super::*;

#[test]
fn test_api_key_query() {
    let auth = Authenticator::new(Credentials::api_key("test-key-123"));

    let client = reqwest::Client::new();
    let req = client
        .get("https://example.com/youtube/v3/search")
        .query(&[("part", "snippet")]);
    let built = auth.apply(req).build().unwrap();

    let query = built.url().query().unwrap();
    assert!(query.contains("part=snippet"));
    assert!(query.contains("key=test-key-123"));
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_bearer_header() {
    let auth = Authenticator::new(Credentials::bearer("ya29.token"));

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/youtube/v3/videos");
    let built = auth.apply(req).build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer ya29.token"
    );
    assert!(built.url().query().is_none());
}

#[test]
fn test_credentials_debug_is_redacted() {
    let creds = Credentials::api_key("super-secret");
    let printed = format!("{creds:?}");
    assert_eq!(printed, "ApiKey(***)");
    assert!(!printed.contains("super-secret"));

    let auth = Authenticator::new(Credentials::bearer("also-secret"));
    assert!(!format!("{auth:?}").contains("also-secret"));
}

#[test]
fn test_credentials_kind() {
    assert_eq!(Credentials::api_key("k").kind(), "api_key");
    assert_eq!(Credentials::bearer("t").kind(), "bearer");
}
