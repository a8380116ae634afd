mod common;

use common::*;
use oidc_conformance::provider::*;
use serde_json::Value;

#[tokio::test]
async fn serves_discovery_document() -> anyhow::Result<()> {
    init_logging();
    let provider = MockProvider::start(&provider_config(), TEST_SIGNER.jwks()).await?;

    let discovery: Value = reqwest::get(format!("{}{DISCOVERY_PATH}", provider.origin()))
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(
        discovery["jwks_uri"],
        format!("{}{KEYS_PATH}", provider.origin())
    );
    assert_eq!(
        discovery["authorization_endpoint"],
        "http://imaginary-server.test/fake-auth-route"
    );
    assert_eq!(provider.counters().discovery(), 1);
    assert_eq!(provider.counters().keys(), 0);

    Ok(())
}

#[tokio::test]
async fn serves_public_key_set() -> anyhow::Result<()> {
    init_logging();
    let provider = MockProvider::start(&provider_config(), TEST_SIGNER.jwks()).await?;
    let url = provider.discovery().jwks_uri.clone();

    for _ in 0..2 {
        let keys: Value = reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .json()
            .await?;

        let key = &keys["keys"][0];
        assert_eq!(key["kid"], "test key");
        assert_eq!(key["alg"], "RS256");
        assert_eq!(key["use"], "sig");
        assert_eq!(key["kty"], "RSA");
        assert!(key["n"].is_string());
        assert!(key["e"].is_string());
        assert_eq!(keys["keys"].as_array().map(Vec::len), Some(1));
    }

    assert_eq!(provider.counters().keys(), 2);
    assert_eq!(provider.counters().discovery(), 0);

    Ok(())
}

#[tokio::test]
async fn advertises_configured_authorization_endpoint() -> anyhow::Result<()> {
    init_logging();
    let config = ProviderConfig::builder()
        .bind_address("127.0.0.1:0")
        .authorization_endpoint("http://auth.test/authorize")
        .build();
    let provider = MockProvider::start(&config, TEST_SIGNER.jwks()).await?;

    assert_eq!(
        provider.discovery().authorization_endpoint.as_str(),
        "http://auth.test/authorize"
    );
    assert!(provider.origin().starts_with("http://127.0.0.1:"));

    Ok(())
}

#[tokio::test]
async fn unknown_path_is_not_found() -> anyhow::Result<()> {
    init_logging();
    let provider = MockProvider::start(&provider_config(), TEST_SIGNER.jwks()).await?;

    let response = reqwest::get(format!("{}/authorize", provider.origin())).await?;

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(provider.counters().discovery(), 0);
    assert_eq!(provider.counters().keys(), 0);

    Ok(())
}

#[tokio::test]
async fn invalid_bind_address_fails() {
    init_logging();
    let config = ProviderConfig::builder().bind_address("not an address").build();

    assert!(matches!(
        MockProvider::start(&config, TEST_SIGNER.jwks()).await,
        Err(ProviderError::Bind { .. })
    ));
}

#[tokio::test]
async fn relative_authorization_endpoint_fails() {
    init_logging();
    let config = ProviderConfig::builder()
        .bind_address("127.0.0.1:0")
        .authorization_endpoint("/fake-auth-route")
        .build();

    assert!(matches!(
        MockProvider::start(&config, TEST_SIGNER.jwks()).await,
        Err(ProviderError::InvalidUrl(_))
    ));
}
