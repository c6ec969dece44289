//! Installation download tests.

use crate::common::TestEnv;

const PROVIDER: &str = "oauth2-proxy-env";

fn installation_path(realm: &str, id: &str, provider: &str) -> String {
    format!("/admin/realms/{realm}/clients/{id}/installation/providers/{provider}")
}

fn value_of<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    body.lines()
        .find_map(|line| line.strip_prefix(&format!("{key}=")))
        .map(|value| value.trim_matches('"'))
}

#[tokio::test]
async fn confidential_client_gets_full_env_file() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let id = env.client_uuid("acme", "proxy").await?;

    let response = env.get(&installation_path("acme", &id, PROVIDER)).await?;
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("oauth2proxy.env"), "got {disposition}");

    let body = response.text().await?;
    assert!(body.starts_with("OAUTH2_PROXY_PROVIDER=\"keycloak-oidc\"\n"));
    assert_eq!(value_of(&body, "OAUTH2_PROXY_PROVIDER_DISPLAY_NAME"), Some("acme"));
    assert_eq!(value_of(&body, "OAUTH2_PROXY_CLIENT_ID"), Some("proxy"));
    assert_eq!(value_of(&body, "OAUTH2_PROXY_CLIENT_SECRET"), Some("s3cret-value"));
    assert_eq!(
        value_of(&body, "OAUTH2_PROXY_OIDC_ISSUER_URL"),
        Some("https://sso.example.com/auth/realms/acme")
    );
    assert_eq!(
        value_of(&body, "OAUTH2_PROXY_REDIRECT_URL"),
        Some("https://app.example.com/oauth2/callback")
    );
    assert_eq!(value_of(&body, "OAUTH2_PROXY_COOKIE_SECRET").map(str::len), Some(43));
    assert!(body.contains("#OAUTH2_PROXY_SCOPE=\"openid email profile\""));

    Ok(())
}

#[tokio::test]
async fn cookie_secret_changes_per_download() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let id = env.client_uuid("acme", "proxy").await?;
    let path = installation_path("acme", &id, PROVIDER);

    let first = env.get(&path).await?.text().await?;
    let second = env.get(&path).await?.text().await?;

    let secret = |body: &str| value_of(body, "OAUTH2_PROXY_COOKIE_SECRET").map(str::to_string);
    assert!(secret(&first).is_some());
    assert_ne!(secret(&first), secret(&second));

    Ok(())
}

#[tokio::test]
async fn public_and_bearer_only_clients_omit_secret() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    for client_id in ["spa", "api"] {
        let id = env.client_uuid("acme", client_id).await?;
        let body = env
            .get(&installation_path("acme", &id, PROVIDER))
            .await?
            .error_for_status()?
            .text()
            .await?;

        assert!(
            !body.contains("OAUTH2_PROXY_CLIENT_SECRET"),
            "{client_id} leaked a secret line"
        );
        assert!(!body.contains("hidden"));
    }

    let id = env.client_uuid("acme", "spa").await?;
    let body = env.get(&installation_path("acme", &id, PROVIDER)).await?.text().await?;
    assert_eq!(
        value_of(&body, "OAUTH2_PROXY_REDIRECT_URL"),
        Some("https://spa.example.com/*")
    );

    Ok(())
}

#[tokio::test]
async fn provider_listing_includes_oauth2_proxy() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let id = env.client_uuid("acme", "proxy").await?;

    let providers: Vec<serde_json::Value> = env
        .get(&format!("/admin/realms/acme/clients/{id}/installation/providers"))
        .await?
        .error_for_status()?
        .json()
        .await?;

    let oauth2_proxy = providers
        .iter()
        .find(|p| p["id"] == PROVIDER)
        .ok_or_else(|| anyhow::anyhow!("provider missing from listing"))?;
    assert_eq!(oauth2_proxy["protocol"], "openid-connect");
    assert_eq!(oauth2_proxy["mediaType"], "text/plain");
    assert_eq!(oauth2_proxy["downloadOnly"], false);

    Ok(())
}

#[tokio::test]
async fn unknown_provider_and_saml_client_are_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let id = env.client_uuid("acme", "proxy").await?;
    let response = env.get(&installation_path("acme", &id, "nope")).await?;
    assert_eq!(response.status(), 404);

    let saml = env.client_uuid("acme", "saml-app").await?;
    let response = env.get(&installation_path("acme", &saml, PROVIDER)).await?;
    assert_eq!(response.status(), 400);

    Ok(())
}

#[tokio::test]
async fn unknown_realm_is_not_found() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let response = env.get("/admin/realms/missing/clients").await?;
    assert_eq!(response.status(), 404);

    Ok(())
}

#[tokio::test]
async fn health_endpoints_respond() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    for path in ["/health", "/health/live", "/health/ready"] {
        assert!(env.get(path).await?.status().is_success(), "{path}");
    }

    Ok(())
}
