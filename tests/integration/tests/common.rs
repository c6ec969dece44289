//! Common test utilities and fixtures.

use std::io::Write;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

use kc_server::{Server, ServerConfig};

/// Public base URL advertised in generated installation files.
pub const PUBLIC_BASE_URL: &str = "https://sso.example.com/auth";

/// Realm import used by every test.
pub fn realm_import() -> serde_json::Value {
    serde_json::json!({
        "realm": { "realm": "acme", "displayName": "Acme Corp" },
        "clients": [
            {
                "clientId": "proxy",
                "secret": "s3cret-value",
                "redirectUris": [
                    "https://app.example.com/oauth2/callback",
                    "https://backup.example.com/oauth2/callback"
                ]
            },
            {
                "clientId": "spa",
                "publicClient": true,
                "redirectUris": ["https://spa.example.com/*"]
            },
            {
                "clientId": "api",
                "bearerOnly": true,
                "secret": "hidden"
            },
            {
                "clientId": "saml-app",
                "protocol": "saml"
            }
        ]
    })
}

/// A running server plus an HTTP client pointed at it.
pub struct TestEnv {
    /// Base URL of the running server.
    pub base_url: String,
    /// HTTP client for testing.
    pub client: Client,
    _import: NamedTempFile,
    _shutdown_tx: oneshot::Sender<()>,
}

impl TestEnv {
    /// Starts a server seeded with [`realm_import`].
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kc_server=debug,kc_protocol_oidc=debug")
            .with_test_writer()
            .try_init();

        let mut import = NamedTempFile::new()?;
        import.write_all(serde_json::to_string(&realm_import())?.as_bytes())?;
        import.flush()?;

        let mut config = ServerConfig::for_testing(Url::parse(PUBLIC_BASE_URL)?);
        config.import_file = Some(import.path().to_path_buf());

        let server = Server::new(config).await?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                tracing::error!("Server error: {e}");
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        wait_for_server(&client, &base_url).await?;

        Ok(Self {
            base_url,
            client,
            _import: import,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Sends a GET request to `path` on the test server.
    pub async fn get(&self, path: &str) -> anyhow::Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?)
    }

    /// Resolves a client's internal id through the admin listing.
    pub async fn client_uuid(&self, realm: &str, client_id: &str) -> anyhow::Result<String> {
        let clients: Vec<serde_json::Value> = self
            .get(&format!("/admin/realms/{realm}/clients?clientId={client_id}"))
            .await?
            .error_for_status()?
            .json()
            .await?;

        clients
            .first()
            .and_then(|c| c["id"].as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("client {client_id} not found in {realm}"))
    }
}

/// Polls the health endpoint until the server answers.
async fn wait_for_server(client: &Client, base_url: &str) -> anyhow::Result<()> {
    let health_url = format!("{base_url}/health");

    for _ in 0..50 {
        if let Ok(response) = client.get(&health_url).send().await
            && response.status().is_success()
        {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    anyhow::bail!("server at {base_url} did not become ready")
}
