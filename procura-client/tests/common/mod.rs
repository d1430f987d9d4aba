// Not every test binary uses every helper.
#![allow(dead_code)]

use procura_client::{ClientConfig, MarketplaceClient};
use shared::ActorRole;
use wiremock::MockServer;

/// Bearer token every mock asserts via the authorization header.
pub const TOKEN: &str = "test-token";

/// Mock backend plus a client already logged in with the given identity.
pub async fn client_for(actor_id: &str, role: ActorRole) -> (MockServer, MarketplaceClient) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();

    let server = MockServer::start().await;
    let client = MarketplaceClient::new(ClientConfig::new(server.uri()));
    client.login_as(actor_id, role, TOKEN);
    (server, client)
}
