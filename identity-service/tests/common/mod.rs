use std::sync::Arc;

use auth::SigningSecret;
use auth::TokenService;
use identity_service::domain::identity::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryIdentityRepository;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: InMemoryIdentityRepository,
    pub token_service: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = InMemoryIdentityRepository::new();
        let secret = SigningSecret::new(TEST_SECRET).expect("Invalid test secret");
        let token_service = Arc::new(TokenService::new(&secret));

        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::new(repository.clone()),
            Arc::clone(&token_service),
        ));

        let router = create_router(authentication_service, Arc::clone(&token_service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Submit a registration request
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an identity, log in and return `(identity_id, token)`
    pub async fn register_and_login(&self, email: &str, role: &str) -> (String, String) {
        let body: serde_json::Value = self
            .register("Test", email, "secret1", Some(role))
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let identity_id = body["data"]["id"].as_str().unwrap().to_string();

        let body: serde_json::Value = self
            .login(email, "secret1")
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        (identity_id, token)
    }
}
