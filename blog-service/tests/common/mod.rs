use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashingParams;
use auth::JwtHandler;
use auth::PasswordHasher;
use blog_service::credential::errors::CredentialError;
use blog_service::credential::models::StoredCredential;
use blog_service::credential::models::UserId;
use blog_service::credential::models::Username;
use blog_service::credential::ports::CredentialStore;
use blog_service::domain::credential::service::CredentialService;
use blog_service::inbound::http::router::create_router;
use chrono::Duration;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_SECONDS: i64 = 86400;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryCredentialStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Credential store kept in memory, with a switch to simulate backend outages
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<u64, StoredCredential>>,
    unavailable: AtomicBool,
    next_id: AtomicU64,
}

impl InMemoryCredentialStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CredentialError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CredentialError::StoreUnavailable(
                "connection to server at \"db.internal\" refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredCredential>, CredentialError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().get(&id.0).cloned())
    }

    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.username == username.as_str()) {
            return Err(CredentialError::UsernameAlreadyExists(
                username.as_str().to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let credential = StoredCredential {
            id: UserId(id),
            username: username.as_str().to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(credential.id.0, credential.clone());

        Ok(credential)
    }

    async fn update_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<Option<StoredCredential>, CredentialError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();

        Ok(users.get_mut(&id.0).map(|credential| {
            credential.password_hash = password_hash.to_string();
            credential.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> Result<bool, CredentialError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().remove(&id.0).is_some())
    }
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

        let store = Arc::new(InMemoryCredentialStore::default());

        // Cheap work factor keeps the suite fast
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET).with_password_hasher(
            PasswordHasher::with_params(HashingParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            }),
        ));

        let credential_service = Arc::new(
            CredentialService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
                Duration::seconds(TOKEN_TTL_SECONDS),
            )
            .expect("Failed to create credential service"),
        );

        let router = create_router(credential_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
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

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return its id
    pub async fn register(&self, username: &str, password: &str) -> u64 {
        let response = self
            .post("/api/v1/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_u64().expect("Missing user id")
    }

    /// Log in and return the issued token
    pub async fn login(&self, id: u64, password: &str) -> String {
        let response = self
            .post("/api/v1/login")
            .json(&json!({ "id": id, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
