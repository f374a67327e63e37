//! Test servers
//!
//! `TestApp` drives the router in-process with `tower::ServiceExt::oneshot`.
//! `TestServer` binds the same router to an ephemeral port for tests that
//! need a real socket (WebSocket, SSE, the client library).

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use eventure::backend::routes::create_router;
use eventure::backend::server::AppState;
use eventure::shared::ClientConfig;

use super::auth_helpers::{auth_header, test_session_keys};
use super::database::{TestDatabase, TEST_BCRYPT_COST};

/// Application state over a test database
pub fn test_state(db: &TestDatabase) -> AppState {
    AppState::new(db.pool().clone(), test_session_keys(), TEST_BCRYPT_COST)
}

/// In-process application
pub struct TestApp {
    pub db: TestDatabase,
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App over an empty store
    pub async fn new() -> Self {
        Self::with_database(TestDatabase::new().await)
    }

    /// App over the demo data
    pub async fn seeded() -> Self {
        Self::with_database(TestDatabase::seeded().await)
    }

    pub fn with_database(db: TestDatabase) -> Self {
        let state = test_state(&db);
        let router = create_router(state.clone());
        Self { db, state, router }
    }

    /// Send a request and return status and raw body
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, body.to_vec())
    }

    /// GET a path
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.request(request).await
    }

    /// Execute a GraphQL operation and return the JSON response
    pub async fn graphql(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, auth_header(token));
        }
        let request = builder
            .body(Body::from(
                json!({ "query": query, "variables": variables }).to_string(),
            ))
            .expect("Failed to build request");

        let (status, body) = self.request(request).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).expect("GraphQL response is not JSON")
    }

    /// Log in through the API and return the token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .graphql(
                "mutation($email: String!, $password: String!) { login(email: $email, password: $password) }",
                json!({ "email": email, "password": password }),
                None,
            )
            .await;
        response["data"]["login"]
            .as_str()
            .unwrap_or_else(|| panic!("Login failed: {}", response))
            .to_string()
    }
}

/// Router served on an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub db: TestDatabase,
    pub state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve over the demo data
    pub async fn seeded() -> Self {
        Self::spawn(TestDatabase::seeded().await).await
    }

    pub async fn spawn(db: TestDatabase) -> Self {
        let state = test_state(&db);
        let app = create_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");

        // Same wiring as the server binary: the signal that ends open feeds
        // and sockets also starts draining
        let shutdown = state.shutdown.clone();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.wait().await })
                .await;
            if let Err(e) = served {
                eprintln!("Test server stopped: {}", e);
            }
        });

        Self {
            addr,
            db,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::for_server(&self.base_url()).expect("Invalid test server URL")
    }

    /// Trigger shutdown and wait for the server to finish draining
    ///
    /// Returns `false` if it is still running after `within`.
    pub async fn shut_down(&mut self, within: Duration) -> bool {
        self.state.shutdown.trigger();
        tokio::time::timeout(within, &mut self.handle).await.is_ok()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
