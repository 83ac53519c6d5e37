use crate::{CliClientResult, ClientError};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the sm-server auth API
pub struct ApiClient {
    pub base_url: String,
    pub token: Option<String>,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:5000")
    /// * `token` - Session token attached as a bearer credential when present.
    ///   Register and login calls go out without it.
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            client: ReqwestClient::new(),
        }
    }

    /// Build a request with the held bearer token, if any
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Execute a request and map the canonical response contract:
    /// 2xx → body, 401 → `Unauthorized`, other non-2xx → `Api` with the
    /// server message when present.
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("An error occurred")
            .to_string();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized {
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Err(ClientError::Api {
            message,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Register a new account (unauthenticated call)
    pub async fn register(
        &self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct RegisterRequest<'a> {
            username: &'a str,
            #[serde(rename = "fullName")]
            full_name: &'a str,
            email: &'a str,
            password: &'a str,
        }

        let body = RegisterRequest {
            username,
            full_name,
            email,
            password,
        };
        let req = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&body);
        self.execute(req).await
    }

    /// Login with credentials (unauthenticated call)
    pub async fn login(&self, email: &str, password: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let body = LoginRequest { email, password };
        let req = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&body);
        self.execute(req).await
    }

    /// Verify the held session token
    pub async fn verify(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/auth/verify");
        self.execute(req).await
    }

    /// Verify an explicit candidate token (used by session re-validation,
    /// which checks a token before the client trusts it)
    pub async fn verify_token(&self, token: &str) -> CliClientResult<Value> {
        let req = self
            .client
            .get(format!("{}/api/auth/verify", self.base_url))
            .bearer_auth(token);
        self.execute(req).await
    }
}
