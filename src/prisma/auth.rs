use crate::prisma::{create_http_client, LOGIN_TIMEOUT};
use crate::utils::errors::{PrismaCliError, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::env;

const ACCESS_KEY_ENV: &str = "PRISMA_ACCESS_KEY";
const SECRET_KEY_ENV: &str = "PRISMA_SECRET_KEY";

// Literal fallbacks; a credential still containing one of these is unconfigured.
const ACCESS_KEY_PLACEHOLDER: &str = "YOUR_ACCESS_KEY_ID";
const SECRET_KEY_PLACEHOLDER: &str = "YOUR_SECRET_KEY";

/// Prisma Cloud access key pair, fixed for the lifetime of the run
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Read credentials from the environment, falling back to the documented
    /// placeholders so `validate` can report them as unconfigured
    pub fn from_env() -> Self {
        Self {
            access_key: env::var(ACCESS_KEY_ENV)
                .unwrap_or_else(|_| ACCESS_KEY_PLACEHOLDER.to_string()),
            secret_key: env::var(SECRET_KEY_ENV)
                .unwrap_or_else(|_| SECRET_KEY_PLACEHOLDER.to_string()),
        }
    }

    /// Reject placeholder or empty credentials. Must pass before any network
    /// call is made.
    pub fn validate(&self) -> Result<()> {
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(PrismaCliError::Config(format!(
                "Prisma Cloud credentials are empty. Set {ACCESS_KEY_ENV} and {SECRET_KEY_ENV}."
            )));
        }

        if self.access_key.contains(ACCESS_KEY_PLACEHOLDER)
            || self.secret_key.contains(SECRET_KEY_PLACEHOLDER)
        {
            return Err(PrismaCliError::Config(format!(
                "Prisma Cloud credentials are not configured. Set {ACCESS_KEY_ENV} and {SECRET_KEY_ENV}."
            )));
        }

        Ok(())
    }
}

/// Bearer token handle returned by a successful login.
///
/// Holding a `Session` is proof that authentication completed; every
/// authenticated request takes one by reference.
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
}

pub struct PrismaAuth {
    client: Client,
    api_url: String,
}

impl PrismaAuth {
    pub fn new(api_url: String) -> Self {
        let client = create_http_client(LOGIN_TIMEOUT).expect("Failed to create HTTP client");

        Self { client, api_url }
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        let url = format!("{}/login", self.api_url);

        let payload = json!({
            "username": credentials.access_key,
            "password": credentials.secret_key,
        });

        tracing::info!("Attempting login to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json; charset=UTF-8")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            tracing::error!("Login failed: {status} - response body: {error_text}");
            return Err(PrismaCliError::Auth(format!(
                "Login failed: {status} - {error_text}"
            )));
        }

        let body: Value = response.json().await?;

        match extract_token(&body) {
            Some(token) => {
                tracing::info!("Login successful");
                Ok(Session {
                    token: token.to_string(),
                })
            }
            None => Err(PrismaCliError::Auth(
                "Login succeeded but no token was received".to_string(),
            )),
        }
    }
}

/// Pull the session token out of a login response body
pub fn extract_token(body: &Value) -> Option<&str> {
    body.get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
}
