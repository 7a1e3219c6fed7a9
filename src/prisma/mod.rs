pub mod auth;
pub mod client;

use reqwest::Client;
use std::time::Duration;

/// Auth header carrying the session token on every authenticated request
pub const AUTH_HEADER: &str = "x-redlock-auth";

/// Per-call deadline for the login request
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call deadline for search and asset lookup requests
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Create a standardized HTTP client with security best practices
pub fn create_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .use_rustls_tls() // Use rustls with system certificate store
        .build()
}
