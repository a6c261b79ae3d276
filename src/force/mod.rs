// Salesforce client
// OAuth2 authorization-code exchange and authenticated SOQL queries

pub mod types;

use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};

use crate::config::Credentials;
use crate::error::{AppError, Result};

pub use types::{Account, AuthInfo, QueryResult};

/// SOQL issued against the Account sobject. No LIMIT clause; the
/// account page renders whatever the org returns.
const ACCOUNT_QUERY: &str = "SELECT Id, Name, Type, Industry, Rating FROM Account";

/// REST API version the query endpoint is pinned to
const API_VERSION: &str = "v34.0";

/// Client for the Salesforce OAuth2 and REST query endpoints
///
/// Holds the immutable Connected App credentials and a pooled HTTP
/// client with bounded timeouts. One instance is shared by all
/// requests; it carries no per-request state.
pub struct ForceClient {
    client: Client,
    login_url: String,
    credentials: Credentials,
}

impl ForceClient {
    /// Create a new Salesforce client
    pub fn new(
        credentials: Credentials,
        login_url: String,
        connect_timeout: u64,
        request_timeout: u64,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout))
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            login_url,
            credentials,
        })
    }

    fn consumer_key(&self) -> Result<&str> {
        self.credentials
            .consumer_key()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("CONSUMER_KEY is not configured")))
    }

    fn consumer_secret(&self) -> Result<&str> {
        self.credentials
            .consumer_secret()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("CONSUMER_SECRET is not configured")))
    }

    /// Build the authorize-endpoint URL that starts the OAuth2 dance.
    /// `redirect_url` must match the callback URL registered on the
    /// Connected App; Salesforce enforces that, not this client.
    pub fn authorize_url(&self, redirect_url: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/services/oauth2/authorize", self.login_url),
            &[
                ("response_type", "code"),
                ("client_id", self.consumer_key()?),
                ("redirect_uri", redirect_url),
            ],
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid authorize URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for an access token and instance URL
    ///
    /// A body carrying an `error` field yields `AppError::Auth` with the
    /// provider's error string and never an `AuthInfo`. A failed HTTP
    /// call or a non-JSON body yields `AppError::Transport`.
    pub async fn get_token(&self, code: &str, redirect_url: &str) -> Result<AuthInfo> {
        let url = format!("{}/services/oauth2/token", self.login_url);

        tracing::debug!(url = %url, redirect_url = %redirect_url, "Exchanging authorization code");

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.consumer_key()?),
            ("client_secret", self.consumer_secret()?),
            ("redirect_uri", redirect_url),
        ];

        let body: serde_json::Value = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = body.get("error") {
            return Err(AppError::Auth(error_message(error)));
        }

        let auth: AuthInfo = serde_json::from_value(body)?;
        tracing::debug!(instance_url = %auth.instance_url, "Token exchange succeeded");
        Ok(auth)
    }

    /// Fetch Account records with the access token from `get_token`
    ///
    /// Single shot: no retry, no token refresh. Salesforce reports an
    /// expired or invalid token as an `error` field in the body, which
    /// maps to `AppError::Auth` exactly like a failed token exchange.
    pub async fn get_accounts(&self, auth: &AuthInfo) -> Result<Vec<Account>> {
        let url = format!("{}/services/data/{}/query/", auth.instance_url, API_VERSION);

        tracing::debug!(url = %url, "Querying accounts");

        let body: serde_json::Value = self
            .client
            .get(&url)
            .query(&[("q", ACCOUNT_QUERY)])
            .header("Authorization", format!("Bearer {}", auth.access_token))
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = body.get("error") {
            return Err(AppError::Auth(error_message(error)));
        }

        let result: QueryResult = serde_json::from_value(body)?;
        tracing::debug!(count = result.records.len(), "Query returned records");
        Ok(result.records)
    }
}

/// Extract the provider's error string, falling back to the raw JSON
/// when the field is not a plain string
fn error_message(error: &serde_json::Value) -> String {
    match error.as_str() {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}
