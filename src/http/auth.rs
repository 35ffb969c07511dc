use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::IdentityConfig;

/// Verifies a caller's id token and returns the account id it belongs to.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> anyhow::Result<String>;
}

/// Identity Toolkit `accounts:lookup` verifier.
pub struct IdentityClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(client: reqwest::Client, config: &IdentityConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl TokenVerifier for IdentityClient {
    async fn verify(&self, id_token: &str) -> anyhow::Result<String> {
        let url = format!("{}/v1/accounts:lookup?key={}", self.api_base, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "idToken": id_token }))
            .send()
            .await
            .context("identity lookup request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("identity backend rejected the token ({status}): {body}");
        }

        let body: Value = response
            .json()
            .await
            .context("unreadable identity response")?;
        let uid = body
            .get("users")
            .and_then(Value::as_array)
            .and_then(|users| users.first())
            .and_then(|user| user.get("localId"))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("identity response contained no user"))?;
        Ok(uid.to_string())
    }
}

/// Pull the token out of an Authorization header value.
///
/// Only the scheme is checked here; an empty token is passed through so the
/// verifier gets to reject it, which reports as forbidden rather than
/// missing credentials.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}
