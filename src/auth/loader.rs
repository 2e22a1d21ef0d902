use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use super::session::{Credential, Session};
use crate::consts::API_KEY_FIELD;
use crate::error::{EvalError, Result};

/// The two body shapes the key-storage endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeyPayload {
    /// A list of records; the first one carries the key.
    Records(Vec<Value>),
    /// A single record.
    Record(Map<String, Value>),
}

impl KeyPayload {
    /// Pull the token out of the payload.
    pub fn into_token(self) -> Result<String> {
        let record = match self {
            KeyPayload::Records(records) => records
                .into_iter()
                .next()
                .ok_or_else(|| schema_error("empty array"))?,
            KeyPayload::Record(map) => Value::Object(map),
        };

        match record.get(API_KEY_FIELD) {
            Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
            Some(Value::String(_)) => Err(schema_error("value is empty")),
            Some(_) => Err(schema_error("value is not a string")),
            None => Err(schema_error("field missing")),
        }
    }
}

fn schema_error(reason: impl Into<String>) -> EvalError {
    EvalError::CredentialSchema {
        field: API_KEY_FIELD,
        reason: reason.into(),
    }
}

/// Fetches the completion API key from a key-storage endpoint.
pub struct KeyLoader {
    client: reqwest::Client,
    url: String,
}

impl KeyLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request the key and decode it. Does not touch any session.
    pub async fn fetch(&self) -> Result<Credential> {
        debug!(url = %self.url, "requesting API key");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(EvalError::CredentialUnreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EvalError::CredentialTransport {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(EvalError::CredentialUnreachable)?;

        let payload: KeyPayload = serde_json::from_str(&body)
            .map_err(|e| schema_error(format!("unrecognized response shape ({e})")))?;

        payload.into_token().map(Credential::new)
    }

    /// Fetch the key and store it in `session`.
    ///
    /// Returns `false` on any failure; the session keeps whatever it held.
    pub async fn load_credential(&self, session: &mut Session) -> bool {
        match self.fetch().await {
            Ok(credential) => {
                info!("API key loaded from key storage");
                session.store(credential);
                true
            }
            Err(e) => {
                error!(error = %e, url = %self.url, "failed to load API key");
                false
            }
        }
    }
}
