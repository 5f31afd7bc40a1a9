use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::error::CredentialsError;

/// Structured form of the authority's credentials response.
///
/// The success shape and the error shape share one schema. Absent and
/// `null` fields both deserialize to an empty string.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub server: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certificate_authority_data: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_certificate_data: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_key_data: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub token: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expires_at: String,
    #[serde(rename = "id", default, deserialize_with = "null_as_empty")]
    pub error_id: String,
    #[serde(rename = "message", default, deserialize_with = "null_as_empty")]
    pub error_message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CredentialRecord {
    /// Deserializes a raw response body.
    ///
    /// A key that appears more than once keeps its last value.
    pub fn parse(payload: &[u8]) -> Result<Self, CredentialsError> {
        let value: serde_json::Value = serde_json::from_slice(payload)?;
        Ok(Self::deserialize(value)?)
    }

    /// Decides whether the authority reported success.
    ///
    /// Only `error_id` is consulted: a record is an error iff it carries an
    /// id, and `error_message` is passed along verbatim. The HTTP status of
    /// the exchange plays no part.
    pub fn classify(&self) -> Result<(), CredentialsError> {
        if self.error_id.is_empty() {
            return Ok(());
        }
        Err(CredentialsError::Application {
            id: self.error_id.clone(),
            message: self.error_message.clone(),
        })
    }

    /// `expires_at` as a timestamp, when it is valid RFC 3339.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redacted(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "[REDACTED]" }
        }

        f.debug_struct("CredentialRecord")
            .field("server", &self.server)
            .field("certificate_authority_data", &self.certificate_authority_data)
            .field("client_certificate_data", &self.client_certificate_data)
            .field("client_key_data", &redacted(&self.client_key_data))
            .field("token", &redacted(&self.token))
            .field("expires_at", &self.expires_at)
            .field("error_id", &self.error_id)
            .field("error_message", &self.error_message)
            .finish()
    }
}
