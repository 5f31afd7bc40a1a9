use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Url};
use tracing::{debug, warn};

use super::error::CredentialsError;
use super::transport::Transport;
use crate::config::{AuthorityConfig, CLUSTER_ID_PLACEHOLDER};

/// Issues the credentials request for a cluster and returns the raw body.
pub struct CredentialsFetcher {
    transport: Box<dyn Transport + Send + Sync>,
    endpoint_template: String,
}

impl CredentialsFetcher {
    /// Creates a fetcher for `endpoint_template`, which must contain
    /// `{cluster_id}`; requests built from a template without it fail.
    pub fn new(
        transport: Box<dyn Transport + Send + Sync>,
        endpoint_template: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint_template: endpoint_template.into(),
        }
    }

    pub fn from_config(
        transport: Box<dyn Transport + Send + Sync>,
        authority: &AuthorityConfig,
    ) -> Self {
        Self::new(transport, authority.endpoint_template.clone())
    }

    /// Builds the GET request without sending it.
    ///
    /// The cluster id is percent-encoded into a single path segment but
    /// otherwise passed through untouched.
    pub fn build_request(
        &self,
        cluster_id: &str,
        access_token: &str,
    ) -> Result<Request, CredentialsError> {
        if !self.endpoint_template.contains(CLUSTER_ID_PLACEHOLDER) {
            return Err(CredentialsError::RequestConstruction(
                format!(
                    "endpoint template {:?} does not contain {CLUSTER_ID_PLACEHOLDER}",
                    self.endpoint_template
                )
                .into(),
            ));
        }
        let endpoint = self
            .endpoint_template
            .replace(CLUSTER_ID_PLACEHOLDER, &urlencoding::encode(cluster_id));
        let url =
            Url::parse(&endpoint).map_err(|e| CredentialsError::RequestConstruction(e.into()))?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| CredentialsError::RequestConstruction(e.into()))?;
        authorization.set_sensitive(true);

        let mut request = Request::new(Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);
        Ok(request)
    }

    /// Performs one round trip and returns the response body regardless of
    /// the HTTP status.
    pub async fn fetch(
        &self,
        cluster_id: &str,
        access_token: &str,
    ) -> Result<Vec<u8>, CredentialsError> {
        let request = self.build_request(cluster_id, access_token)?;
        debug!(url = %request.url(), "Calling credentials api");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(CredentialsError::Transport)?;

        if !response.status.is_success() {
            // Classification happens on the body.
            warn!(
                status = %response.status,
                "Credentials api returned a non-success status"
            );
        }
        debug!(bytes = response.body.len(), "Received credentials api response");
        Ok(response.body)
    }
}
