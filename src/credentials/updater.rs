use tracing::{debug, error, info, instrument};

use super::decoder::decode_certificate;
use super::error::CredentialsError;
use super::fetcher::CredentialsFetcher;
use super::record::CredentialRecord;
use crate::trust::{self, TrustConfig};

/// Runs fetch → parse → classify → decode → install for one cluster.
pub struct CredentialsUpdater {
    fetcher: CredentialsFetcher,
    require_certificate: bool,
}

impl CredentialsUpdater {
    pub fn new(fetcher: CredentialsFetcher) -> Self {
        Self {
            fetcher,
            require_certificate: false,
        }
    }

    /// Reject responses whose certificate authority data is empty instead of
    /// installing zero bytes.
    pub fn require_certificate(mut self, require: bool) -> Self {
        self.require_certificate = require;
        self
    }

    /// Refreshes the CA bytes of `trust` from the authority.
    ///
    /// `trust` is written only after every earlier stage succeeded, so on any
    /// error it is left exactly as it was.
    #[instrument(skip(self, access_token, trust))]
    pub async fn update<T: TrustConfig + ?Sized>(
        &self,
        cluster_id: &str,
        access_token: &str,
        trust: &mut T,
    ) -> Result<(), CredentialsError> {
        let result = self.run(cluster_id, access_token, trust).await;
        if let Err(e) = &result {
            error!(stage = e.stage(), "Credentials update failed: {e}");
        }
        result
    }

    async fn run<T: TrustConfig + ?Sized>(
        &self,
        cluster_id: &str,
        access_token: &str,
        trust: &mut T,
    ) -> Result<(), CredentialsError> {
        let payload = self.fetcher.fetch(cluster_id, access_token).await?;

        let record = CredentialRecord::parse(&payload)?;
        debug!(server = %record.server, "Parsed credentials api response");

        record.classify()?;

        let ca_data = decode_certificate(&record.certificate_authority_data)?;
        if self.require_certificate && ca_data.is_empty() {
            return Err(CredentialsError::MissingCertificate);
        }

        let bytes = ca_data.len();
        trust::install(trust, ca_data);

        match record.expiry() {
            Some(expires_at) => info!(bytes, %expires_at, "Certificate authority updated"),
            None => info!(bytes, "Certificate authority updated"),
        }
        Ok(())
    }
}
