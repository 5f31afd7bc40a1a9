//! Retrieval of short-lived cluster credentials and installation of the
//! cluster's certificate authority.
//!
//! The pipeline is strictly linear: fetch the raw response, parse it into a
//! [`CredentialRecord`], classify it, decode the CA data and install it into
//! a caller-owned [`TrustConfig`]. The first failing stage ends the run.

pub mod decoder;
pub mod error;
pub mod fetcher;
pub mod record;
pub mod transport;
pub mod updater;

pub use decoder::decode_certificate;
pub use error::CredentialsError;
pub use fetcher::CredentialsFetcher;
pub use record::CredentialRecord;
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use updater::CredentialsUpdater;

use crate::config::DEFAULT_ENDPOINT_TEMPLATE;
use crate::trust::TrustConfig;

/// Refreshes `trust` using a default HTTP client and the default authority
/// endpoint.
pub async fn update<T: TrustConfig + ?Sized>(
    cluster_id: &str,
    access_token: &str,
    trust: &mut T,
) -> Result<(), CredentialsError> {
    let fetcher = CredentialsFetcher::new(
        Box::new(HttpTransport::default()),
        DEFAULT_ENDPOINT_TEMPLATE,
    );
    CredentialsUpdater::new(fetcher)
        .update(cluster_id, access_token, trust)
        .await
}
