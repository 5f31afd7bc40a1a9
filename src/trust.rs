//! Caller-owned TLS trust material and the installer that updates it.

use tracing::debug;

/// A destination for certificate-authority bytes.
///
/// Implemented by whatever structure the caller later hands to its TLS
/// stack. The refresh pipeline writes through this trait exactly once per
/// successful invocation and never reads from it.
pub trait TrustConfig {
    fn set_ca_data(&mut self, ca_data: Vec<u8>);
}

/// TLS client settings for talking to a cluster's control plane.
///
/// Only `ca_data` is written by the refresh pipeline; the remaining fields
/// belong to the caller and are never read or touched here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsClientConfig {
    /// Trusted root certificates, usually PEM.
    pub ca_data: Vec<u8>,
    pub cert_data: Vec<u8>,
    pub key_data: Vec<u8>,
    /// Overrides the name used for server certificate verification.
    pub server_name: Option<String>,
    pub insecure: bool,
}

impl TrustConfig for TlsClientConfig {
    fn set_ca_data(&mut self, ca_data: Vec<u8>) {
        self.ca_data = ca_data;
    }
}

/// Overwrites the CA bytes of `trust` with `ca_data`, verbatim.
///
/// No attempt is made to check that the bytes form a certificate.
pub fn install<T: TrustConfig + ?Sized>(trust: &mut T, ca_data: Vec<u8>) {
    debug!(bytes = ca_data.len(), "Installing certificate authority data");
    trust.set_ca_data(ca_data);
}
