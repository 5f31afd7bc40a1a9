use base64::{DecodeError, Engine as _, engine::general_purpose::STANDARD};

use super::error::CredentialsError;

/// Decodes the authority's base64 `certificate_authority_data`.
///
/// An empty input yields an empty vector; rejecting a missing certificate is
/// left to the caller (see `CredentialsUpdater::require_certificate`).
///
/// When the input holds symbols outside the standard alphabet, the error
/// points at the first of them.
pub fn decode_certificate(encoded: &str) -> Result<Vec<u8>, CredentialsError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| first_invalid_byte(encoded).unwrap_or(e).into())
}

fn first_invalid_byte(encoded: &str) -> Option<DecodeError> {
    encoded
        .bytes()
        .enumerate()
        .find(|&(_, b)| !(b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')))
        .map(|(offset, byte)| DecodeError::InvalidByte(offset, byte))
}
