//! use pfxstore::error::PfxStoreError;

use thiserror::Error;

use crate::backend::Version;

/// Represents errors that can occur in the pfxstore library.
///
/// Errors are kept structured internally; the hosting application should call
/// [`PfxStoreError::user_message`] at its display boundary to obtain a single
/// human-readable sentence instead of a full error chain.
#[derive(Debug, Error)]
pub enum PfxStoreError {
    /// The linked cryptographic provider is older than the supported floor.
    #[error("cryptographic provider version {found} is not supported, upgrade to {minimum} or greater")]
    UnsupportedEnvironment {
        /// The provider version that was found.
        found: Version,
        /// The minimum version the library supports.
        minimum: Version,
    },

    /// The archive could not be decrypted or parsed (wrong passphrase or corrupt data).
    #[error("failed to decrypt archive: {0}")]
    Decryption(String),

    /// Error during data decoding.
    #[error("failed to decode data: {0}")]
    Decoding(String),

    /// Error during data encoding.
    #[error("failed to encode data: {0}")]
    Encoding(String),

    /// Error due to invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Directory creation or file write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PfxStoreError {
    /// Returns the innermost human-readable message of this error, suitable
    /// for display to an end user.
    ///
    /// The structured error (with its full `source()` chain) remains available
    /// for diagnostics; this flattens it to the last, most specific message.
    pub fn user_message(&self) -> String {
        let mut last: &dyn std::error::Error = self;
        while let Some(source) = last.source() {
            last = source;
        }
        last.to_string()
    }
}

impl From<der::Error> for PfxStoreError {
    fn from(err: der::Error) -> Self {
        PfxStoreError::Decoding(err.to_string())
    }
}

impl From<pkcs8::Error> for PfxStoreError {
    fn from(err: pkcs8::Error) -> Self {
        PfxStoreError::Decoding(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for PfxStoreError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        PfxStoreError::Encoding(err.to_string())
    }
}

impl From<pem::PemError> for PfxStoreError {
    fn from(err: pem::PemError) -> Self {
        PfxStoreError::Decoding(err.to_string())
    }
}

impl From<base64::DecodeError> for PfxStoreError {
    fn from(err: base64::DecodeError) -> Self {
        PfxStoreError::InvalidInput(err.to_string())
    }
}

impl From<p12_keystore::error::Error> for PfxStoreError {
    /// Wrong passphrase and malformed archive are indistinguishable to the
    /// caller; both surface as a decryption failure carrying the keystore
    /// library's own diagnostic message.
    fn from(err: p12_keystore::error::Error) -> Self {
        PfxStoreError::Decryption(err.to_string())
    }
}
