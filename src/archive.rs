//! PKCS#12 archive decoding.
//!
//! Parses a password-protected PKCS#12 container and yields the decrypted
//! private key together with the leaf certificate. Parsing is pure Rust via
//! `p12-keystore`; no OpenSSL involved.

use p12_keystore::{KeyStore, KeyStoreEntry};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::backend;
use crate::cert::Certificate;
use crate::error::PfxStoreError;
use crate::key::PrivateKey;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

/// The caller-supplied archive passphrase.
///
/// Text input is normalized to bytes as UTF-8. The value should live only as
/// long as the decode call that consumes it; the backing memory is wiped on
/// drop and `Debug` output is redacted so the secret can never reach logs.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(secret: impl Into<String>) -> Self {
        Passphrase(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 byte form of the passphrase.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

impl From<&str> for Passphrase {
    fn from(secret: &str) -> Self {
        Passphrase::new(secret)
    }
}

/// Decrypts and parses a PKCS#12 archive, returning the private key and the
/// leaf certificate.
///
/// The provider version guard runs first so an unsupported environment fails
/// before the archive is touched. A wrong passphrase and a malformed archive
/// both fail with [`PfxStoreError::Decryption`]; the failure is deterministic,
/// so callers should re-prompt rather than retry.
///
/// Bundles carrying a full chain yield only the end-entity certificate;
/// intermediate and root certificates are ignored.
pub fn decode(archive: &[u8], passphrase: &Passphrase) -> Result<(PrivateKey, Certificate)> {
    backend::ensure_supported()?;

    let keystore = KeyStore::from_pkcs12(archive, passphrase.as_str())?;

    let chain = keystore
        .entries()
        .find_map(|(_, entry)| match entry {
            KeyStoreEntry::PrivateKeyChain(chain) => Some(chain),
            _ => None,
        })
        .ok_or_else(|| {
            PfxStoreError::Decryption("archive contains no private key".to_string())
        })?;

    let key = PrivateKey::from_pkcs8_der(chain.key())?;

    let leaf = chain
        .chain()
        .first()
        .map(|cert| cert.as_der().to_vec())
        .or_else(|| {
            // Some producers store the certificate as a standalone entry
            // instead of attaching it to the key chain.
            keystore.entries().find_map(|(_, entry)| match entry {
                KeyStoreEntry::Certificate(cert) => Some(cert.as_der().to_vec()),
                _ => None,
            })
        })
        .ok_or_else(|| {
            PfxStoreError::Decryption("archive contains no certificate".to_string())
        })?;

    let cert = Certificate::from_der(&leaf)?;

    tracing::debug!(
        algorithm = key.algorithm(),
        subject = %cert.subject(),
        "decoded PKCS#12 archive"
    );

    Ok((key, cert))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passphrase_debug_is_redacted() {
        let passphrase = Passphrase::new("secret123");
        assert_eq!(format!("{passphrase:?}"), "Passphrase(<redacted>)");
        assert_eq!(passphrase.as_bytes(), b"secret123");
    }

    #[test]
    fn passphrase_wipes_its_backing_memory() {
        let mut passphrase = Passphrase::new("secret123");
        passphrase.zeroize();
        assert!(passphrase.as_bytes().is_empty());
    }

    #[test]
    fn garbage_bytes_fail_as_decryption_error() {
        let err = decode(b"not a pkcs12 archive", &Passphrase::new("irrelevant")).unwrap_err();
        assert!(matches!(err, PfxStoreError::Decryption(_)));
        assert!(!err.user_message().is_empty());
    }

    #[test]
    fn empty_archive_fails_as_decryption_error() {
        let err = decode(&[], &Passphrase::new("secret123")).unwrap_err();
        assert!(matches!(err, PfxStoreError::Decryption(_)));
    }
}
