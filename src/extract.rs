//! End-to-end extraction: archive in, two artifact paths out.
//!
//! This is the boundary the hosting record-management workflow calls. Any
//! failure leaves no artifact path behind; the full structured error is logged
//! at debug severity while [`crate::error::PfxStoreError::user_message`] gives
//! the one-sentence form for display.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::archive::{self, Passphrase};
use crate::backend;
use crate::cert::Certificate;
use crate::error::PfxStoreError;
use crate::key::PrivateKey;
use crate::store;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

/// The two artifact paths produced by a successful extraction.
///
/// The caller persists these on its own record; this library never deletes
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub private_key_path: PathBuf,
    pub certificate_path: PathBuf,
}

/// Extracts the private key and leaf certificate from a PKCS#12 archive and
/// stores both as PEM files under `directory`, creating it if needed.
///
/// Either both artifacts are written and returned, or neither path is
/// reported: when the certificate write fails after the key write succeeded,
/// the freshly written key file is removed before the error propagates.
pub fn extract_to_dir(
    archive: &[u8],
    passphrase: &Passphrase,
    directory: &Path,
) -> Result<Extraction> {
    let result = run_extraction(archive, passphrase, directory);
    if let Err(err) = &result {
        // Structured chain for diagnostics; callers display user_message().
        tracing::debug!(error = ?err, "certificate extraction failed");
    }
    result
}

/// Like [`extract_to_dir`], but takes the archive as the base64 payload stored
/// on the hosting record.
pub fn extract_base64_to_dir(
    archive_b64: &str,
    passphrase: &Passphrase,
    directory: &Path,
) -> Result<Extraction> {
    // Stored payloads may carry line breaks from the upload widget.
    let cleaned: String = archive_b64.split_whitespace().collect();
    let archive = BASE64.decode(cleaned.as_bytes())?;
    extract_to_dir(&archive, passphrase, directory)
}

fn run_extraction(
    archive: &[u8],
    passphrase: &Passphrase,
    directory: &Path,
) -> Result<Extraction> {
    backend::ensure_supported()?;
    let (key, cert) = archive::decode(archive, passphrase)?;
    persist_artifacts(&key, &cert, directory, store::write_certificate)
}

/// Writes both artifacts, key first. The certificate writer is a parameter so
/// the orphan-cleanup path stays reachable from tests.
fn persist_artifacts<W>(
    key: &PrivateKey,
    cert: &Certificate,
    directory: &Path,
    write_certificate: W,
) -> Result<Extraction>
where
    W: FnOnce(&Certificate, &Path) -> Result<PathBuf>,
{
    store::prepare_directory(directory)?;

    let private_key_path = store::write_private_key(key, directory)?;
    let certificate_path = match write_certificate(cert, directory) {
        Ok(path) => path,
        Err(err) => {
            // Do not leave an orphaned key behind a failed invocation.
            let _ = fs::remove_file(&private_key_path);
            return Err(err);
        }
    };

    Ok(Extraction {
        private_key_path,
        certificate_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key_and_cert() -> (PrivateKey, Certificate) {
        use openssl::asn1::Asn1Time;
        use openssl::bn::BigNum;
        use openssl::hash::MessageDigest;
        use openssl::nid::Nid;
        use openssl::pkey::PKey;
        use openssl::rsa::Rsa;
        use openssl::x509::{X509, X509NameBuilder};

        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa).unwrap();
        let key = PrivateKey::from_pkcs8_der(&pkey.private_key_to_pkcs8().unwrap()).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_nid(Nid::COMMONNAME, "upload.test.local")
            .unwrap();
        let name = name.build();
        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
        builder.set_serial_number(&serial).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&pkey).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(30).unwrap())
            .unwrap();
        builder.sign(&pkey, MessageDigest::sha256()).unwrap();
        let cert = Certificate::from_der(&builder.build().to_der().unwrap()).unwrap();

        (key, cert)
    }

    #[test]
    fn failed_certificate_write_removes_the_fresh_key_file() {
        let (key, cert) = sample_key_and_cert();
        let root = tempfile::tempdir().unwrap();
        let directory = root.path().join("certs");

        let err = persist_artifacts(&key, &cert, &directory, |_, _| {
            Err(PfxStoreError::Io(std::io::Error::other(
                "no space left on device",
            )))
        })
        .unwrap_err();

        assert!(matches!(err, PfxStoreError::Io(_)));
        // The key written before the failure must not be left behind.
        assert_eq!(fs::read_dir(&directory).unwrap().count(), 0);
    }

    #[test]
    fn persist_writes_both_artifacts_through_the_real_writer() {
        let (key, cert) = sample_key_and_cert();
        let root = tempfile::tempdir().unwrap();

        let extraction =
            persist_artifacts(&key, &cert, root.path(), store::write_certificate).unwrap();
        assert!(extraction.private_key_path.exists());
        assert!(extraction.certificate_path.exists());
    }

    #[test]
    fn bad_base64_fails_without_touching_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("certificates").join("t");
        let err =
            extract_base64_to_dir("@@not base64@@", &Passphrase::new("secret123"), &target)
                .unwrap_err();
        assert!(matches!(err, PfxStoreError::InvalidInput(_)));
        assert!(!target.exists());
    }

    #[test]
    fn wrong_archive_fails_without_touching_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("certificates").join("t");
        let err =
            extract_to_dir(b"garbage bytes", &Passphrase::new("secret123"), &target).unwrap_err();
        assert!(matches!(err, PfxStoreError::Decryption(_)));
        assert!(!target.exists());
    }

    #[test]
    fn base64_payload_tolerates_line_breaks() {
        // Still fails at decryption (garbage content), but the base64 layer
        // must accept the wrapped payload.
        let payload = "Z2FyYmFn\nZSBieXRlcw==";
        let root = tempfile::tempdir().unwrap();
        let err = extract_base64_to_dir(payload, &Passphrase::new("x"), root.path()).unwrap_err();
        assert!(matches!(err, PfxStoreError::Decryption(_)));
    }
}
