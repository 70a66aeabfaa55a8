//! Durable persistence of extracted artifacts.
//!
//! Each artifact lands in a uniquely-named file inside the target directory,
//! so concurrent extractions into the same directory never collide. Files are
//! fully written, synced and closed before their path is returned; a failed
//! write removes its partial file on drop, so no partial artifact can be
//! mistaken for success. Deleting finished artifacts is the caller's lifecycle
//! concern, not this module's.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::cert::Certificate;
use crate::error::PfxStoreError;
use crate::key::PrivateKey;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

const PRIVATE_KEY_PREFIX: &str = "private_";
const PRIVATE_KEY_SUFFIX: &str = ".pem";
const CERTIFICATE_PREFIX: &str = "public_";
const CERTIFICATE_SUFFIX: &str = ".crt";

/// Creates the target directory and all missing ancestors.
///
/// A directory that already exists, including one created by a concurrent
/// invocation racing this one, is success.
pub fn prepare_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)?;
    Ok(())
}

/// Writes the private key as an unencrypted traditional-format PEM file named
/// `private_<unique>.pem` inside `directory` and returns the final path.
pub fn write_private_key(key: &PrivateKey, directory: &Path) -> Result<PathBuf> {
    let pem = key.to_traditional_pem()?;
    let path = write_artifact(
        pem.as_bytes(),
        directory,
        PRIVATE_KEY_PREFIX,
        PRIVATE_KEY_SUFFIX,
    )?;
    tracing::debug!(algorithm = key.algorithm(), path = %path.display(), "stored private key");
    Ok(path)
}

/// Writes the certificate as a PEM file named `public_<unique>.crt` inside
/// `directory` and returns the final path.
pub fn write_certificate(cert: &Certificate, directory: &Path) -> Result<PathBuf> {
    let pem = cert.to_pem()?;
    let path = write_artifact(
        pem.as_bytes(),
        directory,
        CERTIFICATE_PREFIX,
        CERTIFICATE_SUFFIX,
    )?;
    tracing::debug!(subject = %cert.subject(), path = %path.display(), "stored certificate");
    Ok(path)
}

fn write_artifact(content: &[u8], directory: &Path, prefix: &str, suffix: &str) -> Result<PathBuf> {
    prepare_directory(directory)?;
    let mut file = Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(directory)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    // Persist rather than delete on drop: the artifact outlives this call.
    let (_, path) = file.keep().map_err(|e| PfxStoreError::Io(e.error))?;
    Ok(path)
}
