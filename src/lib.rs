//! # pfxstore - PKCS#12 to PEM Artifact Extraction
//!
//! pfxstore extracts a private key and its leaf certificate from a
//! password-protected PKCS#12 archive and persists them as separate
//! PEM-encoded files under a deterministic, per-tenant directory layout.
//! Decoding is built entirely with rustcrypto libraries plus a pure Rust
//! PKCS#12 parser, with no dependency on OpenSSL (except for testing).
//!
//! It is designed for record-management applications (e.g. tax-authority
//! integrations) where an operator uploads a certificate bundle once and
//! downstream signing operations then consume the stored key and certificate
//! unattended. The hosting application supplies the archive bytes, the
//! passphrase and the directory coordinates, and receives two artifact paths
//! or a single actionable error.
//!
//! ## What a successful extraction produces
//!
//! - `private_<unique>.pem` — the decrypted private key as unencrypted,
//!   traditional-format PEM (PKCS#1 for RSA, SEC1 for ECDSA). The archive's
//!   own encryption is stripped on purpose: the stored key is protected by
//!   filesystem access control inside the installation's data directory.
//! - `public_<unique>.crt` — the leaf certificate as PEM. Intermediate and
//!   root certificates bundled in the archive are ignored.
//!
//! File names are unique per invocation, so concurrent uploads into the same
//! directory never collide.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pfxstore::archive::Passphrase;
//! use pfxstore::extract::extract_to_dir;
//! use pfxstore::layout::StoreLayout;
//!
//! # fn main() -> Result<(), pfxstore::error::PfxStoreError> {
//! let archive = std::fs::read("upload.p12")?;
//!
//! // <data_dir>/certificates/<product_version>/<tenant>/<record_folder>/
//! let layout = StoreLayout::new("/var/lib/erp", "16.0");
//! let directory = layout.record_dir("acme_db", "cert_0007")?;
//!
//! let extraction = extract_to_dir(&archive, &Passphrase::new("secret123"), &directory)?;
//! println!("key:  {}", extraction.private_key_path.display());
//! println!("cert: {}", extraction.certificate_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Decoding without persisting
//!
//! ```rust,no_run
//! use pfxstore::archive::{decode, Passphrase};
//!
//! # fn main() -> Result<(), pfxstore::error::PfxStoreError> {
//! let archive = std::fs::read("upload.p12")?;
//! let (key, cert) = decode(&archive, &Passphrase::new("secret123"))?;
//! println!("{} key for {}", key.algorithm(), cert.subject());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All failures surface as [`error::PfxStoreError`]. A wrong passphrase and a
//! corrupt archive are both deterministic [`error::PfxStoreError::Decryption`]
//! failures; the caller should re-prompt, never retry. At the display
//! boundary, [`error::PfxStoreError::user_message`] flattens the structured
//! error to its innermost human-readable sentence:
//!
//! ```rust
//! use pfxstore::archive::{decode, Passphrase};
//!
//! if let Err(err) = decode(b"not an archive", &Passphrase::new("wrong")) {
//!     eprintln!("{}", err.user_message());
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`archive`]: PKCS#12 parsing and passphrase-based decryption
//! - [`key`]: decrypted private keys and traditional-format PEM serialization
//! - [`cert`]: leaf certificates and PEM serialization
//! - [`store`]: collision-free, durable artifact persistence
//! - [`layout`]: per-tenant target-directory construction
//! - [`extract`]: end-to-end orchestration for the hosting workflow
//! - [`backend`]: cryptographic provider version guard
//! - [`error`]: error types and user-facing message flattening

pub mod archive;
pub mod backend;
pub mod cert;
pub mod error;
pub mod extract;
pub mod key;
pub mod layout;
pub mod pem_utils;
pub mod store;
