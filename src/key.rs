use const_oid::db::{rfc5912, rfc8410};
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use pkcs8::{DecodePrivateKey, EncodePrivateKey, PrivateKeyInfo};
use rsa::{RsaPrivateKey, pkcs1::EncodeRsaPrivateKey};
use zeroize::Zeroizing;

use crate::error::PfxStoreError;
use crate::pem_utils::der_to_pem;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

/// A decrypted private key extracted from a PKCS#12 archive.
///
/// Exists only transiently in memory between decoding the archive and writing
/// the PEM artifact.
pub enum PrivateKey {
    Rsa(Box<RsaPrivateKey>),
    EcdsaP256(p256::SecretKey),
    EcdsaP384(p384::SecretKey),
    EcdsaP521(p521::SecretKey),
    Ed25519(Box<Ed25519SigningKey>),
}

impl PrivateKey {
    /// Decodes a private key from PKCS#8 DER, dispatching on the algorithm
    /// identifier.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)?;
        let alg = info.algorithm.oid;
        if alg == rfc5912::RSA_ENCRYPTION {
            Ok(PrivateKey::Rsa(Box::new(RsaPrivateKey::from_pkcs8_der(
                der,
            )?)))
        } else if alg == rfc5912::ID_EC_PUBLIC_KEY {
            let curve = info
                .algorithm
                .parameters_oid()
                .map_err(|e| PfxStoreError::Decoding(e.to_string()))?;
            if curve == rfc5912::SECP_256_R_1 {
                Ok(PrivateKey::EcdsaP256(p256::SecretKey::from_pkcs8_der(der)?))
            } else if curve == rfc5912::SECP_384_R_1 {
                Ok(PrivateKey::EcdsaP384(p384::SecretKey::from_pkcs8_der(der)?))
            } else if curve == rfc5912::SECP_521_R_1 {
                Ok(PrivateKey::EcdsaP521(p521::SecretKey::from_pkcs8_der(der)?))
            } else {
                Err(PfxStoreError::InvalidInput(format!(
                    "unsupported elliptic curve: {curve}"
                )))
            }
        } else if alg == rfc8410::ID_ED_25519 {
            Ok(PrivateKey::Ed25519(Box::new(
                Ed25519SigningKey::from_pkcs8_der(der)?,
            )))
        } else {
            Err(PfxStoreError::InvalidInput(format!(
                "unsupported private key algorithm: {alg}"
            )))
        }
    }

    /// Serializes the key as unencrypted PEM in the traditional format for its
    /// algorithm: PKCS#1 for RSA, SEC1 for ECDSA.
    ///
    /// Ed25519 has no traditional encoding and is emitted as unencrypted
    /// PKCS#8. The archive's own encryption is intentionally stripped: the
    /// stored key is protected by filesystem access control and consumed
    /// unattended by downstream signing operations. Intermediate buffers and
    /// the returned PEM are wiped when dropped.
    pub fn to_traditional_pem(&self) -> Result<Zeroizing<String>> {
        let (label, der): (&str, Zeroizing<Vec<u8>>) = match self {
            PrivateKey::Rsa(key) => (
                "RSA PRIVATE KEY",
                Zeroizing::new(key.to_pkcs1_der()?.as_bytes().to_vec()),
            ),
            PrivateKey::EcdsaP256(key) => (
                "EC PRIVATE KEY",
                key.to_sec1_der()
                    .map_err(|e| PfxStoreError::Encoding(e.to_string()))?,
            ),
            PrivateKey::EcdsaP384(key) => (
                "EC PRIVATE KEY",
                key.to_sec1_der()
                    .map_err(|e| PfxStoreError::Encoding(e.to_string()))?,
            ),
            PrivateKey::EcdsaP521(key) => (
                "EC PRIVATE KEY",
                key.to_sec1_der()
                    .map_err(|e| PfxStoreError::Encoding(e.to_string()))?,
            ),
            PrivateKey::Ed25519(key) => (
                "PRIVATE KEY",
                Zeroizing::new(key.to_pkcs8_der()?.as_bytes().to_vec()),
            ),
        };
        Ok(Zeroizing::new(der_to_pem(&der, label)))
    }

    /// Human-readable algorithm name, for diagnostics only.
    pub fn algorithm(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => "RSA",
            PrivateKey::EcdsaP256(_) => "ECDSA P-256",
            PrivateKey::EcdsaP384(_) => "ECDSA P-384",
            PrivateKey::EcdsaP521(_) => "ECDSA P-521",
            PrivateKey::Ed25519(_) => "Ed25519",
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    // Key material must never reach logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.algorithm()).finish()
    }
}
