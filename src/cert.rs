use der::{Decode, Encode};
use x509_cert::certificate::CertificateInner;

use crate::error::PfxStoreError;
use crate::pem_utils::der_to_pem;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

/// The leaf (end-entity) certificate extracted from a PKCS#12 archive.
///
/// This struct provides methods to encode the certificate into DER or PEM formats.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Decodes a certificate from DER.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)
            .map_err(|e| PfxStoreError::Decoding(e.to_string()))?;
        Ok(Certificate { inner })
    }

    /// Encodes the certificate into DER format.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded certificate.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| PfxStoreError::Encoding(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    ///
    /// # Returns
    /// A string containing the PEM-encoded certificate.
    pub fn to_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.to_der()?, "CERTIFICATE"))
    }

    /// The certificate's subject distinguished name, for diagnostics.
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }
}
