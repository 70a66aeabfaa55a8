//! Version guard for the linked cryptographic provider stack.
//!
//! The hosting workflow refuses to handle key material when the provider is
//! older than a known floor. The check is a pure precondition evaluated at the
//! start of every decode, not a process-global evaluated at load time.

use std::fmt;
use std::str::FromStr;

use crate::error::PfxStoreError;

/// Compatibility level of the provider stack this build links against.
pub const PROVIDER_VERSION: Version = Version::new(3, 4, 0);

/// Oldest provider release whose PKCS#12 decryption output we trust.
pub const MIN_PROVIDER_VERSION: Version = Version::new(3, 0, 0);

/// A dotted-decimal semantic version, ordered field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = PfxStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        let mut next = || -> Result<u64, PfxStoreError> {
            parts
                .next()
                .unwrap_or("0")
                .parse()
                .map_err(|_| PfxStoreError::InvalidInput(format!("malformed version string: {s}")))
        };
        Ok(Version::new(next()?, next()?, next()?))
    }
}

/// Checks that the linked provider meets the supported floor.
///
/// Invoked before any decode attempt so an unsupported environment fails fast
/// with an actionable message instead of a cryptic decryption error.
pub fn ensure_supported() -> Result<(), PfxStoreError> {
    ensure_supported_version(PROVIDER_VERSION)
}

/// Floor check against an explicit version, for callers that probe the
/// provider themselves.
pub fn ensure_supported_version(found: Version) -> Result<(), PfxStoreError> {
    if found < MIN_PROVIDER_VERSION {
        tracing::warn!(%found, minimum = %MIN_PROVIDER_VERSION, "cryptographic provider version is not supported");
        return Err(PfxStoreError::UnsupportedEnvironment {
            found,
            minimum: MIN_PROVIDER_VERSION,
        });
    }
    Ok(())
}
