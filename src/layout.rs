//! Target-directory construction from tenant and record coordinates.
//!
//! Artifacts live under a deterministic four-level layout inside the
//! installation's data directory:
//!
//! ```text
//! <data_dir>/certificates/<product_version>/<tenant>/<record_folder>/
//! ```

use std::path::{Path, PathBuf};

use crate::error::PfxStoreError;

pub type Result<T> = std::result::Result<T, PfxStoreError>;

/// Resolves artifact directories from installation configuration.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    data_dir: PathBuf,
    product_version: String,
}

impl StoreLayout {
    /// Builds a layout from the installation's data directory and product
    /// version (both come from configuration, not from user input).
    pub fn new(data_dir: impl Into<PathBuf>, product_version: impl Into<String>) -> Self {
        StoreLayout {
            data_dir: data_dir.into(),
            product_version: product_version.into(),
        }
    }

    /// The directory that holds artifacts for one tenant's record.
    ///
    /// `tenant` and `record_folder` come from stored records and are validated
    /// as single path components so they cannot escape the data directory.
    pub fn record_dir(&self, tenant: &str, record_folder: &str) -> Result<PathBuf> {
        validate_component(tenant)?;
        validate_component(record_folder)?;
        Ok(self
            .data_dir
            .join("certificates")
            .join(&self.product_version)
            .join(tenant)
            .join(record_folder))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn validate_component(component: &str) -> Result<()> {
    if component.is_empty()
        || component == "."
        || component == ".."
        || component.contains(['/', '\\'])
    {
        return Err(PfxStoreError::InvalidInput(format!(
            "invalid path component: {component:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_four_level_record_dir() {
        let layout = StoreLayout::new("/var/lib/erp", "16.0");
        let dir = layout.record_dir("acme_db", "cert_0007").unwrap();
        assert_eq!(
            dir,
            PathBuf::from("/var/lib/erp/certificates/16.0/acme_db/cert_0007")
        );
    }

    #[test]
    fn rejects_traversal_components() {
        let layout = StoreLayout::new("/var/lib/erp", "16.0");
        assert!(layout.record_dir("..", "cert_0007").is_err());
        assert!(layout.record_dir("acme_db", "a/b").is_err());
        assert!(layout.record_dir("", "cert_0007").is_err());
        assert!(layout.record_dir("acme_db", "..\\up").is_err());
    }
}
