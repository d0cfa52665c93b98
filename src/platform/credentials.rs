//! Service-account key loading.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Pre-issued service-account key for the imagery platform.
///
/// Token issuance and refresh are the platform operator's concern; this
/// service only presents the key's bearer token on each request.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub api_token: String,
}

impl ServiceAccountKey {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read service account file {}",
                path.as_ref().display()
            )
        })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&content).context("Failed to parse service account file")?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"client_email": "svc@project.example.com", "api_token": "abc123"}}"#
        )
        .unwrap();

        let key = ServiceAccountKey::load_from_file(file.path()).unwrap();
        assert_eq!(key.client_email, "svc@project.example.com");
        assert_eq!(key.api_token, "abc123");
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = ServiceAccountKey::load_from_file("/nonexistent/key.json").unwrap_err();
        assert!(err.to_string().contains("service account"));
    }
}
