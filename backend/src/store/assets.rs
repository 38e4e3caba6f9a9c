use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::StoreError;

/// URL path the upload directory is mounted under.
const PUBLIC_PREFIX: &str = "/static/images";

/// Where a stored cover image landed: its public URL and the filesystem
/// location kept in the database for later removal.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub url: String,
    pub internal_path: String,
}

/// Durable storage for uploaded cover images.
#[derive(Clone)]
pub struct AssetStore {
    upload_dir: PathBuf,
    public_base_url: String,
}

impl AssetStore {
    pub fn new(upload_dir: impl Into<PathBuf>, public_base_url: &str) -> Self {
        AssetStore {
            upload_dir: upload_dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Writes the content under a name derived from `id` plus the original
    /// file extension.
    pub fn save(
        &self,
        id: &str,
        content: &[u8],
        original_filename: &str,
    ) -> Result<StoredAsset, StoreError> {
        let filename = match Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        };
        let path = self.upload_dir.join(&filename);
        fs::write(&path, content)?;

        Ok(StoredAsset {
            url: format!("{}{}/{}", self.public_base_url, PUBLIC_PREFIX, filename),
            internal_path: path.display().to_string(),
        })
    }

    /// Best-effort removal. A missing file is a no-op; any other failure is
    /// logged and must not fail the surrounding operation.
    pub fn delete(&self, path: &str) {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("could not remove cover image {}: {}", path, err),
        }
    }
}
