//! Scoped local copies of remote product images.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tempfile::TempPath;
use url::Url;

use crate::error::DownloadError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
const FALLBACK_EXTENSION: &str = "jpg";

/// A downloaded image living in the share cache.
///
/// The file is removed when this value is dropped or explicitly deleted.
#[derive(Debug)]
pub struct LocalImage {
    path: TempPath,
    bytes: u64,
}

impl LocalImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }

    /// Remove the file now. A file that is already gone is not an error.
    pub fn delete(self) -> io::Result<()> {
        match self.path.close() {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Downloads images into a cache directory under unique names.
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
    cache_dir: PathBuf,
    timeout: Option<Duration>,
}

impl ImageDownloader {
    pub fn new(client: Client, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Download `image_url` into a fresh file in the cache directory.
    ///
    /// Nothing is written unless the server answers with a success status.
    pub async fn fetch_local_copy(&self, image_url: Option<&str>) -> Result<LocalImage, DownloadError> {
        let raw = image_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(DownloadError::MissingUrl)?;

        let url = Url::parse(raw).map_err(|e| DownloadError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let mut response = request.send().await.map_err(DownloadError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        std::fs::create_dir_all(&self.cache_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("share_image_")
            .suffix(&format!(".{}", image_extension(&url)))
            .tempfile_in(&self.cache_dir)?;

        let mut bytes = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(DownloadError::network)? {
            file.write_all(&chunk)?;
            bytes += chunk.len() as u64;
        }
        file.flush()?;

        let path = file.into_temp_path();
        tracing::debug!(url = %url, path = %path.display(), bytes, "Downloaded image for sharing");

        Ok(LocalImage { path, bytes })
    }
}

/// File extension for the cached copy, taken from the URL path when it is a
/// known image type.
fn image_extension(url: &Url) -> String {
    Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}
