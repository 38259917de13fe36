//! The product share flow: compose, fetch, hand off, clean up.

use crate::error::{DownloadError, SelectionError, ShareError};
use crate::models::{
    PhotoSelection, Product, Selection, ShareOptions, selected_photo_indices,
};

use super::compose::ShareComposer;
use super::download::{ImageDownloader, LocalImage};
use super::platform::{SharePlatform, ShareRequest};

/// What a batch photo share does when one image fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop at the first failed image.
    #[default]
    AbortOnFailure,
    /// Log the failed image and carry on with the rest.
    SkipFailed,
}

impl BatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchPolicy::AbortOnFailure => "abort",
            BatchPolicy::SkipFailed => "skip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" | "abort-on-failure" => Some(BatchPolicy::AbortOnFailure),
            "skip" | "skip-failed" => Some(BatchPolicy::SkipFailed),
            _ => None,
        }
    }
}

/// Result of a single product share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOutcome {
    /// An image copy was downloaded and passed along
    pub image_attached: bool,
    /// The platform accepted the share
    pub delivered: bool,
}

/// Per-image results of a batch photo share, by image index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub shared: Vec<usize>,
    pub failed: Vec<(usize, String)>,
    pub not_attempted: Vec<usize>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.not_attempted.is_empty()
    }
}

pub struct ShareFlow<P> {
    composer: ShareComposer,
    downloader: ImageDownloader,
    platform: P,
    batch_policy: BatchPolicy,
}

impl<P: SharePlatform> ShareFlow<P> {
    pub fn new(composer: ShareComposer, downloader: ImageDownloader, platform: P) -> Self {
        Self {
            composer,
            downloader,
            platform,
            batch_policy: BatchPolicy::default(),
        }
    }

    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn composer(&self) -> &ShareComposer {
        &self.composer
    }

    /// Text summary for the selected product variant.
    pub fn compose_text(
        &self,
        product: &Product,
        selection: Selection,
        options: &ShareOptions,
    ) -> Result<String, ShareError> {
        let selected = selection.resolve(product)?;
        Ok(self.composer.compose(&selected, options))
    }

    pub async fn fetch_local_image_copy(
        &self,
        image_url: Option<&str>,
    ) -> Result<LocalImage, DownloadError> {
        self.downloader.fetch_local_copy(image_url).await
    }

    /// Share the product summary, with the selected image when requested.
    ///
    /// Only an invalid selection is reported as an error. A missing image URL
    /// or a failed download falls back to a text-only share and a failed platform call is logged;
    /// either way the temp image is gone when this returns.
    pub async fn share(
        &self,
        product: &Product,
        selection: Selection,
        options: &ShareOptions,
    ) -> Result<ShareOutcome, ShareError> {
        let selected = selection.resolve(product)?;
        let message = self.composer.compose(&selected, options);

        let image = if options.image {
            match self.fetch_local_image_copy(selected.image_url).await {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        product_id = %product.id,
                        image_url = selected.image_url.unwrap_or_default(),
                        "Image download failed, sharing text only"
                    );
                    None
                }
            }
        } else {
            None
        };
        let image_attached = image.is_some();

        let result = self
            .platform
            .share(ShareRequest {
                message: Some(&message),
                attachment: image.as_ref().map(LocalImage::path),
            })
            .await;

        if let Some(image) = image {
            release(image);
        }

        let delivered = match result {
            Ok(()) => {
                tracing::info!(product_id = %product.id, image_attached, "Product shared");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, product_id = %product.id, "Platform share failed");
                false
            }
        };

        Ok(ShareOutcome {
            image_attached,
            delivered,
        })
    }

    /// Share each selected photo of the selected color on its own.
    ///
    /// Images go one at a time in index order: download, share, delete, then
    /// the next. All indices are checked before anything is downloaded.
    pub async fn share_selected_photos(
        &self,
        product: &Product,
        selection: Selection,
        photos: &PhotoSelection,
    ) -> Result<BatchReport, ShareError> {
        let color = selection.resolve_color(product)?;
        let indices = selected_photo_indices(photos);
        if indices.is_empty() {
            return Err(SelectionError::NoSelection.into());
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= color.images.len()) {
            return Err(SelectionError::ImageOutOfRange {
                color: selection.color,
                index,
                len: color.images.len(),
            }
            .into());
        }

        let mut report = BatchReport::default();
        for (position, &index) in indices.iter().enumerate() {
            match self.share_one_photo(&color.images[index]).await {
                Ok(()) => report.shared.push(index),
                Err(reason) => {
                    tracing::warn!(
                        product_id = %product.id,
                        image_index = index,
                        reason = %reason,
                        policy = self.batch_policy.as_str(),
                        "Photo share failed"
                    );
                    report.failed.push((index, reason));
                    if self.batch_policy == BatchPolicy::AbortOnFailure {
                        report.not_attempted = indices[position + 1..].to_vec();
                        break;
                    }
                }
            }
        }

        tracing::info!(
            product_id = %product.id,
            shared = report.shared.len(),
            failed = report.failed.len(),
            "Photo batch finished"
        );
        Ok(report)
    }

    async fn share_one_photo(&self, image_url: &str) -> Result<(), String> {
        let image = self
            .fetch_local_image_copy(Some(image_url))
            .await
            .map_err(|e| e.to_string())?;

        let result = self
            .platform
            .share(ShareRequest {
                message: None,
                attachment: Some(image.path()),
            })
            .await;

        release(image);
        result.map_err(|e| e.to_string())
    }
}

fn release(image: LocalImage) {
    let path = image.path().to_path_buf();
    if let Err(e) = image.delete() {
        tracing::warn!(error = %e, path = %path.display(), "Failed to delete shared image");
    }
}
