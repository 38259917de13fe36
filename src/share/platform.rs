//! The native share primitive and the implementations that ship with the CLI.

use std::future::Future;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::PlatformShareError;

/// What gets handed to the share sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareRequest<'a> {
    pub message: Option<&'a str>,
    pub attachment: Option<&'a Path>,
}

/// A platform share capability (OS share sheet, outbox, ...).
///
/// The attachment path is only valid for the duration of the call; the flow
/// deletes it as soon as the returned future completes.
pub trait SharePlatform {
    fn share(
        &self,
        request: ShareRequest<'_>,
    ) -> impl Future<Output = Result<(), PlatformShareError>>;
}

/// Prints shared content to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleShare;

impl SharePlatform for ConsoleShare {
    async fn share(&self, request: ShareRequest<'_>) -> Result<(), PlatformShareError> {
        if let Some(message) = request.message {
            println!("{}", message);
        }
        if let Some(path) = request.attachment {
            println!("[attachment: {}]", path.display());
        }
        Ok(())
    }
}

/// Delivers each share into an outbox directory: the attachment is copied and
/// the message written alongside it, both under one unique stem.
#[derive(Debug, Clone)]
pub struct DirectoryShare {
    outbox: PathBuf,
}

impl DirectoryShare {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
        }
    }

    pub fn outbox(&self) -> &Path {
        &self.outbox
    }
}

impl SharePlatform for DirectoryShare {
    async fn share(&self, request: ShareRequest<'_>) -> Result<(), PlatformShareError> {
        if request.message.is_none() && request.attachment.is_none() {
            return Err(PlatformShareError::Failed("nothing to share".into()));
        }

        tokio::fs::create_dir_all(&self.outbox).await?;
        let stem = format!("share-{}", Uuid::new_v4());

        if let Some(path) = request.attachment {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("bin");
            let dest = self.outbox.join(format!("{}.{}", stem, ext));
            tokio::fs::copy(path, &dest).await?;
        }
        if let Some(message) = request.message {
            let dest = self.outbox.join(format!("{}.txt", stem));
            tokio::fs::write(&dest, message).await?;
        }

        tracing::info!(outbox = %self.outbox.display(), stem = %stem, "Share delivered to outbox");
        Ok(())
    }
}
