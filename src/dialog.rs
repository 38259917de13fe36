//! Share dialogs.
//!
//! A dialog owns its draft state and answers its invoker exactly once over a
//! oneshot channel. Dropping a dialog without answering reads as a cancel.

use tokio::sync::oneshot;

use crate::error::SelectionError;
use crate::models::{PhotoSelection, Product, Selection, ShareField, ShareOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult<T> {
    Confirmed(T),
    Cancelled,
}

impl<T> DialogResult<T> {
    pub fn confirmed(self) -> Option<T> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Cancelled => None,
        }
    }
}

/// The invoker's end of a dialog.
#[derive(Debug)]
pub struct DialogReceiver<T> {
    rx: oneshot::Receiver<DialogResult<T>>,
}

impl<T> DialogReceiver<T> {
    pub async fn result(self) -> DialogResult<T> {
        self.rx.await.unwrap_or(DialogResult::Cancelled)
    }
}

fn channel<T>() -> (oneshot::Sender<DialogResult<T>>, DialogReceiver<T>) {
    let (tx, rx) = oneshot::channel();
    (tx, DialogReceiver { rx })
}

/// Pick which product fields go into a shared summary.
#[derive(Debug)]
pub struct ShareOptionsDialog {
    options: ShareOptions,
    tx: oneshot::Sender<DialogResult<ShareOptions>>,
}

impl ShareOptionsDialog {
    pub fn open(initial: ShareOptions) -> (Self, DialogReceiver<ShareOptions>) {
        let (tx, rx) = channel();
        (Self { options: initial, tx }, rx)
    }

    pub fn toggle(&mut self, field: ShareField) {
        self.options.toggle(field);
    }

    pub fn options(&self) -> ShareOptions {
        self.options
    }

    /// Rows to render: label and current state, in display order.
    pub fn rows(&self) -> Vec<(ShareField, bool)> {
        ShareField::all().map(|f| (f, self.options.get(f))).collect()
    }

    pub fn confirm(self) {
        let _ = self.tx.send(DialogResult::Confirmed(self.options));
    }

    pub fn cancel(self) {
        let _ = self.tx.send(DialogResult::Cancelled);
    }
}

/// Pick photos of one color for a batch share.
#[derive(Debug)]
pub struct PhotoPickerDialog {
    color: usize,
    image_count: usize,
    selected: PhotoSelection,
    tx: oneshot::Sender<DialogResult<PhotoSelection>>,
}

impl PhotoPickerDialog {
    /// Open over the images of the selected color. Fails if the color index
    /// does not fit the product.
    pub fn open(
        product: &Product,
        selection: Selection,
    ) -> Result<(Self, DialogReceiver<PhotoSelection>), SelectionError> {
        let color = selection.resolve_color(product)?;
        let (tx, rx) = channel();
        let dialog = Self {
            color: selection.color,
            image_count: color.images.len(),
            selected: PhotoSelection::new(),
            tx,
        };
        Ok((dialog, rx))
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), SelectionError> {
        if index >= self.image_count {
            return Err(SelectionError::ImageOutOfRange {
                color: self.color,
                index,
                len: self.image_count,
            });
        }
        let flag = self.selected.entry(index).or_insert(false);
        *flag = !*flag;
        Ok(())
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(&index).copied().unwrap_or(false)
    }

    pub fn selected(&self) -> &PhotoSelection {
        &self.selected
    }

    pub fn confirm(self) {
        let _ = self.tx.send(DialogResult::Confirmed(self.selected));
    }

    pub fn cancel(self) {
        let _ = self.tx.send(DialogResult::Cancelled);
    }
}
