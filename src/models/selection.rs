use std::collections::BTreeMap;

use crate::error::SelectionError;

use super::{ColorVariant, Product};

/// Photo picker result: image index to "selected" flag.
pub type PhotoSelection = BTreeMap<usize, bool>;

/// Indices flagged true, in ascending order.
pub fn selected_photo_indices(photos: &PhotoSelection) -> Vec<usize> {
    photos
        .iter()
        .filter(|(_, selected)| **selected)
        .map(|(index, _)| *index)
        .collect()
}

/// Raw color/image indices into a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub color: usize,
    pub image: usize,
}

/// A selection checked against a concrete product.
#[derive(Debug, Clone, Copy)]
pub struct SelectedVariant<'a> {
    pub product: &'a Product,
    pub color_index: usize,
    pub color: &'a ColorVariant,
    pub image_index: usize,
    /// `None` when the color has no images
    pub image_url: Option<&'a str>,
}

impl Selection {
    pub fn new(color: usize, image: usize) -> Self {
        Self { color, image }
    }

    pub fn resolve_color<'a>(
        &self,
        product: &'a Product,
    ) -> Result<&'a ColorVariant, SelectionError> {
        product
            .color(self.color)
            .ok_or(SelectionError::ColorOutOfRange {
                index: self.color,
                len: product.colors.len(),
            })
    }

    /// Check both indices against `product`.
    ///
    /// The color must exist. The image index is only checked when that color
    /// has images; an empty image list resolves with no image URL.
    pub fn resolve<'a>(&self, product: &'a Product) -> Result<SelectedVariant<'a>, SelectionError> {
        let color = self.resolve_color(product)?;
        let image_url = if color.images.is_empty() {
            None
        } else {
            let url = color
                .images
                .get(self.image)
                .ok_or(SelectionError::ImageOutOfRange {
                    color: self.color,
                    index: self.image,
                    len: color.images.len(),
                })?;
            Some(url.as_str())
        };

        Ok(SelectedVariant {
            product,
            color_index: self.color,
            color,
            image_index: self.image,
            image_url,
        })
    }
}

/// A loaded product together with the user's current pick.
///
/// Indices are only ever set after a bounds check, and swapping the product
/// resets them.
#[derive(Debug, Clone)]
pub struct ProductSelection {
    product: Product,
    selection: Selection,
}

impl ProductSelection {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            selection: Selection::default(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn replace_product(&mut self, product: Product) {
        self.product = product;
        self.selection = Selection::default();
    }

    /// Pick a color; the image index goes back to the first image.
    pub fn select_color(&mut self, index: usize) -> Result<(), SelectionError> {
        let candidate = Selection::new(index, 0);
        candidate.resolve_color(&self.product)?;
        self.selection = candidate;
        Ok(())
    }

    pub fn select_image(&mut self, index: usize) -> Result<(), SelectionError> {
        let color = self.selection.resolve_color(&self.product)?;
        if index >= color.images.len() {
            return Err(SelectionError::ImageOutOfRange {
                color: self.selection.color,
                index,
                len: color.images.len(),
            });
        }
        self.selection.image = index;
        Ok(())
    }

    pub fn resolve(&self) -> Result<SelectedVariant<'_>, SelectionError> {
        self.selection.resolve(&self.product)
    }
}
