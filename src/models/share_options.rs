use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// A toggleable part of the shared product summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum)]
pub enum ShareField {
    #[strum(serialize = "Product Name")]
    ProductName,
    Category,
    Price,
    Color,
    Description,
    Image,
}

impl ShareField {
    pub fn all() -> impl Iterator<Item = ShareField> {
        ShareField::iter()
    }
}

/// Which fields go into a share. Everything is on until the user says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOptions {
    pub product_name: bool,
    pub category: bool,
    pub price: bool,
    pub color: bool,
    pub description: bool,
    pub image: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            product_name: true,
            category: true,
            price: true,
            color: true,
            description: true,
            image: true,
        }
    }
}

impl ShareOptions {
    /// Every field switched off; only the header and link remain.
    pub fn none() -> Self {
        Self {
            product_name: false,
            category: false,
            price: false,
            color: false,
            description: false,
            image: false,
        }
    }

    pub fn get(&self, field: ShareField) -> bool {
        match field {
            ShareField::ProductName => self.product_name,
            ShareField::Category => self.category,
            ShareField::Price => self.price,
            ShareField::Color => self.color,
            ShareField::Description => self.description,
            ShareField::Image => self.image,
        }
    }

    pub fn set(&mut self, field: ShareField, enabled: bool) {
        let slot = match field {
            ShareField::ProductName => &mut self.product_name,
            ShareField::Category => &mut self.category,
            ShareField::Price => &mut self.price,
            ShareField::Color => &mut self.color,
            ShareField::Description => &mut self.description,
            ShareField::Image => &mut self.image,
        };
        *slot = enabled;
    }

    pub fn toggle(&mut self, field: ShareField) {
        self.set(field, !self.get(field));
    }

    /// Defaults with the given fields switched off.
    pub fn excluding(fields: &[ShareField]) -> Self {
        let mut options = Self::default();
        for field in fields {
            options.set(*field, false);
        }
        options
    }
}
