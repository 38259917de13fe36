use crate::models::{SelectedVariant, ShareOptions, format_amount};

pub const DEFAULT_BRAND: &str = "Manav Creation";
pub const DEFAULT_LINK_BASE: &str = "https://manavcreation.com/products";

/// Builds the text block handed to the share sheet.
#[derive(Debug, Clone)]
pub struct ShareComposer {
    brand: String,
    link_base: String,
}

impl Default for ShareComposer {
    fn default() -> Self {
        Self::new(DEFAULT_BRAND, DEFAULT_LINK_BASE)
    }
}

impl ShareComposer {
    pub fn new(brand: impl Into<String>, link_base: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            link_base: link_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn header(&self) -> String {
        format!("Check out this product from {}!", self.brand)
    }

    pub fn product_link(&self, product_id: &str) -> String {
        format!("{}/{}", self.link_base, urlencoding::encode(product_id))
    }

    /// Compose the summary for a validated selection.
    ///
    /// Blocks (header, field lines, description, link) are separated by one
    /// blank line; a disabled field leaves nothing behind.
    pub fn compose(&self, selected: &SelectedVariant<'_>, options: &ShareOptions) -> String {
        let product = selected.product;
        let mut blocks = vec![self.header()];

        let mut lines = Vec::new();
        if options.product_name {
            lines.push(product.name.clone());
        }
        if options.category {
            lines.push(product.category.name.clone());
        }
        if options.price {
            lines.push(format!("Price: ₹{}", format_amount(product.prices.regular_price)));
            if let Some(percent) = product.prices.discount_percent() {
                lines.push(format!(
                    "MRP: ₹{} ({}% OFF!)",
                    format_amount(product.prices.mrp),
                    percent
                ));
            }
        }
        if options.color {
            lines.push(format!("Color: {}", selected.color.color_name));
        }
        if !lines.is_empty() {
            blocks.push(lines.join("\n"));
        }

        if options.description && !product.description.trim().is_empty() {
            blocks.push(product.description.clone());
        }

        blocks.push(format!("View product at:\n{}", self.product_link(&product.id)));
        blocks.join("\n\n")
    }
}
