use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: CategoryRef,
    pub prices: Prices,
    #[serde(default)]
    pub colors: Vec<ColorVariant>,
    #[serde(default)]
    pub pdf_link: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Product {
    pub fn color(&self, index: usize) -> Option<&ColorVariant> {
        self.colors.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
}

/// Price tiers as served by the catalog. Amounts are in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    pub regular_price: f64,
    pub mrp: f64,
    #[serde(default)]
    pub reseller_price: f64,
    #[serde(default)]
    pub special_price: f64,
}

impl Prices {
    /// Whole percentage off MRP. `None` unless it rounds to at least 1%.
    pub fn discount_percent(&self) -> Option<i64> {
        if self.mrp <= self.regular_price || self.mrp <= 0.0 {
            return None;
        }
        let percent = ((1.0 - self.regular_price / self.mrp) * 100.0).round() as i64;
        (percent > 0).then_some(percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariant {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub color_name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Render an amount the way the catalog's JSON numbers read: `899`, `899.5`.
pub fn format_amount(value: f64) -> String {
    format!("{}", value)
}
