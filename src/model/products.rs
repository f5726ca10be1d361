use super::{Extracted, PageType};
use serde::{Deserialize, Serialize};

/// Result of the Product API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Products {
    pub url: Option<String>,
    pub resolved_url: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
    #[serde(default)]
    pub products: Vec<Product>,
    pub links: Option<Vec<String>>,
    pub breadcrumb: Option<Vec<serde_json::Value>>,
    pub meta: Option<serde_json::Value>,
    pub querystring: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub title: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub offer_price: Option<String>,
    pub regular_price: Option<String>,
    pub save_amount: Option<String>,
    pub shipping_amount: Option<String>,
    /// UPC, ISBN, MPN or SKU in that order of preference, else a Diffbot-derived id.
    pub product_id: Option<String>,
    pub upc: Option<String>,
    pub prefix_code: Option<String>,
    pub product_origin: Option<String>,
    pub isbn: Option<String>,
    pub sku: Option<String>,
    pub mpn: Option<String>,
    pub availability: Option<bool>,
    #[serde(default)]
    pub media: Vec<ProductMedia>,
    pub offer_price_details: Option<Price>,
    pub regular_price_details: Option<Price>,
    pub save_amount_details: Option<Price>,
    pub shipping_amount_details: Option<Price>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductMedia {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub link: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub caption: Option<String>,
    pub primary: Option<bool>,
    pub xpath: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Price {
    pub amount: Option<f64>,
    pub text: Option<String>,
    pub symbol: Option<String>,
    pub percentage: Option<bool>,
}

impl Extracted for Products {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn page_type(&self) -> PageType {
        self.page_type.unwrap_or(PageType::Product)
    }
}
