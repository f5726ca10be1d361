use super::{Extracted, PageType};
use serde::{Deserialize, Serialize};

/// Result of the Image API: every image detected on the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Images {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: Option<String>,
    pub anchor_url: Option<String>,
    pub mime: Option<String>,
    pub caption: Option<String>,
    pub attr_alt: Option<String>,
    pub attr_title: Option<String>,
    pub date: Option<String>,
    pub size: Option<u64>,
    pub pixel_height: Option<u32>,
    pub pixel_width: Option<u32>,
    pub display_height: Option<u32>,
    pub display_width: Option<u32>,
    pub meta: Option<Vec<String>>,
    pub ocr: Option<String>,
    pub colors: Option<Vec<String>>,
    pub xpath: Option<String>,
    pub faces: Option<String>,
}

impl Extracted for Images {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn page_type(&self) -> PageType {
        self.page_type.unwrap_or(PageType::Image)
    }
}
