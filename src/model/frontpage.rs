use super::{Extracted, PageType};
use serde::Deserialize;

/// Result of the Frontpage API, decoded from DML (Diffbot Markup Language).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontpage {
    pub info: Option<FrontpageInfo>,
    #[serde(rename = "item", default)]
    pub items: Vec<FrontpageItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontpageInfo {
    pub title: Option<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
    pub icon: Option<String>,
    /// Usually `html`.
    pub source_type: Option<String>,
    pub num_items: Option<u32>,
    pub num_spam_items: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    Image,
    Link,
    Story,
    Chunk,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontpageItem {
    #[serde(rename = "@id")]
    pub id: Option<i64>,
    #[serde(rename = "@type")]
    pub item_type: Option<ItemType>,
    #[serde(rename = "@xroot")]
    pub xroot: Option<String>,
    #[serde(rename = "@img")]
    pub img: Option<String>,
    #[serde(rename = "@sp")]
    pub spam_score: Option<f32>,
    #[serde(rename = "@sr")]
    pub static_rank: Option<f32>,
    #[serde(rename = "@fresh")]
    pub fresh_score: Option<f32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    /// RFC 822 date as sent by Diffbot.
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    #[serde(rename = "textSummary")]
    pub text_summary: Option<String>,
}

impl Extracted for Frontpage {
    fn url(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.source_url.as_deref())
    }

    fn page_type(&self) -> PageType {
        PageType::Frontpage
    }
}
