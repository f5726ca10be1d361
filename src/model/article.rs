use super::{Extracted, PageType};
use serde::{Deserialize, Serialize};

/// Result of the Article API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: Option<String>,
    /// Set when the submitted URL redirected (e.g. link shorteners).
    #[serde(rename = "resolved_url")]
    pub resolved_url: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub icon: Option<String>,
    pub xpath: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub media: Vec<ArticleMedia>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
    /// Fields requested through `fields` that have no dedicated member.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleMedia {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub link: Option<String>,
    pub caption: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub primary: Option<bool>,
    pub xpath: Option<String>,
}

impl Extracted for Article {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn page_type(&self) -> PageType {
        self.page_type.unwrap_or(PageType::Article)
    }
}
