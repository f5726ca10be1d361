use super::{Article, Extracted, Images, PageType, Products};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of the Page Classifier API.
///
/// When the page matches one of the automatic APIs, Diffbot also extracts it fully;
/// the raw payload is kept so it can be read again as that API's result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classified {
    pub url: Option<String>,
    pub resolved_url: Option<String>,
    pub title: Option<String>,
    /// ISO 639-1 code of the page language.
    pub human_language: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
    pub stats: Option<Stats>,
    #[serde(skip)]
    pub(crate) raw: serde_json::Value,
}

/// Classification statistics, returned when the request asked for `stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub confidence: Option<f32>,
    /// Likelihood per page type key.
    #[serde(default)]
    pub types: HashMap<String, f32>,
}

impl Classified {
    pub(crate) fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut classified: Classified = serde_json::from_value(value.clone())?;
        classified.raw = value;
        Ok(classified)
    }

    /// Read the classifier payload as an Article API result.
    pub fn as_article(&self) -> Result<Article> {
        self.reparse("Article")
    }

    /// Read the classifier payload as an Image API result.
    pub fn as_images(&self) -> Result<Images> {
        self.reparse("Images")
    }

    /// Read the classifier payload as a Product API result.
    pub fn as_products(&self) -> Result<Products> {
        self.reparse("Products")
    }

    fn reparse<T: serde::de::DeserializeOwned>(&self, target: &str) -> Result<T> {
        serde_json::from_value(self.raw.clone()).map_err(|e| {
            Error::parse_with_context(
                format!("the classified object cannot be read as {}: {}", target, e),
                ErrorContext::new().with_source("classifier"),
            )
        })
    }
}

impl Extracted for Classified {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn page_type(&self) -> PageType {
        self.page_type.unwrap_or(PageType::Other)
    }
}
