//! Diffbot endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_API_BASE_URL: &str = "https://api.diffbot.com";
pub const DEFAULT_WWW_BASE_URL: &str = "https://www.diffbot.com";
pub const BATCH_PATH: &str = "/api/batch";

/// Declared result kind of a request. Selects both the endpoint and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Article,
    Frontpage,
    Images,
    Products,
    Classifier,
}

impl ApiKind {
    pub const ALL: [ApiKind; 5] = [
        ApiKind::Article,
        ApiKind::Frontpage,
        ApiKind::Images,
        ApiKind::Products,
        ApiKind::Classifier,
    ];

    /// Path of the endpoint, also the prefix of every relative URL of this kind.
    pub fn path(&self) -> &'static str {
        match self {
            ApiKind::Article => "/v2/article",
            ApiKind::Frontpage => "/api/frontpage",
            ApiKind::Images => "/v2/image",
            ApiKind::Products => "/v2/product",
            ApiKind::Classifier => "/v2/analyze",
        }
    }

    /// The frontpage API still lives on the legacy host and answers in DML.
    pub fn is_legacy_host(&self) -> bool {
        matches!(self, ApiKind::Frontpage)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Article => "article",
            ApiKind::Frontpage => "frontpage",
            ApiKind::Images => "images",
            ApiKind::Products => "products",
            ApiKind::Classifier => "classifier",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URLs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    www_base: String,
}

impl Endpoints {
    /// Route every endpoint, batch included, to one base URL (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base: base.clone(),
            www_base: base,
        }
    }

    /// Absolute URL for a relative URL produced by a descriptor of `kind`.
    pub fn resolve(&self, kind: ApiKind, relative_url: &str) -> String {
        let base = if kind.is_legacy_host() {
            &self.www_base
        } else {
            &self.api_base
        };
        format!("{}{}", base, relative_url)
    }

    pub fn batch_url(&self) -> String {
        format!("{}{}", self.www_base, BATCH_PATH)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE_URL.to_string(),
            www_base: DEFAULT_WWW_BASE_URL.to_string(),
        }
    }
}
