use serde::{Deserialize, Serialize};
use std::fmt;

/// Page classification returned by Diffbot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// A news article, blog post or other primarily-text page
    Article,
    /// A music or audio player
    Audio,
    /// A graph or chart, typically financial
    Chart,
    /// Specific forum, group or discussion topic
    Discussion,
    /// An embedded or downloadable document or slideshow
    Document,
    Download,
    /// Error page, e.g. 404
    Error,
    Event,
    Faq,
    /// A news- or blog-style home page
    Frontpage,
    Game,
    Image,
    Job,
    Location,
    Product,
    Profile,
    Recipe,
    #[serde(rename = "reviewslist")]
    ReviewsList,
    /// A search engine results page
    Serp,
    Video,
    /// Below the confidence threshold, or a type this client does not know yet
    #[serde(other)]
    Other,
}

impl PageType {
    /// Value of the classifier `mode` parameter for this type.
    pub fn key(&self) -> &'static str {
        match self {
            PageType::Article => "article",
            PageType::Audio => "audio",
            PageType::Chart => "chart",
            PageType::Discussion => "discussion",
            PageType::Document => "document",
            PageType::Download => "download",
            PageType::Error => "error",
            PageType::Event => "event",
            PageType::Faq => "faq",
            PageType::Frontpage => "frontpage",
            PageType::Game => "game",
            PageType::Image => "image",
            PageType::Job => "job",
            PageType::Location => "location",
            PageType::Product => "product",
            PageType::Profile => "profile",
            PageType::Recipe => "recipe",
            PageType::ReviewsList => "reviewslist",
            PageType::Serp => "serp",
            PageType::Video => "video",
            PageType::Other => "other",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
