//! 响应模型层：Diffbot 各 API 的响应结构与解码逻辑。
//!
//! # Response Models
//!
//! Plain data structures for the five Diffbot APIs, the batch wire format, and
//! [`decode`], the single place where a raw response body becomes a [`Model`] or a
//! typed failure. Both the single-call path and the batch correlator go through it.
//!
//! Models are compared by what page they describe: two results are the same page
//! when their [`PageType`] and submitted URL agree, whichever API produced them.

mod article;
mod batch;
mod classifier;
mod decode;
mod frontpage;
mod images;
mod page_type;
mod products;

pub use article::{Article, ArticleMedia};
pub use batch::{BatchRequest, BatchResponse, Header};
pub use classifier::{Classified, Stats};
pub use decode::decode;
pub use frontpage::{Frontpage, FrontpageInfo, FrontpageItem, ItemType};
pub use images::{Image, Images};
pub use page_type::PageType;
pub use products::{Price, Product, ProductMedia, Products};

use crate::protocol::ApiKind;
use crate::{Error, ErrorContext, Result};

/// Common surface of every extraction result.
pub trait Extracted {
    /// The submitted URL, as echoed by Diffbot.
    fn url(&self) -> Option<&str>;

    /// The type of page Diffbot resolved.
    fn page_type(&self) -> PageType;

    /// Same page type and same URL.
    fn same_page(&self, other: &dyn Extracted) -> bool {
        self.page_type() == other.page_type() && self.url() == other.url()
    }
}

/// A parsed result of any kind.
#[derive(Debug, Clone)]
pub enum Model {
    Article(Article),
    Frontpage(Frontpage),
    Images(Images),
    Products(Products),
    Classified(Classified),
}

impl Model {
    pub fn kind(&self) -> ApiKind {
        match self {
            Model::Article(_) => ApiKind::Article,
            Model::Frontpage(_) => ApiKind::Frontpage,
            Model::Images(_) => ApiKind::Images,
            Model::Products(_) => ApiKind::Products,
            Model::Classified(_) => ApiKind::Classifier,
        }
    }

    fn as_extracted(&self) -> &dyn Extracted {
        match self {
            Model::Article(m) => m,
            Model::Frontpage(m) => m,
            Model::Images(m) => m,
            Model::Products(m) => m,
            Model::Classified(m) => m,
        }
    }
}

impl Extracted for Model {
    fn url(&self) -> Option<&str> {
        self.as_extracted().url()
    }

    fn page_type(&self) -> PageType {
        self.as_extracted().page_type()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.same_page(other)
    }
}

/// Conversion from the untyped [`Model`] into the result type a request declared.
pub trait FromModel: Sized + Send + 'static {
    fn from_model(model: Model) -> Result<Self>;
}

impl FromModel for Model {
    fn from_model(model: Model) -> Result<Self> {
        Ok(model)
    }
}

macro_rules! impl_from_model {
    ($ty:ty, $variant:ident) => {
        impl FromModel for $ty {
            fn from_model(model: Model) -> Result<Self> {
                match model {
                    Model::$variant(m) => Ok(m),
                    other => Err(Error::parse_with_context(
                        format!("expected a {} result, got {}", stringify!($variant), other.kind()),
                        ErrorContext::new().with_source("model"),
                    )),
                }
            }
        }
    };
}

impl_from_model!(Article, Article);
impl_from_model!(Frontpage, Frontpage);
impl_from_model!(Images, Images);
impl_from_model!(Products, Products);
impl_from_model!(Classified, Classified);
