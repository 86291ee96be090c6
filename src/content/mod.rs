//! Content module - the headless CMS client and its raw records

pub mod client;
mod model;
pub mod query;
pub mod rich_text;

pub use client::{ContentClient, PrismicClient};
pub use model::{ApiInfo, ApiRef, ApiResponse, Banner, RawContentBlock, RawPost, RawPostData};
pub use model::{RichTextNode, Span};
pub use query::{Ordering, Predicate, Query};
