//! Post summaries for the listing page

use serde::Serialize;

use super::date::DateFormatter;
use crate::content::RawPost;
use crate::error::{ContentError, Result};

/// A display-ready listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub uid: String,
    /// Formatted publication date
    pub publication_date: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Shape a raw post record for display
    pub fn from_raw(post: &RawPost, dates: &DateFormatter) -> Result<Self> {
        let uid = post
            .uid
            .clone()
            .ok_or_else(|| ContentError::MissingUid(post.id.clone()))?;

        Ok(Self {
            uid,
            publication_date: dates.format(post.first_publication_date.as_deref())?,
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
        })
    }
}

/// Format a list of raw posts, keeping their order
pub fn format_summaries(posts: &[RawPost], dates: &DateFormatter) -> Result<Vec<PostSummary>> {
    posts
        .iter()
        .map(|post| PostSummary::from_raw(post, dates))
        .collect()
}
