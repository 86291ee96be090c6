//! Post detail and reading time

use serde::Serialize;

use super::date::DateFormatter;
use crate::content::{rich_text, RawPost, RichTextNode};
use crate::error::{ContentError, Result};

/// Reading speed used when none is configured
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// A heading and its rich-text body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    /// May be empty
    pub heading: String,
    pub body: Vec<RichTextNode>,
}

impl ContentBlock {
    /// Words in the heading: tokens between single spaces, 0 when empty
    pub fn heading_words(&self) -> usize {
        if self.heading.is_empty() {
            0
        } else {
            self.heading.split(' ').count()
        }
    }

    /// Words in the body, summed over every node's text
    ///
    /// An empty text still splits into one token and counts as one word.
    pub fn body_words(&self) -> usize {
        self.body.iter().map(|node| node.text.split(' ').count()).sum()
    }

    pub fn words(&self) -> usize {
        self.heading_words() + self.body_words()
    }

    /// The body rendered as HTML
    pub fn body_html(&self) -> String {
        rich_text::as_html(&self.body)
    }
}

/// A display-ready post page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub uid: String,
    /// Formatted publication date
    pub publication_date: String,
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub content: Vec<ContentBlock>,
    /// Estimated minutes to read, `ceil(words / words_per_minute)`
    pub reading_time: u32,
}

impl PostDetail {
    /// Shape a raw post record for display and estimate its reading time
    pub fn from_raw(post: &RawPost, dates: &DateFormatter, words_per_minute: u32) -> Result<Self> {
        let uid = post
            .uid
            .clone()
            .ok_or_else(|| ContentError::MissingUid(post.id.clone()))?;

        let content: Vec<ContentBlock> = post
            .data
            .content
            .iter()
            .map(|block| ContentBlock {
                heading: block.heading.clone().unwrap_or_default(),
                body: block.body.clone(),
            })
            .collect();

        let reading_time = estimate_reading_time(count_words(&content), words_per_minute);

        Ok(Self {
            uid,
            publication_date: dates.format(post.first_publication_date.as_deref())?,
            title: post.data.title.clone(),
            author: post.data.author.clone(),
            banner_url: post.data.banner.url.clone(),
            content,
            reading_time,
        })
    }
}

/// Total words across all blocks
pub fn count_words(blocks: &[ContentBlock]) -> usize {
    blocks.iter().map(ContentBlock::words).sum()
}

/// Minutes needed to read `total_words`, rounded up
///
/// Zero words gives zero minutes; display code decides whether to floor it.
pub fn estimate_reading_time(total_words: usize, words_per_minute: u32) -> u32 {
    let speed = u64::from(words_per_minute.max(1));
    (total_words as u64).div_ceil(speed) as u32
}
