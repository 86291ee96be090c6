//! In-memory content API used by unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::content::{ApiResponse, ContentClient, Predicate, Query, RawPost};
use crate::error::{ContentError, Result};

#[derive(Default)]
pub struct StubClient {
    queries: Vec<(Query, ApiResponse)>,
    pages: HashMap<String, ApiResponse>,
    preview: bool,
    /// Every query and page URL requested, in order
    pub requests: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: Query, response: ApiResponse) -> Self {
        self.queries.push((query, response));
        self
    }

    pub fn with_page(mut self, url: &str, response: ApiResponse) -> Self {
        self.pages.insert(url.to_string(), response);
        self
    }

    /// Answer the uid lookup `ContentClient::get_by_uid` issues for `post`
    pub fn with_document(self, post: RawPost) -> Self {
        let uid = post.uid.clone().unwrap_or_default();
        let query = Query::new(Predicate::uid(post.doc_type.clone(), uid)).page_size(1);
        self.with_query(query, response(1, None, vec![post]))
    }

    pub fn preview(mut self) -> Self {
        self.preview = true;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A response page holding `results`
pub fn response(page: u32, next_page: Option<&str>, results: Vec<RawPost>) -> ApiResponse {
    ApiResponse {
        page,
        results_per_page: results.len() as u32,
        results_size: results.len() as u32,
        next_page: next_page.map(str::to_string),
        results,
        ..Default::default()
    }
}

#[async_trait]
impl ContentClient for StubClient {
    async fn query(&self, query: &Query) -> Result<ApiResponse> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("query {:?}", query.to_params()));
        Ok(self
            .queries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| response(1, None, Vec::new())))
    }

    async fn fetch_page(&self, url: &str) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(ContentError::Status {
            status: 404,
            url: url.to_string(),
        })
    }

    fn is_preview(&self) -> bool {
        self.preview
    }
}
