//! Listing pagination
//!
//! `PaginationState` is a value: loading a page never mutates the state it
//! was called on but returns the next one. Summaries are only ever appended.

use serde::Serialize;

use super::date::DateFormatter;
use super::summary::{format_summaries, PostSummary};
use crate::content::{ApiResponse, ContentClient, RawPost};
use crate::error::{ContentError, Result};

/// Loaded summaries plus the cursor for the page after them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    loaded_summaries: Vec<PostSummary>,
    next_page_cursor: Option<String>,
    current_page_number: u32,
}

impl PaginationState {
    /// Start from the first page of results
    pub fn initialize(
        results: &[RawPost],
        next_cursor: Option<String>,
        dates: &DateFormatter,
    ) -> Result<Self> {
        Ok(Self {
            loaded_summaries: format_summaries(results, dates)?,
            next_page_cursor: next_cursor,
            current_page_number: 1,
        })
    }

    /// Start from a first-page search response
    pub fn from_response(response: &ApiResponse, dates: &DateFormatter) -> Result<Self> {
        Self::initialize(&response.results, response.next_page.clone(), dates)
    }

    pub fn loaded_summaries(&self) -> &[PostSummary] {
        &self.loaded_summaries
    }

    pub fn next_page_cursor(&self) -> Option<&str> {
        self.next_page_cursor.as_deref()
    }

    pub fn current_page_number(&self) -> u32 {
        self.current_page_number
    }

    /// Whether the API reported a further page
    pub fn has_more(&self) -> bool {
        self.next_page_cursor.is_some()
    }

    /// Fetch the page behind the cursor and return the extended state
    ///
    /// Past the first page an exhausted cursor is a no-op. On the first page
    /// the guard does not apply, so an absent cursor fails with
    /// [`ContentError::MissingCursor`].
    pub async fn load_next_page<C>(&self, client: &C, dates: &DateFormatter) -> Result<Self>
    where
        C: ContentClient + ?Sized,
    {
        if self.current_page_number != 1 && self.next_page_cursor.is_none() {
            tracing::debug!(
                "No page after {}, keeping {} summaries",
                self.current_page_number,
                self.loaded_summaries.len()
            );
            return Ok(self.clone());
        }

        let cursor = self
            .next_page_cursor
            .as_deref()
            .ok_or(ContentError::MissingCursor)?;

        let response = client.fetch_page(cursor).await?;
        let fetched = format_summaries(&response.results, dates)?;
        tracing::debug!(
            "Loaded page {} with {} posts (more: {})",
            response.page,
            fetched.len(),
            response.next_page.is_some()
        );

        let mut loaded_summaries = Vec::with_capacity(self.loaded_summaries.len() + fetched.len());
        loaded_summaries.extend_from_slice(&self.loaded_summaries);
        loaded_summaries.extend(fetched);

        Ok(Self {
            loaded_summaries,
            next_page_cursor: response.next_page,
            current_page_number: response.page,
        })
    }

    /// Keep loading until the cursor is exhausted
    pub async fn load_all<C>(self, client: &C, dates: &DateFormatter) -> Result<Self>
    where
        C: ContentClient + ?Sized,
    {
        let mut state = self;
        while state.has_more() {
            state = state.load_next_page(client, dates).await?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::summary::tests::{dates, raw_post};
    use crate::testing::{response, StubClient};

    const PAGE_2: &str = "https://blog.cdn.prismic.io/api/v2/documents/search?page=2";
    const PAGE_3: &str = "https://blog.cdn.prismic.io/api/v2/documents/search?page=3";
    const DATE: Option<&str> = Some("2021-03-15T10:00:00Z");

    fn uids(state: &PaginationState) -> Vec<&str> {
        state
            .loaded_summaries()
            .iter()
            .map(|s| s.uid.as_str())
            .collect()
    }

    fn client() -> StubClient {
        StubClient::new()
            .with_page(
                PAGE_2,
                response(
                    2,
                    Some(PAGE_3),
                    vec![raw_post("2", "b", DATE), raw_post("3", "c", DATE)],
                ),
            )
            .with_page(PAGE_3, response(3, None, vec![raw_post("4", "d", DATE)]))
    }

    fn first_state() -> PaginationState {
        PaginationState::initialize(
            &[raw_post("1", "a", DATE)],
            Some(PAGE_2.to_string()),
            &dates(),
        )
        .unwrap()
    }

    #[test]
    fn test_initialize() {
        let state = first_state();
        assert_eq!(uids(&state), ["a"]);
        assert_eq!(state.loaded_summaries()[0].publication_date, "15 Mar 2021");
        assert_eq!(state.next_page_cursor(), Some(PAGE_2));
        assert_eq!(state.current_page_number(), 1);
        assert!(state.has_more());
    }

    #[tokio::test]
    async fn test_load_appends_exactly_the_returned_results() {
        let client = client();
        let first = first_state();

        let second = first.load_next_page(&client, &dates()).await.unwrap();
        assert_eq!(uids(&second), ["a", "b", "c"]);
        assert_eq!(second.current_page_number(), 2);
        assert_eq!(second.next_page_cursor(), Some(PAGE_3));

        let third = second.load_next_page(&client, &dates()).await.unwrap();
        assert_eq!(uids(&third), ["a", "b", "c", "d"]);
        assert_eq!(third.current_page_number(), 3);
        assert!(!third.has_more());

        // The earlier states are untouched
        assert_eq!(uids(&first), ["a"]);
        assert_eq!(*client.requests.lock().unwrap(), [PAGE_2, PAGE_3]);
    }

    #[tokio::test]
    async fn test_exhausted_after_first_page_is_noop() {
        let client = client();
        let last = first_state()
            .load_all(&client, &dates())
            .await
            .unwrap();
        assert_eq!(client.request_count(), 2);

        let again = last.load_next_page(&client, &dates()).await.unwrap();
        assert_eq!(again, last);
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_first_page_without_cursor_is_missing_cursor() {
        let client = client();
        let state = PaginationState::initialize(&[raw_post("1", "a", DATE)], None, &dates())
            .unwrap();

        let result = state.load_next_page(&client, &dates()).await;
        assert!(matches!(result, Err(ContentError::MissingCursor)));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_double_invocation_does_not_duplicate() {
        let client = client();
        let first = first_state();
        let dates = dates();

        let (a, b) = tokio::join!(
            first.load_next_page(&client, &dates),
            first.load_next_page(&client, &dates)
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(uids(&a), ["a", "b", "c"]);
        assert_eq!(a, b);
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let client = StubClient::new();
        let first = first_state();

        let result = first.load_next_page(&client, &dates()).await;
        assert!(matches!(result, Err(ContentError::Status { status: 404, .. })));
        assert_eq!(uids(&first), ["a"]);
    }

    #[test]
    fn test_from_response() {
        let first = response(1, Some(PAGE_2), vec![raw_post("1", "a", DATE)]);
        let state = PaginationState::from_response(&first, &dates()).unwrap();
        assert_eq!(state, first_state());
    }
}
