//! Previous/next post lookup

use serde::Serialize;

use super::date::DateFormatter;
use super::summary::PostSummary;
use crate::content::{ContentClient, Ordering, Predicate, Query};
use crate::error::Result;

/// Neighbouring posts; an absent side has no navigation link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacencyResult {
    pub previous: Option<PostSummary>,
    pub next: Option<PostSummary>,
}

/// Query for the post listed before `id`, ordered by first publication
pub fn previous_query(doc_type: &str, id: &str) -> Query {
    Query::new(Predicate::document_type(doc_type))
        .page_size(1)
        .after(id)
        .order_by(Ordering::FirstPublicationDate)
}

/// Query for the post listed after `id`
///
/// Orders by last publication date, unlike [`previous_query`]. The two
/// orderings differ in the published site and are kept that way.
pub fn next_query(doc_type: &str, id: &str) -> Query {
    Query::new(Predicate::document_type(doc_type))
        .page_size(1)
        .after(id)
        .order_by(Ordering::LastPublicationDate)
}

/// Look up the posts on either side of the document `id`
pub async fn resolve_adjacent<C>(
    client: &C,
    doc_type: &str,
    id: &str,
    dates: &DateFormatter,
) -> Result<AdjacencyResult>
where
    C: ContentClient + ?Sized,
{
    let previous = client.query(&previous_query(doc_type, id)).await?;
    let next = client.query(&next_query(doc_type, id)).await?;

    let previous = previous
        .results
        .first()
        .map(|post| PostSummary::from_raw(post, dates))
        .transpose()?;
    let next = next
        .results
        .first()
        .map(|post| PostSummary::from_raw(post, dates))
        .transpose()?;

    tracing::debug!(
        "Neighbours of {}: previous={:?} next={:?}",
        id,
        previous.as_ref().map(|p| &p.uid),
        next.as_ref().map(|p| &p.uid)
    );

    Ok(AdjacencyResult { previous, next })
}
