//! Posts module - display models built from raw content records

pub mod adjacency;
pub mod date;
pub mod detail;
pub mod pagination;
pub mod summary;

pub use adjacency::{resolve_adjacent, AdjacencyResult};
pub use date::DateFormatter;
pub use detail::{count_words, estimate_reading_time, ContentBlock, PostDetail};
pub use pagination::PaginationState;
pub use summary::{format_summaries, PostSummary};
