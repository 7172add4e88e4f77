//! copitrace-engine - Query layer over normalized chat history
//!
//! A [`Corpus`] wraps one extraction batch read-only and answers aggregate
//! statistics and substring search queries. The corpus is small (bounded
//! by the number of local chat files), so search is a plain linear scan;
//! no index is maintained and queries never mutate the data.

mod corpus;
mod search;
mod stats;

pub use corpus::Corpus;
pub use search::{SearchMatch, SearchQuery};
pub use stats::{CorpusStats, DateRange};
