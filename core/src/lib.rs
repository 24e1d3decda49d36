//! In-memory TF-IDF document index with minus-word exclusion and a sliding
//! window of query outcomes.

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod input;
pub mod query;
pub mod ranker;
pub mod requests;
pub mod tokenizer;
pub mod validate;

pub use config::SearchConfig;
pub use document::{DocId, DocumentData, DocumentStatus, ScoredDocument};
pub use error::{Result, SearchError};
pub use index::{SearchIndex, StopWords};
pub use query::Query;
pub use requests::RequestQueue;
