use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("document id must be non-negative, got {0}")]
    InvalidId(DocId),

    #[error("document with id {0} already exists")]
    DuplicateId(DocId),

    #[error("word contains special characters: {0:?}")]
    InvalidTerm(String),

    #[error("query word contains special characters: {0:?}")]
    SpecialCharacter(String),

    #[error("query word ends with '-': {0:?}")]
    TrailingHyphen(String),

    #[error("query word starts with double '-': {0:?}")]
    DoubleMinus(String),

    #[error("empty query word")]
    EmptyWord,

    #[error("position {position} is out of range for {len} documents")]
    OutOfRange { position: usize, len: usize },

    #[error("term {0:?} is not present in the index")]
    UnknownTerm(String),

    #[error("document {0} not found")]
    DocumentNotFound(DocId),
}

impl SearchError {
    /// Errors caused by a malformed query rather than by index state.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            SearchError::SpecialCharacter(_)
                | SearchError::TrailingHyphen(_)
                | SearchError::DoubleMinus(_)
                | SearchError::EmptyWord
        )
    }
}
