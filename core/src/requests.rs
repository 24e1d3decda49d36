use crate::document::{DocId, DocumentStatus, ScoredDocument};
use crate::error::Result;
use crate::index::SearchIndex;
use std::collections::VecDeque;

/// Minutes in a day: one request per minute is the intended sampling rate.
pub const DEFAULT_WINDOW: usize = 1440;

/// Sliding window over the outcomes of the most recent queries.
///
/// Tracks how many of them came back empty without rescanning the window.
#[derive(Debug, Clone)]
pub struct RequestQueue {
    requests: VecDeque<bool>,
    capacity: usize,
    no_result_requests: usize,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { requests: VecDeque::with_capacity(capacity), capacity, no_result_requests: 0 }
    }

    pub fn add_find_request_with<P>(
        &mut self,
        index: &SearchIndex,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let documents = index.find_top_documents_with(raw_query, predicate)?;
        self.record(&documents);
        Ok(documents)
    }

    pub fn add_find_request_by_status(
        &mut self,
        index: &SearchIndex,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let documents = index.find_top_documents_by_status(raw_query, status)?;
        self.record(&documents);
        Ok(documents)
    }

    pub fn add_find_request(&mut self, index: &SearchIndex, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let documents = index.find_top_documents(raw_query)?;
        self.record(&documents);
        Ok(documents)
    }

    /// Appends one outcome, evicting the oldest once the window is full.
    pub fn record(&mut self, documents: &[ScoredDocument]) {
        if self.requests.len() == self.capacity {
            if let Some(false) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        let has_result = !documents.is_empty();
        self.requests.push_back(has_result);
        if !has_result {
            self.no_result_requests += 1;
        }
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
