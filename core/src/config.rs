pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_RELEVANCE_PRECISION: f64 = 1e-6;

/// Ranking knobs fixed at index construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Number of documents returned by a top-K query.
    pub max_results: usize,
    /// Relevances closer than this are considered equal and ordered by rating.
    pub relevance_precision: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: DEFAULT_MAX_RESULTS, relevance_precision: DEFAULT_RELEVANCE_PRECISION }
    }
}

impl SearchConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
