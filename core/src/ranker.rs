use crate::document::{DocId, DocumentStatus, ScoredDocument};
use crate::error::{Result, SearchError};
use crate::index::{idf, SearchIndex};
use crate::query::{parse_query, Query};
use std::cmp::Ordering;
use std::collections::HashMap;

impl SearchIndex {
    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, self.stop_words())
    }

    /// Top documents for `raw_query` among those accepted by `predicate`,
    /// which sees `(id, status, rating)` of each candidate.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query).inspect_err(|e| {
            tracing::warn!(query = raw_query, error = %e, "rejected query");
        })?;
        let matched = find_all_documents(self, &query, predicate);
        let total = matched.len();
        let top = top_k(matched, self.config.max_results, self.config.relevance_precision);
        tracing::debug!(query = raw_query, total, returned = top.len(), "executed query");
        Ok(top)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents with `ACTUAL` status.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus words of `raw_query` found in document `id`, sorted. Empty if the
    /// document contains any minus word.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.document(id).ok_or(SearchError::DocumentNotFound(id))?.status;
        let query = self.parse_query(raw_query)?;

        let excluded = query
            .minus_words
            .iter()
            .any(|word| self.postings(word).is_some_and(|p| p.contains_key(&id)));
        if excluded {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|word| self.postings(word).is_some_and(|p| p.contains_key(&id)))
            .collect();
        Ok((matched, status))
    }
}

/// Scores every document matching `query` and accepted by `predicate`, then
/// drops documents containing any minus word. Unordered.
pub fn find_all_documents<P>(index: &SearchIndex, query: &Query, predicate: P) -> Vec<ScoredDocument>
where
    P: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: HashMap<DocId, f64> = HashMap::new();
    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let inverse_document_freq = idf(index.document_count(), postings.len());
        for (&id, &term_freq) in postings {
            let Some(data) = index.document(id) else { continue };
            if predicate(id, data.status, data.rating) {
                *document_to_relevance.entry(id).or_insert(0.0) += term_freq * inverse_document_freq;
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = index.postings(word) else { continue };
        for id in postings.keys() {
            document_to_relevance.remove(id);
        }
    }

    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index.document(id).map(|data| ScoredDocument { id, relevance, rating: data.rating })
        })
        .collect()
}

/// Sorts by relevance descending and keeps the first `k`.
///
/// Relevances within `precision` of the highest relevance of their run are
/// treated as equal and ordered by rating descending, then id ascending.
pub fn top_k(mut docs: Vec<ScoredDocument>, k: usize, precision: f64) -> Vec<ScoredDocument> {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then_with(|| by_rating_then_id(a, b)));

    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let end = docs[start + 1..]
            .iter()
            .position(|d| head - d.relevance >= precision)
            .map_or(docs.len(), |offset| start + 1 + offset);
        docs[start..end].sort_by(by_rating_then_id);
        start = end;
    }

    docs.truncate(k);
    docs
}

fn by_rating_then_id(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.rating.cmp(&a.rating).then(a.id.cmp(&b.id))
}
