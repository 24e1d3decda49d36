use crate::document::{average_rating, DocId, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::tokenizer::split_into_words;
use crate::validate::has_control_chars;
use crate::SearchConfig;
use std::collections::{BTreeMap, BTreeSet};

/// Term frequencies of one term, keyed by document.
pub type Postings = BTreeMap<DocId, f64>;

/// Immutable set of words excluded from indexing and from queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords(BTreeSet<String>);

impl StopWords {
    /// Builds the set, dropping empty strings and duplicates. Fails on the
    /// first word carrying a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if has_control_chars(word) {
                return Err(SearchError::InvalidTerm(word.to_string()));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self(set))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// In-memory inverted index: term -> {document -> term frequency}, plus the
/// metadata of every ingested document.
///
/// Every id present in a postings list is present in `documents` and the other
/// way around; `add_document` validates before touching either map.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    pub(crate) config: SearchConfig,
    stop_words: StopWords,
    word_to_document_freqs: BTreeMap<String, Postings>,
    documents: BTreeMap<DocId, DocumentData>,
    doc_id_by_index: Vec<DocId>,
}

impl SearchIndex {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, SearchConfig::default())
    }

    pub fn with_config<I, S>(stop_words: I, config: SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = StopWords::new(stop_words)?;
        tracing::debug!(stop_words = stop_words.len(), "created search index");
        Ok(Self { config, stop_words, ..Self::default() })
    }

    /// Stop words given as a single space-separated line.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Indexes one document. Either the whole document is added or the index
    /// is left untouched.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            tracing::warn!(id, "rejected document with negative id");
            return Err(SearchError::InvalidId(id));
        }
        if self.documents.contains_key(&id) {
            tracing::warn!(id, "rejected duplicate document id");
            return Err(SearchError::DuplicateId(id));
        }
        let words = self.split_into_words_no_stop(text);
        if let Some(bad) = words.iter().find(|w| has_control_chars(w)) {
            tracing::warn!(id, "rejected document with special characters");
            return Err(SearchError::InvalidTerm(bad.to_string()));
        }

        let inv_word_count = 1.0 / words.len() as f64;
        for word in &words {
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }
        let rating = average_rating(ratings);
        self.documents.insert(id, DocumentData { rating, status });
        self.doc_id_by_index.push(id);
        tracing::debug!(id, words = words.len(), rating, %status, "indexed document");
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the document ingested at `position` (0-based, ingestion order).
    pub fn document_id(&self, position: usize) -> Result<DocId> {
        self.doc_id_by_index
            .get(position)
            .copied()
            .ok_or(SearchError::OutOfRange { position, len: self.doc_id_by_index.len() })
    }

    /// Ids in ingestion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.doc_id_by_index.iter().copied()
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Documents containing `term` with their term frequencies.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(term)
    }

    /// `ln(N / df)`. Fails for a term that was never indexed; callers check
    /// `postings` first.
    pub fn inverse_document_freq(&self, term: &str) -> Result<f64> {
        let postings = self
            .postings(term)
            .ok_or_else(|| SearchError::UnknownTerm(term.to_string()))?;
        Ok(idf(self.document_count(), postings.len()))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_into_words(text)
            .into_iter()
            .filter(|w| !self.is_stop_word(w))
            .collect()
    }
}

pub(crate) fn idf(document_count: usize, containing: usize) -> f64 {
    (document_count as f64 / containing as f64).ln()
}
