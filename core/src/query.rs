use crate::error::{Result, SearchError};
use crate::index::StopWords;
use crate::tokenizer::split_into_words;
use crate::validate::{ends_with_hyphen, has_control_chars};
use std::collections::BTreeSet;

/// A parsed query. Both sets are deduplicated and free of stop words; they are
/// independent, so one term may be both required and excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    if word.is_empty() {
        return Err(SearchError::EmptyWord);
    }
    if has_control_chars(word) {
        return Err(SearchError::SpecialCharacter(word.to_string()));
    }
    // A bare minus is an exclusion marker with nothing after it.
    if word == "-" {
        return Err(SearchError::EmptyWord);
    }
    if ends_with_hyphen(word) {
        return Err(SearchError::TrailingHyphen(word.to_string()));
    }
    match word.strip_prefix('-') {
        Some(rest) if rest.starts_with('-') => Err(SearchError::DoubleMinus(word.to_string())),
        Some("") => Err(SearchError::EmptyWord),
        Some(rest) => Ok(QueryWord { data: rest, is_minus: true }),
        None => Ok(QueryWord { data: word, is_minus: false }),
    }
}

/// Parses raw query text. Any malformed word fails the whole query.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}
