use search_core::{DocumentStatus, SearchConfig, SearchError, SearchIndex};

fn sample_index() -> SearchIndex {
    let mut index = SearchIndex::from_stop_words_text("and in on").unwrap();
    index.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
    index.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    index.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    index.add_document(3, "groomed starling evgeny", DocumentStatus::Banned, &[9]).unwrap();
    index
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[test]
fn ranks_actual_documents_by_tf_idf() {
    let index = sample_index();
    let found = index.find_top_documents("fluffy groomed cat").unwrap();
    let ids: Vec<_> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 0, 2]);
    assert_close(found[0].relevance, 0.866434);
    assert_close(found[1].relevance, 0.173287);
    assert_close(found[2].relevance, 0.173287);
    assert_eq!(found[0].rating, 5);
    assert_eq!(found[1].rating, 2);
    assert_eq!(found[2].rating, -1);
}

#[test]
fn filters_by_status() {
    let index = sample_index();
    let found = index.find_top_documents_by_status("fluffy groomed cat", DocumentStatus::Banned).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 3);
    assert_close(found[0].relevance, 2f64.ln() / 3.0);
}

#[test]
fn filters_by_custom_predicate() {
    let index = sample_index();
    let found = index.find_top_documents_with("fluffy groomed cat", |id, _, _| id % 2 == 0).unwrap();
    let ids: Vec<_> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![0, 2]);
}

#[test]
fn minus_word_excludes_document_even_when_it_matches() {
    let index = sample_index();
    let found = index.find_top_documents("fluffy groomed cat -tail").unwrap();
    assert!(found.iter().all(|d| d.id != 1));
    assert_eq!(found.len(), 2);

    let found = index.find_top_documents("cat -cat").unwrap();
    assert!(found.is_empty());
}

#[test]
fn minus_word_excludes_documents_rejected_by_predicate_too() {
    let index = sample_index();
    let found = index.find_top_documents_by_status("groomed -starling", DocumentStatus::Banned).unwrap();
    assert!(found.is_empty());
}

#[test]
fn unknown_terms_contribute_nothing() {
    let index = sample_index();
    assert!(index.find_top_documents("parrot").unwrap().is_empty());
    assert!(index.find_top_documents("-parrot").unwrap().is_empty());
}

#[test]
fn stop_words_in_query_have_no_effect() {
    let index = sample_index();
    assert!(index.find_top_documents("and in").unwrap().is_empty());
    assert_eq!(index.find_top_documents("cat -and").unwrap().len(), 2);
}

#[test]
fn single_document_has_zero_relevance() {
    let mut index = SearchIndex::new(Vec::<String>::new()).unwrap();
    index.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
    assert_eq!(index.postings("cat").unwrap()[&1], 1.0);
    let found = index.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].relevance, 0.0);
}

#[test]
fn never_returns_more_than_max_results() {
    let mut index = SearchIndex::new(["a"]).unwrap();
    for id in 0..12 {
        index.add_document(id, "common word", DocumentStatus::Actual, &[id]).unwrap();
    }
    index.add_document(100, "other", DocumentStatus::Actual, &[]).unwrap();
    let found = index.find_top_documents("common").unwrap();
    assert_eq!(found.len(), 5);
    // equal relevance: highest ratings first
    let ids: Vec<_> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![11, 10, 9, 8, 7]);
}

#[test]
fn configured_max_results_is_honoured() {
    let config = SearchConfig::default().with_max_results(2);
    let mut index = SearchIndex::with_config(["a"], config).unwrap();
    for id in 0..4 {
        index.add_document(id, "word", DocumentStatus::Actual, &[]).unwrap();
    }
    index.add_document(9, "other", DocumentStatus::Actual, &[]).unwrap();
    assert_eq!(index.find_top_documents("word").unwrap().len(), 2);
}

#[test]
fn equal_relevance_and_rating_order_by_id() {
    let mut index = SearchIndex::new(Vec::<&str>::new()).unwrap();
    for id in [8, 3, 5] {
        index.add_document(id, "same text", DocumentStatus::Actual, &[4]).unwrap();
    }
    index.add_document(1, "different", DocumentStatus::Actual, &[]).unwrap();
    let first: Vec<_> = index.find_top_documents("same").unwrap().iter().map(|d| d.id).collect();
    let second: Vec<_> = index.find_top_documents("same").unwrap().iter().map(|d| d.id).collect();
    assert_eq!(first, vec![3, 5, 8]);
    assert_eq!(first, second);
}

#[test]
fn malformed_queries_are_rejected() {
    let index = sample_index();
    assert_eq!(index.find_top_documents("--fluffy"), Err(SearchError::DoubleMinus("--fluffy".into())));
    assert_eq!(index.find_top_documents("fluffy-"), Err(SearchError::TrailingHyphen("fluffy-".into())));
    assert_eq!(index.find_top_documents("fluffy -"), Err(SearchError::EmptyWord));
    assert!(index.find_top_documents("cat\x02").unwrap_err().is_query_error());
}

#[test]
fn match_document_reports_plus_words_and_status() {
    let index = sample_index();
    let (words, status) = index.match_document("fluffy cat parrot", 1).unwrap();
    assert_eq!(words, vec!["cat".to_string(), "fluffy".to_string()]);
    assert_eq!(status, DocumentStatus::Actual);

    let (words, status) = index.match_document("groomed evgeny", 3).unwrap();
    assert_eq!(words, vec!["evgeny".to_string(), "groomed".to_string()]);
    assert_eq!(status, DocumentStatus::Banned);
}

#[test]
fn match_document_is_empty_when_minus_word_present() {
    let index = sample_index();
    let (words, status) = index.match_document("fluffy cat -tail", 1).unwrap();
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
}

#[test]
fn match_document_errors() {
    let index = sample_index();
    assert_eq!(index.match_document("cat", 42), Err(SearchError::DocumentNotFound(42)));
    assert_eq!(index.match_document("cat--", 1), Err(SearchError::TrailingHyphen("cat--".into())));
}

#[test]
fn document_count_tracks_successful_ingestion() {
    let mut index = SearchIndex::from_stop_words_text("in").unwrap();
    let attempts = [(1, "a b"), (1, "c"), (-2, "d"), (2, "e\x07"), (3, "f")];
    let ok = attempts
        .iter()
        .filter(|(id, text)| index.add_document(*id, text, DocumentStatus::Actual, &[]).is_ok())
        .count();
    assert_eq!(ok, 2);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![1, 3]);
}
