/// Split text into words on the ASCII space character only.
///
/// Runs of spaces never produce empty words; other whitespace (tabs, newlines)
/// stays part of the word it touches.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}
