/// True if the word contains a control character (any byte below 0x20).
pub fn has_control_chars(word: &str) -> bool {
    word.bytes().any(|b| b < 0x20)
}

/// True if the word's last character is `-`.
pub fn ends_with_hyphen(word: &str) -> bool {
    word.ends_with('-')
}
