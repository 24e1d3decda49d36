/// Splits `items` into contiguous pages of `page_size` (at least 1); the last
/// page may be shorter.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<&[T]> {
    items.chunks(page_size.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_shorter() {
        let pages = paginate(&[1, 2, 3, 4, 5], 2);
        assert_eq!(pages, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
    }

    #[test]
    fn empty_input_has_no_pages() {
        assert!(paginate::<u8>(&[], 3).is_empty());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(paginate(&[1, 2], 0).len(), 2);
    }
}
