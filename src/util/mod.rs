pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Thousands-separated word count for the binder footer and document pane.
pub(crate) fn format_word_count(words: u64) -> String {
    let digits = words.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_word_count_small_numbers_unchanged() {
        assert_eq!(format_word_count(0), "0");
        assert_eq!(format_word_count(999), "999");
    }

    #[test]
    fn test_format_word_count_groups_thousands() {
        assert_eq!(format_word_count(1000), "1,000");
        assert_eq!(format_word_count(84210), "84,210");
        assert_eq!(format_word_count(1532000), "1,532,000");
    }
}
