pub mod detail;
pub mod listing;

/// True for a non-empty string of ASCII digits.
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Parses a count rendered with grouping separators (`"1 234"`, `"1\u{a0}234"`).
/// Every non-digit is dropped; nothing left, or a value too large, reads as zero.
pub fn clean_int(text: &str) -> u64 {
    text.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
