// Column display width policy for the data grid

/// Extra room added to each header's length
pub const COLUMN_PADDING: u16 = 8;
/// Narrow headers never collapse below this
pub const MIN_COL_WIDTH: u16 = 16;
/// Long headers never take more than this
pub const MAX_COL_WIDTH: u16 = 40;

/// Display width for a column header: `clamp(len(header) + 8, 16, 40)`.
///
/// Length is counted in characters. Cell contents do not influence the width;
/// the renderer truncates cells that do not fit.
pub fn header_width(header: &str) -> u16 {
    let len = header.chars().count().min(u16::MAX as usize) as u16;
    len.saturating_add(COLUMN_PADDING)
        .clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
}

/// Widths for a sequence of headers, in order
pub fn header_widths<S: AsRef<str>>(headers: &[S]) -> Vec<u16> {
    headers.iter().map(|h| header_width(h.as_ref())).collect()
}

/// Truncate a cell for grid display, keeping `max_chars` characters.
///
/// Values longer than `max_chars` become their first `max_chars - 3`
/// characters followed by `...`.
pub fn truncate_cell(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }
    let mut out: String = value.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_width_policy() {
        assert_eq!(header_width(""), 16);
        assert_eq!(header_width("id"), 16);
        assert_eq!(header_width("12345678"), 16);
        assert_eq!(header_width("123456789"), 17);
        assert_eq!(header_width("customer_billing_address"), 32);
        assert_eq!(header_width(&"x".repeat(32)), 40);
        assert_eq!(header_width(&"x".repeat(200)), 40);
    }

    #[test]
    fn test_header_width_counts_chars() {
        // 9 characters, more bytes
        assert_eq!(header_width("prénom_éé"), 17);
    }

    #[test]
    fn test_header_widths() {
        assert_eq!(header_widths(&["id", "description_text"]), vec![16, 24]);
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("short", 100), "short");
        let long = "a".repeat(150);
        let cut = truncate_cell(&long, 100);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_cell("abcdef", 2), "ab");
    }
}
