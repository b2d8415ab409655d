//! Numeric interpretation of cell text.
//!
//! Cells store text only; these helpers decide on demand whether text reads
//! as a number, which is what gates series fills and SUM operands.

/// True if the trimmed text is a plain decimal number: an optional leading
/// `-`, ASCII digits, and at most one `.` with at least one digit overall.
pub fn is_numeric_text(text: &str) -> bool {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if unsigned.is_empty() {
        return false;
    }

    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// True if every value in the block is numeric. An empty block is not numeric.
pub fn is_numeric_block<S: AsRef<str>>(block: &[Vec<S>]) -> bool {
    let mut any = false;
    for line in block {
        for value in line {
            if !is_numeric_text(value.as_ref()) {
                return false;
            }
            any = true;
        }
    }
    any
}

/// Parse the base value of an arithmetic series. Only integers qualify;
/// surrounding whitespace is ignored.
pub fn parse_series_base(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Parse a SUM operand: the untrimmed text must be a non-negative integer
/// literal made of ASCII digits only. Literals past `i64::MAX` saturate.
pub fn parse_sum_operand(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse::<i64>().unwrap_or(i64::MAX))
}
