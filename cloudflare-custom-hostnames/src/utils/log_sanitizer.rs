//! Log sanitization utilities
//!
//! Response bodies can be large (full hostname pages) and may echo custom
//! metadata, so debug/error logs only ever see a bounded prefix.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged. Longer ones are cut at the
/// last char boundary at or below the limit and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
