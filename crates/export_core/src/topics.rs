/// Splits a comma-separated `Topic` value into the ordered topic list.
///
/// Whitespace around each comma is trimmed and empty segments are skipped;
/// order and duplicates are preserved.
pub fn split_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
