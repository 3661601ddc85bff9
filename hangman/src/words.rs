/// Split a word list into words, one per line. Surrounding whitespace is trimmed and blank lines
/// are skipped; nothing else is filtered.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
