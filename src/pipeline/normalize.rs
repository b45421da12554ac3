use crate::error::{CatalogError, Result};

/// Collapses raw catalog lines into one whitespace-normalized string: lines
/// are joined with a single space and every run of whitespace becomes one
/// space.
pub fn normalize_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the slice of `text` after the first occurrence of the
/// start-of-listings sentinel. Everything downstream anchors on this offset,
/// so a missing sentinel is fatal.
pub fn locate_listings<'a>(text: &'a str, sentinel: &str) -> Result<&'a str> {
    match text.find(sentinel) {
        Some(idx) => Ok(&text[idx + sentinel.len()..]),
        None => Err(CatalogError::Format(format!(
            "start-of-listings sentinel {:?} not found in normalized text",
            sentinel
        ))),
    }
}
