use crate::config::Category;

/// Counts pronoun hits per perspective category, in declaration order.
///
/// `tokens` are expected to be lowercased already; matching is exact token
/// equality, never substring.
pub fn perspective_counts<'c, S: AsRef<str>>(
    tokens: &[S],
    categories: &'c [Category],
) -> Vec<(&'c Category, usize)> {
    categories
        .iter()
        .map(|category| {
            let hits = tokens
                .iter()
                .map(AsRef::<str>::as_ref)
                .filter(|token| category.terms().iter().any(|p| p == token))
                .count();
            (category, hits)
        })
        .collect()
}

/// Picks the narrative perspective with the most pronoun hits.
///
/// Ties, including the all-zero case, resolve to the category declared first,
/// so the first category doubles as the fallback when there is no evidence.
/// Returns `None` only when `categories` is empty.
///
/// # Examples
///
/// ```
/// use genome::config::GenomeConfig;
/// use genome::detectors::detect_perspective;
///
/// let config = GenomeConfig::default();
/// let tokens = ["she", "said", "i", "knew", "her"];
/// let perspective = detect_perspective(&tokens, config.perspectives()).unwrap();
/// assert_eq!(perspective.name(), "third_person");
/// ```
pub fn detect_perspective<'c, S: AsRef<str>>(
    tokens: &[S],
    categories: &'c [Category],
) -> Option<&'c Category> {
    let mut best: Option<(&Category, usize)> = None;

    for (category, hits) in perspective_counts(tokens, categories) {
        // Strictly greater: an equal count never displaces an earlier category.
        if best.is_none_or(|(_, top)| hits > top) {
            best = Some((category, hits));
        }
    }

    best.map(|(category, _)| category)
}
