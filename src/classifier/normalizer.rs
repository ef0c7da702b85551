/// Canonical form used to match model output against candidate labels.
///
/// Models echo labels back with varying case, spacing and punctuation; two
/// spellings match when their normalized forms are equal.
pub struct LabelNormalizer;

impl LabelNormalizer {
    /// Normalizes a label to lowercase kebab-case.
    ///
    /// # Normalization rules
    ///
    /// - Converts to lowercase
    /// - Treats whitespace and underscores as word separators
    /// - Removes all characters except alphanumeric and hyphens
    /// - Collapses repeated separators and trims them from both ends
    ///
    /// # Examples
    ///
    /// ```
    /// use genome::classifier::LabelNormalizer;
    ///
    /// assert_eq!(LabelNormalizer::normalize_label("Science Fiction"), "science-fiction");
    /// assert_eq!(LabelNormalizer::normalize_label("science_fiction"), "science-fiction");
    /// assert_eq!(LabelNormalizer::normalize_label(" \"Comedy!\" "), "comedy");
    /// ```
    #[must_use]
    pub fn normalize_label(label: &str) -> String {
        label
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Returns the candidate whose normalized form equals that of `label`.
    ///
    /// When several candidates normalize identically the first one wins.
    #[must_use]
    pub fn match_candidate<'c>(label: &str, candidates: &'c [String]) -> Option<&'c str> {
        let wanted = Self::normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        candidates
            .iter()
            .find(|candidate| Self::normalize_label(candidate) == wanted)
            .map(String::as_str)
    }
}
