use crate::config::Category;

/// Finds the first humor style with a keyword present in the text.
///
/// `lowered_text` must already be lowercased. Keywords are matched as
/// substrings so that multi-word phrases work. Styles are tried in
/// declaration order and only the first match is reported.
///
/// # Examples
///
/// ```
/// use genome::config::GenomeConfig;
/// use genome::detectors::detect_humor;
///
/// let config = GenomeConfig::default();
/// let style = detect_humor("oh, yeah right, like that would work", config.humor());
/// assert_eq!(style.map(|s| s.name()), Some("sarcastic"));
/// assert!(detect_humor("a quiet evening", config.humor()).is_none());
/// ```
pub fn detect_humor<'c>(lowered_text: &str, styles: &'c [Category]) -> Option<&'c Category> {
    styles.iter().find(|style| {
        style
            .terms()
            .iter()
            .any(|keyword| lowered_text.contains(keyword.as_str()))
    })
}
