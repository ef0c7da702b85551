//! Rule-based sentence and word segmentation.
//!
//! Both functions are pure and allocation-light: they return slices borrowed
//! from the input text, so callers decide when to lowercase or copy.

use once_cell::sync::Lazy;
use regex::Regex;

/// A sentence-terminal mark followed by at least one whitespace character.
static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));

/// Maximal runs of word characters (letters, digits, underscore).
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Splits text into sentences.
///
/// A boundary is whitespace that follows `.`, `!` or `?`. The terminal mark
/// stays with its sentence, surrounding whitespace is trimmed and empty
/// fragments are dropped.
///
/// Non-blank input always yields at least one sentence: text without any
/// boundary comes back as a single trimmed sentence. Blank input yields an
/// empty vector.
///
/// # Examples
///
/// ```
/// use genome::lexical::split_sentences;
///
/// assert_eq!(
///     split_sentences("It rained. We stayed in!  Why?"),
///     vec!["It rained.", "We stayed in!", "Why?"]
/// );
/// assert_eq!(split_sentences("a whale swims"), vec!["a whale swims"]);
/// assert!(split_sentences("   ").is_empty());
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BREAK_RE.find_iter(text) {
        // Terminal marks are single-byte ASCII, so +1 stays on a char boundary.
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    if sentences.is_empty() {
        push_trimmed(&mut sentences, text);
    }

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// Extracts word tokens in order of appearance.
///
/// Case is preserved; punctuation-only spans produce no tokens.
///
/// # Examples
///
/// ```
/// use genome::lexical::tokenize;
///
/// assert_eq!(tokenize("Don't panic -- it's 42!"), vec!["Don", "t", "panic", "it", "s", "42"]);
/// assert!(tokenize("?!...").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_each_terminal_mark() {
        let sentences = split_sentences("One. Two! Three? Four.");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four."]);
    }

    #[test]
    fn does_not_split_without_following_whitespace() {
        let sentences = split_sentences("Version 1.5 shipped.It worked");
        assert_eq!(sentences, vec!["Version 1.5 shipped.It worked"]);
    }

    #[test]
    fn keeps_repeated_terminal_marks_together() {
        let sentences = split_sentences("What?! No way... Really.");
        assert_eq!(sentences, vec!["What?!", "No way...", "Really."]);
    }

    #[test]
    fn splits_across_newlines() {
        let sentences = split_sentences("First line.\n\nSecond line.\tThird");
        assert_eq!(sentences, vec!["First line.", "Second line.", "Third"]);
    }

    #[test]
    fn text_without_punctuation_is_one_sentence() {
        assert_eq!(split_sentences("  a whale swims  "), vec!["a whale swims"]);
    }

    #[test]
    fn punctuation_only_text_is_still_one_sentence() {
        assert_eq!(split_sentences("... !!!"), vec!["...", "!!!"]);
        assert_eq!(split_sentences("?"), vec!["?"]);
    }

    #[test]
    fn blank_text_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\t ").is_empty());
    }

    #[test]
    fn tokenize_extracts_word_runs() {
        assert_eq!(
            tokenize("The cat_1 sat, on 2 mats."),
            vec!["The", "cat_1", "sat", "on", "2", "mats"]
        );
    }

    #[test]
    fn tokenize_preserves_case() {
        assert_eq!(tokenize("I Me MY"), vec!["I", "Me", "MY"]);
    }

    #[test]
    fn tokenize_handles_unicode_letters() {
        assert_eq!(tokenize("Café naïve über"), vec!["Café", "naïve", "über"]);
    }

    #[test]
    fn tokenize_ignores_punctuation_only_spans() {
        assert!(tokenize(" -- ... !? ").is_empty());
    }
}
