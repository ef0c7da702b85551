//! Built-in taxonomies and lexicons.

pub(super) const DEFAULT_MODEL: &str = "llama3.2:3b";

pub(super) const GENRES: &[&str] = &[
    "fantasy",
    "science fiction",
    "mystery",
    "romance",
    "horror",
    "comedy",
    "drama",
    "thriller",
    "adventure",
    "historical",
];

pub(super) const MOODS: &[&str] = &[
    "uplifting",
    "dark",
    "whimsical",
    "tense",
    "melancholic",
    "romantic",
    "hopeful",
    "eerie",
];

/// Humor styles in match priority order.
pub(super) const HUMOR: &[(&str, &[&str])] = &[
    (
        "slapstick",
        &[
            "banana peel",
            "slipped",
            "tripped",
            "pratfall",
            "pie in the face",
            "fell flat",
            "stumbled",
            "crashed into",
        ],
    ),
    (
        "sarcastic",
        &[
            "yeah right",
            "oh great",
            "oh sure",
            "big surprise",
            "just what i needed",
            "sarcastic",
        ],
    ),
    (
        "dry",
        &[
            "deadpan",
            "dryly",
            "wryly",
            "without a hint of",
            "mildly inconvenient",
        ],
    ),
    (
        "absurd",
        &[
            "absurd",
            "surreal",
            "nonsensical",
            "talking toaster",
            "for no reason at all",
        ],
    ),
];

/// Perspective categories in tie-break order.
pub(super) const PERSPECTIVES: &[(&str, &[&str])] = &[
    (
        "first_person",
        &[
            "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves",
        ],
    ),
    (
        "second_person",
        &["you", "your", "yours", "yourself", "yourselves"],
    ),
    (
        "third_person",
        &[
            "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its",
            "itself", "they", "them", "their", "theirs", "themselves",
        ],
    ),
];
