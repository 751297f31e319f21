//! Keyword sets and whole-word matchers for the genre classifier.
//!
//! Each set is compiled into a single alternation regex with word
//! boundaries, so "piano" matches in "Piano Sonata" but not inside
//! "pianoforte". Matching runs on already-folded lowercase ASCII text
//! (see [`crate::normalize::fold_ascii`]).

use regex::Regex;

/// Solo-piano-idiomatic terms: form and repertoire words strongly
/// associated with solo piano music.
pub const PIANO_SOLO_KEYWORDS: &[&str] = &[
    "piano",
    "etude",
    "prelude",
    "nocturne",
    "mazurka",
    "ballade",
    "scherzo",
    "polonaise",
    "waltz",
    "walzer",
    "fantaisie",
    "fantasy",
    "rhapsody",
    "impromptu",
    "bagatelle",
    "barcarolle",
    "arabeske",
    "berceuse",
    "kinderszenen",
    "kreisleriana",
    "clavier",
    "invention",
    "sinfonia",
    "partita",
    "goldberg",
    "pelerinage",
    "images",
    "estampes",
    "bergamasque",
    "annees",
    "transcendental",
];

/// Ensemble and large-form terms.
pub const ORCHESTRA_KEYWORDS: &[&str] = &[
    "orchestra",
    "symphony",
    "philharmonic",
    "concerto",
    "suite",
    "overture",
    "tone poem",
    "requiem",
    "mass",
    "cantata",
];

/// Named non-piano instruments. Only a disambiguating signal, never a
/// label by itself.
pub const OTHER_INSTRUMENTS: &[&str] = &[
    "violin",
    "violoncello",
    "cello",
    "flute",
    "clarinet",
    "oboe",
    "horn",
    "harp",
    "organ",
    "trumpet",
    "trombone",
    "bassoon",
    "guitar",
    "lute",
    "saxophone",
];

/// Compile a word set into one alternation regex with word boundaries.
/// Multi-word phrases match as whole phrases.
pub(crate) fn word_set_regex(words: &[&str]) -> Regex {
    let pattern = words
        .iter()
        .map(|w| format!(r"\b{}\b", regex::escape(w)))
        .collect::<Vec<_>>()
        .join("|");
    // The keyword lists are compile-time constants, so the pattern is
    // always valid.
    Regex::new(&pattern).expect("static keyword pattern")
}
