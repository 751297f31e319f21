//! The refined genre classifier: layered keyword matching with fixed
//! precedence over normalized text.

use pianola_core::Genre;
use regex::Regex;

use crate::keywords::{ORCHESTRA_KEYWORDS, OTHER_INSTRUMENTS, PIANO_SOLO_KEYWORDS, word_set_regex};
use crate::normalize::fold_ascii;

/// A classifier with the three keyword matchers compiled once.
///
/// `classify` is a pure function of its input text: no state, no side
/// effects, same label every time.
pub struct Classifier {
    piano: Regex,
    orchestra: Regex,
    other: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            piano: word_set_regex(PIANO_SOLO_KEYWORDS),
            orchestra: word_set_regex(ORCHESTRA_KEYWORDS),
            other: word_set_regex(OTHER_INSTRUMENTS),
        }
    }

    /// Assign a refined genre label to free text.
    ///
    /// Precedence, first match wins:
    /// 1. piano + orchestra       -> Hybrid
    /// 2. orchestra               -> Orchestra
    /// 3. piano, no other instr.  -> PianoSolo
    /// 4. piano + other instr.    -> Unknown (ambiguous, not solo)
    /// 5. neither                 -> Unknown
    pub fn classify(&self, text: &str) -> Genre {
        let folded = fold_ascii(text);
        let piano_hit = self.piano.is_match(&folded);
        let orchestra_hit = self.orchestra.is_match(&folded);
        let other_hit = self.other.is_match(&folded);

        if piano_hit && orchestra_hit {
            Genre::Hybrid
        } else if orchestra_hit {
            Genre::Orchestra
        } else if piano_hit && !other_hit {
            Genre::PianoSolo
        } else {
            Genre::Unknown
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the classifier input text from a row's free-text fields.
/// Missing fields are empty strings, never an error.
pub fn row_text(
    title: &str,
    release_title: &str,
    primary_type: Option<&str>,
    disambiguation: Option<&str>,
) -> String {
    [
        title,
        release_title,
        primary_type.unwrap_or(""),
        disambiguation.unwrap_or(""),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piano_and_orchestra_is_hybrid() {
        let c = Classifier::new();
        assert_eq!(
            c.classify("Symphony No. 5 for Piano and Orchestra"),
            Genre::Hybrid
        );
        // Term order in the text is irrelevant.
        assert_eq!(
            c.classify("Piano works with the London Symphony"),
            Genre::Hybrid
        );
    }

    #[test]
    fn test_orchestra_alone() {
        let c = Classifier::new();
        assert_eq!(c.classify("Eine kleine Nachtmusik Suite"), Genre::Orchestra);
        assert_eq!(c.classify("Violin Concerto in D"), Genre::Orchestra);
    }

    #[test]
    fn test_piano_solo() {
        let c = Classifier::new();
        assert_eq!(c.classify("Nocturne in E-flat major"), Genre::PianoSolo);
        assert_eq!(c.classify("Goldberg Variations"), Genre::PianoSolo);
    }

    #[test]
    fn test_piano_with_other_instrument_is_unknown() {
        let c = Classifier::new();
        assert_eq!(c.classify("Sonata for Violin and Piano"), Genre::Unknown);
        assert_eq!(c.classify("Cello and Piano Recital"), Genre::Unknown);
    }

    #[test]
    fn test_no_hits_is_unknown() {
        let c = Classifier::new();
        assert_eq!(c.classify("Greatest Hits of the 80s"), Genre::Unknown);
        assert_eq!(c.classify(""), Genre::Unknown);
    }

    #[test]
    fn test_accent_insensitive() {
        let c = Classifier::new();
        assert_eq!(c.classify("Étude in C minor"), Genre::PianoSolo);
        assert_eq!(c.classify("Années de pèlerinage"), Genre::PianoSolo);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let c = Classifier::new();
        let text = "Prélude à l'après-midi d'un faune (orchestra)";
        assert_eq!(c.classify(text), c.classify(text));
    }

    #[test]
    fn test_row_text_joins_with_missing_fields() {
        assert_eq!(
            row_text("Études", "Études", Some("Album"), None),
            "Études Études Album "
        );
        assert_eq!(row_text("A", "B", None, None), "A B  ");
    }
}
