use serde::{Deserialize, Serialize};

/// Cheap harvest-time genre guess, derived from the release-group's own
/// text fields (title, disambiguation, tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoarseGenre {
    Piano,
    Orchestra,
    Unknown,
}

impl CoarseGenre {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoarseGenre::Piano => "Piano",
            CoarseGenre::Orchestra => "Orchestra",
            CoarseGenre::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CoarseGenre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refined second-pass label from the keyword classifier.
///
/// Deliberately a different closed set from [`CoarseGenre`]: the two
/// taxonomies are never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    PianoSolo,
    Orchestra,
    Hybrid,
    Unknown,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::PianoSolo => "PianoSolo",
            Genre::Orchestra => "Orchestra",
            Genre::Hybrid => "Hybrid",
            Genre::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_display() {
        assert_eq!(CoarseGenre::Piano.to_string(), "Piano");
        assert_eq!(Genre::PianoSolo.to_string(), "PianoSolo");
        assert_eq!(Genre::Hybrid.to_string(), "Hybrid");
    }
}
