// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of an empty alternatives list for sentence translations.
pub const NO_ALTERNATIVES: &str = "No alternative translations";

/// Which of the two languages is the lookup source for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ChakmaToBangla,
    BanglaToChakma,
}

impl Direction {
    /// Maps the wire-level `to_bangla` flag onto a direction.
    pub fn from_to_bangla(to_bangla: bool) -> Self {
        if to_bangla {
            Direction::ChakmaToBangla
        } else {
            Direction::BanglaToChakma
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ChakmaToBangla => "chakma_to_bangla",
            Direction::BanglaToChakma => "bangla_to_chakma",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::ChakmaToBangla => Direction::BanglaToChakma,
            Direction::BanglaToChakma => Direction::ChakmaToBangla,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source record: chakma terms and bangla terms that are mutually equivalent.
/// Only lives for the duration of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymRow {
    pub chakma: Vec<String>,
    pub bangla: Vec<String>,
}

/// Result of a single-term lookup.
/// A miss is not an error: unknown words pass through as their normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a [String]),
    PassThrough(String),
}

impl<'a> Lookup<'a> {
    /// The first-listed synonym, used when composing sentences.
    pub fn primary(&self) -> &str {
        match self {
            Lookup::Found(synonyms) => synonyms.first().map(String::as_str).unwrap_or(""),
            Lookup::PassThrough(word) => word,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Flattens the lookup into the ordered sequence returned to callers.
    pub fn into_translations(self) -> Vec<String> {
        match self {
            Lookup::Found(synonyms) => synonyms.to_vec(),
            Lookup::PassThrough(word) => vec![word],
        }
    }
}

/// Primary sentence plus the per-token alternative listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceTranslation {
    pub primary: String,
    /// Never empty: holds [`NO_ALTERNATIVES`] when no token had more than one synonym.
    pub alternatives: Vec<String>,
}

impl SentenceTranslation {
    pub fn has_alternatives(&self) -> bool {
        !(self.alternatives.len() == 1 && self.alternatives[0] == NO_ALTERNATIVES)
    }
}
