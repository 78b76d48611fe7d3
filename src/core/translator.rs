// File: src/core/translator.rs
use crate::core::index::{normalize, TranslationIndex};
use crate::core::loader::Dictionary;
use crate::core::types::{Direction, Lookup, SentenceTranslation, NO_ALTERNATIVES};

/// Read-only word and sentence translation over a loaded [`Dictionary`].
/// Holds no interior mutability, so one instance can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Dictionary,
}

impl Translator {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn index(&self, direction: Direction) -> &TranslationIndex {
        match direction {
            Direction::ChakmaToBangla => &self.dictionary.chakma_to_bangla,
            Direction::BanglaToChakma => &self.dictionary.bangla_to_chakma,
        }
    }

    /// Exact, case-insensitive lookup of a single term.
    pub fn lookup(&self, word: &str, direction: Direction) -> Lookup<'_> {
        let key = normalize(word);
        match self.index(direction).get(&key) {
            Some(synonyms) if !synonyms.is_empty() => Lookup::Found(synonyms),
            _ => Lookup::PassThrough(key),
        }
    }

    /// All known synonyms for `word`, or the normalized word itself when unknown.
    pub fn translate_word(&self, word: &str, direction: Direction) -> Vec<String> {
        self.lookup(word, direction).into_translations()
    }

    /// Translates token by token. Tokens are whitespace-separated and keep any
    /// attached punctuation. The first synonym of each token forms the primary
    /// sentence; tokens with several synonyms are listed as alternatives.
    pub fn translate_sentence(&self, sentence: &str, direction: Direction) -> SentenceTranslation {
        let mut primary = Vec::new();
        let mut alternatives = Vec::new();

        for token in sentence.split_whitespace() {
            let translations = self.translate_word(token, direction);
            primary.push(translations[0].clone());
            if translations.len() > 1 {
                alternatives.push(format!("{}: {}", token, translations.join(", ")));
            }
        }

        if alternatives.is_empty() {
            alternatives.push(NO_ALTERNATIVES.to_string());
        }

        SentenceTranslation {
            primary: primary.join(" "),
            alternatives,
        }
    }
}
