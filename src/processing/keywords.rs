//! Keyword extraction through noun-phrase chunking

use crate::error::Result;
use crate::processing::lexicon::Lexicon;
use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Punctuation that stays inside a word when written without spaces: C++, C#, CI/CD, R&D.
const JOINERS: [char; 5] = ['+', '#', '-', '/', '&'];

/// Turns free text into noun-phrase spans.
pub trait PhraseExtractor: Send + Sync {
    /// Raw phrase spans in text order. Duplicates are kept.
    fn extract_phrases(&self, text: &str) -> Vec<String>;
}

/// A set of lowercase keywords that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    keywords: Vec<String>,
    index: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the keyword was already present.
    pub fn insert(&mut self, keyword: String) -> bool {
        if self.index.contains(&keyword) {
            return false;
        }
        self.index.insert(keyword.clone());
        self.keywords.push(keyword);
        true
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.index.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        keywords.into_iter().collect()
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.keywords
    }
}

/// Collect the phrases of `text` longer than `min_chars` characters, trimmed and lowercased.
pub fn extract_keywords(
    extractor: &dyn PhraseExtractor,
    text: &str,
    min_chars: usize,
) -> KeywordSet {
    extractor
        .extract_phrases(text)
        .into_iter()
        .filter(|phrase| phrase.chars().count() > min_chars)
        .map(|phrase| phrase.trim().to_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Break,
}

/// Heuristic chunker: a noun phrase is a run of content words between
/// punctuation, line breaks, and lexicon boundary words.
#[derive(Debug, Clone)]
pub struct NounChunker {
    lexicon: Lexicon,
}

impl NounChunker {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        for segment in text.split_word_bounds() {
            if segment.chars().any(char::is_alphanumeric) {
                word.push_str(segment);
                continue;
            }

            let mut chars = segment.chars();
            let joiner = match (chars.next(), chars.next()) {
                (Some(c), None) => JOINERS.contains(&c),
                _ => false,
            };
            if joiner && !word.is_empty() {
                word.push_str(segment);
                continue;
            }

            Self::flush_word(&mut word, &mut tokens);
            let is_space = segment.chars().all(char::is_whitespace);
            let is_line_break = segment.contains(['\n', '\r']);
            if !is_space || is_line_break {
                tokens.push(Token::Break);
            }
        }
        Self::flush_word(&mut word, &mut tokens);

        tokens
    }

    fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
        if word.is_empty() {
            return;
        }
        let trimmed = word.trim_end_matches(['-', '/', '&']);
        if trimmed.chars().any(char::is_alphabetic) {
            tokens.push(Token::Word(trimmed.to_string()));
        } else {
            // Bare numbers and dates are not noun phrases
            tokens.push(Token::Break);
        }
        word.clear();
    }

    fn normalize(word: &str) -> String {
        word.to_lowercase().replace('\u{2019}', "'")
    }
}

impl PhraseExtractor for NounChunker {
    fn extract_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();

        let mut flush = |current: &mut Vec<String>| {
            if !current.is_empty() {
                phrases.push(current.join(" "));
                current.clear();
            }
        };

        for token in Self::tokenize(text) {
            match token {
                Token::Break => flush(&mut current),
                Token::Word(word) => {
                    let normalized = Self::normalize(&word);
                    if self.lexicon.is_boundary(&normalized) {
                        flush(&mut current);
                    } else if current.is_empty()
                        && (self.lexicon.is_verb_form(&normalized) || self.lexicon.is_modifier(&normalized))
                    {
                        continue;
                    } else {
                        current.push(word);
                    }
                }
            }
        }
        flush(&mut current);

        phrases
    }
}

static SHARED_CHUNKER: OnceCell<NounChunker> = OnceCell::new();

/// The process-wide chunker, built on first use and reused for the life of the process.
///
/// `lexicon_path` is only consulted by the call that performs the initialisation.
pub fn shared_chunker(lexicon_path: Option<&Path>) -> Result<&'static NounChunker> {
    SHARED_CHUNKER.get_or_try_init(|| {
        info!("Initializing noun-phrase chunker");
        Lexicon::load_with_fallback(lexicon_path).map(NounChunker::new)
    })
}
