//! Word lists backing the noun-phrase chunker

use crate::error::{Result, ResumeAnalyzerError};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_LEXICON: &str = include_str!("../../assets/lexicon.toml");

/// Raw lexicon file layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LexiconFile {
    determiners: Vec<String>,
    pronouns: Vec<String>,
    prepositions: Vec<String>,
    conjunctions: Vec<String>,
    auxiliaries: Vec<String>,
    adverbs: Vec<String>,
    verbs: Vec<String>,
    modifiers: Vec<String>,
}

/// Closed-class words, verb forms, and phrase-initial modifiers, all lowercase.
#[derive(Debug, Clone)]
pub struct Lexicon {
    boundaries: HashSet<String>,
    verb_forms: HashSet<String>,
    modifiers: HashSet<String>,
}

impl Lexicon {
    /// The lexicon compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_LEXICON)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeAnalyzerError::Lexicon(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Lexicon(format!("Failed to parse lexicon: {}", e)))?;

        let boundaries: HashSet<String> = file
            .determiners
            .iter()
            .chain(&file.pronouns)
            .chain(&file.prepositions)
            .chain(&file.conjunctions)
            .chain(&file.auxiliaries)
            .chain(&file.adverbs)
            .map(|w| w.to_lowercase())
            .collect();

        let verb_forms: HashSet<String> = file
            .verbs
            .iter()
            .flat_map(|verb| inflect(&verb.to_lowercase()))
            .filter(|form| !boundaries.contains(form))
            .collect();

        if boundaries.is_empty() && verb_forms.is_empty() {
            return Err(ResumeAnalyzerError::Lexicon(
                "Lexicon defines no boundary words".to_string(),
            ));
        }

        let modifiers = file.modifiers.iter().map(|w| w.to_lowercase()).collect();

        debug!(
            "Lexicon loaded with {} boundary words and {} verb forms",
            boundaries.len(),
            verb_forms.len()
        );
        Ok(Self {
            boundaries,
            verb_forms,
            modifiers,
        })
    }

    /// Load `path` if given, falling back once to the built-in lexicon.
    pub fn load_with_fallback(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(lexicon) => {
                    info!("Using lexicon from {}", path.display());
                    Ok(lexicon)
                }
                Err(e) => {
                    warn!("{}; falling back to the built-in lexicon", e);
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        }
    }

    /// Closed-class words, which always end a noun phrase.
    pub fn is_boundary(&self, word: &str) -> bool {
        self.boundaries.contains(word)
    }

    /// Listed verbs and their inflections. These end a phrase only when nothing precedes them.
    pub fn is_verb_form(&self, word: &str) -> bool {
        self.verb_forms.contains(word)
    }

    /// Evaluative words dropped when they open a phrase.
    pub fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.contains(word)
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }
}

/// Base form plus regular -s, -ed and -ing forms.
fn inflect(base: &str) -> Vec<String> {
    let mut forms = vec![base.to_string()];
    let chars: Vec<char> = base.chars().collect();
    let n = chars.len();
    if n < 2 {
        return forms;
    }

    let is_vowel = |c: char| "aeiou".contains(c);
    let last = chars[n - 1];
    let stem = &base[..base.len() - last.len_utf8()];

    if last == 'e' {
        forms.push(format!("{}s", base));
        forms.push(format!("{}d", base));
        forms.push(format!("{}ing", stem));
    } else if last == 'y' && !is_vowel(chars[n - 2]) {
        forms.push(format!("{}ies", stem));
        forms.push(format!("{}ied", stem));
        forms.push(format!("{}ing", base));
    } else {
        let suffix_s = if base.ends_with("sh") || base.ends_with("ch") || last == 's' || last == 'x' {
            "es"
        } else {
            "s"
        };
        forms.push(format!("{}{}", base, suffix_s));

        // Short consonant-vowel-consonant stems double the final consonant: run -> running
        let doubles = (3..=4).contains(&n)
            && !is_vowel(last)
            && !"wxy".contains(last)
            && is_vowel(chars[n - 2])
            && !is_vowel(chars[n - 3]);
        if doubles {
            forms.push(format!("{}{}ed", base, last));
            forms.push(format!("{}{}ing", base, last));
        } else {
            forms.push(format!("{}ed", base));
            forms.push(format!("{}ing", base));
        }
    }

    forms
}
