//! Analysis engine: sections, keywords, and match score for one resume/job pair

use crate::config::Config;
use crate::error::Result;
use crate::processing::keywords::{extract_keywords, shared_chunker, KeywordSet, PhraseExtractor};
use crate::processing::matcher::{KeywordMatch, KeywordMatcher, MatchResult};
use crate::processing::sections::SectionMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Everything computed for one run. Owned by the run; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_result: MatchResult,
    pub missing_keywords: Vec<String>,
    pub keyword_matches: Vec<KeywordMatch>,
    pub sections: SectionMap,
    pub resume_keywords: KeywordSet,
    pub job_keywords: KeywordSet,
}

/// The pipeline runs only on a non-empty job description; whitespace still counts as input.
pub fn has_job_description(job_text: &str) -> bool {
    !job_text.is_empty()
}

pub struct AnalysisEngine<'a> {
    phrase_extractor: &'a dyn PhraseExtractor,
    matcher: KeywordMatcher,
    min_phrase_chars: usize,
}

impl AnalysisEngine<'static> {
    /// Build an engine on top of the shared noun-phrase chunker.
    pub fn new(config: &Config) -> Result<Self> {
        let chunker = shared_chunker(config.keywords.lexicon_path.as_deref())?;
        Ok(Self::with_extractor(chunker, config))
    }
}

impl<'a> AnalysisEngine<'a> {
    pub fn with_extractor(phrase_extractor: &'a dyn PhraseExtractor, config: &Config) -> Self {
        Self {
            phrase_extractor,
            matcher: KeywordMatcher::from_config(&config.matching),
            min_phrase_chars: config.keywords.min_phrase_chars,
        }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        extract_keywords(self.phrase_extractor, text, self.min_phrase_chars)
    }

    /// Run the full comparison of `resume_text` against `job_text`.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> AnalysisResult {
        let sections = SectionMap::extract(resume_text);
        debug!("Found {} of 6 resume sections", sections.found_count());

        let resume_keywords = self.extract_keywords(resume_text);
        let job_keywords = self.extract_keywords(job_text);
        debug!(
            "Extracted {} resume keywords and {} job keywords",
            resume_keywords.len(),
            job_keywords.len()
        );

        let outcome = self.matcher.match_keywords(&resume_keywords, &job_keywords);
        info!(
            "Matched {} of {} job keywords ({}%)",
            outcome.result.matched, outcome.result.total, outcome.result.score
        );

        AnalysisResult {
            match_result: outcome.result,
            missing_keywords: outcome.missing,
            keyword_matches: outcome.matches,
            sections,
            resume_keywords,
            job_keywords,
        }
    }
}
