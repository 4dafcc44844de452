//! Fuzzy keyword matching between a resume and a job description

use crate::config::{MatchingConfig, SimilarityAlgorithm};
use crate::processing::keywords::KeywordSet;
use crate::processing::similarity::similarity;
use serde::{Deserialize, Serialize};

/// Score summary of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage of job keywords matched, rounded down
    pub score: u8,
    pub matched: usize,
    pub total: usize,
}

/// The closest resume keyword for one job keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub job_keyword: String,
    pub resume_keyword: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub result: MatchResult,
    /// Unmatched job keywords, in job keyword order
    pub missing: Vec<String>,
    pub matches: Vec<KeywordMatch>,
}

pub struct KeywordMatcher {
    threshold: f64,
    algorithm: SimilarityAlgorithm,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::from_config(&MatchingConfig::default())
    }
}

impl KeywordMatcher {
    pub fn new(threshold: f64, algorithm: SimilarityAlgorithm) -> Self {
        Self {
            threshold,
            algorithm,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.similarity_threshold, config.algorithm)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn algorithm(&self) -> SimilarityAlgorithm {
        self.algorithm
    }

    /// True when some resume keyword is strictly more similar than the threshold.
    pub fn is_matched(&self, job_keyword: &str, resume_keywords: &KeywordSet) -> bool {
        resume_keywords
            .iter()
            .any(|resume_keyword| similarity(self.algorithm, job_keyword, resume_keyword) > self.threshold)
    }

    /// The most similar resume keyword, if it clears the threshold.
    pub fn best_match(&self, job_keyword: &str, resume_keywords: &KeywordSet) -> Option<KeywordMatch> {
        let mut best: Option<KeywordMatch> = None;

        for resume_keyword in resume_keywords.iter() {
            let score = similarity(self.algorithm, job_keyword, resume_keyword);
            if score <= self.threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| score > b.similarity) {
                best = Some(KeywordMatch {
                    job_keyword: job_keyword.to_string(),
                    resume_keyword: resume_keyword.to_string(),
                    similarity: score,
                });
            }
        }

        best
    }

    /// Compare every job keyword against every resume keyword.
    pub fn match_keywords(&self, resume_keywords: &KeywordSet, job_keywords: &KeywordSet) -> MatchOutcome {
        let mut matches = Vec::new();
        let mut missing = Vec::new();

        for job_keyword in job_keywords.iter() {
            match self.best_match(job_keyword, resume_keywords) {
                Some(keyword_match) => matches.push(keyword_match),
                None => missing.push(job_keyword.to_string()),
            }
        }

        let total = job_keywords.len();
        let matched = matches.len();
        let score = if total > 0 {
            (matched * 100 / total) as u8
        } else {
            0
        };

        MatchOutcome {
            result: MatchResult {
                score,
                matched,
                total,
            },
            missing,
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_default_matcher() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.threshold(), 0.8);
        assert_eq!(matcher.algorithm(), SimilarityAlgorithm::SequenceRatio);
    }

    #[test]
    fn test_no_job_keywords() {
        let outcome = KeywordMatcher::default().match_keywords(&set(&["rust", "sql"]), &KeywordSet::new());

        assert_eq!(outcome.result.score, 0);
        assert_eq!(outcome.result.matched, 0);
        assert_eq!(outcome.result.total, 0);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_identical_keywords_score_full() {
        let resume = set(&["python developer", "sql skills", "team leadership"]);
        let job = set(&["sql skills", "python developer"]);

        let outcome = KeywordMatcher::default().match_keywords(&resume, &job);
        assert_eq!(outcome.result.score, 100);
        assert_eq!(outcome.result.matched, 2);
        assert!(outcome.missing.is_empty());
        assert!(outcome.matches.iter().all(|m| m.similarity == 1.0));
    }

    #[test]
    fn test_unrelated_keywords_missing() {
        let resume = set(&["python developer", "sql skills"]);
        let job = set(&["kubernetes orchestration expert"]);

        let outcome = KeywordMatcher::default().match_keywords(&resume, &job);
        assert_eq!(outcome.result.score, 0);
        assert_eq!(outcome.missing, vec!["kubernetes orchestration expert"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // sequence ratio of these is exactly 0.8
        let resume = set(&["abcdxy"]);
        let job = set(&["abcd"]);

        assert!(!KeywordMatcher::default().is_matched("abcd", &resume));
        let outcome = KeywordMatcher::default().match_keywords(&resume, &job);
        assert_eq!(outcome.result.matched, 0);

        let looser = KeywordMatcher::new(0.79, SimilarityAlgorithm::SequenceRatio);
        assert!(looser.is_matched("abcd", &resume));
    }

    #[test]
    fn test_score_rounds_down() {
        let resume = set(&["rust", "sql"]);
        let job = set(&["rust", "sql", "kubernetes"]);

        let outcome = KeywordMatcher::default().match_keywords(&resume, &job);
        assert_eq!(outcome.result.matched, 2);
        assert_eq!(outcome.result.total, 3);
        assert_eq!(outcome.result.score, 66);
        assert_eq!(outcome.missing, vec!["kubernetes"]);
    }

    #[test]
    fn test_fuzzy_match_picks_closest() {
        let resume = set(&["sql skill", "sql skills"]);
        let best = KeywordMatcher::default().best_match("sql skills", &resume).unwrap();
        assert_eq!(best.resume_keyword, "sql skills");
        assert_eq!(best.similarity, 1.0);
    }

    #[test]
    fn test_missing_order_follows_job_keywords() {
        let job = set(&["terraform", "kubernetes", "rust", "golang"]);
        let resume = set(&["rust"]);

        let outcome = KeywordMatcher::default().match_keywords(&resume, &job);
        assert_eq!(outcome.missing, vec!["terraform", "kubernetes", "golang"]);
    }
}
