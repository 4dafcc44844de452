//! Report structures wrapping one analysis run

use crate::config::SimilarityAlgorithm;
use crate::processing::analyzer::AnalysisResult;
use crate::processing::matcher::KeywordMatcher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown instead of the missing-keyword list when nothing is missing.
pub const NO_MISSING_KEYWORDS: &str = "None – great match!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub verdict: String,
    pub analysis: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    /// File path of the job description, or a label such as "inline text"
    pub job_source: String,
    pub processing_time_ms: u64,
    pub similarity_algorithm: SimilarityAlgorithm,
    pub similarity_threshold: f64,
}

impl AnalysisReport {
    pub fn new(
        analysis: AnalysisResult,
        matcher: &KeywordMatcher,
        resume_file: impl Into<String>,
        job_source: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        let verdict = verdict_for(analysis.match_result.score).to_string();
        Self {
            verdict,
            analysis,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.into(),
                job_source: job_source.into(),
                processing_time_ms,
                similarity_algorithm: matcher.algorithm(),
                similarity_threshold: matcher.threshold(),
            },
        }
    }

    pub fn score(&self) -> u8 {
        self.analysis.match_result.score
    }

    /// "X of Y job keywords matched."
    pub fn matched_sentence(&self) -> String {
        format!(
            "{} of {} job keywords matched.",
            self.analysis.match_result.matched, self.analysis.match_result.total
        )
    }

    /// Comma-joined missing keywords, or [`NO_MISSING_KEYWORDS`].
    pub fn missing_line(&self) -> String {
        if self.analysis.missing_keywords.is_empty() {
            NO_MISSING_KEYWORDS.to_string()
        } else {
            self.analysis.missing_keywords.join(", ")
        }
    }
}

fn verdict_for(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent keyword coverage for this role",
        75..=89 => "Strong match with a few gaps",
        50..=74 => "Partial match; consider working in the missing keywords",
        25..=49 => "Weak match; the resume misses many of the job's keywords",
        _ => "Little overlap with this job description",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::AnalysisEngine;

    fn report(resume: &str, job: &str) -> AnalysisReport {
        let config = Config::default();
        let engine = AnalysisEngine::new(&config).unwrap();
        let analysis = engine.analyze(resume, job);
        AnalysisReport::new(analysis, engine.matcher(), "resume.pdf", "inline text", 3)
    }

    #[test]
    fn test_full_match_lines() {
        let report = report("Python developer, SQL skills", "Python developer with SQL skills");
        assert_eq!(report.score(), 100);
        assert_eq!(report.matched_sentence(), "2 of 2 job keywords matched.");
        assert_eq!(report.missing_line(), NO_MISSING_KEYWORDS);
        assert_eq!(report.verdict, verdict_for(100));
    }

    #[test]
    fn test_missing_line_joined() {
        let report = report("Python developer", "Terraform modules, Kubernetes operators");
        assert_eq!(report.score(), 0);
        assert_eq!(report.missing_line(), "Terraform modules, Kubernetes operators".to_lowercase());
        assert_eq!(report.metadata.similarity_threshold, 0.8);
    }

    #[test]
    fn test_timestamp_serializes_as_rfc3339() {
        let report = report("Python developer", "Python developer");
        let value = serde_json::to_value(&report.metadata).unwrap();

        let stamp = value["generated_at"].as_str().unwrap();
        let parsed: DateTime<Utc> = stamp.parse().unwrap();
        assert_eq!(parsed, report.metadata.generated_at);
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(verdict_for(0), verdict_for(24));
        assert_ne!(verdict_for(50), verdict_for(49));
        assert_ne!(verdict_for(90), verdict_for(89));
    }
}
