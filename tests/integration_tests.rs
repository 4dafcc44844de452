//! Integration tests for the resume analyzer

use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{AnalysisReport, ReportGenerator};
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::sections::{SectionMap, SectionType, NOT_FOUND};
use resume_analyzer::ResumeAnalyzerError;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Professional Experience"));
    assert!(text.contains("CORE COMPETENCIES"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Apache Kafka & maintained"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_files_are_read_on_every_call() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("job.txt");
    let manager = InputManager::new();

    std::fs::write(&path, "Rust developer").unwrap();
    let first = manager.extract_text(&path).await.unwrap();

    std::fs::write(&path, "Go developer").unwrap();
    let second = manager.extract_text(&path).await.unwrap();

    assert_eq!(first, "Rust developer");
    assert_eq!(second, "Go developer");
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_broken_pdf_is_an_extraction_error() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/broken.pdf");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::PdfExtraction(_))));
}

#[tokio::test]
async fn test_pdf_pages_concatenated_in_order() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.pdf");

    let text = manager.extract_text(path).await.unwrap();
    let first_page = text.find("Objective").unwrap();
    let second_page = text.find("Education").unwrap();
    assert!(text.find("Jane Doe").unwrap() < first_page);
    assert!(first_page < second_page);
    assert!(second_page < text.find("CORE COMPETENCIES").unwrap());

    let sections = SectionMap::extract(&text);
    assert_eq!(sections.found_count(), 6);
    assert!(sections.get(SectionType::Experience).contains("Apache Kafka"));
}

#[tokio::test]
async fn test_sections_from_fixture() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let sections = SectionMap::extract(&text);

    assert_eq!(sections.len(), 6);
    assert_eq!(sections.found_count(), 6);
    assert!(sections.get(SectionType::Objective).starts_with("Objective"));
    assert!(sections
        .get(SectionType::Experience)
        .starts_with("Professional Experience"));
    assert!(sections.get(SectionType::Certifications).contains("AWS Certified"));
    assert!(sections
        .get(SectionType::Competencies)
        .ends_with("Distributed systems, data modeling, code review, mentoring"));
    for (_, content) in sections.iter() {
        assert_ne!(content, NOT_FOUND);
        assert_eq!(content, content.trim());
    }
}

#[tokio::test]
async fn test_markdown_resume_sections() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();
    let sections = SectionMap::extract(&text);

    assert_eq!(sections.found_count(), 6);
}

#[tokio::test]
async fn test_resume_against_job_file() {
    let manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let result = engine.analyze(&resume, &job);
    let summary = result.match_result;

    assert!(summary.total > 0);
    assert_eq!(summary.matched + result.missing_keywords.len(), summary.total);
    assert_eq!(summary.score as usize, summary.matched * 100 / summary.total);

    assert!(result.job_keywords.contains("python"));
    assert!(!result.missing_keywords.contains(&"python".to_string()));
    assert!(!result.missing_keywords.contains(&"apache kafka".to_string()));
    assert!(result.missing_keywords.contains(&"terraform".to_string()));
}

#[tokio::test]
async fn test_report_rendering_end_to_end() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let analysis = engine.analyze(
        "Experienced Python developer, strong SQL skills",
        "Python developer with SQL skills",
    );
    let report = AnalysisReport::new(analysis, engine.matcher(), "resume.pdf", "inline text", 1);
    let generator = ReportGenerator::with_options(false, false, true, true, true);

    let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("Score: 100%"));
    assert!(console.contains("2 of 2 job keywords matched."));
    assert!(console.contains("None – great match!"));

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["analysis"]["match_result"]["total"], 2);
    assert_eq!(value["analysis"]["missing_keywords"].as_array().unwrap().len(), 0);
}
