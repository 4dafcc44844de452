//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use log::debug;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tokio::fs;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Parse `bytes` as a PDF and concatenate the text of every page in page order.
    ///
    /// `pdf_extract` panics on some malformed documents, so panics are
    /// converted into [`ResumeAnalyzerError::PdfExtraction`] like parse errors.
    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        let pages = match outcome {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                return Err(ResumeAnalyzerError::PdfExtraction(format!(
                    "Failed to parse PDF: {}",
                    e
                )))
            }
            Err(_) => {
                return Err(ResumeAnalyzerError::PdfExtraction(
                    "PDF parser panicked on a malformed document".to_string(),
                ))
            }
        };

        debug!("Extracted {} page(s) from PDF", pages.len());
        Ok(pages.concat())
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        Self::extract_from_bytes(&bytes).map_err(|e| match e {
            ResumeAnalyzerError::PdfExtraction(msg) => ResumeAnalyzerError::PdfExtraction(
                format!("'{}': {}", path.display(), msg),
            ),
            other => other,
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Render Markdown and strip it down to plain lines of text.
    pub fn markdown_to_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = html_output
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = HTML_TAG.replace_all(&text, "");
        // Ampersands last so that an escaped "&amp;lt;" stays literal
        let clean_text = clean_text.replace("&amp;", "&");

        clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
