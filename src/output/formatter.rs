//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::AnalysisReport;
use crate::processing::sections::NOT_FOUND;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Keyword Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .missing {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #ffc107;
        }
        details {
            margin: 10px 0;
            padding: 10px 15px;
            background: #f8f9fa;
            border-radius: 6px;
        }
        summary { font-weight: bold; color: #007acc; cursor: pointer; }
        details.not-found summary { color: #6c757d; }
        pre { white-space: pre-wrap; font-family: inherit; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Keyword Match</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Match Score: {{ score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        <p>{{ matched_sentence }}</p>
        <p><strong>Verdict:</strong> {{ verdict }}</p>

        <h2>Missing Keywords</h2>
        <div class="missing">
            {% if missing_keywords.is_empty() %}
            <p>{{ no_missing }}</p>
            {% else %}
            <ul>
                {% for keyword in missing_keywords %}
                <li>{{ keyword }}</li>
                {% endfor %}
            </ul>
            {% endif %}
        </div>

        <h2>Resume Sections</h2>
        {% for section in sections %}
        <details{% if !section.found %} class="not-found"{% endif %}>
            <summary>{{ section.title }}</summary>
            <pre>{{ section.content }}</pre>
        </details>
        {% endfor %}

        <div class="metadata">
            <p><strong>Generated by Resume Analyzer v{{ version }}</strong></p>
            <p><strong>Similarity:</strong> {{ algorithm }} &gt; {{ threshold }}</p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    score: u8,
    score_class: &'static str,
    score_label: &'static str,
    matched_sentence: String,
    verdict: String,
    missing_keywords: Vec<String>,
    no_missing: &'static str,
    sections: Vec<HtmlSection>,
    version: String,
    algorithm: String,
    threshold: f64,
    resume_file: String,
    job_source: String,
}

struct HtmlSection {
    title: String,
    content: String,
    found: bool,
}

fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "EXCELLENT",
        75..=89 => "GOOD",
        50..=74 => "FAIR",
        _ => "POOR",
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn generated_at(report: &AnalysisReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let label = score_label(score);
        let color = match score {
            90..=100 => Color::Green,
            75..=89 => Color::BrightGreen,
            50..=74 => Color::Yellow,
            _ => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME KEYWORD MATCH", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            generated_at(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Match Score", 2));
        output.push_str(&format!(
            "Score: {}% {}\n",
            report.score(),
            self.format_score_badge(report.score())
        ));
        output.push_str(&format!("{}\n", report.matched_sentence()));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Missing Keywords", 2));
        if analysis.missing_keywords.is_empty() {
            output.push_str(&format!("{}\n", self.colorize(&report.missing_line(), Color::Green)));
        } else {
            output.push_str(&format!("{}\n", self.colorize(&report.missing_line(), Color::Yellow)));
        }

        output.push_str(&self.format_header("Resume Sections", 2));
        for (section, content) in analysis.sections.iter() {
            output.push_str(&self.format_header(&section.to_string(), 3));
            let color = if content == NOT_FOUND {
                Color::BrightBlack
            } else {
                Color::White
            };
            for line in content.lines() {
                output.push_str(&format!("  {}\n", self.colorize(line, color)));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Keyword Details", 2));
            output.push_str(&format!(
                "Resume keywords ({}): {}\n",
                analysis.resume_keywords.len(),
                analysis.resume_keywords.iter().collect::<Vec<_>>().join(", ")
            ));
            output.push_str(&format!(
                "Job keywords ({}): {}\n",
                analysis.job_keywords.len(),
                analysis.job_keywords.iter().collect::<Vec<_>>().join(", ")
            ));

            if !analysis.keyword_matches.is_empty() {
                output.push_str(&self.format_header("Matched Keywords", 3));
                for keyword_match in &analysis.keyword_matches {
                    output.push_str(&format!(
                        "  • {} ← {} {}\n",
                        self.colorize(&keyword_match.job_keyword, Color::Green),
                        keyword_match.resume_keyword,
                        self.colorize(&format!("({:.2})", keyword_match.similarity), Color::BrightBlack)
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\nResume Analyzer v{} | {} > {}\n",
            report.metadata.analyzer_version,
            report.metadata.similarity_algorithm,
            report.metadata.similarity_threshold
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# Resume Keyword Match\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                generated_at(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                display_name(&report.metadata.resume_file),
                report.metadata.job_source
            ));
        }

        output.push_str(&format!(
            "## Match Score: {}% ({})\n\n",
            report.score(),
            score_label(report.score())
        ));
        output.push_str(&format!("{}\n\n", report.matched_sentence()));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));

        output.push_str("## Missing Keywords\n\n");
        if analysis.missing_keywords.is_empty() {
            output.push_str(&format!("{}\n\n", report.missing_line()));
        } else {
            for keyword in &analysis.missing_keywords {
                output.push_str(&format!("- {}\n", keyword));
            }
            output.push('\n');
        }

        output.push_str("## Resume Sections\n\n");
        for (section, content) in analysis.sections.iter() {
            output.push_str(&format!("### {}\n\n", section));
            output.push_str(&format!("```text\n{}\n```\n\n", content));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Analyzer v{} | {} > {}*\n",
                report.metadata.analyzer_version,
                report.metadata.similarity_algorithm,
                report.metadata.similarity_threshold
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let score = report.score();
        let score_class = match score {
            90..=100 => "score-excellent",
            75..=89 => "score-good",
            50..=74 => "score-fair",
            _ => "score-poor",
        };

        let sections = report
            .analysis
            .sections
            .iter()
            .map(|(section, content)| HtmlSection {
                title: section.to_string(),
                content: content.to_string(),
                found: content != NOT_FOUND,
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: generated_at(report),
            processing_time: report.metadata.processing_time_ms,
            score,
            score_class,
            score_label: score_label(score),
            matched_sentence: report.matched_sentence(),
            verdict: report.verdict.clone(),
            missing_keywords: report.analysis.missing_keywords.clone(),
            no_missing: crate::output::report::NO_MISSING_KEYWORDS,
            sections,
            version: report.metadata.analyzer_version.clone(),
            algorithm: report.metadata.similarity_algorithm.to_string(),
            threshold: report.metadata.similarity_threshold,
            resume_file: display_name(&report.metadata.resume_file),
            job_source: report.metadata.job_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
                Box::new(HtmlFormatter::new(include_html_styles)),
            ],
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        self.formatters
            .iter()
            .find(|formatter| formatter.supports_format() == *format)
            .ok_or_else(|| ResumeAnalyzerError::OutputFormatting(format!("No formatter for {:?}", format)))?
            .format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
