//! Heuristic resume section extraction

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value stored for a section whose pattern did not match.
pub const NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Objective,
    Skills,
    Experience,
    Education,
    Certifications,
    Competencies,
}

impl SectionType {
    /// All sections, in the order they are expected to appear in a resume.
    pub const ALL: [SectionType; 6] = [
        SectionType::Objective,
        SectionType::Skills,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Certifications,
        SectionType::Competencies,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            SectionType::Objective => &*OBJECTIVE,
            SectionType::Skills => &*SKILLS,
            SectionType::Experience => &*EXPERIENCE,
            SectionType::Education => &*EDUCATION,
            SectionType::Certifications => &*CERTIFICATIONS,
            SectionType::Competencies => &*COMPETENCIES,
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Objective => write!(f, "Objective"),
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Certifications => write!(f, "Certifications"),
            SectionType::Competencies => write!(f, "Competencies"),
        }
    }
}

// Each pattern runs on its own against the full text: heading order is assumed, never checked.
static OBJECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(Objective.*?)Skills").expect("Invalid objective regex"));
static SKILLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(Skills.*?)Professional Experience").expect("Invalid skills regex")
});
static EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(Professional Experience.*?)Education").expect("Invalid experience regex")
});
static EDUCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(Education.*?)Certifications").expect("Invalid education regex")
});
static CERTIFICATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(Certifications.*?)CORE COMPETENCIES").expect("Invalid certifications regex")
});
static COMPETENCIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(CORE COMPETENCIES.*?)\z").expect("Invalid competencies regex")
});

/// The six resume sections, each holding trimmed content or [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap {
    sections: BTreeMap<SectionType, String>,
}

impl SectionMap {
    /// Apply every section pattern to `text` independently.
    pub fn extract(text: &str) -> Self {
        let sections = SectionType::ALL
            .iter()
            .map(|&section| {
                let content = section
                    .pattern()
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| NOT_FOUND.to_string());
                (section, content)
            })
            .collect();

        Self { sections }
    }

    pub fn get(&self, section: SectionType) -> &str {
        self.sections
            .get(&section)
            .map(String::as_str)
            .unwrap_or(NOT_FOUND)
    }

    pub fn is_found(&self, section: SectionType) -> bool {
        self.get(section) != NOT_FOUND
    }

    pub fn found_count(&self) -> usize {
        SectionType::ALL
            .iter()
            .filter(|&&section| self.is_found(section))
            .count()
    }

    /// Iterate in resume order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionType, &str)> + '_ {
        self.sections
            .iter()
            .map(|(section, content)| (*section, content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
