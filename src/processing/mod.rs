//! Text processing and analysis module

pub mod analyzer;
pub mod keywords;
pub mod lexicon;
pub mod matcher;
pub mod sections;
pub mod similarity;
