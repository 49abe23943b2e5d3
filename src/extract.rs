use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::TitleBlockRegion;
use crate::pdf;

pub const OBSOLETE_LABEL: &str = "obsolete";
pub const NO_REVISION_LABEL: &str = "no rev #";

/// Compiled patterns for part-number and revision extraction.
pub struct PatternSet {
    ten_digits: Regex,
    nine_digits: Regex,
    revision: Regex,
    filename_revision: Regex,
}

impl PatternSet {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ten_digits: Regex::new(r"\d{10}").context("failed to compile part number regex")?,
            nine_digits: Regex::new(r"\d{9}")
                .context("failed to compile short part number regex")?,
            revision: Regex::new(r"(?i)[A-Z]?\.\d{2}")
                .context("failed to compile revision regex")?,
            filename_revision: Regex::new(r"(?i)[A-Z]?\.\d{2}\.")
                .context("failed to compile filename revision regex")?,
        })
    }

    /// Part-number cascade: 10-digit run, else 9-digit run, else the filename
    /// verbatim. Every input yields some key.
    pub fn part_number(&self, filename: &str) -> String {
        if let Some(m) = self.ten_digits.find(filename) {
            return m.as_str().to_string();
        }
        if let Some(m) = self.nine_digits.find(filename) {
            return m.as_str().to_string();
        }
        filename.to_string()
    }

    /// Last revision-shaped match in the title-block text, if any.
    pub fn revision_in_title_block(&self, text: &str) -> Option<String> {
        self.revision
            .find_iter(text)
            .last()
            .map(|m| m.as_str().to_string())
    }

    /// First revision-shaped match in the filename. The filename form carries
    /// a trailing dot (e.g. `A.02.pdf`), which is stripped from the label.
    pub fn revision_in_filename(&self, filename: &str) -> Option<String> {
        self.filename_revision.find(filename).map(|m| {
            let matched = m.as_str();
            matched[..matched.len() - 1].to_string()
        })
    }
}

pub fn obsolete_in_filename(filename: &str) -> Option<&'static str> {
    filename
        .to_lowercase()
        .contains(OBSOLETE_LABEL)
        .then_some(OBSOLETE_LABEL)
}

pub fn obsolete_in_annotations(annotations: &[String]) -> Option<&'static str> {
    annotations
        .iter()
        .filter(|text| !text.trim().is_empty())
        .any(|text| text.to_lowercase().contains(OBSOLETE_LABEL))
        .then_some(OBSOLETE_LABEL)
}

/// Ordered revision cascade. Steps needing PDF content run only when the
/// earlier steps produce nothing; a PDF that fails to open aborts the run.
pub fn revision_label(
    patterns: &PatternSet,
    path: &Path,
    filename: &str,
    region: &TitleBlockRegion,
) -> Result<String> {
    if let Some(label) = obsolete_in_filename(filename) {
        return Ok(label.to_string());
    }

    let annotations = pdf::annotation_texts(path)?;
    if let Some(label) = obsolete_in_annotations(&annotations) {
        return Ok(label.to_string());
    }

    let block_text = pdf::title_block_text(path, region)?;
    if let Some(label) = patterns.revision_in_title_block(&block_text) {
        return Ok(label);
    }

    if let Some(label) = patterns.revision_in_filename(filename) {
        return Ok(label);
    }

    Ok(NO_REVISION_LABEL.to_string())
}
