use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Result, bail};
use serde::Serialize;

/// One PDF discovered during the tree walk.
#[derive(Debug, Clone)]
pub struct ScannedPdf {
    pub path: PathBuf,
    pub filename: String,
    /// Root-relative folder path, slash-separated regardless of platform.
    pub folder: String,
    pub modified: SystemTime,
}

/// Rectangle on the first page where the title-block revision is printed,
/// in PDF point units with a top-left origin.
#[derive(Debug, Clone, Copy)]
pub struct TitleBlockRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TitleBlockRegion {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn validate(&self) -> Result<()> {
        if self.right <= self.left || self.bottom <= self.top {
            bail!(
                "invalid title-block region: left={} top={} right={} bottom={}",
                self.left,
                self.top,
                self.right,
                self.bottom
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub root: String,
    pub pdf_count: usize,
    pub folder_count: usize,
    pub part_count: usize,
    pub output_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_dimensions_follow_default_coordinates() {
        let region = TitleBlockRegion {
            left: 1120,
            top: 772,
            right: 1163,
            bottom: 802,
        };
        assert_eq!(region.width(), 43);
        assert_eq!(region.height(), 30);
        assert!(region.validate().is_ok());
    }

    #[test]
    fn degenerate_region_is_rejected() {
        let region = TitleBlockRegion {
            left: 100,
            top: 50,
            right: 100,
            bottom: 60,
        };
        assert!(region.validate().is_err());
    }
}
