use std::path::PathBuf;

use clap::Parser;

use crate::model::TitleBlockRegion;

#[derive(Parser, Debug)]
#[command(
    name = "pdflog",
    version,
    about = "Cross-reference PDF drawing revisions across a folder tree"
)]
pub struct Cli {
    /// Root folder to scan; a native folder picker opens when omitted
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Name of the spreadsheet written under the root folder
    #[arg(long, default_value = "PDF_Log.xlsx")]
    pub output_name: String,

    /// Left edge of the title-block revision region, in PDF points
    #[arg(long, default_value_t = 1120)]
    pub title_block_left: u32,

    /// Top edge of the title-block revision region, in PDF points
    #[arg(long, default_value_t = 772)]
    pub title_block_top: u32,

    /// Right edge of the title-block revision region, in PDF points
    #[arg(long, default_value_t = 1163)]
    pub title_block_right: u32,

    /// Bottom edge of the title-block revision region, in PDF points
    #[arg(long, default_value_t = 802)]
    pub title_block_bottom: u32,

    /// Write a JSON run manifest to this path after a successful save
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Scan and aggregate, then report counts without writing the spreadsheet
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Do not launch the spreadsheet after saving
    #[arg(long, default_value_t = false)]
    pub no_open: bool,
}

impl Cli {
    pub fn title_block_region(&self) -> TitleBlockRegion {
        TitleBlockRegion {
            left: self.title_block_left,
            top: self.title_block_top,
            right: self.title_block_right,
            bottom: self.title_block_bottom,
        }
    }
}
