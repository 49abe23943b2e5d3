use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::extract::{self, PatternSet};
use crate::gui;
use crate::model::RunManifest;
use crate::report::RevisionLog;
use crate::scan;
use crate::util;
use crate::xlsx::{self, SaveOutcome};

pub fn run(cli: Cli) -> Result<()> {
    let region = cli.title_block_region();
    region.validate()?;

    let root = match cli.root.clone() {
        Some(root) => root,
        None => match gui::pick_root_folder() {
            Some(root) => root,
            None => {
                info!("no folder selected");
                return Ok(());
            }
        },
    };

    if !root.is_dir() {
        bail!("not a directory: {}", root.display());
    }

    let patterns = PatternSet::new()?;

    info!(root = %root.display(), "scanning folder tree");
    let outcome = scan::scan_tree(&root)?;
    if outcome.pdfs.is_empty() {
        warn!(root = %root.display(), "no PDFs found under root");
    }
    info!(
        pdf_count = outcome.pdfs.len(),
        folder_count = outcome.columns.len(),
        "scan complete"
    );

    let mut log = RevisionLog::with_columns(outcome.columns);
    for pdf in &outcome.pdfs {
        let part = patterns.part_number(&pdf.filename);
        let label = extract::revision_label(&patterns, &pdf.path, &pdf.filename, &region)?;
        debug!(
            file = %pdf.path.display(),
            folder = %pdf.folder,
            part = %part,
            revision = %label,
            "indexed PDF"
        );
        log.record(part, pdf.folder.clone(), label, pdf.modified);
    }

    if cli.dry_run {
        info!(
            pdf_count = outcome.pdfs.len(),
            folder_count = log.columns.len(),
            part_count = log.parts.len(),
            "dry-run complete"
        );
        return Ok(());
    }

    let table = log.to_table();
    let output_path = root.join(&cli.output_name);

    loop {
        match xlsx::save_report(&table, &output_path)? {
            SaveOutcome::Saved => break,
            SaveOutcome::DestinationLocked => {
                gui::show_locked_error(&output_path);
                if !gui::confirm_retry(&output_path) {
                    info!(path = %output_path.display(), "save cancelled");
                    return Ok(());
                }
            }
        }
    }

    info!(path = %output_path.display(), "PDF log saved");

    if let Some(manifest_path) = &cli.manifest_path {
        let manifest = RunManifest {
            manifest_version: 1,
            generated_at: util::now_utc_string(),
            root: root.display().to_string(),
            pdf_count: outcome.pdfs.len(),
            folder_count: log.columns.len(),
            part_count: log.parts.len(),
            output_path: output_path.display().to_string(),
        };
        util::write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote run manifest");
    }

    if !cli.no_open {
        if let Err(err) = util::launch_file(&output_path) {
            warn!(error = %err, "failed to open spreadsheet");
        }
    }

    Ok(())
}
