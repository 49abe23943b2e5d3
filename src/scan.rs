use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::model::ScannedPdf;

/// Result of walking the tree: report columns in first-encountered order,
/// plus every PDF found, in traversal order.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub columns: Vec<String>,
    pub pdfs: Vec<ScannedPdf>,
}

/// Walk every directory under `root`. Each directory except the root itself
/// that holds at least one PDF becomes a report column; PDFs directly under
/// the root are skipped entirely.
pub fn scan_tree(root: &Path) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_dir() || entry.path() == root {
            continue;
        }

        let pdf_paths = pdf_files_in(entry.path())?;
        if pdf_paths.is_empty() {
            continue;
        }

        let folder = relative_folder(root, entry.path())?;
        outcome.columns.push(folder.clone());

        for path in pdf_paths {
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(ToOwned::to_owned)
                .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .with_context(|| format!("failed to read mtime: {}", path.display()))?;

            outcome.pdfs.push(ScannedPdf {
                path,
                filename,
                folder: folder.clone(),
                modified,
            });
        }
    }

    Ok(outcome)
}

fn pdf_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    Ok(pdfs)
}

fn relative_folder(root: &Path, dir: &Path) -> Result<String> {
    let relative = dir
        .strip_prefix(root)
        .with_context(|| format!("directory escapes root: {}", dir.display()))?;

    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();

    Ok(parts.join("/"))
}
