use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

use crate::report::ReportTable;

const SHEET_NAME: &str = "PDF Log";
const HIGHLIGHT_COLOR: Color = Color::RGB(0xFFFF00);

#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The destination exists and is held open elsewhere; the caller decides
    /// whether to retry.
    DestinationLocked,
}

/// Serialize the table to `path`, overwriting. A locked destination is
/// reported as an outcome rather than an error so the retry dialog can run.
pub fn save_report(table: &ReportTable, path: &Path) -> Result<SaveOutcome> {
    if destination_locked(path) {
        return Ok(SaveOutcome::DestinationLocked);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }

    let highlight = Format::new().set_background_color(HIGHLIGHT_COLOR);

    for (idx, row) in table.rows.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        sheet.write_string(excel_row, 0, &row.part_number)?;

        for (col, cell) in row.cells.iter().enumerate() {
            let excel_col = (col + 1) as u16;
            if cell.highlighted {
                sheet.write_string_with_format(excel_row, excel_col, &cell.value, &highlight)?;
            } else if !cell.value.is_empty() {
                sheet.write_string(excel_row, excel_col, &cell.value)?;
            }
        }
    }

    match workbook.save(path) {
        Ok(()) => Ok(SaveOutcome::Saved),
        // The probe can race with the spreadsheet application grabbing the
        // file, so a permission error from the save itself is still the
        // recoverable locked case.
        Err(err) if save_error_is_lock(&err) => Ok(SaveOutcome::DestinationLocked),
        Err(err) => {
            Err(err).with_context(|| format!("failed to save spreadsheet: {}", path.display()))
        }
    }
}

fn save_error_is_lock(err: &XlsxError) -> bool {
    matches!(err, XlsxError::IoError(io_err) if io_err.kind() == ErrorKind::PermissionDenied)
}

/// Probe-open the destination for writing. A spreadsheet application holding
/// the file surfaces as PermissionDenied; a missing file is simply unlocked,
/// and any other error is left for the actual save to report.
fn destination_locked(path: &Path) -> bool {
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => false,
        Err(err) => err.kind() == ErrorKind::PermissionDenied,
    }
}
