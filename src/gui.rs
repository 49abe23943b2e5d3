use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

pub fn pick_root_folder() -> Option<PathBuf> {
    FileDialog::new().set_title("Select Folder").pick_folder()
}

/// Blocking modal shown when the destination spreadsheet is open elsewhere.
pub fn show_locked_error(path: &Path) {
    MessageDialog::new()
        .set_title("File Open")
        .set_level(MessageLevel::Error)
        .set_buttons(MessageButtons::Ok)
        .set_description(format!(
            "The file '{}' is currently open. Please close it and try again.",
            path.display()
        ))
        .show();
}

/// Retry/cancel prompt after a locked save. Returns true when the user wants
/// another attempt.
pub fn confirm_retry(path: &Path) -> bool {
    let response = MessageDialog::new()
        .set_title("Retry")
        .set_buttons(MessageButtons::OkCancel)
        .set_description(format!(
            "Do you want to try saving the file '{}' again?",
            path.display()
        ))
        .show();

    matches!(response, MessageDialogResult::Ok)
}
