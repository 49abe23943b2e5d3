use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }

    let mut data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;
    data.push(b'\n');

    fs::write(path, data).with_context(|| format!("failed to write json file: {}", path.display()))
}

/// Hand the saved spreadsheet to the platform's default application.
/// Windows is the primary target; elsewhere xdg-open is a best effort.
pub fn launch_file(path: &Path) -> Result<()> {
    #[cfg(windows)]
    let mut command = {
        let mut command = Command::new("cmd");
        command.arg("/C").arg("start").arg("").arg(path);
        command
    };

    #[cfg(not(windows))]
    let mut command = {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };

    let status = command
        .status()
        .with_context(|| format!("failed to launch {}", path.display()))?;

    if !status.success() {
        bail!("opener exited with {} for {}", status, path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tempfile::TempDir;

    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: usize,
    }

    #[test]
    fn json_files_are_pretty_printed_with_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("manifest.json");

        write_json_pretty(&path, &Sample { name: "x", count: 3 }).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        assert!(raw.contains("\"count\": 3"));
    }

    #[test]
    fn utc_timestamp_is_rfc3339() {
        let stamp = now_utc_string();
        assert!(stamp.ends_with('Z'));
        assert!(stamp.contains('T'));
    }
}
