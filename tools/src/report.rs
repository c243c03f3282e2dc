//! Run log and screenshot files of the automation suite

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp used in file names, e.g. `20240131_142501`
pub fn file_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Appends timestamped lines to `logs/e2e_<timestamp>.txt` and echoes them.
pub struct TestLog {
    file: File,
    path: PathBuf,
}

impl TestLog {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join(format!("e2e_{}.txt", file_timestamp()));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&mut self, message: &str) {
        println!("{}", message);
        if let Err(e) = writeln!(self.file, "{}", stamped(Local::now(), message)) {
            log::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}

/// `[YYYY-mm-dd HH:MM:SS] message`
pub fn stamped<Tz: TimeZone>(at: DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {}", at.format("%Y-%m-%d %H:%M:%S"), message)
}

pub fn passed_line(number: u32) -> String {
    format!("Test case {:02}: PASSED", number)
}

pub fn failed_line(number: u32, reason: &str) -> String {
    format!("Test case {:02}: FAILED! {}", number, reason)
}

/// Where a case's screenshot goes: `NN_<case>_<timestamp>.png`
pub fn screenshot_path(dir: &Path, number: u32, case: &str) -> PathBuf {
    dir.join(format!("{:02}_{}_{}.png", number, case, file_timestamp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn log_lines_are_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let mut log = TestLog::create(&logs).unwrap();
        log.line(&passed_line(3));
        log.line(&failed_line(12, "checkbox0 is not checked"));
        drop(log);

        let entries: Vec<_> = fs::read_dir(&logs).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("e2e_") && name.ends_with(".txt"));

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Test case 03: PASSED"));
        assert!(lines[1].ends_with("] Test case 12: FAILED! checkbox0 is not checked"));
    }

    #[test]
    fn stamp_is_bracketed_date_and_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 14, 25, 1).unwrap();
        assert_eq!(
            stamped(at, "Test case 01: PASSED"),
            "[2024-01-31 14:25:01] Test case 01: PASSED"
        );
    }

    #[test]
    fn screenshot_names_are_numbered() {
        let path = screenshot_path(Path::new("screenshots"), 7, "placeholder");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("07_placeholder_"));
        assert!(name.ends_with(".png"));
        assert!(path.starts_with("screenshots"));
    }
}
