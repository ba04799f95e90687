//! Timestamped run directory and the append-only run log.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::error::AppError;

/// `<name>[_masked]_<Y>_<M>_<D>_<H><M><S>`; fields are not zero padded.
pub fn run_dir_name(name: &str, masked: bool, at: NaiveDateTime) -> String {
    format!(
        "{name}{}_{}_{}_{}_{}{}{}",
        if masked { "_masked" } else { "" },
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Append-only log receiving one block per completed stage.
#[derive(Debug)]
pub struct ReportSink {
    path: PathBuf,
    file: File,
}

impl ReportSink {
    /// Create `<outdir>/<run dir>/<run dir>.txt`, stamped with the local time.
    pub fn create(outdir: &Path, name: &str, masked: bool) -> Result<Self, AppError> {
        let stem = run_dir_name(name, masked, Local::now().naive_local());
        Self::create_named(&outdir.join(&stem), &stem)
    }

    /// Create `<dir>/<stem>.txt`, creating `dir` if needed.
    pub fn create_named(dir: &Path, stem: &str) -> Result<Self, AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::new(4, format!("Failed to create output directory '{}': {e}", dir.display())))?;
        let path = dir.join(format!("{stem}.txt"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AppError::new(4, format!("Failed to open log '{}': {e}", path.display())))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Append `text` and flush so the log is current after every stage.
    pub fn append(&mut self, text: &str) -> Result<(), AppError> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| AppError::new(4, format!("Failed to write log '{}': {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn run_dir_name_is_unpadded() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap();
        assert_eq!(run_dir_name("mis_fs_2d_optlog", false, at), "mis_fs_2d_optlog_2024_3_7_952");
        assert_eq!(run_dir_name("run", true, at), "run_masked_2024_3_7_952");
    }

    #[test]
    fn sink_appends_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ReportSink::create(dir.path(), "run", true).unwrap();
        sink.append("first\n").unwrap();
        sink.append("second\n").unwrap();
        let text = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(text, "first\nsecond\n");

        let run_dir = sink.dir().unwrap();
        let stem = run_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(stem.starts_with("run_masked_"));
        assert_eq!(sink.path().file_name().unwrap().to_string_lossy(), format!("{stem}.txt"));
    }

    #[test]
    fn unwritable_location_is_exit_code_four() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = ReportSink::create_named(&blocker.join("sub"), "run").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
