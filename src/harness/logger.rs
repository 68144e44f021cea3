//! Durable result artifacts
//!
//! Every scenario run, skips included, leaves one pretty-printed JSON file
//! behind. Filenames carry the run timestamp and the action slug; an
//! existing file is never overwritten, a colliding name gets a numeric
//! suffix instead.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::{slugify, Error, Result};

use super::outcome::ExecutionRecord;

pub struct ResultLogger {
    dir: PathBuf,
}

impl ResultLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `record` as a new artifact and return its path
    pub fn record(&self, record: &ExecutionRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::artifact_write(&self.dir.display().to_string(), &e.to_string()))?;

        let stamp = record.timestamp.format("%Y%m%dT%H%M%S%6f");
        let slug = slugify(&record.action);
        let body = serde_json::to_vec_pretty(record)?;

        let mut path = self.dir.join(format!("{stamp}_{slug}.log.json"));
        let mut attempt = 1;
        loop {
            match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&body).map_err(|e| {
                        Error::artifact_write(&path.display().to_string(), &e.to_string())
                    })?;
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    path = self.dir.join(format!("{stamp}_{slug}.{attempt}.log.json"));
                    attempt += 1;
                }
                Err(e) => {
                    return Err(Error::artifact_write(
                        &path.display().to_string(),
                        &e.to_string(),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::outcome::{ActionOutcome, FailureKind, FailureRecord, Verdict};
    use chrono::TimeZone;
    use serde_json::Value;

    fn fixed_record(action: &str) -> ExecutionRecord {
        let mut record = ExecutionRecord::skipped(action, "not runnable here");
        record.timestamp = chrono::Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        record
    }

    #[test]
    fn test_artifact_name_carries_stamp_and_slug() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ResultLogger::new(dir.path());

        let path = logger.record(&fixed_record("list folder")).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "20250102T030405000000_list-folder.log.json"
        );

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["action"], "list folder");
        assert_eq!(value["verdict"], "skip");
    }

    #[test]
    fn test_collisions_get_numeric_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ResultLogger::new(dir.path());
        let record = fixed_record("list folder");

        let first = logger.record(&record).unwrap();
        let second = logger.record(&record).unwrap();
        let third = logger.record(&record).unwrap();

        assert_ne!(first, second);
        assert!(second.file_name().unwrap().to_string_lossy().ends_with(".1.log.json"));
        assert!(third.file_name().unwrap().to_string_lossy().ends_with(".2.log.json"));
        assert!(first.exists() && second.exists() && third.exists());
    }

    #[test]
    fn test_failure_records_are_written_whole() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ResultLogger::new(dir.path());

        let mut record = fixed_record("read pdf file");
        record.verdict = Verdict::Fail;
        record.outcome = ActionOutcome::failed(
            FailureRecord::new(FailureKind::Exit, "action exited with status 1")
                .with_context("decode error: not a PDF"),
        );

        let path = logger.record(&record).unwrap();
        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["failure"]["kind"], "exit");
        assert_eq!(value["failure"]["context"], "decode error: not a PDF");
    }

    #[test]
    fn test_directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("actions");
        let logger = ResultLogger::new(&nested);

        let path = logger.record(&fixed_record("add number")).unwrap();
        assert!(path.starts_with(&nested));
    }
}
