// Prediction log
// Append-only text file, one `<timestamp> - <LEVEL> - <message>` line per entry

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

pub struct PredictionLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl PredictionLog {
    /// Open (or create) the log for appending
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open prediction log: {}", path.display()))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: &str) -> io::Result<()> {
        self.append(Level::INFO, message)
    }

    pub fn error(&self, message: &str) -> io::Result<()> {
        self.append(Level::ERROR, message)
    }

    fn append(&self, level: Level, message: &str) -> io::Result<()> {
        // Built up front so the whole line goes out in one write
        let line = format!(
            "{} - {} - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level,
            message.replace('\n', " ")
        );

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lines_have_timestamp_level_message() {
        let dir = TempDir::new().unwrap();
        let log = PredictionLog::open(dir.path().join("prediction.log")).unwrap();

        log.info("Prediction: 151.5, Features: [0.1]").unwrap();
        log.error("Error during prediction: bad input").unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parts: Vec<&str> = lines[0].splitn(3, " - ").collect();
        assert_eq!(parts.len(), 3);
        // e.g. 2024-05-01 12:00:00,123
        assert_eq!(parts[0].len(), 23);
        assert_eq!(&parts[0][19..20], ",");
        assert_eq!(parts[1], "INFO");
        assert_eq!(parts[2], "Prediction: 151.5, Features: [0.1]");

        assert!(lines[1].contains(" - ERROR - Error during prediction: bad input"));
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prediction.log");

        PredictionLog::open(&path).unwrap().info("first").unwrap();
        PredictionLog::open(&path).unwrap().info("second").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let dir = TempDir::new().unwrap();
        let log = PredictionLog::open(dir.path().join("prediction.log")).unwrap();

        log.error("line one\nline two").unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        assert!(PredictionLog::open("/nonexistent/dir/prediction.log").is_err());
    }
}
