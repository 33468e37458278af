/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Trial log
//!
//! The generators keep a human-readable, append-only record of every
//! trial: the chosen action, the outcome, and the reason for a rejection.
//! Lines are flushed as they are written so the log survives an aborted
//! run. Messages are mirrored to the `log` facade.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::errors::Result;

/// Append-only trial log, optionally backed by a file
pub struct TrialLog {
    file: Option<std::fs::File>,
}

impl TrialLog {
    /// Opens a trial log; `None` logs to the `log` facade only
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(crate::io::IoError::from)?,
            ),
            None => None,
        };
        Ok(Self { file })
    }

    /// Appends one line to the log
    pub fn write(&mut self, message: &str) {
        log::debug!("{}", message);
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.log");
        {
            let mut log = TrialLog::open(Some(&path)).unwrap();
            log.write("Action: add");
            log.write("Not enough space to add CO to any site. Addition failed!");
        }
        {
            let mut log = TrialLog::open(Some(&path)).unwrap();
            log.write("Action: remove");
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("Addition failed"));
    }

    #[test]
    fn test_log_without_file() {
        let mut log = TrialLog::open(None).unwrap();
        log.write("no backing file");
    }
}
