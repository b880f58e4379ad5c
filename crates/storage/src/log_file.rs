// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-lines log sink with a bounded tail

use pcr_core::{LogEntry, LogSink, SinkError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Lines kept by [`LogFileSink::open`] before older ones are dropped
pub const DEFAULT_MAX_LINES: usize = 500;

/// Appends each entry as one JSON line.
///
/// Once the file holds more than `max_lines` lines it is rewritten with only
/// the newest `max_lines`.
pub struct LogFileSink {
    path: PathBuf,
    max_lines: usize,
    lines: Mutex<usize>,
}

impl LogFileSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        Self::with_max_lines(path, DEFAULT_MAX_LINES)
    }

    pub fn with_max_lines(path: impl Into<PathBuf>, max_lines: usize) -> Result<Self, SinkError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;

        // Count existing lines so the bound holds across restarts
        let lines = BufReader::new(File::open(&path)?).lines().count();

        Ok(Self {
            path,
            max_lines: max_lines.max(1),
            lines: Mutex::new(lines),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn compact(&self) -> Result<usize, SinkError> {
        let content = fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
        let keep = &lines[lines.len().saturating_sub(self.max_lines)..];

        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp = self.path.with_file_name(temp_name);

        let mut out = String::with_capacity(content.len());
        for line in keep {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(&temp, out)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            dropped = lines.len() - keep.len(),
            "compacted log file"
        );
        Ok(keep.len())
    }
}

impl LogSink for LogFileSink {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let line = serde_json::to_string(entry)?;
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        *lines += 1;

        if *lines > self.max_lines {
            *lines = self.compact()?;
        }
        Ok(())
    }
}

/// Read every entry from a JSON-lines log file; a missing file is empty
pub fn read_entries(path: &Path) -> Result<Vec<LogEntry>, SinkError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(&line)?);
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "log_file_tests.rs"]
mod tests;
