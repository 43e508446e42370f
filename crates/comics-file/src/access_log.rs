//! Flat-file request log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::Value;

use comics_core::Timestamp;

/// One logged request.
#[derive(Debug, Clone)]
pub struct AccessEntry {
    /// HTTP method, upper case.
    pub method: String,
    /// Path and query string as received.
    pub url: String,
    /// Query parameters as a JSON object.
    pub query: Value,
    /// Request body as JSON, `{}` when there is none.
    pub body: Value,
    /// Remote address, `-` when unknown.
    pub client_ip: String,
}

impl AccessEntry {
    /// Format as `timestamp [METHOD url query body] [clientIP]`.
    pub fn line(&self, at: &Timestamp) -> String {
        format!(
            "{} [{} {} {} {}] [{}]",
            at, self.method, self.url, self.query, self.body, self.client_ip
        )
    }
}

/// Append-only access log.
#[derive(Debug, Clone)]
pub struct AccessLog {
    path: PathBuf,
}

impl AccessLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for `entry`, stamped with the current time.
    ///
    /// The file is locked exclusively while the line is written.
    pub fn append(&self, entry: &AccessEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        let result = writeln!(file, "{}", entry.line(&Timestamp::now()));
        file.unlock()?;

        result
    }
}
