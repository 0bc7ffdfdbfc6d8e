// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Errors of the I/O facing layer. Extraction and comparison themselves never fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ClassDiffError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

impl ClassDiffError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn write(path: impl Into<String>, source: io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }

    /// Process exit code the CLI uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ClassDiffError, ConfigError};

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(ClassDiffError::Usage("nope".to_owned()).exit_code(), 2);
        let err: ClassDiffError = ConfigError::MissingFile(PathBuf::from("x.toml")).into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = ClassDiffError::io(
            "ref.mmd",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Failed to read ref.mmd: gone");
    }

    #[test]
    fn write_errors_are_not_reported_as_reads() {
        let err = ClassDiffError::write(
            "<stdout>",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert_eq!(err.to_string(), "Failed to write <stdout>: pipe closed");
        assert_eq!(err.exit_code(), 1);
    }
}
