//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitab.
//! The Zitab project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Zitab Error Module
//!
//! This module defines the error type shared by every Zitab component.
//!
//! ## Error Categories
//!
//! - **AlreadyInitialized**: streaming ingestion attempted on a document that
//!   already holds a header or records
//! - **Decoding**: bytes that cannot be turned into rows under the dialect
//! - **Encoding**: rows that cannot be written under the dialect
//! - **Io**: read/write failures from the underlying byte stream
//! - **Validation**: invalid dialect settings or misuse of a stream handler
//! - **Serde**: dialect/config documents that fail to deserialize
//!
//! Only `AlreadyInitialized` is raised by the document itself. Everything
//! else comes from the parsers and stream handlers and reaches the caller
//! unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use zitab::errors::{Result, ZiError};
//!
//! fn first_field(row: &[String]) -> Result<&str> {
//!     row.first()
//!         .map(String::as_str)
//!         .ok_or_else(|| ZiError::validation("row has no fields"))
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zitab.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zitab.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZiError {
    /// The document already has a header or records and cannot be opened
    /// as a streaming sink again.
    #[error("document already initialized: streaming ingestion requires an empty document")]
    AlreadyInitialized,

    /// Malformed bytes relative to the dialect.
    #[error(
        "decoding error{}: {message}",
        .line.map(|line| format!(" at line {line}")).unwrap_or_default()
    )]
    Decoding { message: String, line: Option<u64> },

    /// A row that the dialect cannot express.
    #[error("encoding error: {message}")]
    Encoding { message: String },

    /// Errors originating from the byte stream.
    #[error("io error: {0}")]
    Io(String),

    /// Invalid parameters or out-of-order handler calls.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Wrapper for serde-style deserialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct decoding errors.
    pub fn decoding(message: impl Into<String>, line: Option<u64>) -> Self {
        ZiError::Decoding {
            message: message.into(),
            line,
        }
    }

    /// Helper to construct encoding errors.
    pub fn encoding<T: Into<String>>(message: T) -> Self {
        ZiError::Encoding {
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Maps a `csv` read error, keeping I/O failures apart from malformed input.
    pub(crate) fn from_csv_read(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => ZiError::from(io_err),
            kind => ZiError::decoding(csv_kind_message(&kind), line),
        }
    }

    /// Maps a `csv` write error, keeping I/O failures apart from unwritable rows.
    pub(crate) fn from_csv_write(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => ZiError::from(io_err),
            kind => ZiError::encoding(csv_kind_message(&kind)),
        }
    }
}

fn csv_kind_message(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!(
            "invalid UTF-8 in field {} after byte {}",
            err.field(),
            err.valid_up_to()
        ),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("row has {len} fields, expected {expected_len}"),
        other => format!("{other:?}"),
    }
}
