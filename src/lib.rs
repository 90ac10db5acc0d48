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

//! # Zitab Core Library
//!
//! Zitab models a tabular text document (rows of fields with an optional
//! header) in memory, and moves it to and from bytes either in one piece or
//! as a stream.
//!
//! ## Module Overview
//!
//! - **record**: row and record batch aliases
//! - **dialect**: delimiter, quoting, terminator and header settings
//! - **ingest**: chunked import parser and the input stream handler
//! - **export**: export parser and the output stream handler
//! - **sink**: observer trait the input stream handler pushes rows into
//! - **document**: the document itself, which is also a sink
//! - **errors**: `ZiError` and the `Result` alias
//!
//! ## Quick Start
//!
//! ```rust
//! use zitab::{ZiDialect, ZiDocument};
//!
//! let dialect = ZiDialect::csv();
//! let file = std::fs::File::open("people.csv")?;
//! let doc = ZiDocument::from_reader(file, dialect.clone())?;
//!
//! let mut out = Vec::new();
//! doc.write_to(&mut out, &dialect.with_delimiter(';'))?;
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, ZiError>`. The document only
//! raises `ZiError::AlreadyInitialized`; decoding, encoding and I/O errors
//! come from the parsers and stream handlers and are passed through as is.
//!
//! ## Logging
//!
//! Zitab logs through the `log` facade and never installs a logger.

pub mod dialect;
pub mod document;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod record;
pub mod sink;

pub use dialect::{ZiDialect, ZiQuoteStyle, ZiTerminator};
pub use document::ZiDocument;
pub use errors::{Result, ZiError};
pub use export::{ZiExportParser, ZiOutputStream, ZiWriteStats};
pub use ingest::{ProgressCallback, ProgressInfo, ZiImportParser, ZiInputStream, ZiReaderConfig};
pub use record::{row_from, ZiRecords, ZiRow};
pub use sink::ZiStreamSink;
