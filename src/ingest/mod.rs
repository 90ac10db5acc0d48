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

//! # Data Ingestion Module
//!
//! Turns bytes into rows.
//!
//! ## Module Components
//!
//! - **Parser** ([parser.rs](parser/index.html)): chunked decoder with a
//!   pending trailing row
//! - **Reader** ([reader.rs](reader/index.html)): pulls an `io::Read` through
//!   the parser and pushes rows into a [`ZiStreamSink`](crate::sink::ZiStreamSink)
//!
//! ## Usage Patterns
//!
//! ### Decoding a Buffer
//!
//! ```rust
//! use zitab::ingest::ZiImportParser;
//! use zitab::ZiDialect;
//!
//! let mut parser = ZiImportParser::new(&ZiDialect::default())?;
//! let mut rows = parser.decode(b"a,b\n1,2")?;
//! rows.extend(parser.flush_pending_row()?);
//! assert_eq!(rows.len(), 2);
//! ```
//!
//! ### Streaming Into a Sink
//!
//! ```rust
//! use zitab::ingest::{ZiInputStream, ZiReaderConfig};
//!
//! let mut stream = ZiInputStream::new(file, ZiDialect::csv())?
//!     .with_config(ZiReaderConfig { batch_size: 500, ..Default::default() });
//! stream.register_sink(&mut my_sink);
//! stream.consume_until_end_of_stream()?;
//! ```

pub mod parser;
pub mod reader;

pub use parser::ZiImportParser;
pub use reader::{ProgressCallback, ProgressInfo, ZiInputStream, ZiReaderConfig};
