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

//! # Data Export Module
//!
//! Turns rows back into bytes.
//!
//! ## Module Components
//!
//! - **Parser** ([parser.rs](parser/index.html)): stateless row encoder
//! - **Writer** ([writer.rs](writer/index.html)): `open`/`append`/`close`
//!   handler over an `io::Write`
//!
//! ## Usage Patterns
//!
//! ```rust
//! use zitab::export::ZiOutputStream;
//! use zitab::ZiDialect;
//!
//! let mut out = Vec::new();
//! let mut stream = ZiOutputStream::new(&mut out, &ZiDialect::csv())?;
//! stream.open(Some(&header))?;
//! stream.append(&records)?;
//! stream.close()?;
//! ```

pub mod parser;
pub mod writer;

pub use parser::ZiExportParser;
pub use writer::{ZiOutputStream, ZiWriteStats};
