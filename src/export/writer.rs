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

//! # Data Writer Module
//!
//! This module provides stream-based writing of a header and record batches
//! to any [`Write`] destination.

use std::io::Write;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::dialect::ZiDialect;
use crate::errors::{Result, ZiError};
use crate::export::parser::ZiExportParser;
use crate::record::ZiRow;

/// Statistics about write operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiWriteStats {
    /// Whether a header row was written.
    pub header_written: bool,
    /// Total number of records written, header excluded.
    pub records_written: usize,
    /// Total number of bytes handed to the destination.
    pub bytes_written: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZiOutputState {
    Idle,
    Open,
    Closed,
}

/// Writes a header and record batches to a destination.
///
/// Lifecycle is `open` → `append`* → `close`. `close` may be called at any
/// point, including after a failed `append`, and more than once.
#[derive(Debug)]
pub struct ZiOutputStream<W: Write> {
    writer: W,
    parser: ZiExportParser,
    state: ZiOutputState,
    stats: ZiWriteStats,
    expected_len: Option<usize>,
}

impl<W: Write> ZiOutputStream<W> {
    pub fn new(writer: W, dialect: &ZiDialect) -> Result<Self> {
        Ok(Self {
            writer,
            parser: ZiExportParser::new(dialect)?,
            state: ZiOutputState::Idle,
            stats: ZiWriteStats::default(),
            expected_len: None,
        })
    }

    /// Starts the output, writing `header` first when present.
    pub fn open(&mut self, header: Option<&ZiRow>) -> Result<()> {
        if self.state != ZiOutputState::Idle {
            return Err(ZiError::validation("output stream already opened"));
        }
        if let Some(header) = header {
            let bytes = self
                .parser
                .encode_with_width(slice::from_ref(header), &mut self.expected_len)?;
            self.writer.write_all(&bytes)?;
            self.stats.bytes_written += bytes.len();
            self.stats.header_written = true;
        }
        self.state = ZiOutputState::Open;
        Ok(())
    }

    /// Encodes and writes `records`. Rows are encoded before anything is
    /// written, so an encoding error leaves the destination untouched.
    ///
    /// Unless the dialect is flexible, every row must match the width of the
    /// header or of the first record written.
    pub fn append(&mut self, records: &[ZiRow]) -> Result<()> {
        match self.state {
            ZiOutputState::Open => {}
            ZiOutputState::Idle => {
                return Err(ZiError::validation("append called before open"));
            }
            ZiOutputState::Closed => {
                return Err(ZiError::validation("append called after close"));
            }
        }
        let bytes = self
            .parser
            .encode_with_width(records, &mut self.expected_len)?;
        self.writer.write_all(&bytes)?;
        self.stats.bytes_written += bytes.len();
        self.stats.records_written += records.len();
        Ok(())
    }

    /// Flushes the destination. Later calls are no-ops.
    pub fn close(&mut self) -> Result<()> {
        if self.state == ZiOutputState::Closed {
            return Ok(());
        }
        self.state = ZiOutputState::Closed;
        self.writer.flush()?;
        Ok(())
    }

    pub fn stats(&self) -> &ZiWriteStats {
        &self.stats
    }

    pub fn is_closed(&self) -> bool {
        self.state == ZiOutputState::Closed
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
