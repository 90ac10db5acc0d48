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
//! # Import Parser
//!
//! Chunked decoding from bytes to rows. Field-level rules (quotes, escaped
//! quotes, delimiters) are left to the `csv` crate; this parser decides where
//! complete rows end so that input can arrive in arbitrary pieces.
//!
//! A single decode pass cannot know whether the bytes after the last line
//! break form a finished row, so they stay pending until more input arrives
//! or [`ZiImportParser::flush_pending_row`] declares end of input.
//!
//! ## Row Boundaries
//!
//! - A quote opens a quoted field only as the first byte of a field. Anywhere
//!   else in an unquoted field it is an ordinary character.
//! - Rows end at `\n` or `\r\n` outside quotes. A `\r` followed by anything
//!   other than `\n` is rejected as soon as it is seen; a lone `\r` at the very
//!   end of input is accepted.
//! - Blank lines produce no row. An empty record written by the export side
//!   comes back as a row with one empty field.

use log::trace;

use crate::dialect::ZiDialect;
use crate::errors::{Result, ZiError};
use crate::record::{ZiRecords, ZiRow};

const LINE_FEED: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';

/// Position of the boundary scanner inside the current field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZiScanState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either its end or the first half
    /// of a doubled quote.
    QuotedQuote,
}

/// Incremental decoder bound to one dialect.
///
/// After any error the parser state is unspecified and it should be dropped.
#[derive(Debug, Clone)]
pub struct ZiImportParser {
    delimiter: u8,
    quote: u8,
    quoting: bool,
    flexible: bool,
    pending: Vec<u8>,
    scanned: usize,
    state: ZiScanState,
    after_cr: bool,
    expected_len: Option<usize>,
    lines_before: u64,
}

impl ZiImportParser {
    pub fn new(dialect: &ZiDialect) -> Result<Self> {
        dialect.validate()?;
        Ok(Self {
            delimiter: dialect.delimiter_byte(),
            quote: dialect.quote_byte(),
            quoting: dialect.quoting(),
            flexible: dialect.flexible,
            pending: Vec::new(),
            scanned: 0,
            state: ZiScanState::FieldStart,
            after_cr: false,
            expected_len: None,
            lines_before: 0,
        })
    }

    /// Decodes every row completed by `buffer`.
    ///
    /// Bytes after the last unquoted line break are kept for the next call.
    pub fn decode(&mut self, buffer: &[u8]) -> Result<ZiRecords> {
        self.pending.extend_from_slice(buffer);
        let Some(complete) = self.take_complete()? else {
            return Ok(Vec::new());
        };

        let rows = self.read_rows(&complete)?;
        self.lines_before += count_lines(&complete);
        trace!(
            "decoded {} rows from {} bytes, {} bytes pending",
            rows.len(),
            complete.len(),
            self.pending.len()
        );
        Ok(rows)
    }

    /// Decodes whatever is pending as the final row of the input.
    pub fn flush_pending_row(&mut self) -> Result<Option<ZiRow>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        if self.state == ZiScanState::Quoted {
            return Err(ZiError::decoding(
                "unterminated quoted field at end of input",
                Some(self.lines_before + 1),
            ));
        }

        let pending = std::mem::take(&mut self.pending);
        self.scanned = 0;
        self.state = ZiScanState::FieldStart;
        self.after_cr = false;
        let mut rows = self.read_rows(&pending)?;
        self.lines_before += count_lines(&pending);
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(ZiError::decoding(
                format!("trailing input holds {count} rows"),
                Some(self.lines_before),
            )),
        }
    }

    /// Whether bytes are waiting for a terminator or a flush.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Splits off the prefix of `pending` that ends at the last unquoted line
    /// feed. Scan state carries over between calls, so each byte is scanned once.
    fn take_complete(&mut self) -> Result<Option<Vec<u8>>> {
        let mut boundary = None;
        for idx in self.scanned..self.pending.len() {
            let byte = self.pending[idx];
            if self.after_cr {
                self.after_cr = false;
                if byte != LINE_FEED {
                    let line = self.lines_before + count_lines(&self.pending[..idx]) + 1;
                    return Err(ZiError::decoding(
                        "carriage return not followed by a line feed",
                        Some(line),
                    ));
                }
            }
            if self.step(byte) {
                boundary = Some(idx + 1);
            }
        }
        self.scanned = self.pending.len();

        let Some(end) = boundary else {
            return Ok(None);
        };
        let rest = self.pending.split_off(end);
        let complete = std::mem::replace(&mut self.pending, rest);
        self.scanned -= end;
        Ok(Some(complete))
    }

    /// Advances the scan state by one byte; true when the byte ends a row.
    fn step(&mut self, byte: u8) -> bool {
        use ZiScanState::*;

        let quote = self.quoting && byte == self.quote;
        match self.state {
            Quoted => {
                if quote {
                    self.state = QuotedQuote;
                }
                false
            }
            QuotedQuote if quote => {
                self.state = Quoted;
                false
            }
            FieldStart if quote => {
                self.state = Quoted;
                false
            }
            FieldStart | Unquoted | QuotedQuote => {
                if byte == self.delimiter {
                    self.state = FieldStart;
                } else if byte == LINE_FEED {
                    self.state = FieldStart;
                    return true;
                } else if byte == CARRIAGE_RETURN {
                    self.state = FieldStart;
                    self.after_cr = true;
                } else {
                    self.state = Unquoted;
                }
                false
            }
        }
    }

    fn read_rows(&mut self, bytes: &[u8]) -> Result<ZiRecords> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quoting(self.quoting)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|err| self.shift_line(ZiError::from_csv_read(err)))?;
            let line = record
                .position()
                .map(|pos| self.lines_before + pos.line());
            let row: ZiRow = record.iter().map(str::to_string).collect();
            self.check_width(&row, line)?;
            rows.push(row);
        }
        Ok(rows)
    }

    fn check_width(&mut self, row: &ZiRow, line: Option<u64>) -> Result<()> {
        if self.flexible {
            return Ok(());
        }
        match self.expected_len {
            None => {
                self.expected_len = Some(row.len());
                Ok(())
            }
            Some(expected) if expected != row.len() => Err(ZiError::decoding(
                format!("row has {} fields, expected {expected}", row.len()),
                line,
            )),
            Some(_) => Ok(()),
        }
    }

    fn shift_line(&self, err: ZiError) -> ZiError {
        match err {
            ZiError::Decoding { message, line } => ZiError::Decoding {
                message,
                line: line.map(|local| self.lines_before + local),
            },
            other => other,
        }
    }
}

fn count_lines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|&&byte| byte == LINE_FEED).count() as u64
}
