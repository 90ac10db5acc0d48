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

//! # Export Parser
//!
//! Stateless encoding from rows to bytes through `csv::Writer`.

use crate::dialect::{ZiDialect, ZiQuoteStyle, ZiTerminator};
use crate::errors::{Result, ZiError};
use crate::record::ZiRow;

/// Encoder bound to one dialect. Each [`encode`](Self::encode) call is
/// independent of the previous ones; callers that emit several blocks of one
/// table carry the row width between them.
#[derive(Debug, Clone)]
pub struct ZiExportParser {
    delimiter: u8,
    quote: u8,
    quote_style: ZiQuoteStyle,
    terminator: ZiTerminator,
    flexible: bool,
}

impl ZiExportParser {
    pub fn new(dialect: &ZiDialect) -> Result<Self> {
        dialect.validate()?;
        Ok(Self {
            delimiter: dialect.delimiter_byte(),
            quote: dialect.quote_byte(),
            quote_style: dialect.quote_style,
            terminator: dialect.terminator,
            flexible: dialect.flexible,
        })
    }

    /// Formats `rows` as one contiguous block, each row followed by the
    /// dialect's terminator.
    pub fn encode(&self, rows: &[ZiRow]) -> Result<Vec<u8>> {
        let mut expected_len = None;
        self.encode_with_width(rows, &mut expected_len)
    }

    /// Encodes `rows`, checking widths against a width carried over from
    /// earlier blocks. `expected_len` is updated only when encoding succeeds.
    pub(crate) fn encode_with_width(
        &self,
        rows: &[ZiRow],
        expected_len: &mut Option<usize>,
    ) -> Result<Vec<u8>> {
        let width = self.check_widths(rows, *expected_len)?;
        if self.quote_style == ZiQuoteStyle::Never {
            self.check_unquoted(rows)?;
        }

        // Widths are checked above, across blocks.
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(self.quote_style.to_csv())
            .terminator(self.terminator.to_csv())
            .flexible(true)
            .from_writer(Vec::new());

        for row in rows {
            writer.write_record(row).map_err(ZiError::from_csv_write)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| ZiError::from(err.into_error()))?;
        *expected_len = width;
        Ok(bytes)
    }

    fn check_widths(&self, rows: &[ZiRow], mut expected: Option<usize>) -> Result<Option<usize>> {
        if self.flexible {
            return Ok(expected);
        }
        for (row_idx, row) in rows.iter().enumerate() {
            match expected {
                None => expected = Some(row.len()),
                Some(len) if len != row.len() => {
                    return Err(ZiError::encoding(format!(
                        "row {row_idx} has {} fields, expected {len}",
                        row.len()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(expected)
    }

    fn check_unquoted(&self, rows: &[ZiRow]) -> Result<()> {
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, field) in row.iter().enumerate() {
                if field.bytes().any(|byte| self.needs_quotes(byte)) {
                    return Err(ZiError::encoding(format!(
                        "field {col_idx} of row {row_idx} ({field:?}) needs quoting, which the dialect disables"
                    )));
                }
            }
        }
        Ok(())
    }

    fn needs_quotes(&self, byte: u8) -> bool {
        byte == self.delimiter || byte == self.quote || byte == b'\n' || byte == b'\r'
    }
}
