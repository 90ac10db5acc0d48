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

//! # Zitab Document Module
//!
//! [`ZiDocument`] is an in-memory table: an optional header row, the records
//! below it, and the dialect it was built with.
//!
//! ## Construction Paths
//!
//! | Constructor | Source | Header handling |
//! |---|---|---|
//! | [`ZiDocument::new`] | nothing | none |
//! | [`ZiDocument::with_contents`] | header and records as given | verbatim |
//! | [`ZiDocument::from_all_rows`] | undifferentiated rows | first row promoted when the dialect has a header |
//! | [`ZiDocument::from_bytes`] | a byte buffer | decoded, then as `from_all_rows` |
//! | [`ZiDocument::from_reader`] | an `io::Read` | streamed through [`ZiInputStream`] |
//!
//! Bulk paths either return a complete document or an error. The streaming
//! path appends rows as they are discovered, so a mid-stream error discards a
//! partially filled document.
//!
//! ## Export
//!
//! [`ZiDocument::to_bytes`] builds one buffer; [`ZiDocument::write_to`] streams
//! through a [`ZiOutputStream`] and always closes it, even when writing fails.
//!
//! ## Example
//!
//! ```rust
//! use zitab::{ZiDialect, ZiDocument};
//!
//! let dialect = ZiDialect::csv();
//! let doc = ZiDocument::from_bytes(b"a,b\n1,2\n3,4\n", dialect.clone())?;
//! assert_eq!(doc.header(), Some(&vec!["a".to_string(), "b".to_string()]));
//! assert_eq!(doc.to_bytes(&dialect)?, b"a,b\n1,2\n3,4\n");
//! # Ok::<(), zitab::ZiError>(())
//! ```

use std::io::{Read, Write};
use std::slice;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dialect::ZiDialect;
use crate::errors::{Result, ZiError};
use crate::export::{ZiExportParser, ZiOutputStream, ZiWriteStats};
use crate::ingest::{ZiImportParser, ZiInputStream, ZiReaderConfig};
use crate::record::{ZiRecords, ZiRow};
use crate::sink::ZiStreamSink;

/// Tabular document: optional header plus ordered records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiDocument {
    dialect: Option<ZiDialect>,
    header: Option<ZiRow>,
    records: ZiRecords,
}

impl ZiDocument {
    /// Empty document with no header and no records.
    pub fn new(dialect: Option<ZiDialect>) -> Self {
        Self {
            dialect,
            header: None,
            records: Vec::new(),
        }
    }

    /// Document holding exactly the given header and records.
    pub fn with_contents(
        header: Option<ZiRow>,
        records: ZiRecords,
        dialect: Option<ZiDialect>,
    ) -> Self {
        Self {
            dialect,
            header,
            records,
        }
    }

    /// Splits undifferentiated rows into header and records.
    ///
    /// With a header-bearing dialect the first row becomes the header and the
    /// rest become records; empty input yields an empty header row. Without
    /// one, every row is a record and there is no header.
    pub fn from_all_rows(rows: ZiRecords, dialect: Option<ZiDialect>) -> Self {
        let has_header = dialect.as_ref().is_some_and(|d| d.has_header);
        if !has_header {
            return Self::with_contents(None, rows, dialect);
        }

        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        Self::with_contents(Some(header), rows.collect(), dialect)
    }

    /// Decodes a complete buffer.
    pub fn from_bytes(bytes: &[u8], dialect: ZiDialect) -> Result<Self> {
        let mut parser = ZiImportParser::new(&dialect)?;
        let mut rows = parser.decode(bytes)?;
        if let Some(row) = parser.flush_pending_row()? {
            rows.push(row);
        }
        debug!("decoded {} rows from {} bytes", rows.len(), bytes.len());
        Ok(Self::from_all_rows(rows, Some(dialect)))
    }

    /// Streams `reader` to its end with the default reader configuration.
    pub fn from_reader<R: Read>(reader: R, dialect: ZiDialect) -> Result<Self> {
        Self::from_reader_with_config(reader, dialect, ZiReaderConfig::default())
    }

    /// Streams `reader` to its end, registering the new document as the sink.
    pub fn from_reader_with_config<R: Read>(
        reader: R,
        dialect: ZiDialect,
        config: ZiReaderConfig,
    ) -> Result<Self> {
        let mut document = Self::new(Some(dialect.clone()));
        {
            let mut stream = ZiInputStream::new(reader, dialect)?.with_config(config);
            stream.register_sink(&mut document);
            stream.consume_until_end_of_stream()?;
        }
        debug!("streamed {} records into document", document.records.len());
        Ok(document)
    }

    /// Encodes the header (if any) followed by all records. A strict dialect
    /// requires the header and every record to have the same width.
    pub fn to_bytes(&self, dialect: &ZiDialect) -> Result<Vec<u8>> {
        let parser = ZiExportParser::new(dialect)?;
        let mut expected_len = None;
        let mut buffer = match &self.header {
            Some(header) => parser.encode_with_width(slice::from_ref(header), &mut expected_len)?,
            None => Vec::new(),
        };
        buffer.extend(parser.encode_with_width(&self.records, &mut expected_len)?);
        Ok(buffer)
    }

    /// Streams the document into `writer`.
    ///
    /// The output stream is closed on every path once it exists. When both a
    /// write and the close fail, the write error is returned. Records already
    /// written before a failure stay written.
    pub fn write_to<W: Write>(&self, writer: W, dialect: &ZiDialect) -> Result<ZiWriteStats> {
        let mut stream = ZiOutputStream::new(writer, dialect)?;
        let written = stream
            .open(self.header.as_ref())
            .and_then(|()| stream.append(&self.records));
        let closed = stream.close();

        match (written, closed) {
            (Err(err), Err(close_err)) => {
                warn!("closing output after failed export also failed: {close_err}");
                Err(err)
            }
            (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
            (Ok(()), Ok(())) => {
                let stats = stream.stats().clone();
                debug!(
                    "exported {} records in {} bytes",
                    stats.records_written, stats.bytes_written
                );
                Ok(stats)
            }
        }
    }

    pub fn dialect(&self) -> Option<&ZiDialect> {
        self.dialect.as_ref()
    }

    pub fn header(&self) -> Option<&ZiRow> {
        self.header.as_ref()
    }

    pub fn records(&self) -> &[ZiRow] {
        &self.records
    }

    pub fn set_header(&mut self, header: Option<ZiRow>) {
        self.header = header;
    }

    pub fn set_records(&mut self, records: ZiRecords) {
        self.records = records;
    }

    pub fn records_mut(&mut self) -> &mut ZiRecords {
        &mut self.records
    }

    pub fn push_record(&mut self, record: ZiRow) {
        self.records.push(record);
    }

    /// Number of records, header excluded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there is neither a header nor any record.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.records.is_empty()
    }

    /// Width of the widest row, header included.
    pub fn column_count(&self) -> usize {
        self.header
            .iter()
            .chain(self.records.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Field at `row`/`col` of the records; `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.records.get(row)?.get(col).map(String::as_str)
    }

    /// Position of the first header field equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|field| field == name)
    }

    /// Values of the named column, with `""` for records too short to have it.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.records
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    pub fn into_parts(self) -> (Option<ZiRow>, ZiRecords) {
        (self.header, self.records)
    }
}

impl ZiStreamSink for ZiDocument {
    fn on_open(&mut self, header: Option<ZiRow>) -> Result<()> {
        if !self.is_empty() {
            return Err(ZiError::AlreadyInitialized);
        }
        self.header = header;
        Ok(())
    }

    fn on_append(&mut self, mut records: ZiRecords) -> Result<()> {
        self.records.append(&mut records);
        Ok(())
    }

    fn on_close(&mut self) -> Result<()> {
        Ok(())
    }

    // Accumulated rows are kept; a restarted stream will then fail in on_open.
    fn on_reset(&mut self) -> Result<()> {
        debug!("reset ignored by document holding {} records", self.records.len());
        Ok(())
    }
}
