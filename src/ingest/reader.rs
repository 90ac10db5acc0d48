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

use std::io::{ErrorKind, Read};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::dialect::ZiDialect;
use crate::errors::{Result, ZiError};
use crate::ingest::parser::ZiImportParser;
use crate::record::ZiRecords;
use crate::sink::ZiStreamSink;

pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressInfo {
    pub records_read: usize,
    pub bytes_read: usize,
}

/// Sizing for streaming ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiReaderConfig {
    /// Bytes requested from the source per read.
    pub chunk_size: usize,
    /// Maximum rows per `on_append` call.
    pub batch_size: usize,
    /// Rows between progress callbacks; zero disables periodic reports.
    pub progress_interval: usize,
}

impl Default for ZiReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            batch_size: 1000,
            progress_interval: 10000,
        }
    }
}

/// Pushes rows decoded from a byte source into a registered [`ZiStreamSink`].
///
/// The handler borrows its sink and owns the reader; pass `&mut reader` to
/// keep ownership of the source.
pub struct ZiInputStream<'s, R> {
    reader: R,
    dialect: ZiDialect,
    parser: ZiImportParser,
    config: ZiReaderConfig,
    sink: Option<&'s mut dyn ZiStreamSink>,
    progress_callback: Option<ProgressCallback>,
    opened: bool,
    records_read: usize,
    bytes_read: usize,
    last_report: usize,
}

impl<'s, R: Read> ZiInputStream<'s, R> {
    pub fn new(reader: R, dialect: ZiDialect) -> Result<Self> {
        let parser = ZiImportParser::new(&dialect)?;
        Ok(Self {
            reader,
            dialect,
            parser,
            config: ZiReaderConfig::default(),
            sink: None,
            progress_callback: None,
            opened: false,
            records_read: 0,
            bytes_read: 0,
            last_report: 0,
        })
    }

    pub fn with_config(mut self, config: ZiReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Sets the sink that receives rows; replaces any earlier one.
    pub fn register_sink(&mut self, sink: &'s mut dyn ZiStreamSink) {
        self.sink = Some(sink);
    }

    /// Reads the source to its end, driving `on_open`, `on_append` and
    /// `on_close` on the sink.
    ///
    /// Rows reach the sink as each chunk is decoded. If an error interrupts
    /// the stream the sink keeps whatever it already received.
    pub fn consume_until_end_of_stream(&mut self) -> Result<()> {
        let sink = self
            .sink
            .take()
            .ok_or_else(|| ZiError::validation("no sink registered on input stream"))?;
        let result = self.drive(&mut *sink);
        self.sink = Some(sink);
        result
    }

    /// Discards decode state and counters, then notifies the sink.
    ///
    /// The byte source is not repositioned; use [`Self::get_mut`] for that.
    pub fn reset(&mut self) -> Result<()> {
        self.parser = ZiImportParser::new(&self.dialect)?;
        self.opened = false;
        self.records_read = 0;
        self.bytes_read = 0;
        self.last_report = 0;
        match self.sink.as_deref_mut() {
            Some(sink) => sink.on_reset(),
            None => Ok(()),
        }
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    fn drive(&mut self, sink: &mut dyn ZiStreamSink) -> Result<()> {
        let mut buffer = vec![0u8; self.config.chunk_size.max(1)];
        loop {
            let read = match self.reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            self.bytes_read += read;
            let rows = self.parser.decode(&buffer[..read])?;
            self.dispatch(sink, rows)?;
        }

        if let Some(row) = self.parser.flush_pending_row()? {
            self.dispatch(sink, vec![row])?;
        }
        if !self.opened {
            sink.on_open(None)?;
            self.opened = true;
        }
        self.report_progress();
        sink.on_close()
    }

    fn dispatch(&mut self, sink: &mut dyn ZiStreamSink, rows: ZiRecords) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut rows = rows.into_iter();

        if !self.opened {
            let header = if self.dialect.has_header {
                rows.next()
            } else {
                None
            };
            sink.on_open(header)?;
            self.opened = true;
        }

        let mut batch: ZiRecords = rows.collect();
        let batch_size = self.config.batch_size.max(1);
        while !batch.is_empty() {
            let rest = batch.split_off(batch.len().min(batch_size));
            let count = batch.len();
            sink.on_append(batch)?;
            self.records_read += count;
            trace!("appended batch of {count} rows ({} total)", self.records_read);
            batch = rest;

            let interval = self.config.progress_interval;
            if interval > 0 && self.records_read - self.last_report >= interval {
                self.report_progress();
            }
        }
        Ok(())
    }

    fn report_progress(&mut self) {
        self.last_report = self.records_read;
        if let Some(ref callback) = self.progress_callback {
            callback(ProgressInfo {
                records_read: self.records_read,
                bytes_read: self.bytes_read,
            });
        }
    }
}
