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

//! # Streaming Sink
//!
//! [`ZiStreamSink`] is the observer side of [`ZiInputStream`]: the handler
//! decodes bytes and pushes what it finds into whichever sink was registered.
//! [`ZiDocument`] is the sink used by `ZiDocument::from_reader`, but any type
//! that wants rows as they are discovered can implement it.
//!
//! Call order from the handler is always
//! `on_open` → `on_append`* → `on_close`, with `on_reset` possible in between
//! when the handler restarts.
//!
//! [`ZiInputStream`]: crate::ingest::ZiInputStream
//! [`ZiDocument`]: crate::document::ZiDocument

use crate::errors::Result;
use crate::record::{ZiRecords, ZiRow};

/// Receives rows incrementally from an input stream handler.
pub trait ZiStreamSink {
    /// Called once, before any rows, with the header if the dialect has one.
    fn on_open(&mut self, header: Option<ZiRow>) -> Result<()>;

    /// Called with each batch of rows in input order.
    fn on_append(&mut self, records: ZiRecords) -> Result<()>;

    /// Called after the last batch.
    fn on_close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the handler discards its decode state to start over.
    fn on_reset(&mut self) -> Result<()> {
        Ok(())
    }
}
