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

//! # Zitab Record Module
//!
//! Rows and record batches are plain vectors of strings. A field carries no
//! structure of its own and position is the only column identity, so the
//! aliases below are all the data model needs.
//!
//! ```rust
//! use zitab::record::{ZiRecords, ZiRow, row_from};
//!
//! let header: ZiRow = row_from(["name", "age"]);
//! let records: ZiRecords = vec![row_from(["ada", "36"]), row_from(["alan", "41"])];
//! assert_eq!(header.len(), records[0].len());
//! ```

/// One ordered sequence of fields, used for both records and the header.
pub type ZiRow = Vec<String>;

/// Ordered body rows of a document.
pub type ZiRecords = Vec<ZiRow>;

/// Builds a row from anything yielding string-like fields.
pub fn row_from<I, S>(fields: I) -> ZiRow
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}
