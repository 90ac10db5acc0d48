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

//! # Dialect Module
//!
//! A [`ZiDialect`] describes how raw bytes map to rows: the delimiter, the
//! quote character and when it is used, the record terminator, whether the
//! first row is a header, and whether rows may differ in width.
//!
//! Dialects are values. Parsers and stream handlers copy what they need when
//! they are built, and a document keeps the dialect it was constructed with
//! without ever re-deriving it from data.
//!
//! ## Loading
//!
//! ```rust
//! use zitab::dialect::{ZiDialect, ZiQuoteStyle};
//!
//! let dialect = ZiDialect::from_yaml("delimiter: ';'\nhas_header: true\n")?;
//! assert_eq!(dialect.delimiter, ';');
//! assert_eq!(dialect.quote_style, ZiQuoteStyle::Necessary);
//! # Ok::<(), zitab::ZiError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// When fields are wrapped in quote characters on output.
///
/// Anything other than `Never` also enables quote handling on input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiQuoteStyle {
    /// Quote only fields containing the delimiter, the quote, or a line break.
    #[default]
    Necessary,
    /// Quote every field.
    Always,
    /// Quote every field that does not parse as a number.
    NonNumeric,
    /// Never quote. Fields that would need quoting cannot be encoded.
    Never,
}

impl ZiQuoteStyle {
    pub(crate) fn to_csv(self) -> csv::QuoteStyle {
        match self {
            ZiQuoteStyle::Necessary => csv::QuoteStyle::Necessary,
            ZiQuoteStyle::Always => csv::QuoteStyle::Always,
            ZiQuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
            ZiQuoteStyle::Never => csv::QuoteStyle::Never,
        }
    }
}

/// Record terminator written after each row.
///
/// Input accepts `\n` and `\r\n` under either setting. A `\r` followed by
/// anything other than `\n` is a decoding error. Blank lines are skipped on
/// input, and an empty record is written as `""`, so it reads back as a row
/// with one empty field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiTerminator {
    #[default]
    Lf,
    CrLf,
}

impl ZiTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            ZiTerminator::Lf => csv::Terminator::Any(b'\n'),
            ZiTerminator::CrLf => csv::Terminator::CRLF,
        }
    }
}

/// Parsing and formatting options for tabular text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiDialect {
    /// Field separator. Must be ASCII.
    pub delimiter: char,
    /// Quote character. Must be ASCII and differ from the delimiter.
    pub quote: char,
    /// Output quoting policy; `Never` also disables quote handling on input.
    pub quote_style: ZiQuoteStyle,
    /// Output record terminator.
    pub terminator: ZiTerminator,
    /// Whether the first row of the input is a header.
    pub has_header: bool,
    /// Whether rows may have different numbers of fields.
    pub flexible: bool,
}

impl Default for ZiDialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            quote_style: ZiQuoteStyle::Necessary,
            terminator: ZiTerminator::Lf,
            has_header: false,
            flexible: false,
        }
    }
}

impl ZiDialect {
    /// Comma separated with a header row.
    pub fn csv() -> Self {
        Self::default().with_header(true)
    }

    /// Tab separated with a header row.
    pub fn tsv() -> Self {
        Self::csv().with_delimiter('\t')
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_quote_style(mut self, quote_style: ZiQuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    pub fn with_terminator(mut self, terminator: ZiTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Checks that the delimiter and quote can drive the byte-level codec.
    pub fn validate(&self) -> Result<()> {
        let delimiter = ascii_byte("delimiter", self.delimiter)?;
        let quote = ascii_byte("quote", self.quote)?;
        if delimiter == quote {
            return Err(ZiError::validation(format!(
                "delimiter and quote must differ, both are {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Reads a dialect from a JSON object; missing keys take default values.
    pub fn from_json(value: &Value) -> Result<Self> {
        let dialect: ZiDialect = serde_json::from_value(value.clone())?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Reads a dialect from a YAML document; missing keys take default values.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let dialect: ZiDialect = serde_yaml::from_str(source)?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Guesses the delimiter of a sample by counting candidates in its first
    /// few lines. Ties and samples with no candidate fall back to a comma.
    pub fn detect_delimiter(sample: &[u8]) -> char {
        let text = String::from_utf8_lossy(sample);
        let head: String = text.lines().take(5).collect::<Vec<_>>().join("\n");

        let mut best = (',', head.matches(',').count());
        for candidate in ['\t', '|', ';'] {
            let count = head.matches(candidate).count();
            if count > best.1 {
                best = (candidate, count);
            }
        }
        best.0
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub(crate) fn quote_byte(&self) -> u8 {
        self.quote as u8
    }

    pub(crate) fn quoting(&self) -> bool {
        self.quote_style != ZiQuoteStyle::Never
    }
}

fn ascii_byte(name: &str, value: char) -> Result<u8> {
    if !value.is_ascii() {
        return Err(ZiError::validation(format!(
            "{name} must be an ASCII character, got {value:?}"
        )));
    }
    if value == '\n' || value == '\r' {
        return Err(ZiError::validation(format!(
            "{name} cannot be a line break"
        )));
    }
    Ok(value as u8)
}
