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

//! # Zitab Core Tests - Document
//!
//! Covers every construction path, both export paths, and the document's
//! behaviour as a streaming sink.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test document
//! ```

use std::io::{self, Cursor, Read, Write};

use zitab::{
    row_from, ZiDialect, ZiDocument, ZiError, ZiQuoteStyle, ZiReaderConfig, ZiRow,
    ZiStreamSink,
};

/// Destination that accepts `limit` bytes, then fails every write.
struct LimitedWriter {
    buf: Vec<u8>,
    limit: usize,
    flushed: bool,
}

impl LimitedWriter {
    fn new(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
            flushed: false,
        }
    }
}

impl Write for LimitedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.buf.len());
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "destination full"));
        }
        let take = room.min(data.len());
        self.buf.extend_from_slice(&data[..take]);
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

/// Source that yields its data once, then fails.
struct BrokenReader {
    data: Cursor<Vec<u8>>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "connection reset")),
            read => Ok(read),
        }
    }
}

fn sample() -> ZiDocument {
    ZiDocument::with_contents(
        Some(row_from(["a", "b"])),
        vec![row_from(["1", "2"]), row_from(["3", "4"])],
        Some(ZiDialect::csv()),
    )
}

/// An empty document has no header, no records and keeps its dialect.
#[test]
fn test_new_document_is_empty() {
    let doc = ZiDocument::new(Some(ZiDialect::tsv()));

    assert!(doc.header().is_none());
    assert!(doc.records().is_empty());
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert_eq!(doc.dialect(), Some(&ZiDialect::tsv()));
    assert!(ZiDocument::new(None).dialect().is_none());
}

/// Direct construction stores header and records verbatim.
#[test]
fn test_with_contents_returns_inputs() {
    let header = Some(row_from(["h1", "h2"]));
    let records = vec![row_from(["x"]), row_from(["x"]), Vec::new()];

    let doc = ZiDocument::with_contents(header.clone(), records.clone(), None);

    assert_eq!(doc.header().cloned(), header);
    assert_eq!(doc.records(), records.as_slice());
    assert_eq!(doc.len(), 3);
}

/// A header with zero records is accepted.
#[test]
fn test_with_contents_header_without_records() {
    let doc = ZiDocument::with_contents(Some(row_from(["only"])), Vec::new(), None);

    assert_eq!(doc.header(), Some(&row_from(["only"])));
    assert!(doc.records().is_empty());
    assert!(!doc.is_empty());
}

/// A header-bearing dialect promotes the first row.
#[test]
fn test_from_all_rows_promotes_first_row() {
    let rows = vec![row_from(["a", "b"]), row_from(["1", "2"]), row_from(["3", "4"])];

    let doc = ZiDocument::from_all_rows(rows, Some(ZiDialect::csv()));

    assert_eq!(doc.header(), Some(&row_from(["a", "b"])));
    assert_eq!(doc.records(), &[row_from(["1", "2"]), row_from(["3", "4"])]);
}

/// Empty input under a header-bearing dialect yields the empty header row.
#[test]
fn test_from_all_rows_empty_input_yields_empty_header_row() {
    let doc = ZiDocument::from_all_rows(Vec::new(), Some(ZiDialect::csv()));

    assert_eq!(doc.header(), Some(&ZiRow::new()));
    assert!(doc.records().is_empty());
}

/// Without a header flag, or without a dialect, every row is a record.
#[test]
fn test_from_all_rows_without_header_keeps_rows() {
    let rows = vec![row_from(["a"]), row_from(["b"])];

    let plain = ZiDocument::from_all_rows(rows.clone(), Some(ZiDialect::default()));
    assert!(plain.header().is_none());
    assert_eq!(plain.records(), rows.as_slice());

    let bare = ZiDocument::from_all_rows(rows.clone(), None);
    assert!(bare.header().is_none());
    assert_eq!(bare.records(), rows.as_slice());
}

/// An empty row list without a header flag stays completely empty.
#[test]
fn test_from_all_rows_empty_input_without_header() {
    let doc = ZiDocument::from_all_rows(Vec::new(), Some(ZiDialect::default()));

    assert!(doc.header().is_none());
    assert!(doc.records().is_empty());
}

/// Decoding the canonical sample and exporting it reproduces the input.
#[test]
fn test_from_bytes_and_back() {
    let dialect = ZiDialect::csv();
    let input = b"a,b\n1,2\n3,4\n";

    let doc = ZiDocument::from_bytes(input, dialect.clone()).unwrap();

    assert_eq!(doc.header(), Some(&row_from(["a", "b"])));
    assert_eq!(doc.records(), &[row_from(["1", "2"]), row_from(["3", "4"])]);
    assert_eq!(doc.to_bytes(&dialect).unwrap(), input.to_vec());
}

/// The trailing row is kept even without a final line break.
#[test]
fn test_from_bytes_flushes_unterminated_last_row() {
    let doc = ZiDocument::from_bytes(b"a,b\n1,2", ZiDialect::csv()).unwrap();

    assert_eq!(doc.records(), &[row_from(["1", "2"])]);
}

/// Malformed bytes abort construction with a decoding error.
#[test]
fn test_from_bytes_rejects_invalid_utf8() {
    let result = ZiDocument::from_bytes(b"a,b\n\xff\xfe,2\n", ZiDialect::csv());

    assert!(matches!(result, Err(ZiError::Decoding { .. })));
}

/// Rows of different widths violate a strict dialect but not a flexible one.
#[test]
fn test_from_bytes_checks_width_unless_flexible() {
    let input = b"a,b\n1\n";

    let strict = ZiDocument::from_bytes(input, ZiDialect::csv());
    assert!(matches!(strict, Err(ZiError::Decoding { line: Some(2), .. })));

    let flexible = ZiDocument::from_bytes(input, ZiDialect::csv().with_flexible(true)).unwrap();
    assert_eq!(flexible.records(), &[row_from(["1"])]);
}

/// Streaming in tiny chunks builds the same document as a bulk decode.
#[test]
fn test_from_reader_matches_from_bytes() {
    let dialect = ZiDialect::csv();
    let input = b"name,note\nada,\"likes, commas\"\nalan,\"two\nlines\"\ngrace,plain";
    let config = ZiReaderConfig {
        chunk_size: 3,
        batch_size: 2,
        ..Default::default()
    };

    let streamed =
        ZiDocument::from_reader_with_config(Cursor::new(&input[..]), dialect.clone(), config)
            .unwrap();
    let bulk = ZiDocument::from_bytes(input, dialect).unwrap();

    assert_eq!(streamed, bulk);
    assert_eq!(streamed.get(1, 1), Some("two\nlines"));
}

/// An empty stream opens the document without a header.
#[test]
fn test_from_reader_empty_stream() {
    let doc = ZiDocument::from_reader(io::empty(), ZiDialect::csv()).unwrap();

    assert!(doc.header().is_none());
    assert!(doc.records().is_empty());
}

/// I/O failures from the source are returned unchanged.
#[test]
fn test_from_reader_propagates_io_error() {
    let reader = BrokenReader {
        data: Cursor::new(b"a,b\n1,2\n".to_vec()),
    };

    let result = ZiDocument::from_reader(reader, ZiDialect::csv());

    assert_eq!(result, Err(ZiError::Io("connection reset".to_string())));
}

/// A second open is rejected and leaves the document untouched.
#[test]
fn test_on_open_twice_fails() {
    let mut doc = ZiDocument::new(None);
    doc.on_open(Some(row_from(["a"]))).unwrap();
    doc.on_append(vec![row_from(["1"])]).unwrap();

    let err = doc.on_open(Some(row_from(["b"]))).unwrap_err();

    assert_eq!(err, ZiError::AlreadyInitialized);
    assert_eq!(doc.header(), Some(&row_from(["a"])));
    assert_eq!(doc.records(), &[row_from(["1"])]);
}

/// Records alone are enough to block a streaming open.
#[test]
fn test_on_open_after_direct_records_fails() {
    let mut doc = ZiDocument::with_contents(None, vec![row_from(["x"])], None);

    assert_eq!(doc.on_open(None), Err(ZiError::AlreadyInitialized));
    assert!(doc.header().is_none());
    assert_eq!(doc.records(), &[row_from(["x"])]);
}

/// A header alone is enough to block a streaming open.
#[test]
fn test_on_open_after_direct_header_fails() {
    let mut doc = ZiDocument::with_contents(Some(Vec::new()), Vec::new(), None);

    assert_eq!(doc.on_open(None), Err(ZiError::AlreadyInitialized));
    assert_eq!(doc.header(), Some(&ZiRow::new()));
}

/// Batches are concatenated in call order.
#[test]
fn test_on_append_preserves_order() {
    let mut doc = ZiDocument::new(None);
    doc.on_open(None).unwrap();
    doc.on_append(vec![row_from(["1"]), row_from(["2"])]).unwrap();
    doc.on_append(Vec::new()).unwrap();
    doc.on_append(vec![row_from(["3"])]).unwrap();

    assert_eq!(
        doc.records(),
        &[row_from(["1"]), row_from(["2"]), row_from(["3"])]
    );
}

/// Appending before opening is not checked by the document.
#[test]
fn test_on_append_before_open_is_accepted() {
    let mut doc = ZiDocument::new(None);

    doc.on_append(vec![row_from(["early"])]).unwrap();

    assert_eq!(doc.records(), &[row_from(["early"])]);
}

/// Close and reset leave the accumulated rows alone.
#[test]
fn test_on_close_and_on_reset_keep_state() {
    let mut doc = ZiDocument::new(None);
    doc.on_open(Some(row_from(["h"]))).unwrap();
    doc.on_append(vec![row_from(["v"])]).unwrap();

    doc.on_reset().unwrap();
    doc.on_close().unwrap();

    assert_eq!(doc.header(), Some(&row_from(["h"])));
    assert_eq!(doc.records(), &[row_from(["v"])]);
}

/// Export without a header contains only records.
#[test]
fn test_to_bytes_without_header() {
    let doc = ZiDocument::with_contents(None, vec![row_from(["x", "y"])], None);

    assert_eq!(doc.to_bytes(&ZiDialect::default()).unwrap(), b"x,y\n".to_vec());
}

/// Export follows the dialect passed in, not the construction dialect.
#[test]
fn test_to_bytes_uses_given_dialect() {
    let doc = sample();

    let bytes = doc.to_bytes(&ZiDialect::csv().with_delimiter(';')).unwrap();

    assert_eq!(bytes, b"a;b\n1;2\n3;4\n".to_vec());
}

/// Exporting twice gives identical bytes.
#[test]
fn test_to_bytes_is_deterministic() {
    let doc = sample();
    let dialect = ZiDialect::csv();

    assert_eq!(doc.to_bytes(&dialect).unwrap(), doc.to_bytes(&dialect).unwrap());
}

/// A field the dialect cannot express fails the whole export.
#[test]
fn test_to_bytes_encoding_error() {
    let doc = ZiDocument::with_contents(None, vec![row_from(["needs,quotes"])], None);
    let dialect = ZiDialect::default().with_quote_style(ZiQuoteStyle::Never);

    assert!(matches!(doc.to_bytes(&dialect), Err(ZiError::Encoding { .. })));
}

/// Streaming export writes the same bytes as the in-memory export.
#[test]
fn test_write_to_matches_to_bytes() {
    let doc = sample();
    let dialect = ZiDialect::csv();
    let mut out = Vec::new();

    let stats = doc.write_to(&mut out, &dialect).unwrap();

    assert_eq!(out, doc.to_bytes(&dialect).unwrap());
    assert!(stats.header_written);
    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.bytes_written, out.len());
}

/// A failed append still closes the destination; earlier bytes stay written.
#[test]
fn test_write_to_closes_after_append_failure() {
    let doc = sample();
    let mut writer = LimitedWriter::new(6);

    let result = doc.write_to(&mut writer, &ZiDialect::csv());

    assert_eq!(result, Err(ZiError::Io("destination full".to_string())));
    assert!(writer.flushed);
    assert_eq!(writer.buf, b"a,b\n1,".to_vec());
}

/// An encoding failure in the records also closes the destination.
#[test]
fn test_write_to_closes_after_encoding_failure() {
    let doc = ZiDocument::with_contents(
        Some(row_from(["h"])),
        vec![row_from(["bad\nvalue"])],
        None,
    );
    let dialect = ZiDialect::default().with_quote_style(ZiQuoteStyle::Never);
    let mut writer = LimitedWriter::new(1024);

    let result = doc.write_to(&mut writer, &dialect);

    assert!(matches!(result, Err(ZiError::Encoding { .. })));
    assert!(writer.flushed);
    assert_eq!(writer.buf, b"h\n".to_vec());
}

/// A header that cannot be encoded fails before anything is written.
#[test]
fn test_write_to_closes_after_open_failure() {
    let doc = ZiDocument::with_contents(Some(row_from(["a,b"])), Vec::new(), None);
    let dialect = ZiDialect::default().with_quote_style(ZiQuoteStyle::Never);
    let mut writer = LimitedWriter::new(1024);

    let result = doc.write_to(&mut writer, &dialect);

    assert!(matches!(result, Err(ZiError::Encoding { .. })));
    assert!(writer.flushed);
    assert!(writer.buf.is_empty());
}

/// A header and records of different widths cannot be exported strictly.
#[test]
fn test_to_bytes_rejects_width_mismatch_with_header() {
    let doc = ZiDocument::with_contents(Some(row_from(["a"])), vec![row_from(["1", "2"])], None);

    let strict = doc.to_bytes(&ZiDialect::csv());
    assert!(matches!(strict, Err(ZiError::Encoding { .. })));

    let dialect = ZiDialect::csv().with_flexible(true);
    let flexible = doc.to_bytes(&dialect).unwrap();
    assert_eq!(flexible, b"a\n1,2\n".to_vec());
    assert_eq!(ZiDocument::from_bytes(&flexible, dialect).unwrap().records(), doc.records());
}

/// Streaming export applies the same width rule and still closes.
#[test]
fn test_write_to_rejects_width_mismatch_with_header() {
    let doc = ZiDocument::with_contents(Some(row_from(["a"])), vec![row_from(["1", "2"])], None);
    let mut writer = LimitedWriter::new(1024);

    let result = doc.write_to(&mut writer, &ZiDialect::csv());

    assert!(matches!(result, Err(ZiError::Encoding { .. })));
    assert!(writer.flushed);
    assert_eq!(writer.buf, b"a\n".to_vec());
}

/// A quote inside an unquoted field is an ordinary character on both load paths.
#[test]
fn test_mid_field_quote_loads_in_bulk_and_streaming() {
    let dialect = ZiDialect::csv();
    let input: &[u8] = b"a,b\n5\" tall,x\n1,2\n";
    let config = ZiReaderConfig {
        chunk_size: 2,
        ..Default::default()
    };

    let bulk = ZiDocument::from_bytes(input, dialect.clone()).unwrap();
    let streamed =
        ZiDocument::from_reader_with_config(Cursor::new(input), dialect, config).unwrap();

    assert_eq!(bulk.records(), &[row_from(["5\" tall", "x"]), row_from(["1", "2"])]);
    assert_eq!(streamed, bulk);
}

/// An empty record is written as an empty quoted field and reads back as one
/// empty field.
#[test]
fn test_empty_record_reads_back_as_single_empty_field() {
    let dialect = ZiDialect::default();
    let doc = ZiDocument::with_contents(None, vec![ZiRow::new()], None);

    let bytes = doc.to_bytes(&dialect).unwrap();
    let back = ZiDocument::from_bytes(&bytes, dialect).unwrap();

    assert_eq!(bytes, b"\"\"\n".to_vec());
    assert_eq!(back.records(), &[row_from([""])]);
}

/// Grid helpers look up cells and named columns.
#[test]
fn test_grid_helpers() {
    let doc = ZiDocument::with_contents(
        Some(row_from(["id", "name"])),
        vec![row_from(["1", "ada"]), row_from(["2"]), row_from(["3", "grace", "extra"])],
        None,
    );

    assert_eq!(doc.column_count(), 3);
    assert_eq!(doc.get(0, 1), Some("ada"));
    assert_eq!(doc.get(1, 1), None);
    assert_eq!(doc.get(9, 0), None);
    assert_eq!(doc.column_index("name"), Some(1));
    assert_eq!(doc.column_index("missing"), None);
    assert_eq!(doc.column("name"), Some(vec!["ada", "", "grace"]));
    assert_eq!(ZiDocument::new(None).column("id"), None);
}

/// Direct mutation replaces header and records freely.
#[test]
fn test_direct_mutation() {
    let mut doc = sample();

    doc.set_header(None);
    doc.set_records(vec![row_from(["z"])]);
    doc.push_record(row_from(["y"]));
    doc.records_mut().swap(0, 1);

    let (header, records) = doc.into_parts();
    assert!(header.is_none());
    assert_eq!(records, vec![row_from(["y"]), row_from(["z"])]);
}

/// Documents serialize with serde and come back equal.
#[test]
fn test_document_serde_roundtrip() {
    let doc = sample();

    let json = serde_json::to_string(&doc).unwrap();
    let back: ZiDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(back, doc);
}
