//! # record_xml
//!
//! A streaming decoder for record/field XML documents, with a JSON encoder for the
//! decoded model.
//!
//! ## The Format
//!
//! Documents hold `record` elements. A record holds fields (`F`) carrying a code
//! (`C`) and a label (`L`); a field holds text nodes (`T`, with `BR` line breaks)
//! and data blocks (`D`, a flat list of items):
//!
//! ```text
//! <root>
//!   <record index="1">
//!     <F C="TI" L="Title">
//!       <T>First line<BR/>second line.</T>
//!       <D><T>item one</T>item two</D>
//!     </F>
//!   </record>
//! </root>
//! ```
//!
//! See [`format`] for the full set of rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use record_xml::{from_str, to_string_pretty};
//!
//! let xml = r#"<record index="3"><F C="AB" L="Title"><T> Hello<BR/>World. </T></F></record>"#;
//!
//! let records = from_str(xml).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].index(), Some(3));
//!
//! let field = &records[0].fields()[0];
//! assert_eq!(field.code(), "AB");
//! assert_eq!(field.name(), "Title");
//! assert_eq!(field.content(), ["Hello\nWorld"]);
//!
//! let json = to_string_pretty(&records).unwrap();
//! assert!(json.contains("\"Index\": 3"));
//! ```
//!
//! ## Errors
//!
//! Malformed XML, undecodable text and documents that end inside an open element
//! abort the whole decode; no partial result is returned. Missing attributes are
//! never errors. See [`Error`].
//!
//! ## Command Line
//!
//! The `tojson` binary reads a document from a file or standard input and writes
//! the JSON encoding to a file or standard output:
//!
//! ```text
//! tojson --xml records.xml -f records.json
//! ```

pub mod de;
pub mod error;
pub mod format;
pub mod model;
pub mod options;
mod ser;

pub use de::Decoder;
pub use error::{Error, Result};
pub use model::{Field, Record};
pub use options::JsonOptions;

use serde::Serialize;
use std::io;

/// Decode all records from a buffered reader.
///
/// # Examples
///
/// ```rust
/// use record_xml::from_reader;
/// use std::io::BufReader;
///
/// let source = BufReader::new(&b"<root><record index=\"1\"/></root>"[..]);
/// let records = from_reader(source).unwrap();
/// assert_eq!(records[0].index, 1);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the XML is malformed, or the document ends
/// inside an open element.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Vec<Record>>
where
    R: io::BufRead,
{
    Decoder::new(reader).decode()
}

/// Decode all records from a string of XML.
///
/// # Examples
///
/// ```rust
/// use record_xml::from_str;
///
/// let records = from_str("<root></root>").unwrap();
/// assert!(records.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed or ends inside an open element.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Vec<Record>> {
    from_reader(s.as_bytes())
}

/// Decode all records from bytes of XML.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 text, the XML is malformed,
/// or it ends inside an open element.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Vec<Record>> {
    from_reader(v)
}

/// Read records back from the JSON produced by the `to_*` functions.
///
/// # Examples
///
/// ```rust
/// use record_xml::{from_json_str, from_str, to_string};
///
/// let records = from_str(r#"<record index="5"><F C="X"><T>y</T></F></record>"#).unwrap();
/// let json = to_string(&records).unwrap();
/// assert_eq!(from_json_str(&json).unwrap(), records);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not JSON of the record shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_str(s: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(s)?)
}

/// Encode records as single-line JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &JsonOptions::compact().with_trailing_newline(false))
}

/// Encode records as JSON indented with four spaces, followed by a newline.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &JsonOptions::default())
}

/// Encode records as JSON with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &JsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = ser::to_vec(value, options)?;
    // serde_json only emits UTF-8
    String::from_utf8(bytes).map_err(Error::custom)
}

/// Encode records as pretty JSON and write them to `writer`.
///
/// # Examples
///
/// ```rust
/// use record_xml::{from_str, to_writer};
///
/// let records = from_str("<record/>").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &records).unwrap();
/// assert!(buffer.ends_with(b"\n"));
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &JsonOptions::default())
}

/// Encode records as JSON with custom options and write them to `writer`.
///
/// The encoding is completed before the first byte is written.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: &JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    ser::write_all(writer, value, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<root>
  <record index="3">
    <F C="AB" L="Title">
      <T> Hello<BR/>World. </T>
    </F>
  </record>
</root>"#;

    #[test]
    fn test_decode_and_encode() {
        let records = from_str(SAMPLE).unwrap();
        let json = to_string(&records).unwrap();
        assert_eq!(
            json,
            r#"[{"Field":[{"Content":["Hello\nWorld"],"Code":"AB","Name":"Title"}],"Index":3}]"#
        );
    }

    #[test]
    fn test_json_reload() {
        let records = from_str(SAMPLE).unwrap();
        let json = to_string_pretty(&records).unwrap();
        assert_eq!(from_json_str(&json).unwrap(), records);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice(b"<record><F><T>\xff\xfe</T></F></record>").unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
    }

    #[test]
    fn test_custom_options() {
        let records = from_str(SAMPLE).unwrap();
        let options = JsonOptions::new().with_indent(1).with_trailing_newline(false);
        let json = to_string_with_options(&records, &options).unwrap();
        assert!(json.starts_with("[\n {\n  \"Field\""));
        assert!(json.ends_with(']'));
    }
}
