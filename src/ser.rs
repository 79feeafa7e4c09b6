//! JSON encoding of decoded records.
//!
//! Records are encoded with `serde_json` using the member names of the
//! [`Record`](crate::Record) and [`Field`](crate::Field) model. Output is always
//! built fully in memory before anything reaches the writer, so a failed encode
//! never leaves partial output behind.
//!
//! ```rust
//! use record_xml::{from_str, to_string};
//!
//! let records = from_str(r#"<record index="3"><F C="AB" L="Title"><T>Hi</T></F></record>"#).unwrap();
//! let json = to_string(&records).unwrap();
//! assert_eq!(json, r#"[{"Field":[{"Content":["Hi"],"Code":"AB","Name":"Title"}],"Index":3}]"#);
//! ```

use crate::{Error, JsonOptions, Result};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io;

/// Encodes `value` into a byte buffer according to `options`.
pub(crate) fn to_vec<T>(value: &T, options: &JsonOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut output = Vec::with_capacity(256);

    if options.pretty {
        let indent = options.indent_bytes();
        encode(&mut output, value, PrettyFormatter::with_indent(&indent))?;
    } else {
        encode(&mut output, value, CompactFormatter)?;
    }

    if options.trailing_newline {
        output.push(b'\n');
    }
    Ok(output)
}

fn encode<T, F>(output: &mut Vec<u8>, value: &T, formatter: F) -> Result<()>
where
    T: ?Sized + Serialize,
    F: Formatter,
{
    let mut serializer = serde_json::Serializer::with_formatter(output, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Encodes `value` and writes it to `writer` in one call.
pub(crate) fn write_all<W, T>(mut writer: W, value: &T, options: &JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let bytes = to_vec(value, options)?;
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Record};

    fn sample() -> Vec<Record> {
        vec![Record {
            fields: vec![Field {
                content: vec!["Hello\nWorld".to_string()],
                code: "AB".to_string(),
                name: "Title".to_string(),
            }],
            index: 3,
        }]
    }

    #[test]
    fn test_pretty_uses_four_spaces() {
        let bytes = to_vec(&sample(), &JsonOptions::default()).unwrap();
        let expected = r#"[
    {
        "Field": [
            {
                "Content": [
                    "Hello\nWorld"
                ],
                "Code": "AB",
                "Name": "Title"
            }
        ],
        "Index": 3
    }
]
"#;
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_empty_sequence_is_empty_array() {
        let records: Vec<Record> = Vec::new();
        let bytes = to_vec(&records, &JsonOptions::default()).unwrap();
        assert_eq!(bytes, b"[]\n");
    }

    #[test]
    fn test_write_all_reports_io_errors() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_all(Broken, &sample(), &JsonOptions::compact()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
