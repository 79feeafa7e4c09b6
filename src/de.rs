//! Record XML decoding.
//!
//! This module provides the [`Decoder`], a pull-based walk over the XML token
//! stream that rebuilds the `record` → `F` → content hierarchy.
//!
//! ## Overview
//!
//! - **Single pass**: tokens are pulled one at a time from any [`BufRead`] source
//! - **Recursive descent**: one reader per element type (`record`, `F`, `D`, `T`),
//!   each consuming tokens until its own end tag
//! - **Forgiving structure**: unknown elements and missing attributes are skipped
//! - **Strict syntax**: malformed XML and truncated documents are fatal errors
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use record_xml::from_str;
//!
//! let xml = r#"<root><record index="1"><F C="A"><D><T>a</T>b</D></F></record></root>"#;
//! let records = from_str(xml).unwrap();
//! assert_eq!(records[0].fields()[0].content(), ["a", "b"]);
//! ```
//!
//! ## Direct Decoder Usage
//!
//! ```rust
//! use record_xml::Decoder;
//! use std::io::Cursor;
//!
//! let source = Cursor::new(b"<record><F><T>x</T></F></record>".to_vec());
//! let records = Decoder::new(source).decode().unwrap();
//! assert_eq!(records.len(), 1);
//! ```

use crate::format::{self, clean_text};
use crate::{Error, Field, Record, Result};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use tracing::{debug, trace};

/// One token of the XML stream, detached from the read buffer.
enum Token {
    Start(BytesStart<'static>),
    /// Local name of the closed element
    End(Vec<u8>),
    /// Character data, CDATA or a resolved entity reference
    Text(String),
    Eof,
    /// Comments, declarations, processing instructions
    Other,
}

/// The record decoder.
///
/// Owns the tokenizer for the duration of one parse. Created via [`Decoder::new`]
/// and consumed by [`Decoder::decode`].
pub struct Decoder<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        // `<BR/>` must produce the same start/end pair as `<BR></BR>`
        config.expand_empty_elements = true;
        config.trim_text(false);

        Decoder {
            reader,
            buf: Vec::with_capacity(1024),
        }
    }

    /// Decodes every `record` element in the document, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, undecodable text, I/O failures and
    /// documents that end while any element is still open.
    /// No records are returned when an error occurs.
    pub fn decode(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        // Elements open around the records, such as the document root
        let mut open: Vec<Vec<u8>> = Vec::new();

        loop {
            match self.next_token()? {
                Token::Start(start) if has_name(&start, format::RECORD) => {
                    let raw_index = self.attribute(&start, format::INDEX_ATTR)?;
                    let mut record = self.read_record()?;

                    if let Some(raw) = raw_index {
                        match format::parse_index(&raw) {
                            Some(index) => record.index = index,
                            None => debug!(index = %raw, "ignoring malformed record index"),
                        }
                    }

                    trace!(
                        index = record.index,
                        fields = record.fields.len(),
                        "decoded record"
                    );
                    records.push(record);
                }
                Token::Start(start) => open.push(start.local_name().as_ref().to_vec()),
                Token::End(_) => {
                    open.pop();
                }
                Token::Eof => match open.last() {
                    Some(element) => return Err(self.unexpected_eof(element)),
                    None => break,
                },
                Token::Text(_) | Token::Other => {}
            }
        }

        debug!(records = records.len(), "finished decoding document");
        Ok(records)
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn read_record(&mut self) -> Result<Record> {
        let mut record = Record::new();

        loop {
            match self.next_token()? {
                Token::Start(start) if has_name(&start, format::FIELD) => {
                    let code = self.attribute(&start, format::CODE_ATTR)?;
                    let name = self.attribute(&start, format::LABEL_ATTR)?;

                    let mut field = self.read_field()?;
                    field.code = code.unwrap_or_default();
                    field.name = name.unwrap_or_default();
                    record.push(field);
                }
                Token::End(name) if name == format::RECORD => return Ok(record),
                Token::Eof => return Err(self.unexpected_eof(format::RECORD)),
                _ => {}
            }
        }
    }

    fn read_field(&mut self) -> Result<Field> {
        let mut field = Field::new();

        loop {
            match self.next_token()? {
                Token::Start(start) if has_name(&start, format::TEXT) => {
                    let text = self.read_text()?;
                    if !text.is_empty() {
                        field.add(text);
                    }
                }
                Token::Start(start) if has_name(&start, format::DATA) => {
                    let items = self.read_data()?;
                    if !items.is_empty() {
                        field.add_all(items);
                    }
                }
                Token::End(name) if name == format::FIELD => return Ok(field),
                Token::Eof => return Err(self.unexpected_eof(format::FIELD)),
                _ => {}
            }
        }
    }

    fn read_data(&mut self) -> Result<Vec<String>> {
        let mut items = Vec::new();
        // Bare character data may arrive in several pieces (text, CDATA, references)
        let mut pending = String::new();

        loop {
            let token = self.next_token()?;
            if let Token::Text(text) = token {
                pending.push_str(&text);
                continue;
            }
            if !pending.is_empty() {
                items.push(std::mem::take(&mut pending));
            }

            match token {
                Token::Start(start) if has_name(&start, format::TEXT) => {
                    let text = self.read_text()?;
                    if !text.is_empty() {
                        items.push(text);
                    }
                }
                Token::End(name) if name == format::DATA => return Ok(items),
                Token::Eof => return Err(self.unexpected_eof(format::DATA)),
                _ => {}
            }
        }
    }

    fn read_text(&mut self) -> Result<String> {
        let mut buffer = String::new();

        loop {
            match self.next_token()? {
                Token::Text(text) => buffer.push_str(&text),
                Token::End(name) if name == format::LINE_BREAK => buffer.push('\n'),
                Token::End(name) if name == format::TEXT => break,
                Token::Eof => return Err(self.unexpected_eof(format::TEXT)),
                // Start of BR and any unknown markup
                _ => {}
            }
        }

        Ok(clean_text(&buffer).to_string())
    }

    fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(quick_xml::Error::Io(e)) => return Err(Error::io(&e.to_string())),
            Err(e) => {
                return Err(Error::syntax(
                    self.reader.error_position() as u64,
                    &e.to_string(),
                ))
            }
        };
        let position = self.reader.buffer_position() as u64;

        let token = match event {
            Event::Start(start) => Token::Start(start.into_owned()),
            Event::End(end) => Token::End(end.local_name().as_ref().to_vec()),
            Event::Text(text) => Token::Text(normalize_eol(utf8(&text, position)?)),
            Event::CData(data) => Token::Text(normalize_eol(utf8(&data, position)?)),
            Event::GeneralRef(reference) => {
                let name = utf8(&reference, position)?;
                let resolved = resolve_reference(name).ok_or_else(|| {
                    Error::encoding(position, &format!("invalid entity reference &{};", name))
                })?;
                Token::Text(resolved)
            }
            Event::Eof => Token::Eof,
            _ => Token::Other,
        };
        Ok(token)
    }

    /// Value of the first attribute whose local name matches, with references resolved.
    fn attribute(&self, start: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
        let position = self.reader.buffer_position() as u64;

        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::syntax(position, &e.to_string()))?;
            if attr.key.local_name().as_ref() != name {
                continue;
            }
            let raw = normalize_eol(utf8(&attr.value, position)?);
            let value = unescape(&raw).map_err(|e| Error::encoding(position, &e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }

        Ok(None)
    }

    fn unexpected_eof(&self, element: &[u8]) -> Error {
        Error::unexpected_eof(
            self.reader.buffer_position() as u64,
            &String::from_utf8_lossy(element),
        )
    }
}

fn has_name(start: &BytesStart<'_>, name: &[u8]) -> bool {
    start.local_name().as_ref() == name
}

/// Folds `\r\n` and lone `\r` line ends into `\n`.
fn normalize_eol(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::encoding(position, &e.to_string()))
}

/// Resolves `&name;` where `name` is a predefined entity or a character reference.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code)
            .filter(|&c| is_xml_char(c))
            .map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}
