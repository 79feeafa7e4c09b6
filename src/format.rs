//! Record XML format
//!
//! This module documents the XML record format understood by the decoder and
//! holds the element names and cleaning rules shared by its readers.
//!
//! # Overview
//!
//! A document is any XML tree containing `record` elements. Each record holds
//! fields (`F`), and each field holds text nodes (`T`) and data blocks (`D`).
//! Everything else in the document is skipped.
//!
//! ```text
//! <root>
//!   <record index="N">
//!     <F C="code" L="label">
//!       <T>text<BR/>more text</T>
//!       <D><T>item1</T>TEXT_ITEM2</D>
//!     </F>
//!   </record>
//! </root>
//! ```
//!
//! # Elements
//!
//! | Element | Attributes | Content |
//! |---------|------------|---------|
//! | `record` | `index` (integer, optional) | `F` elements |
//! | `F` | `C` code, `L` label (both optional) | `T` and `D` elements |
//! | `D` | none | `T` elements and bare character data |
//! | `T` | none | character data and `BR` line breaks |
//! | `BR` | none | empty |
//!
//! Element names are matched on their local part, so a namespace prefix such
//! as `<x:record>` is accepted.
//!
//! # Text cleaning
//!
//! A `T` element yields its character data in document order with every
//! `BR` element replaced by one `\n`. Both `<BR/>` and `<BR></BR>` produce a
//! single newline. The result is then trimmed at both ends of any run of:
//!
//! ```text
//! ' '  '\n'  '.'  '('  ')'  ';'  ','
//! ```
//!
//! Interior characters are never touched, and a text node that is empty after
//! trimming contributes nothing to its field.
//!
//! Bare character data inside a `D` element is kept verbatim, without
//! trimming.
//!
//! # Record index
//!
//! The `index` attribute is trimmed of spaces and periods at both ends and
//! parsed as a signed integer, so `" 12."` reads as `12`. A missing or
//! unparsable index leaves the record at [`NO_INDEX`].

/// Local name of a record element.
pub const RECORD: &[u8] = b"record";
/// Local name of a field element.
pub const FIELD: &[u8] = b"F";
/// Local name of a text node.
pub const TEXT: &[u8] = b"T";
/// Local name of a data block.
pub const DATA: &[u8] = b"D";
/// Local name of a line break inside a text node.
pub const LINE_BREAK: &[u8] = b"BR";

/// Record attribute holding the ordinal.
pub const INDEX_ATTR: &[u8] = b"index";
/// Field attribute holding the short code.
pub const CODE_ATTR: &[u8] = b"C";
/// Field attribute holding the human label.
pub const LABEL_ATTR: &[u8] = b"L";

/// Index of a record whose `index` attribute is absent or malformed.
pub const NO_INDEX: i64 = -1;

/// Characters stripped from both ends of a text node.
pub const TEXT_TRIM_CHARS: &[char] = &[' ', '\n', '.', '(', ')', ';', ','];

const INDEX_TRIM_CHARS: &[char] = &[' ', '.'];

/// Trims [`TEXT_TRIM_CHARS`] from both ends of `text`.
///
/// Cleaning is idempotent: cleaning an already clean string returns it unchanged.
///
/// # Examples
///
/// ```rust
/// use record_xml::format::clean_text;
///
/// assert_eq!(clean_text(" (Hello\nWorld.); "), "Hello\nWorld");
/// assert_eq!(clean_text("..,;"), "");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> &str {
    text.trim_matches(TEXT_TRIM_CHARS)
}

/// Parses a raw `index` attribute value.
///
/// Returns `None` when the trimmed value is not an integer.
///
/// # Examples
///
/// ```rust
/// use record_xml::format::parse_index;
///
/// assert_eq!(parse_index(" 42. "), Some(42));
/// assert_eq!(parse_index("-3"), Some(-3));
/// assert_eq!(parse_index("4 2"), None);
/// ```
#[must_use]
pub fn parse_index(raw: &str) -> Option<i64> {
    raw.trim_matches(INDEX_TRIM_CHARS).parse().ok()
}
