//! Configuration options for JSON output.
//!
//! ## Examples
//!
//! ```rust
//! use record_xml::{from_str, to_string_with_options, JsonOptions};
//!
//! let records = from_str(r#"<record index="1"><F><T>x</T></F></record>"#).unwrap();
//!
//! // Two-space indentation, no trailing newline
//! let options = JsonOptions::new().with_indent(2).with_trailing_newline(false);
//! let json = to_string_with_options(&records, &options).unwrap();
//! assert!(json.starts_with("[\n  {"));
//! ```

/// Configuration options for JSON output.
///
/// The defaults reproduce the reference layout: pretty-printed with four spaces
/// per level and a final newline.
///
/// # Examples
///
/// ```rust
/// use record_xml::JsonOptions;
///
/// let options = JsonOptions::new();
/// assert_eq!(options.indent, 4);
/// assert!(options.pretty);
///
/// let options = JsonOptions::compact();
/// assert!(!options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonOptions {
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
    pub pretty: bool,
    pub trailing_newline: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            indent: 4,
            pretty: true,
            trailing_newline: true,
        }
    }
}

impl JsonOptions {
    /// Creates default options (pretty, 4-space indent, trailing newline).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for single-line output.
    #[must_use]
    pub fn compact() -> Self {
        JsonOptions {
            pretty: false,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}
