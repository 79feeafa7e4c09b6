//! Error types for record decoding and JSON encoding.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: Malformed XML reported by the tokenizer, with the byte offset
//! - **Unexpected End of Input**: The document ended while a `record`, `F`, `D` or `T`
//!   element was still open
//! - **Encoding Errors**: Character data or attribute values that are not valid UTF-8,
//!   or entity references that cannot be resolved
//! - **I/O Errors**: Reading the source or writing the output failed
//!
//! Missing or malformed attributes are never errors. A record without a usable
//! `index` keeps the `-1` sentinel and a field without `C`/`L` keeps empty strings.
//!
//! ## Examples
//!
//! ```rust
//! use record_xml::{from_str, Error};
//!
//! let result = from_str("<record index=\"1\"><F><T>cut short");
//! assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding records or encoding them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed XML reported by the tokenizer
    #[error("Syntax error at byte {position}: {msg}")]
    Syntax { position: u64, msg: String },

    /// The document ended inside an open element
    #[error("Unexpected end of input at byte {position}: <{element}> is not closed")]
    UnexpectedEof { position: u64, element: String },

    /// Invalid UTF-8 or an entity reference that cannot be resolved
    #[error("Encoding error at byte {position}: {msg}")]
    Encoding { position: u64, msg: String },

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_xml::Error;
    ///
    /// let err = Error::syntax(12, "unclosed tag");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn syntax(position: u64, msg: &str) -> Self {
        Error::Syntax {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error naming the element left open.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_xml::Error;
    ///
    /// let err = Error::unexpected_eof(40, "F");
    /// assert!(err.to_string().contains("<F> is not closed"));
    /// ```
    pub fn unexpected_eof(position: u64, element: &str) -> Self {
        Error::UnexpectedEof {
            position,
            element: element.to_string(),
        }
    }

    /// Creates an encoding error for undecodable character data.
    pub fn encoding(position: u64, msg: &str) -> Self {
        Error::Encoding {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates a JSON error.
    pub fn json<T: fmt::Display>(msg: T) -> Self {
        Error::Json(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else {
            Error::Json(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
