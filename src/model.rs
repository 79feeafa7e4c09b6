//! The decoded record model.
//!
//! A document decodes into a `Vec<Record>`. Each [`Record`] owns its [`Field`]s in
//! declaration order and each field owns its content strings in document order.
//!
//! Both types serialize with the member names used by the JSON output
//! (`Field`, `Index`, `Content`, `Code`, `Name`) and deserialize from the same
//! shape, so the JSON emitted by this crate can be read back.
//!
//! ```rust
//! use record_xml::from_str;
//!
//! let records = from_str(r#"<record index="2"><F C="ID"><T>x</T></F></record>"#).unwrap();
//! assert_eq!(records[0].index(), Some(2));
//! assert_eq!(records[0].fields()[0].code(), "ID");
//! ```

use crate::format::NO_INDEX;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `record` element: its fields and its declared ordinal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Field", default)]
    pub fields: Vec<Field>,
    /// Declared ordinal, or [`NO_INDEX`] when the attribute is missing or malformed.
    #[serde(rename = "Index", default = "no_index")]
    pub index: i64,
}

fn no_index() -> i64 {
    NO_INDEX
}

impl Default for Record {
    fn default() -> Self {
        Record {
            fields: Vec::new(),
            index: NO_INDEX,
        }
    }
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The declared index, or `None` for the sentinel.
    #[must_use]
    pub fn index(&self) -> Option<i64> {
        (self.index != NO_INDEX).then_some(self.index)
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn push(&mut self, field: Field) {
        self.fields.push(field);
    }
}

/// Summary listing in the form
///
/// ```text
/// 3: 1 fields
///   code: AB, name: Title
///     - Hello
/// ```
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} fields", self.index, self.fields.len())?;
        for field in &self.fields {
            writeln!(f, "  code: {}, name: {}", field.code, field.name)?;
            for item in &field.content {
                writeln!(f, "    - {}", item)?;
            }
        }
        Ok(())
    }
}

/// One `F` element: its content items plus code and label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "Content", default)]
    pub content: Vec<String>,
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl Field {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn add(&mut self, item: String) {
        self.content.push(item);
    }

    pub(crate) fn add_all(&mut self, items: Vec<String>) {
        self.content.extend(items);
    }
}
