//! Tables and their ordered members.

use serde::{Deserialize, Serialize};

use super::{SchemaColumn, SchemaForeignKey, SchemaIndex};
use crate::Options;

/// One table of the schema snapshot.
///
/// Columns, indices, and foreign keys keep the order supplied by the schema
/// provider; that order is part of the generator's output contract.
///
/// # Examples
///
/// ```
/// use sa_core::SchemaTable;
///
/// let table = SchemaTable {
///     name: "user_roles".to_owned(),
///     comment: "mixins=AuditMixin".to_owned(),
///     ..SchemaTable::default()
/// };
/// assert_eq!(table.options().list("mixins"), vec!["AuditMixin".to_owned()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaTable {
    /// The table name as declared in the schema.
    pub name: String,

    /// Free-text comment, possibly carrying `key=value;` annotations.
    pub comment: String,

    /// Storage engine name, if the model declares one.
    pub engine: Option<String>,

    /// Table character set; falls back to the schema default when absent.
    pub charset: Option<String>,

    /// Ordered columns.
    pub columns: Vec<SchemaColumn>,

    /// Ordered indices.
    pub indices: Vec<SchemaIndex>,

    /// Ordered foreign keys.
    pub foreign_keys: Vec<SchemaForeignKey>,
}

impl SchemaTable {
    /// Returns the table's character set, or the schema default when the
    /// table declares none.
    #[must_use]
    pub fn effective_charset<'a>(&'a self, schema_default: Option<&'a str>) -> Option<&'a str> {
        self.charset.as_deref().or(schema_default)
    }

    /// Looks up a column by schema name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Parses the annotation options embedded in the table comment.
    #[must_use]
    pub fn options(&self) -> Options {
        Options::parse(&self.comment)
    }

    /// Returns `true` if any column auto-increments.
    #[must_use]
    pub fn has_auto_increment(&self) -> bool {
        self.columns.iter().any(|c| c.auto_increment)
    }
}
