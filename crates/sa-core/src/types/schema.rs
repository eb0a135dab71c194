//! The root schema snapshot document.

use serde::{Deserialize, Serialize};

use super::SchemaTable;

/// A full relational-schema snapshot, as read from the schema provider.
///
/// This is the single input of a generation run. Tables keep provider order;
/// the generated source renders one class block per table in that order.
///
/// # Examples
///
/// ```
/// use sa_core::Schema;
///
/// let schema = Schema::from_json(r#"{
///     "name": "mydb",
///     "default_charset": "utf8",
///     "tables": [{"name": "users"}]
/// }"#).unwrap();
/// assert_eq!(schema.tables.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// The schema (database) name.
    pub name: String,

    /// Default character set inherited by tables that declare none.
    pub default_charset: Option<String>,

    /// Ordered tables.
    pub tables: Vec<SchemaTable>,
}

impl Schema {
    /// Parses a schema snapshot from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error when the document does
    /// not match the snapshot shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
