//! Error types for the sa-core crate.
//!
//! This module provides the [`SchemaError`] type for schema-shape errors
//! discovered while building the derived model from a schema snapshot.

/// Errors raised when a schema snapshot is structurally inconsistent.
///
/// These are fatal: the generation run either fully completes or fully
/// fails, so no partial output is produced after a schema-shape error.
///
/// # Examples
///
/// ```
/// use sa_core::SchemaError;
///
/// let error = SchemaError::unknown_column("users", "missing_col");
/// assert!(error.to_string().contains("missing_col"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// An index or foreign key names a column its table does not contain.
    #[error("table '{table}' has no column '{column}'")]
    UnknownColumn {
        /// The table that was searched.
        table: String,
        /// The column name that could not be resolved.
        column: String,
    },

    /// A foreign key declares no local or no referenced columns.
    #[error("foreign key '{name}' on table '{table}' has no column pair")]
    EmptyForeignKey {
        /// The table owning the foreign key.
        table: String,
        /// The foreign key's name.
        name: String,
    },
}

impl SchemaError {
    /// Creates a new [`SchemaError::UnknownColumn`] error.
    #[inline]
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a new [`SchemaError::EmptyForeignKey`] error.
    #[inline]
    pub fn empty_foreign_key(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::EmptyForeignKey {
            table: table.into(),
            name: name.into(),
        }
    }
}
