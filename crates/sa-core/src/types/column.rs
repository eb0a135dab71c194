//! Column facts from the schema snapshot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Options;

/// One column of a schema table, as exported by the schema provider.
///
/// The column carries both the formatted type as written in the model
/// (`VARCHAR(45)`) and the provider's normalized raw type tag (`BOOL` for a
/// column modeled as `TINYINT(1)`), plus the nullability/autoincrement facts
/// and the free-text comment that may embed generator annotations.
///
/// # Examples
///
/// ```
/// use sa_core::SchemaColumn;
///
/// let column = SchemaColumn {
///     name: "name".to_owned(),
///     formatted_type: "VARCHAR(45)".to_owned(),
///     raw_type: "VARCHAR".to_owned(),
///     not_null: true,
///     auto_increment: false,
///     default_value: None,
///     comment: "alias=displayName".to_owned(),
///     flags: Default::default(),
/// };
/// assert_eq!(column.options().get("alias"), Some("displayName"));
/// assert!(!column.is_unsigned());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaColumn {
    /// The column name as declared in the schema.
    pub name: String,

    /// Formatted type string with optional size, e.g. `VARCHAR(45)`.
    pub formatted_type: String,

    /// Normalized raw type tag, e.g. `BOOL` for boolean-modeled columns.
    pub raw_type: String,

    /// Whether the column is declared `NOT NULL`.
    pub not_null: bool,

    /// Whether the column auto-increments.
    pub auto_increment: bool,

    /// Literal default value, if one is declared.
    ///
    /// May embed an `ON UPDATE` clause the way MySQL exports timestamp
    /// defaults, e.g. `CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP`.
    pub default_value: Option<String>,

    /// Free-text comment, possibly carrying `key=value;` annotations.
    pub comment: String,

    /// Type flags such as `UNSIGNED`.
    pub flags: SmallVec<[String; 2]>,
}

impl Default for SchemaColumn {
    fn default() -> Self {
        Self {
            name: String::new(),
            formatted_type: String::new(),
            raw_type: String::new(),
            not_null: false,
            auto_increment: false,
            default_value: None,
            comment: String::new(),
            flags: SmallVec::new(),
        }
    }
}

impl SchemaColumn {
    /// Returns `true` if the column carries the `UNSIGNED` type flag.
    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case("UNSIGNED"))
    }

    /// Parses the annotation options embedded in the column comment.
    #[must_use]
    pub fn options(&self) -> Options {
        Options::parse(&self.comment)
    }

    /// Returns the declared default value, treating empty strings as absent.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
