//! Index kinds and member lists.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The kind of a schema index.
///
/// # Examples
///
/// ```
/// use sa_core::IndexKind;
///
/// assert!(IndexKind::Primary.is_primary());
/// assert_eq!(IndexKind::Unique.label(), "UNIQUE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IndexKind {
    /// Primary key index.
    Primary,

    /// Unique constraint index.
    Unique,

    /// Plain lookup index.
    Index,
}

impl IndexKind {
    /// Returns `true` for the primary key kind.
    #[inline]
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }

    /// Returns the SQL-style label for this kind.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
            Self::Index => "INDEX",
        }
    }
}

/// One index of a schema table.
///
/// Members are column names in index order; the named columns must exist on
/// the owning table (resolved, and validated, by the table model).
///
/// # Examples
///
/// ```
/// use sa_core::{IndexKind, SchemaIndex};
/// use smallvec::smallvec;
///
/// let index = SchemaIndex {
///     name: "uq_user_email".to_owned(),
///     kind: IndexKind::Unique,
///     columns: smallvec!["email".to_owned()],
/// };
/// assert!(!index.is_composite());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIndex {
    /// The index name.
    pub name: String,

    /// The index kind.
    pub kind: IndexKind,

    /// Ordered member column names.
    #[serde(default)]
    pub columns: SmallVec<[String; 4]>,
}

impl SchemaIndex {
    /// Returns `true` if the index spans more than one column.
    ///
    /// Composite `UNIQUE`/`INDEX` indices are rendered as table-level
    /// constraints instead of per-column feature flags.
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}
