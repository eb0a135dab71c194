//! Foreign keys and referential actions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The no-op referential action sentinel.
///
/// A rule equal to this value is omitted from the rendered foreign key.
pub const NO_ACTION: &str = "NO ACTION";

fn no_action() -> String {
    NO_ACTION.to_owned()
}

/// One foreign key of a schema table.
///
/// Local and referenced columns are paired by position. Only single-column
/// foreign keys are supported by the generator; composite keys are detected
/// and skipped with a diagnostic comment.
///
/// # Examples
///
/// ```
/// use sa_core::SchemaForeignKey;
/// use smallvec::smallvec;
///
/// let fk = SchemaForeignKey {
///     name: "fk_orders_users".to_owned(),
///     columns: smallvec!["user_id".to_owned()],
///     referenced_table: "users".to_owned(),
///     referenced_columns: smallvec!["id".to_owned()],
///     delete_rule: "NO ACTION".to_owned(),
///     update_rule: "SET NULL".to_owned(),
/// };
/// assert!(!fk.is_composite());
/// assert!(!fk.has_delete_action());
/// assert!(fk.has_update_action());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaForeignKey {
    /// The foreign key's name.
    pub name: String,

    /// Ordered local column names.
    #[serde(default)]
    pub columns: SmallVec<[String; 2]>,

    /// Name of the referenced table.
    pub referenced_table: String,

    /// Ordered referenced column names, paired with `columns` by position.
    #[serde(default)]
    pub referenced_columns: SmallVec<[String; 2]>,

    /// Referential action on delete (`NO ACTION` is the no-op sentinel).
    #[serde(default = "no_action")]
    pub delete_rule: String,

    /// Referential action on update (`NO ACTION` is the no-op sentinel).
    #[serde(default = "no_action")]
    pub update_rule: String,
}

impl SchemaForeignKey {
    /// Returns `true` if the key spans more than one column on either side.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1 || self.referenced_columns.len() > 1
    }

    /// Returns `true` if the delete rule is a real action (not the sentinel).
    #[must_use]
    pub fn has_delete_action(&self) -> bool {
        has_action(&self.delete_rule)
    }

    /// Returns `true` if the update rule is a real action (not the sentinel).
    #[must_use]
    pub fn has_update_action(&self) -> bool {
        has_action(&self.update_rule)
    }
}

fn has_action(rule: &str) -> bool {
    let rule = rule.trim();
    !rule.is_empty() && !rule.eq_ignore_ascii_case(NO_ACTION)
}
