//! The `key=value` annotation grammar embedded in schema comments.
//!
//! Any schema object (table or column) may carry generator directives in its
//! free-text comment field, written as `;`-delimited `key=value` pairs:
//!
//! ```text
//! alias=owner;relation=False;backrefname=ownedItems
//! ```
//!
//! [`Options::parse`] parses the whole comment once into a map. Tokens that do
//! not contain exactly one `=` are dropped silently - a comment that is plain
//! prose simply yields no options. Unknown keys are retained but never read.
//!
//! # Recognized keys
//!
//! Column-level: [`keys::ALIAS`], [`keys::TOPRINT`], [`keys::FKNAME`],
//! [`keys::RELATION`], [`keys::BACKREF`], [`keys::BACKREFNAME`],
//! [`keys::BACKREFUSELIST`], [`keys::USELIST`], [`keys::REMOTE_SIDE`],
//! [`keys::USE_ALTER`].
//!
//! Table-level: [`keys::MIXINS`], [`keys::ABSTRACT`], [`keys::NORELATIONS`].

use crate::FxHashMap;

/// Names of the annotation keys read by the generator.
///
/// Callers query [`Options`] through these constants rather than string
/// literals scattered across components.
pub mod keys {
    /// Rename the generated attribute for a column.
    pub const ALIAS: &str = "alias";
    /// Force a column in or out of the textual-representation field list.
    pub const TOPRINT: &str = "toprint";
    /// Override the derived relationship accessor name.
    pub const FKNAME: &str = "fkname";
    /// `False` suppresses the relationship line for a foreign key column.
    pub const RELATION: &str = "relation";
    /// `False` suppresses the backref keyword on a relationship.
    pub const BACKREF: &str = "backref";
    /// Override the derived backref name.
    pub const BACKREFNAME: &str = "backrefname";
    /// `False` wraps the backref in a `backref(..., uselist=False)` call.
    pub const BACKREFUSELIST: &str = "backrefuselist";
    /// `False` adds `uselist=False` to the relationship itself.
    pub const USELIST: &str = "uselist";
    /// Value is forwarded as `remote_side=[...]` on the relationship.
    pub const REMOTE_SIDE: &str = "remote_side";
    /// `True` adds `use_alter=True` to the foreign key.
    pub const USE_ALTER: &str = "use_alter";
    /// Comma-separated mixin class names added to a table's base list.
    pub const MIXINS: &str = "mixins";
    /// `True` makes the class abstract (plain-object base, no table binding).
    pub const ABSTRACT: &str = "abstract";
    /// `True` suppresses all relationship lines for a table.
    pub const NORELATIONS: &str = "norelations";
}

/// Parsed annotation options for one schema object.
///
/// # Examples
///
/// ```
/// use sa_core::Options;
///
/// let options = Options::parse("alias=owner;relation=False;broken token");
/// assert_eq!(options.get("alias"), Some("owner"));
/// assert!(options.is_false("relation"));
/// assert_eq!(options.get("broken token"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: FxHashMap<String, String>,
}

impl Options {
    /// Parses a comment string into options.
    ///
    /// Splits on `;`, keeps tokens containing exactly one `=`, and splits
    /// each kept token into a trimmed key/value pair. Malformed tokens are
    /// dropped without error; an empty or prose-only comment yields an empty
    /// option set.
    #[must_use]
    pub fn parse(comment: &str) -> Self {
        let mut values = FxHashMap::default();
        for token in comment.split(';') {
            if token.matches('=').count() != 1 {
                continue;
            }
            if let Some((key, value)) = token.split_once('=') {
                let key = key.trim();
                if !key.is_empty() {
                    values.insert(key.to_owned(), value.trim().to_owned());
                }
            }
        }
        Self { values }
    }

    /// Returns the raw value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if the key is present with the value `True`
    /// (case-insensitive).
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Returns `true` if the key is present with the value `False`
    /// (case-insensitive).
    #[must_use]
    pub fn is_false(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("false"))
    }

    /// Returns `true` if the key is present with any value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns a comma-separated value as a list of trimmed entries.
    ///
    /// Missing keys and empty entries yield an empty list.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `true` if no options were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
