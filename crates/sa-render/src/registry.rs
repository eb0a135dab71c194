//! SQL column type resolution and import tracking.
//!
//! [`TypeRegistry`] turns a raw schema type (`VARCHAR(45)`, `INT`,
//! `DECIMAL(10,2)`) into the rendered type expression used in a `Column`
//! line, and remembers which distinct type names the run has used so the
//! exporter can emit the two import families:
//!
//! - **native**: the dialect type names, imported from
//!   `sqlalchemy.dialects.mysql`
//! - **portable**: the generic names, imported from `sqlalchemy` with an
//!   `as NATIVE` alias so the generated column code reads identically under
//!   either family
//!
//! One registry instance is created per generation run; its sets grow
//! monotonically and are never shared across runs.

use sa_core::{FxHashSet, SchemaColumn};

use crate::{Attribute, TypeError};

/// The fixed vocabulary of supported database types.
const SUPPORTED_TYPES: &[&str] = &[
    "BIGINT",
    "BINARY",
    "BIT",
    "BLOB",
    "BOOLEAN",
    "CHAR",
    "DATE",
    "DATETIME",
    "DECIMAL",
    "DOUBLE",
    "ENUM",
    "FLOAT",
    "INTEGER",
    "LONGBLOB",
    "LONGTEXT",
    "MEDIUMBLOB",
    "MEDIUMINT",
    "MEDIUMTEXT",
    "NCHAR",
    "NVARCHAR",
    "REAL",
    "SET",
    "SMALLINT",
    "TEXT",
    "TIME",
    "TIMESTAMP",
    "TINYBLOB",
    "TINYINT",
    "TINYTEXT",
    "VARBINARY",
    "VARCHAR",
    "YEAR",
];

/// Types whose rendered expression drops the size and may take
/// `unsigned=True`.
const INTEGER_FAMILY: &[&str] = &["TINYINT", "SMALLINT", "MEDIUMINT", "INTEGER", "BIGINT"];

/// Stateful mapping from raw schema types to rendered type expressions.
///
/// # Examples
///
/// ```
/// use sa_core::SchemaColumn;
/// use sa_render::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// let column = SchemaColumn {
///     name: "name".to_owned(),
///     formatted_type: "VARCHAR(45)".to_owned(),
///     ..SchemaColumn::default()
/// };
/// assert_eq!(registry.resolve(&column).unwrap(), "VARCHAR(45)");
/// assert_eq!(registry.native_types(), vec!["VARCHAR".to_owned()]);
/// assert_eq!(registry.portable_types(), vec!["String as VARCHAR".to_owned()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    native: FxHashSet<String>,
    portable: FxHashSet<String>,
}

impl TypeRegistry {
    /// Creates an empty registry for a fresh generation run.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a column's raw type into its rendered type expression.
    ///
    /// The base token and optional size are split from the formatted type;
    /// the provider's raw type tag forces boolean-modeled columns (such as
    /// `TINYINT(1)` tagged `BOOL`) to `BOOLEAN`; irregular spellings are
    /// normalized (`INT` to `INTEGER`). The distinct base token is recorded
    /// in both usage sets.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Unsupported`] when the base token is not in the
    /// supported vocabulary. This aborts the whole run.
    pub fn resolve(&mut self, column: &SchemaColumn) -> Result<String, TypeError> {
        let (base, size) = split_type(&column.formatted_type);
        let mut base = base.to_ascii_uppercase();
        let mut size = size;

        // Boolean-modeled columns carry a BOOL raw tag over a sized integer
        // formatted type; the tag wins and the size is dropped.
        let (raw_tag, _) = split_type(&column.raw_type);
        if raw_tag.eq_ignore_ascii_case("BOOL") || raw_tag.eq_ignore_ascii_case("BOOLEAN") {
            base = "BOOLEAN".to_owned();
            size = None;
        }

        let base = normalize_base(&base);
        if !SUPPORTED_TYPES.contains(&base.as_str()) {
            return Err(TypeError::unsupported(column.name.as_str(), base));
        }

        self.native.insert(base.clone());
        self.portable.insert(portable_entry(&base));

        let mut expr = Attribute::call(base.as_str());
        let is_integer = INTEGER_FAMILY.contains(&base.as_str());
        if is_integer && column.is_unsigned() {
            expr.push_kwarg("unsigned", "True");
        }
        if let Some(size) = size {
            if !is_integer {
                expr.push_arg(size);
            }
        }
        Ok(expr.condensed())
    }

    /// The distinct native type tokens used so far, sorted.
    #[must_use]
    pub fn native_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.native.iter().cloned().collect();
        types.sort();
        types
    }

    /// The distinct portable import entries used so far, sorted.
    ///
    /// Entries carry an `as NATIVE` alias where the portable name differs
    /// from the native token (`String as VARCHAR`); the integer family is
    /// recorded under its plain native token.
    #[must_use]
    pub fn portable_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.portable.iter().cloned().collect();
        types.sort();
        types
    }

    /// Returns `true` if no types have been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.native.is_empty()
    }
}

/// Splits a formatted type into its base token and optional size text.
///
/// `VARCHAR(45)` yields `("VARCHAR", Some("45"))`; `DECIMAL(10,2)` keeps the
/// full size text; a bare `INT` has no size.
fn split_type(formatted: &str) -> (&str, Option<String>) {
    let formatted = formatted.trim();
    let Some((head, rest)) = formatted.split_once('(') else {
        return (first_word(formatted), None);
    };
    let size = rest.trim_end().trim_end_matches(')').trim();
    let size = if size.is_empty() {
        None
    } else {
        Some(size.to_owned())
    };
    (first_word(head), size)
}

fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// Normalizes irregular base-token spellings.
fn normalize_base(base: &str) -> String {
    match base {
        "INT" => "INTEGER".to_owned(),
        "BOOL" => "BOOLEAN".to_owned(),
        "NUMERIC" => "DECIMAL".to_owned(),
        other => other.to_owned(),
    }
}

/// The portable (generic) type name for a native base token.
fn portable_name(base: &str) -> &'static str {
    match base {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INTEGER" | "BIGINT" | "BIT" | "YEAR" => "Integer",
        "VARCHAR" | "CHAR" | "NCHAR" | "NVARCHAR" | "SET" => "String",
        "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" => "Text",
        "TIMESTAMP" | "DATETIME" => "DateTime",
        "DATE" => "Date",
        "TIME" => "Time",
        "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => "Binary",
        "DECIMAL" => "Numeric",
        "DOUBLE" | "FLOAT" | "REAL" => "Float",
        "BOOLEAN" => "Boolean",
        "ENUM" => "Enum",
        _ => "String",
    }
}

/// The import entry recorded for the portable family.
fn portable_entry(base: &str) -> String {
    let portable = portable_name(base);
    if portable == "Integer" {
        base.to_owned()
    } else {
        format!("{portable} as {base}")
    }
}
