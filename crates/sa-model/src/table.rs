//! The derived per-table model.
//!
//! [`TableModel`] classifies a table's indices, builds one [`ColumnModel`]
//! per column, wires single-column foreign keys to their columns, derives
//! relationship lines, and renders the whole class block. Composite
//! `UNIQUE`/`INDEX` indices become table-level constraint expressions;
//! composite foreign keys are unsupported and render as a suppression
//! comment instead.

use std::fmt;

use sa_core::config::DEFAULT_INDENT;
use sa_core::naming::{camelize, quote, singularize};
use sa_core::options::keys;
use sa_core::{FxHashMap, FxHashSet, IndexKind, SchemaError, SchemaTable};
use sa_render::Attribute;
use tracing::{debug, warn};

use crate::{ColumnFlags, ColumnModel, GenContext, GenerateError};

/// The derived model of one schema table.
///
/// Built once per generation run; rendering is pure.
///
/// # Examples
///
/// ```
/// use sa_core::{GenConfig, SchemaTable};
/// use sa_model::{GenContext, TableModel};
///
/// let table = SchemaTable {
///     name: "users".to_owned(),
///     ..SchemaTable::default()
/// };
/// let mut ctx = GenContext::new(GenConfig::default());
/// let model = TableModel::build(&table, None, &mut ctx)?;
/// assert!(model.to_string().starts_with("class User(Base):"));
/// # Ok::<(), sa_model::GenerateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableModel {
    table_name: String,
    class_name: String,
    bases: Vec<String>,
    is_abstract: bool,
    suppressed: Vec<String>,
    table_args: Option<String>,
    columns: Vec<ColumnModel>,
    relationship_lines: Vec<String>,
    to_print: Vec<String>,
}

impl TableModel {
    /// Builds the table model from the schema table and the run context.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] when a column type cannot be resolved or
    /// when an index/foreign key names a column the table does not contain.
    pub fn build(
        table: &SchemaTable,
        schema_default_charset: Option<&str>,
        ctx: &mut GenContext,
    ) -> Result<Self, GenerateError> {
        debug!(table = %table.name, "building table model");

        // Classify indices: composite UNIQUE/INDEX become table-level
        // constraints, their members are excluded from per-column flags.
        let mut primary_cols: Vec<String> = Vec::new();
        let mut unique_single: FxHashSet<String> = FxHashSet::default();
        let mut index_single: FxHashSet<String> = FxHashSet::default();
        let mut constraints: Vec<String> = Vec::new();

        for index in &table.indices {
            for member in &index.columns {
                if table.column(member).is_none() {
                    return Err(
                        SchemaError::unknown_column(table.name.as_str(), member.as_str()).into()
                    );
                }
            }
            match index.kind {
                IndexKind::Primary => {
                    primary_cols.extend(index.columns.iter().cloned());
                }
                IndexKind::Unique if index.is_composite() => {
                    ctx.uses_unique_constraint = true;
                    constraints.push(constraint_expr("UniqueConstraint", index.columns.as_slice(), &index.name));
                }
                IndexKind::Unique => {
                    unique_single.extend(index.columns.iter().cloned());
                }
                IndexKind::Index if index.is_composite() => {
                    ctx.uses_index_constraint = true;
                    constraints.push(constraint_expr("Index", index.columns.as_slice(), &index.name));
                }
                IndexKind::Index => {
                    index_single.extend(index.columns.iter().cloned());
                }
                _ => {}
            }
        }

        let options = table.options();
        let is_abstract = options.is_true(keys::ABSTRACT);
        let base = if is_abstract { "object" } else { "Base" };
        let mut bases = vec![base.to_owned()];
        for mixin in options.list(keys::MIXINS) {
            ctx.add_mixin(mixin.clone());
            bases.push(mixin);
        }

        let table_args = render_table_args(table, schema_default_charset, &constraints, ctx);

        // Build one column model per schema column, in schema order.
        let sole_primary = primary_cols.len() == 1;
        let mut columns = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let primary = primary_cols.contains(&column.name);
            let flags = ColumnFlags {
                primary,
                sole_primary: primary && sole_primary,
                unique: unique_single.contains(&column.name),
                indexed: index_single.contains(&column.name),
            };
            columns.push(ColumnModel::build(column, &table.name, flags, ctx)?);
        }

        // Attach single-column foreign keys; composite keys are skipped
        // with a visible comment.
        let mut suppressed = Vec::new();
        for fk in &table.foreign_keys {
            if fk.columns.is_empty() || fk.referenced_columns.is_empty() {
                return Err(
                    SchemaError::empty_foreign_key(table.name.as_str(), fk.name.as_str()).into()
                );
            }
            if fk.is_composite() {
                warn!(table = %table.name, foreign_key = %fk.name, "skipping composite foreign key");
                suppressed.push(format!(
                    "{DEFAULT_INDENT}# skipped foreign key {}: composite keys are not supported",
                    fk.name
                ));
                continue;
            }
            let local = &fk.columns[0];
            let column = columns
                .iter_mut()
                .find(|c| c.schema_name() == local.as_str())
                .ok_or_else(|| SchemaError::unknown_column(table.name.as_str(), local.as_str()))?;
            column.attach_foreign_key(fk, ctx);
        }

        // Derive relationship lines, flagging accessor name collisions.
        let mut relationship_lines = Vec::new();
        if !options.is_true(keys::NORELATIONS) {
            let mut seen: FxHashMap<String, usize> = FxHashMap::default();
            for column in &columns {
                if let Some(accessor) = column.relation_accessor() {
                    *seen.entry(accessor).or_insert(0) += 1;
                }
                if let Some(line) = column.backref(ctx) {
                    relationship_lines.push(line);
                }
            }
            for (accessor, count) in &seen {
                if *count > 1 {
                    warn!(
                        table = %table.name,
                        accessor = %accessor,
                        "relationship accessor name collision; generated code will not compile"
                    );
                }
            }
        }

        let to_print = columns
            .iter()
            .filter(|c| c.to_print())
            .map(|c| c.rendered_name().to_owned())
            .collect();

        Ok(Self {
            table_name: table.name.clone(),
            class_name: camelize(&singularize(&table.name)),
            bases,
            is_abstract,
            suppressed,
            table_args,
            columns,
            relationship_lines,
            to_print,
        })
    }

    /// The generated class name (singularized, camel-cased table name).
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The column models, in schema order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnModel] {
        &self.columns
    }
}

impl fmt::Display for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class {}({}):", self.class_name, self.bases.join(", "))?;
        for line in &self.suppressed {
            writeln!(f, "{line}")?;
        }
        if !self.is_abstract {
            writeln!(f, "{DEFAULT_INDENT}__tablename__ = '{}'", self.table_name)?;
        }
        if let Some(args) = &self.table_args {
            writeln!(f, "{args}")?;
        }

        if !self.columns.is_empty() {
            writeln!(f)?;
            for column in &self.columns {
                writeln!(f, "{column}")?;
            }
        }

        if !self.relationship_lines.is_empty() {
            writeln!(f)?;
            for line in &self.relationship_lines {
                writeln!(f, "{line}")?;
            }
        }

        let fields = self
            .to_print
            .iter()
            .map(|name| format!("%({name})s"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f)?;
        writeln!(f, "{DEFAULT_INDENT}def __repr__(self):")?;
        writeln!(f, "{DEFAULT_INDENT}{DEFAULT_INDENT}return self.__str__()")?;
        writeln!(f)?;
        writeln!(f, "{DEFAULT_INDENT}def __str__(self):")?;
        write!(
            f,
            "{DEFAULT_INDENT}{DEFAULT_INDENT}return '<{} {}>' % self.__dict__",
            self.class_name, fields
        )
    }
}

/// Renders a composite constraint expression.
fn constraint_expr(callee: &str, columns: &[String], name: &str) -> String {
    let mut expr = Attribute::call(callee);
    for column in columns {
        expr.push_arg(quote(column));
    }
    expr.push_kwarg("name", quote(name));
    expr.condensed()
}

/// Renders the `__table_args__` block, or `None` when there is nothing to
/// say about the table.
fn render_table_args(
    table: &SchemaTable,
    schema_default_charset: Option<&str>,
    constraints: &[String],
    ctx: &GenContext,
) -> Option<String> {
    let mut entries: Vec<(&str, String)> = Vec::new();
    if let Some(engine) = &table.engine {
        entries.push(("mysql_engine", format!("'{engine}'")));
    }
    if let Some(charset) = table.effective_charset(schema_default_charset) {
        entries.push(("mysql_charset", format!("'{charset}'")));
    }
    if table.has_auto_increment() {
        entries.push(("sqlite_autoincrement", "True".to_owned()));
    }

    if constraints.is_empty() && entries.is_empty() {
        return None;
    }

    let mut args = Attribute::tuple("__table_args__");
    args.set_tab(DEFAULT_INDENT);
    args.set_extended();
    args.set_max_width(ctx.config.max_width);
    for constraint in constraints {
        args.push_arg(constraint.as_str());
    }
    if !entries.is_empty() {
        let dict = entries
            .iter()
            .map(|(key, value)| format!("'{key}': {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        args.push_arg(format!("{{{dict}}}"));
    }
    Some(args.render())
}
