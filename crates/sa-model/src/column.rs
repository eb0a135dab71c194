//! The derived per-column model.
//!
//! [`ColumnModel`] resolves a schema column into its rendered identity
//! (name, type expression, feature keywords, attached foreign key) using the
//! facts supplied by the owning table model plus the column's own annotation
//! options. It renders the `Column(...)` line and, when a foreign key is
//! attached, the derived `relationship(...)` accessor line.

use std::fmt;

use sa_core::config::DEFAULT_INDENT;
use sa_core::naming::{camelize, functionalize, quote, singularize};
use sa_core::options::keys;
use sa_core::{Options, SchemaColumn, SchemaForeignKey};
use sa_render::{Attribute, TypeError};

use crate::GenContext;

/// The SQL sentinel translated into a `func.now()` reference.
const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Index-derived facts about a column, classified by the owning table.
///
/// Members of composite unique/index constraints arrive with the
/// corresponding flag cleared; those constraints render at table level
/// instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    /// The column is part of the table's primary key.
    pub primary: bool,

    /// The column is the table's *only* primary-key column.
    pub sole_primary: bool,

    /// The column has a single-column unique constraint.
    pub unique: bool,

    /// The column has a single-column index.
    pub indexed: bool,
}

/// An ordered `key=value` feature map with replace-on-set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Features(Vec<(String, String)>);

impl Features {
    fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_owned();
        } else {
            self.0.push((key.to_owned(), value.to_owned()));
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A foreign key attached to a column, pre-rendered for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttachedForeignKey {
    expr: String,
    referenced_table: String,
}

/// The derived model of one table column.
///
/// Built once per generation run and immutable afterwards except for the
/// foreign-key attachment performed by the owning table model.
///
/// # Examples
///
/// ```
/// use sa_core::{GenConfig, SchemaColumn};
/// use sa_model::{ColumnFlags, ColumnModel, GenContext};
///
/// let mut ctx = GenContext::new(GenConfig::default());
/// let column = SchemaColumn {
///     name: "name".to_owned(),
///     formatted_type: "VARCHAR(45)".to_owned(),
///     not_null: true,
///     ..SchemaColumn::default()
/// };
/// let model = ColumnModel::build(&column, "users", ColumnFlags::default(), &mut ctx)?;
/// assert_eq!(model.to_string(), "    name = Column(VARCHAR(45), nullable=False)");
/// # Ok::<(), sa_render::TypeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColumnModel {
    table_name: String,
    schema_name: String,
    rendered_name: String,
    type_expr: String,
    features: Features,
    options: Options,
    foreign_key: Option<AttachedForeignKey>,
    primary: bool,
    max_width: usize,
}

impl ColumnModel {
    /// Builds the column model from schema facts and index-derived flags.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeError`] when the column's type cannot be resolved;
    /// this aborts the whole run.
    pub fn build(
        column: &SchemaColumn,
        table_name: &str,
        flags: ColumnFlags,
        ctx: &mut GenContext,
    ) -> Result<Self, TypeError> {
        let type_expr = ctx.registry.resolve(column)?;
        let options = column.options();

        let mut rendered_name = options
            .get(keys::ALIAS)
            .unwrap_or(&column.name)
            .to_owned();
        if flags.primary && flags.sole_primary && rendered_name != "id" {
            rendered_name = "id".to_owned();
        }

        let mut features = Features::default();
        if column.not_null {
            features.set("nullable", "False");
        }
        if column.auto_increment {
            features.set("autoincrement", "True");
        }
        if flags.primary && !column.auto_increment {
            features.set("autoincrement", "False");
        }
        if flags.primary {
            features.set("primary_key", "True");
        }
        if flags.unique {
            features.set("unique", "True");
        }
        if flags.indexed {
            features.set("index", "True");
        }
        if let Some(default) = column.default_value() {
            let (default, on_update) = split_on_update(default);
            if !default.is_empty() {
                features.set("default", &translate_now(&default, ctx));
            }
            if let Some(on_update) = on_update {
                features.set("onupdate", &translate_now(&on_update, ctx));
            }
        }

        Ok(Self {
            table_name: table_name.to_owned(),
            schema_name: column.name.clone(),
            rendered_name,
            type_expr,
            features,
            options,
            foreign_key: None,
            primary: flags.primary,
            max_width: ctx.config.max_width,
        })
    }

    /// Attaches a single-column foreign key, pre-rendering its expression.
    ///
    /// Referential actions equal to the `NO ACTION` sentinel are omitted.
    /// The caller is responsible for only attaching non-composite keys.
    pub fn attach_foreign_key(&mut self, fk: &SchemaForeignKey, ctx: &mut GenContext) {
        let Some(referenced_column) = fk.referenced_columns.first() else {
            return;
        };
        let mut expr = Attribute::call("ForeignKey");
        expr.push_arg(quote(&format!("{}.{}", fk.referenced_table, referenced_column)));
        expr.push_kwarg("name", quote(&fk.name));
        if self.options.is_true(keys::USE_ALTER) {
            expr.push_kwarg("use_alter", "True");
        }
        if fk.has_delete_action() {
            expr.push_kwarg("ondelete", quote(&fk.delete_rule));
        }
        if fk.has_update_action() {
            expr.push_kwarg("onupdate", quote(&fk.update_rule));
        }
        self.foreign_key = Some(AttachedForeignKey {
            expr: expr.condensed(),
            referenced_table: fk.referenced_table.clone(),
        });
        ctx.uses_foreign_key = true;
    }

    /// The column name as declared in the schema.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The name the generated attribute is bound to.
    #[must_use]
    pub fn rendered_name(&self) -> &str {
        &self.rendered_name
    }

    /// Returns `true` if the rendered name differs from the schema name.
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.rendered_name != self.schema_name
    }

    /// Returns `true` if the column belongs in the textual-representation
    /// field list: an explicit `toprint` option decides, otherwise
    /// primary-key columns are printed.
    #[must_use]
    pub fn to_print(&self) -> bool {
        if self.options.contains(keys::TOPRINT) {
            self.options.is_true(keys::TOPRINT)
        } else {
            self.primary
        }
    }

    /// The relationship accessor name this column would emit, if any.
    ///
    /// `None` when no foreign key is attached or the relation is suppressed
    /// by `relation=False`. Used by the table model to flag accessor name
    /// collisions.
    #[must_use]
    pub fn relation_accessor(&self) -> Option<String> {
        let fk = self.foreign_key.as_ref()?;
        if self.options.is_false(keys::RELATION) {
            return None;
        }
        Some(
            self.options
                .get(keys::FKNAME)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| functionalize(&singularize(&fk.referenced_table))),
        )
    }

    /// Renders the relationship line for this column's foreign key.
    ///
    /// Returns `None` without a foreign key; returns a suppression comment
    /// instead of a relationship when the `relation=False` option is set.
    #[must_use]
    pub fn backref(&self, ctx: &mut GenContext) -> Option<String> {
        let fk = self.foreign_key.as_ref()?;
        if self.options.is_false(keys::RELATION) {
            return Some(format!(
                "{DEFAULT_INDENT}# relation for {} suppressed by relation=False",
                self.schema_name
            ));
        }

        let accessor = self.relation_accessor()?;
        let class_name = camelize(&singularize(&fk.referenced_table));
        let mut rel = Attribute::named(accessor, "relationship");
        rel.set_tab(DEFAULT_INDENT);
        rel.set_max_width(self.max_width);
        rel.push_arg(quote(&class_name));
        rel.push_kwarg("foreign_keys", format!("[{}]", self.rendered_name));

        if !self.options.is_false(keys::BACKREF) {
            let backref_name = self
                .options
                .get(keys::BACKREFNAME)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| functionalize(&self.table_name));
            let value = if self.options.is_false(keys::BACKREFUSELIST) {
                ctx.uses_backref = true;
                let mut nested = Attribute::call("backref");
                nested.push_arg(quote(&backref_name));
                nested.push_kwarg("uselist", "False");
                nested.condensed()
            } else {
                quote(&backref_name)
            };
            rel.push_kwarg("backref", value);
        }
        if self.options.is_false(keys::USELIST) {
            rel.push_kwarg("uselist", "False");
        }
        if let Some(remote_side) = self.options.get(keys::REMOTE_SIDE) {
            rel.push_kwarg("remote_side", format!("[{remote_side}]"));
        }

        ctx.uses_relationship = true;
        Some(rel.render())
    }
}

impl fmt::Display for ColumnModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attr = Attribute::named(self.rendered_name.as_str(), "Column");
        attr.set_tab(DEFAULT_INDENT);
        attr.set_max_width(self.max_width);
        if self.is_renamed() {
            attr.push_arg(quote(&self.schema_name));
        }
        attr.push_arg(self.type_expr.as_str());
        if let Some(fk) = &self.foreign_key {
            attr.push_arg(fk.expr.as_str());
        }
        for (key, value) in self.features.iter() {
            attr.push_kwarg(key, value);
        }
        if self.rendered_name == "id" {
            attr.set_comment("pylint: disable=invalid-name");
        }
        f.write_str(&attr.render())
    }
}

/// Splits an embedded `ON UPDATE` clause off a default value.
fn split_on_update(value: &str) -> (String, Option<String>) {
    let upper = value.to_ascii_uppercase();
    if let Some(pos) = upper.find("ON UPDATE") {
        let default = value[..pos].trim().to_owned();
        let clause = value[pos + "ON UPDATE".len()..].trim().to_owned();
        let clause = if clause.is_empty() { None } else { Some(clause) };
        (default, clause)
    } else {
        (value.trim().to_owned(), None)
    }
}

/// Translates the current-timestamp sentinel into a `func.now()` reference.
fn translate_now(value: &str, ctx: &mut GenContext) -> String {
    if value.contains(CURRENT_TIMESTAMP) {
        ctx.uses_func = true;
        value.replace(CURRENT_TIMESTAMP, "func.now()")
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_core::GenConfig;
    use smallvec::smallvec;

    fn ctx() -> GenContext {
        GenContext::new(GenConfig::default())
    }

    fn column(name: &str, formatted: &str) -> SchemaColumn {
        SchemaColumn {
            name: name.to_owned(),
            formatted_type: formatted.to_owned(),
            ..SchemaColumn::default()
        }
    }

    fn fk(name: &str, local: &str, table: &str, column: &str) -> SchemaForeignKey {
        SchemaForeignKey {
            name: name.to_owned(),
            columns: smallvec![local.to_owned()],
            referenced_table: table.to_owned(),
            referenced_columns: smallvec![column.to_owned()],
            delete_rule: "NO ACTION".to_owned(),
            update_rule: "NO ACTION".to_owned(),
        }
    }

    #[test]
    fn test_plain_column() {
        let mut ctx = ctx();
        let mut col = column("name", "VARCHAR(45)");
        col.not_null = true;
        let model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    name = Column(VARCHAR(45), nullable=False)"
        );
    }

    #[test]
    fn test_alias_prepends_schema_name() {
        let mut ctx = ctx();
        let mut col = column("test_column", "VARCHAR(45)");
        col.comment = "alias=test".to_owned();
        let model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    test = Column(\"test_column\", VARCHAR(45))"
        );
    }

    #[test]
    fn test_sole_primary_key_renamed_to_id() {
        let mut ctx = ctx();
        let col = column("user_pk", "INT");
        let flags = ColumnFlags {
            primary: true,
            sole_primary: true,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert_eq!(model.rendered_name(), "id");
        assert_eq!(
            model.to_string(),
            "    id = Column(\"user_pk\", INTEGER, autoincrement=False, primary_key=True)  \
             # pylint: disable=invalid-name"
        );
    }

    #[test]
    fn test_primary_key_named_id_keeps_name() {
        let mut ctx = ctx();
        let mut col = column("id", "INT");
        col.not_null = true;
        col.auto_increment = true;
        let flags = ColumnFlags {
            primary: true,
            sole_primary: true,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    id = Column(INTEGER, nullable=False, autoincrement=True, primary_key=True)  \
             # pylint: disable=invalid-name"
        );
    }

    #[test]
    fn test_composite_primary_member_not_renamed() {
        let mut ctx = ctx();
        let col = column("tenant_id", "INT");
        let flags = ColumnFlags {
            primary: true,
            sole_primary: false,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert_eq!(model.rendered_name(), "tenant_id");
        // primary without autoincrement pins autoincrement=False
        assert_eq!(
            model.to_string(),
            "    tenant_id = Column(INTEGER, autoincrement=False, primary_key=True)"
        );
    }

    #[test]
    fn test_unique_and_index_flags() {
        let mut ctx = ctx();
        let col = column("email", "VARCHAR(120)");
        let flags = ColumnFlags {
            unique: true,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    email = Column(VARCHAR(120), unique=True)"
        );

        let flags = ColumnFlags {
            indexed: true,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    email = Column(VARCHAR(120), index=True)"
        );
    }

    #[test]
    fn test_default_value_passthrough() {
        let mut ctx = ctx();
        let mut col = column("state", "VARCHAR(16)");
        col.default_value = Some("'new'".to_owned());
        let model = ColumnModel::build(&col, "jobs", ColumnFlags::default(), &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    state = Column(VARCHAR(16), default='new')"
        );
        assert!(!ctx.uses_func);
    }

    #[test]
    fn test_default_current_timestamp_translated() {
        let mut ctx = ctx();
        let mut col = column("updated", "TIMESTAMP");
        col.default_value = Some("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP".to_owned());
        let model = ColumnModel::build(&col, "jobs", ColumnFlags::default(), &mut ctx).unwrap();
        assert_eq!(
            model.to_string(),
            "    updated = Column(TIMESTAMP, default=func.now(), onupdate=func.now())"
        );
        assert!(ctx.uses_func);
    }

    #[test]
    fn test_foreign_key_omits_no_action_rules() {
        let mut ctx = ctx();
        let col = column("user_id", "INT");
        let mut model = ColumnModel::build(&col, "orders", ColumnFlags::default(), &mut ctx).unwrap();
        let mut key = fk("fk_orders_users", "user_id", "users", "id");
        key.update_rule = "SET NULL".to_owned();
        model.attach_foreign_key(&key, &mut ctx);
        assert_eq!(
            model.to_string(),
            "    user_id = Column(INTEGER, ForeignKey(\"users.id\", name=\"fk_orders_users\", \
             onupdate=\"SET NULL\"))"
        );
        assert!(ctx.uses_foreign_key);
    }

    #[test]
    fn test_foreign_key_use_alter_option() {
        let mut ctx = ctx();
        let mut col = column("parent_id", "INT");
        col.comment = "use_alter=True".to_owned();
        let mut model = ColumnModel::build(&col, "nodes", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_nodes_parent", "parent_id", "nodes", "id"), &mut ctx);
        assert_eq!(
            model.to_string(),
            "    parent_id = Column(INTEGER, ForeignKey(\"nodes.id\", name=\"fk_nodes_parent\", \
             use_alter=True))"
        );
    }

    #[test]
    fn test_backref_none_without_foreign_key() {
        let mut ctx = ctx();
        let col = column("name", "VARCHAR(45)");
        let model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        assert_eq!(model.backref(&mut ctx), None);
    }

    #[test]
    fn test_backref_default_names() {
        let mut ctx = ctx();
        let col = column("user_id", "INT");
        let mut model = ColumnModel::build(&col, "orders", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_orders_users", "user_id", "users", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some(
                "    user = relationship(\"User\", foreign_keys=[user_id], backref=\"orders\")"
                    .to_owned()
            )
        );
        assert!(ctx.uses_relationship);
        assert!(!ctx.uses_backref);
    }

    #[test]
    fn test_backref_relation_false_yields_comment() {
        let mut ctx = ctx();
        let mut col = column("user_id", "INT");
        col.comment = "relation=False".to_owned();
        let mut model = ColumnModel::build(&col, "orders", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_orders_users", "user_id", "users", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some("    # relation for user_id suppressed by relation=False".to_owned())
        );
        assert_eq!(model.relation_accessor(), None);
        // the Column line itself is unaffected
        assert!(model.to_string().contains("ForeignKey"));
    }

    #[test]
    fn test_backref_option_overrides() {
        let mut ctx = ctx();
        let mut col = column("owner_id", "INT");
        col.comment = "fkname=owner;backrefname=ownedItems;uselist=False".to_owned();
        let mut model = ColumnModel::build(&col, "items", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_items_users", "owner_id", "users", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some(
                "    owner = relationship(\"User\", foreign_keys=[owner_id], \
                 backref=\"ownedItems\", uselist=False)"
                    .to_owned()
            )
        );
    }

    #[test]
    fn test_backref_uselist_false_nests_backref_call() {
        let mut ctx = ctx();
        let mut col = column("profile_id", "INT");
        col.comment = "backrefuselist=False".to_owned();
        let mut model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_users_profiles", "profile_id", "profiles", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some(
                "    profile = relationship(\"Profile\", foreign_keys=[profile_id], \
                 backref=backref(\"users\", uselist=False))"
                    .to_owned()
            )
        );
        assert!(ctx.uses_backref);
    }

    #[test]
    fn test_backref_suppressed_by_backref_false() {
        let mut ctx = ctx();
        let mut col = column("user_id", "INT");
        col.comment = "backref=False".to_owned();
        let mut model = ColumnModel::build(&col, "orders", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_orders_users", "user_id", "users", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some("    user = relationship(\"User\", foreign_keys=[user_id])".to_owned())
        );
    }

    #[test]
    fn test_backref_remote_side() {
        let mut ctx = ctx();
        let mut col = column("parent_id", "INT");
        col.comment = "remote_side=id".to_owned();
        let mut model = ColumnModel::build(&col, "nodes", ColumnFlags::default(), &mut ctx).unwrap();
        model.attach_foreign_key(&fk("fk_nodes_parent", "parent_id", "nodes", "id"), &mut ctx);
        assert_eq!(
            model.backref(&mut ctx),
            Some(
                "    node = relationship(\"Node\", foreign_keys=[parent_id], \
                 backref=\"nodes\", remote_side=[id])"
                    .to_owned()
            )
        );
    }

    #[test]
    fn test_to_print_defaults_to_primary() {
        let mut ctx = ctx();
        let col = column("id", "INT");
        let flags = ColumnFlags {
            primary: true,
            sole_primary: true,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert!(model.to_print());

        let col = column("name", "VARCHAR(45)");
        let model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        assert!(!model.to_print());
    }

    #[test]
    fn test_to_print_explicit_option_wins() {
        let mut ctx = ctx();
        let mut col = column("name", "VARCHAR(45)");
        col.comment = "toprint=True".to_owned();
        let model = ColumnModel::build(&col, "users", ColumnFlags::default(), &mut ctx).unwrap();
        assert!(model.to_print());

        let mut col = column("secret", "INT");
        col.comment = "toprint=False".to_owned();
        let flags = ColumnFlags {
            primary: true,
            sole_primary: false,
            ..ColumnFlags::default()
        };
        let model = ColumnModel::build(&col, "users", flags, &mut ctx).unwrap();
        assert!(!model.to_print());
    }

    #[test]
    fn test_split_on_update() {
        assert_eq!(
            split_on_update("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"),
            (
                "CURRENT_TIMESTAMP".to_owned(),
                Some("CURRENT_TIMESTAMP".to_owned())
            )
        );
        assert_eq!(split_on_update("'0'"), ("'0'".to_owned(), None));
    }
}
