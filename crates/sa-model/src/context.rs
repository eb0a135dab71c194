//! Per-run accumulated state.

use sa_core::GenConfig;
use sa_render::TypeRegistry;

/// The explicit context threaded through one generation run.
///
/// Owns the [`TypeRegistry`] plus the import flags and mixin names the
/// header assembly reads after all tables are built. A fresh context is
/// created per run; reusing one across runs would leak import entries from
/// one schema into another's header.
///
/// # Examples
///
/// ```
/// use sa_core::GenConfig;
/// use sa_model::GenContext;
///
/// let mut ctx = GenContext::new(GenConfig::default());
/// ctx.add_mixin("AuditMixin");
/// ctx.add_mixin("AuditMixin");
/// assert_eq!(ctx.mixins(), ["AuditMixin"]);
/// ```
#[derive(Debug, Clone)]
pub struct GenContext {
    /// Rendering configuration for the run.
    pub config: GenConfig,

    /// Accumulates the distinct native/portable type names used.
    pub registry: TypeRegistry,

    /// `func.now()` appeared in a default value translation.
    pub uses_func: bool,

    /// At least one relationship line was rendered.
    pub uses_relationship: bool,

    /// At least one nested `backref(...)` call was rendered.
    pub uses_backref: bool,

    /// At least one `ForeignKey(...)` expression was rendered.
    pub uses_foreign_key: bool,

    /// At least one composite `UniqueConstraint(...)` was rendered.
    pub uses_unique_constraint: bool,

    /// At least one composite `Index(...)` was rendered.
    pub uses_index_constraint: bool,

    mixins: Vec<String>,
}

impl GenContext {
    /// Creates a fresh context for one run.
    #[must_use]
    pub fn new(config: GenConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
            uses_func: false,
            uses_relationship: false,
            uses_backref: false,
            uses_foreign_key: false,
            uses_unique_constraint: false,
            uses_index_constraint: false,
            mixins: Vec::new(),
        }
    }

    /// Records a mixin class name, preserving first-seen order without
    /// duplicates.
    pub fn add_mixin(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.mixins.contains(&name) {
            self.mixins.push(name);
        }
    }

    /// The mixin class names recorded so far, in first-seen order.
    #[must_use]
    pub fn mixins(&self) -> &[String] {
        &self.mixins
    }
}
