//! The export orchestrator.
//!
//! [`Exporter`] drives one generation run: it iterates the schema's tables
//! in provider order, builds a [`TableModel`] for each against a fresh
//! [`GenContext`], then assembles the final source unit from the header
//! (driven by the accumulated context) and the rendered class blocks.
//!
//! The run is all-or-nothing: the first type-resolution or schema-shape
//! error aborts it and no partial text is produced.

use sa_core::{GenConfig, Schema};
use tracing::info;

use crate::{header, GenContext, GenerateError, OutputSink, TableModel};

/// Orchestrates one schema-to-source generation run.
///
/// # Examples
///
/// ```
/// use sa_core::{GenConfig, Schema};
/// use sa_model::Exporter;
///
/// let schema = Schema::from_json(r#"{"name": "db"}"#)?;
/// let text = Exporter::new(GenConfig::default()).export(&schema)?;
/// assert!(text.ends_with("Base = declarative_base()\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: GenConfig,
}

impl Exporter {
    /// Creates an exporter with the given rendering configuration.
    #[must_use]
    pub fn new(config: GenConfig) -> Self {
        Self { config }
    }

    /// Runs the full generation and returns the final source text.
    ///
    /// A fresh [`GenContext`] is created per call, so repeated exports from
    /// the same `Exporter` never leak import state into each other.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] encountered; nothing is emitted
    /// on failure.
    pub fn export(&self, schema: &Schema) -> Result<String, GenerateError> {
        let mut ctx = GenContext::new(self.config.clone());

        let mut blocks = Vec::with_capacity(schema.tables.len());
        for table in &schema.tables {
            let model = TableModel::build(table, schema.default_charset.as_deref(), &mut ctx)?;
            blocks.push(model.to_string());
        }

        let mut text = header::render_header(&ctx, &self.config).join("\n");
        for block in &blocks {
            text.push_str("\n\n\n");
            text.push_str(block);
        }
        text.push('\n');

        info!(
            schema = %schema.name,
            tables = schema.tables.len(),
            native_types = ctx.registry.native_types().len(),
            "generated model source"
        );
        Ok(text)
    }

    /// Runs the full generation and delivers the text to a sink.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] from generation or delivery.
    pub fn export_to(
        &self,
        schema: &Schema,
        sink: &mut dyn OutputSink,
    ) -> Result<(), GenerateError> {
        let text = self.export(schema)?;
        sink.deliver(&text)
    }
}
