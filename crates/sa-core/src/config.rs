//! Configuration structures for the sa-modelgen tool.
//!
//! [`GenConfig`] carries the rendering knobs shared by every component of a
//! generation run: the line-width limit for wrapped attribute expressions,
//! the indentation unit, and the constants stamped into the generated file
//! header. It implements [`Default`] with the values the generated output is
//! tested against; tests and the CLI construct it once per run.

use serde::{Deserialize, Serialize};

/// Default column-width limit for generated lines.
pub const DEFAULT_MAX_WIDTH: usize = 120;

/// Default indentation unit (one Python level).
pub const DEFAULT_INDENT: &str = "    ";

/// Default documentation link stamped into the generated header.
pub const DEFAULT_DOC_URL: &str = "https://github.com/Sharad-Patel1/sa-modelgen";

/// Environment variable consulted by the *generated* code to pick between
/// native dialect types and portable generic types.
pub const TYPES_ENV_VAR: &str = "DB_TYPES";

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use sa_core::GenConfig;
///
/// let config = GenConfig::default();
/// assert_eq!(config.max_width, 120);
/// assert_eq!(config.indent, "    ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Width limit for a single generated line.
    ///
    /// Attribute expressions that would meet or exceed this limit are
    /// rendered in their wrapped multi-line form instead.
    pub max_width: usize,

    /// Indentation unit for one nesting level.
    pub indent: String,

    /// Documentation link placed in the generated file header.
    pub doc_url: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            indent: DEFAULT_INDENT.to_owned(),
            doc_url: DEFAULT_DOC_URL.to_owned(),
        }
    }
}
