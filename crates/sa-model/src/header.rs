//! Generated-file header assembly.
//!
//! The header is built from a declarative list of import groups. Each group
//! carries a predicate over the accumulated [`GenContext`] and a rendering
//! rule; the assembly filters the groups and renders them in fixed order, so
//! the same schema always produces byte-identical import lines.
//!
//! The generated type imports come in two families switched by an
//! environment check *in the generated code*: the native dialect names from
//! `sqlalchemy.dialects.mysql`, or the portable generic names aliased back
//! to the native spelling so the column definitions read the same either
//! way.

use sa_core::config::TYPES_ENV_VAR;
use sa_core::GenConfig;

use crate::GenContext;

/// Name stamped into the generated header.
const GENERATOR_NAME: &str = "sa-modelgen";

/// One conditionally rendered block of header lines.
struct ImportGroup {
    applies: fn(&GenContext) -> bool,
    render: fn(&GenContext) -> Vec<String>,
    blank_after: bool,
}

/// The import groups, in their fixed output order.
fn import_groups() -> Vec<ImportGroup> {
    vec![
        // The environment-switched native/portable type import pair.
        ImportGroup {
            applies: |ctx| !ctx.registry.is_empty(),
            render: |ctx| {
                vec![
                    "import os".to_owned(),
                    String::new(),
                    format!("if os.environ.get('{TYPES_ENV_VAR}') == 'native':"),
                    format!(
                        "    from sqlalchemy.dialects.mysql import {}",
                        ctx.registry.native_types().join(", ")
                    ),
                    "else:".to_owned(),
                    format!(
                        "    from sqlalchemy import {}",
                        ctx.registry.portable_types().join(", ")
                    ),
                ]
            },
            blank_after: true,
        },
        // Core sqlalchemy names used by the table blocks.
        ImportGroup {
            applies: |ctx| !ctx.registry.is_empty(),
            render: |ctx| {
                let mut names = vec!["Column"];
                if ctx.uses_foreign_key {
                    names.push("ForeignKey");
                }
                if ctx.uses_index_constraint {
                    names.push("Index");
                }
                if ctx.uses_unique_constraint {
                    names.push("UniqueConstraint");
                }
                if ctx.uses_func {
                    names.push("func");
                }
                names.sort_unstable();
                vec![format!("from sqlalchemy import {}", names.join(", "))]
            },
            blank_after: false,
        },
        // The declarative base factory is always imported.
        ImportGroup {
            applies: |_| true,
            render: |_| vec!["from sqlalchemy.ext.declarative import declarative_base".to_owned()],
            blank_after: false,
        },
        // ORM helpers, only when relationships were rendered.
        ImportGroup {
            applies: |ctx| ctx.uses_relationship,
            render: |ctx| {
                let names = if ctx.uses_backref {
                    "backref, relationship"
                } else {
                    "relationship"
                };
                vec![format!("from sqlalchemy.orm import {names}")]
            },
            blank_after: false,
        },
        // Mixin classes referenced by table options.
        ImportGroup {
            applies: |ctx| !ctx.mixins().is_empty(),
            render: |ctx| {
                let mut names = ctx.mixins().to_vec();
                names.sort_unstable();
                vec![format!("from mixins import {}", names.join(", "))]
            },
            blank_after: false,
        },
    ]
}

/// Renders the full unit header: comment block, imports, and the shared
/// declarative base binding.
pub(crate) fn render_header(ctx: &GenContext, config: &GenConfig) -> Vec<String> {
    let mut lines = vec![
        format!(
            "# Generated by {GENERATOR_NAME} {}.",
            env!("CARGO_PKG_VERSION")
        ),
        format!("# Documentation: {}", config.doc_url),
        "# Do not edit: regenerate from the schema model instead.".to_owned(),
        String::new(),
    ];
    for group in import_groups() {
        if !(group.applies)(ctx) {
            continue;
        }
        lines.extend((group.render)(ctx));
        if group.blank_after {
            lines.push(String::new());
        }
    }
    lines.push(String::new());
    lines.push("Base = declarative_base()".to_owned());
    lines
}
