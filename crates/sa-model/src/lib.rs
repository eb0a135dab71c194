//! Derived model building and source export for sa-modelgen.
//!
//! This crate turns a [`Schema`](sa_core::Schema) snapshot into the final
//! generated source text. The main entry point is [`Exporter`]:
//!
//! ```
//! use sa_core::{GenConfig, Schema};
//! use sa_model::Exporter;
//!
//! let schema = Schema::from_json(r#"{"name": "db", "tables": []}"#)?;
//! let exporter = Exporter::new(GenConfig::default());
//! let text = exporter.export(&schema)?;
//! assert!(text.contains("Base = declarative_base()"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Exporter (one run)
//!     │
//!     ├── GenContext (per-run type registry + import flags)
//!     │
//!     ├── TableModel (one per schema table)
//!     │       │
//!     │       ├── index classification → composite constraints
//!     │       ├── ColumnModel (one per column, FK attached by name)
//!     │       └── relationship lines
//!     │
//!     ├── import groups (header assembly from accumulated context)
//!     │
//!     └── OutputSink (stdout, file, buffer)
//! ```
//!
//! All derived entities live for exactly one export: they are built once
//! from the snapshot, rendered, and discarded. The run is single-threaded
//! and synchronous; a type-resolution or schema-shape error aborts it with
//! no partial output.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod column;
mod context;
mod error;
mod exporter;
mod header;
mod sink;
mod table;

pub use column::{ColumnFlags, ColumnModel};
pub use context::GenContext;
pub use error::GenerateError;
pub use exporter::Exporter;
pub use sink::{BufferSink, FileSink, OutputSink, StdoutSink};
pub use table::TableModel;
