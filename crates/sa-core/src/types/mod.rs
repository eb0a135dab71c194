//! Schema snapshot types for the sa-modelgen tool.
//!
//! These are the read-only inputs of a generation run: the table, column,
//! index, and foreign-key graph exported by the schema provider. The
//! generator depends only on these explicit contracts, never on the shape of
//! any concrete provider.
//!
//! # Module Organization
//!
//! - [`schema`] - the root snapshot document
//! - [`table`] - tables and their ordered members
//! - [`column`] - column facts (type, nullability, flags, comment)
//! - [`index`] - index kinds and member lists
//! - [`foreign_key`] - foreign keys and referential actions
//!
//! # Re-exports
//!
//! All public types are re-exported at this module level and at the crate
//! root:
//!
//! ```
//! use sa_core::types::{Schema, SchemaColumn, SchemaTable};
//! use sa_core::{SchemaForeignKey, SchemaIndex};
//! ```

mod column;
mod foreign_key;
mod index;
mod schema;
mod table;

// Re-export all public types
pub use column::SchemaColumn;
pub use foreign_key::{SchemaForeignKey, NO_ACTION};
pub use index::{IndexKind, SchemaIndex};
pub use schema::Schema;
pub use table::SchemaTable;
