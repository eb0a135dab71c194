//! Core types, errors, and utilities for the sa-modelgen tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Schema snapshot types (`Schema`, `SchemaTable`, `SchemaColumn`, ...)
//! - The `key=value;` annotation grammar ([`Options`])
//! - Name utilities (camel-casing, singularization, quoting)
//! - Generation configuration ([`GenConfig`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod naming;
pub mod options;
pub mod types;

pub use config::GenConfig;
pub use error::SchemaError;
pub use hash::{fx_hash_map, fx_hash_set, FxBuildHasher, FxHashMap, FxHashSet};
pub use options::Options;
pub use types::{
    IndexKind, Schema, SchemaColumn, SchemaForeignKey, SchemaIndex, SchemaTable,
};
