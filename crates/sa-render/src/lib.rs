//! Attribute-expression rendering and SQL type resolution.
//!
//! This crate owns the two text-producing building blocks of the generator:
//!
//! - [`Attribute`]: one `name = Class(args, kwargs)` expression that renders
//!   itself on a single line when it fits, or as a greedily wrapped
//!   multi-line block bounded by the column-width limit.
//! - [`TypeRegistry`]: maps raw schema column types (`VARCHAR(45)`, `INT`)
//!   to rendered type expressions while accumulating the distinct native and
//!   portable type names used, so the exporter can assemble import lists.
//!
//! # Example
//!
//! ```
//! use sa_render::Attribute;
//!
//! let mut attr = Attribute::named("name", "Column");
//! attr.push_arg("VARCHAR(45)");
//! attr.push_kwarg("nullable", "False");
//! assert_eq!(attr.to_string(), "name = Column(VARCHAR(45), nullable=False)");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod attribute;
mod error;
mod registry;

pub use attribute::Attribute;
pub use error::TypeError;
pub use registry::TypeRegistry;
