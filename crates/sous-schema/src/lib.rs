//! Cookbook schema model, type grammar, and semantic validation.
//!
//! `sous-schema` is the front end of the `sous` generator. A cookbook
//! describes *ingredients* (named operations with required, optional, and
//! compound-optional fields) and enums; this crate decodes it, resolves its
//! type strings, and checks that it is globally consistent before any code is
//! generated from it.
//!
//! # Architecture
//!
//! ```text
//! YAML / JSON ──> load ──> Cookbook ──> validate ──> (sous-codegen)
//!                           (model)        │
//!                              ▲           │
//!                              └── types ──┘
//!                           parse_type / render_type
//! ```
//!
//! # Example
//!
//! ```
//! use sous_schema::{Format, load_str, parse_type};
//!
//! let cookbook = load_str(
//!     r#"
//! domain: kitchen
//! enums:
//!   - name: Heat
//!     values: [LOW, HIGH]
//! ingredients:
//!   - name: Saute
//!     required:
//!       - name: pan
//!         type: string
//!     initializers:
//!       - params: [pan]
//!     optionals:
//!       - name: heat
//!         type: Heat
//! "#,
//!     Format::Yaml,
//! )
//! .unwrap();
//!
//! let ty = parse_type("Heat[]...", &cookbook).unwrap();
//! assert_eq!(ty.to_string(), "Heat[]...");
//! ```

pub mod error;
pub mod load;
pub mod model;
pub mod types;
pub mod validate;

pub use error::{NameScope, SchemaError, SchemaErrorKind};
pub use load::{Format, LoadError, load_path, load_str};
pub use model::{
    Cookbook, EnumDef, Ingredient, Initializer, Optional, OptionalShape, Param, Required, Value,
};
pub use types::{BaseType, ParamType, Primitive, UnresolvedType, ValueError, parse_type, render_type};
pub use validate::{is_identifier, validate};
