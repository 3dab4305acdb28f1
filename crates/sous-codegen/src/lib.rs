//! Language bindings and the generation driver for `sous` cookbooks.
//!
//! A validated [`Cookbook`](sous_schema::Cookbook) is mapped through a
//! [`Binding`] into [`ArtifactRecord`]s: one per ingredient, one per enum, and
//! a manifest. Records carry target-language types, identifiers, accessor
//! names, and literals; turning them into text is a [`Renderer`]'s job, and
//! putting that text somewhere is a [`Writer`]'s.
//!
//! # Architecture
//!
//! ```text
//!  Cookbook ──> generate(binding) ──> records ──> Renderer ──> Writer
//!                   │                                 (json)     (fs, memory)
//!                   └── Binding: java | kotlin | typescript | python
//! ```
//!
//! # Example
//!
//! ```
//! use sous_codegen::{ArtifactRecord, BindingSet, generate};
//! use sous_schema::{Cookbook, EnumDef, Ingredient, Optional};
//!
//! let cookbook = Cookbook::new("demo")
//!     .with_enum(EnumDef::new("TestEnum", &["A", "B", "C"]))
//!     .with_ingredient(
//!         Ingredient::new("AllParams").with_optional(Optional::simple("enumArg", "TestEnum")),
//!     );
//! sous_schema::validate(&cookbook).unwrap();
//!
//! let java = BindingSet::builtin().get("java").unwrap();
//! let records = generate(&cookbook, java).unwrap();
//! let ArtifactRecord::Ingredient(all_params) = &records[0] else { unreachable!() };
//! assert_eq!(all_params.accessors[0].name, "getEnumArg");
//! assert_eq!(all_params.accessors[0].ty, "TestEnum");
//! ```
//!
//! # Feature Flags
//!
//! Each built-in binding sits behind a feature of the same name; all are on by
//! default: `java`, `kotlin`, `typescript`, `python`.

pub mod binding;
pub mod bindings;
pub mod driver;
pub mod naming;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod render;
pub mod write;

pub use binding::{Binding, Literal};
pub use driver::generate;
pub use pipeline::{Pipeline, PipelineError, RunSummary};
pub use record::{
    AccessorRecord, ArtifactRecord, AssignmentRecord, CompoundRecord, ConstantRecord, EnumRecord,
    FieldRecord, IngredientRecord, InitializerRecord, ManifestRecord, MemberRecord,
    OptionalRecord, ParamRecord, RecordKind,
};
pub use registry::BindingSet;
pub use render::{JsonRenderer, RenderError, RenderedFile, Renderer};
pub use write::{FsWriter, MemoryWriter, Writer};
