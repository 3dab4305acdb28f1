//! Language-mapped artifact records.
//!
//! Records are what the driver hands to a renderer: every type, identifier,
//! accessor name, and literal in them is already spelled in the target
//! language. Schema-level names are kept alongside (`name`, `schema_type`) so
//! renderers can emit diagnostics and documentation.

use serde::Serialize;

/// One unit of generated output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactRecord {
    Ingredient(IngredientRecord),
    Enum(EnumRecord),
    Manifest(ManifestRecord),
}

/// Discriminant of [`ArtifactRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Ingredient,
    Enum,
    Manifest,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Ingredient => "ingredient",
            RecordKind::Enum => "enum",
            RecordKind::Manifest => "manifest",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ArtifactRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            ArtifactRecord::Ingredient(_) => RecordKind::Ingredient,
            ArtifactRecord::Enum(_) => RecordKind::Enum,
            ArtifactRecord::Manifest(_) => RecordKind::Manifest,
        }
    }

    /// Schema name of the ingredient or enum; the domain for the manifest.
    pub fn name(&self) -> &str {
        match self {
            ArtifactRecord::Ingredient(r) => &r.name,
            ArtifactRecord::Enum(r) => &r.name,
            ArtifactRecord::Manifest(r) => &r.domain,
        }
    }

    /// Name of the binding the record was mapped with.
    pub fn binding(&self) -> &str {
        match self {
            ArtifactRecord::Ingredient(r) => &r.binding,
            ArtifactRecord::Enum(r) => &r.binding,
            ArtifactRecord::Manifest(r) => &r.binding,
        }
    }
}

/// Everything needed to render one ingredient's builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRecord {
    pub binding: String,
    pub name: String,
    /// Type identifier in the target language.
    pub ident: String,
    pub keyed: bool,
    pub key_constants: Vec<ConstantRecord>,
    /// Required fields, in declaration order.
    pub required: Vec<FieldRecord>,
    /// Constructor/factory overloads, in declaration order.
    pub initializers: Vec<InitializerRecord>,
    /// Optional setters, in declaration order.
    pub optionals: Vec<OptionalRecord>,
    /// Grouping types for compound optionals.
    pub compounds: Vec<CompoundRecord>,
    /// Getters for every field, required first.
    pub accessors: Vec<AccessorRecord>,
}

/// A key constant of a keyed ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantRecord {
    pub value: String,
    pub ident: String,
    /// The key as a string literal.
    pub literal: String,
}

/// A required field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    pub name: String,
    pub ident: String,
    /// Storage type; varargs are stored in their array form.
    pub ty: String,
    pub schema_type: String,
    /// Default value literal, if the field has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A parameter of an initializer, setter, or compound type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRecord {
    pub name: String,
    pub ident: String,
    pub ty: String,
    pub vararg: bool,
}

/// A field assignment an initializer performs from a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub field: String,
    pub ident: String,
    pub value: String,
}

/// One initializer overload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializerRecord {
    pub params: Vec<ParamRecord>,
    /// Required fields this overload does not take, set from their defaults.
    pub defaults: Vec<AssignmentRecord>,
    /// Schema-level signature, e.g. `(string, int...)`.
    pub signature: String,
}

/// An optional setter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionalRecord {
    pub name: String,
    /// Setter identifier.
    pub ident: String,
    pub repeatable: bool,
    /// Presence-only setter; takes no params.
    pub flag: bool,
    pub params: Vec<ParamRecord>,
    /// Grouping type identifier, for compound optionals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound: Option<String>,
}

/// A grouping type holding one compound optional's params.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundRecord {
    /// The optional it groups.
    pub optional: String,
    pub ident: String,
    pub fields: Vec<ParamRecord>,
    pub accessors: Vec<AccessorRecord>,
}

/// A getter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessorRecord {
    pub field: String,
    pub name: String,
    /// Returned type; for repeatable optionals, the type of one entry.
    pub ty: String,
    pub repeatable: bool,
}

/// An enum and its members, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumRecord {
    pub binding: String,
    pub name: String,
    pub ident: String,
    pub members: Vec<MemberRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRecord {
    pub value: String,
    pub ident: String,
    /// Qualified reference, e.g. `Heat.LOW`.
    pub literal: String,
}

/// Index of everything generated for one binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestRecord {
    pub binding: String,
    pub language: String,
    pub extension: String,
    pub domain: String,
    pub ingredients: Vec<String>,
    pub enums: Vec<String>,
}
