//! Schema errors.
//!
//! Every validation rule and every binding mapping call fails with exactly one
//! [`SchemaError`]. Each variant names the offending entity so the message can
//! be shown to the user as-is.

use crate::types::ValueError;

/// What kind of name collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    Ingredient,
    Field,
    Enum,
    /// A generated enum member identifier.
    EnumMember,
    /// A generated key constant identifier.
    KeyConstant,
    /// A generated accessor method name.
    Accessor,
    /// A generated compound grouping type name.
    Compound,
}

/// A fatal schema problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate {} name `{name}`{}", .scope.noun(), in_owner(.owner))]
    DuplicateName {
        scope: NameScope,
        name: String,
        /// Ingredient or enum the name belongs to, for nested names.
        owner: Option<String>,
    },

    #[error("unknown type `{ty}` for `{subject}`")]
    UnknownType { subject: String, ty: String },

    #[error(
        "initializer #{initializer} of `{ingredient}` does not cover required field `{field}`, which has no default"
    )]
    MissingRequiredCoverage {
        ingredient: String,
        initializer: usize,
        field: String,
    },

    #[error(
        "initializer #{initializer} of `{ingredient}` references `{param}`, which is not a required field"
    )]
    UndeclaredInitializerParam {
        ingredient: String,
        initializer: usize,
        param: String,
    },

    #[error(
        "initializers #{first} and #{second} of `{ingredient}` share the signature {signature}"
    )]
    AmbiguousInitializerSignature {
        ingredient: String,
        first: usize,
        second: usize,
        signature: String,
    },

    #[error("vararg `{param}` must be the only vararg and come last in {subject}")]
    MisplacedVararg { subject: String, param: String },

    #[error("optional `{optional}` of `{ingredient}` {reason}")]
    InvalidOptionalShape {
        ingredient: String,
        optional: String,
        reason: &'static str,
    },

    #[error("invalid enum `{name}`: {reason}")]
    InvalidEnum { name: String, reason: String },

    #[error("`{value}` is not a member of enum `{enum_name}`")]
    ValueNotInEnum { enum_name: String, value: String },

    #[error("required field `{field}` of `{ingredient}` cannot be a flag")]
    FlagNotAllowed { ingredient: String, field: String },

    #[error("`{subject}`: `{value}` is not a valid `{expected}` literal")]
    ValueTypeMismatch {
        subject: String,
        expected: String,
        value: String,
    },

    #[error("invalid key constants on `{ingredient}`: {reason}")]
    InvalidKeyConstants { ingredient: String, reason: String },
}

/// Discriminant of [`SchemaError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    DuplicateName,
    UnknownType,
    MissingRequiredCoverage,
    UndeclaredInitializerParam,
    AmbiguousInitializerSignature,
    MisplacedVararg,
    InvalidOptionalShape,
    InvalidEnum,
    ValueNotInEnum,
    FlagNotAllowed,
    ValueTypeMismatch,
    InvalidKeyConstants,
}

impl SchemaError {
    pub fn kind(&self) -> SchemaErrorKind {
        match self {
            SchemaError::DuplicateName { .. } => SchemaErrorKind::DuplicateName,
            SchemaError::UnknownType { .. } => SchemaErrorKind::UnknownType,
            SchemaError::MissingRequiredCoverage { .. } => SchemaErrorKind::MissingRequiredCoverage,
            SchemaError::UndeclaredInitializerParam { .. } => {
                SchemaErrorKind::UndeclaredInitializerParam
            }
            SchemaError::AmbiguousInitializerSignature { .. } => {
                SchemaErrorKind::AmbiguousInitializerSignature
            }
            SchemaError::MisplacedVararg { .. } => SchemaErrorKind::MisplacedVararg,
            SchemaError::InvalidOptionalShape { .. } => SchemaErrorKind::InvalidOptionalShape,
            SchemaError::InvalidEnum { .. } => SchemaErrorKind::InvalidEnum,
            SchemaError::ValueNotInEnum { .. } => SchemaErrorKind::ValueNotInEnum,
            SchemaError::FlagNotAllowed { .. } => SchemaErrorKind::FlagNotAllowed,
            SchemaError::ValueTypeMismatch { .. } => SchemaErrorKind::ValueTypeMismatch,
            SchemaError::InvalidKeyConstants { .. } => SchemaErrorKind::InvalidKeyConstants,
        }
    }

    /// Lift a literal check failure, attributing it to `subject`.
    pub fn from_value_error(subject: impl Into<String>, err: ValueError) -> Self {
        match err {
            ValueError::Mismatch { expected, value } => SchemaError::ValueTypeMismatch {
                subject: subject.into(),
                expected,
                value,
            },
            ValueError::NotInEnum { enum_name, value } => {
                SchemaError::ValueNotInEnum { enum_name, value }
            }
            ValueError::UnknownEnum(name) => SchemaError::UnknownType {
                subject: subject.into(),
                ty: name,
            },
        }
    }
}

impl NameScope {
    fn noun(self) -> &'static str {
        match self {
            NameScope::Ingredient => "ingredient",
            NameScope::Field => "field",
            NameScope::Enum => "enum",
            NameScope::EnumMember => "enum member",
            NameScope::KeyConstant => "key constant",
            NameScope::Accessor => "accessor",
            NameScope::Compound => "compound type",
        }
    }
}

fn in_owner(owner: &Option<String>) -> String {
    match owner {
        Some(owner) => format!(" in `{owner}`"),
        None => String::new(),
    }
}
