//! Type grammar and resolver.
//!
//! ```text
//! Type := Base ("[]")* "..."?
//! Base := boolean | int | float | string | flag | <declared enum name>
//! ```
//!
//! Parsing strips right to left: a trailing `...` marks the type as vararg,
//! then each trailing `[]` wraps the base in an array. The remaining token is
//! resolved against the cookbook, since enum names are schema-relative.

use crate::model::{Cookbook, Value};
use serde::Serialize;
use std::fmt;

const VARARG_SUFFIX: &str = "...";
const ARRAY_SUFFIX: &str = "[]";

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Integer,
    Float,
    String,
}

/// The base of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum BaseType {
    Primitive(Primitive),
    /// Presence-only boolean; valid only as a simple optional's type.
    Flag,
    /// Reference to a declared enum.
    EnumRef(String),
    Array(Box<BaseType>),
}

/// A fully resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParamType {
    pub base: BaseType,
    /// Accepts a variable number of `base` values.
    pub vararg: bool,
}

/// A type string that does not resolve against the cookbook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{ty}` does not name a type")]
pub struct UnresolvedType {
    /// The full type string as written.
    pub ty: String,
}

impl Primitive {
    /// Keyword used for this primitive in type strings.
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Integer => "int",
            Primitive::Float => "float",
            Primitive::String => "string",
        }
    }

    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "boolean" => Some(Primitive::Boolean),
            "int" => Some(Primitive::Integer),
            "float" => Some(Primitive::Float),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }
}

/// Keywords that name built-in types and can never be declared by a schema.
pub const BUILTIN_TYPE_KEYWORDS: &[&str] = &["boolean", "int", "float", "string", "flag"];

/// Parse and resolve a type string.
pub fn parse_type(ty: &str, cookbook: &Cookbook) -> Result<ParamType, UnresolvedType> {
    let (rest, vararg) = match ty.strip_suffix(VARARG_SUFFIX) {
        Some(rest) => (rest, true),
        None => (ty, false),
    };

    let mut token = rest;
    let mut depth = 0usize;
    while let Some(inner) = token.strip_suffix(ARRAY_SUFFIX) {
        token = inner;
        depth += 1;
    }

    let unresolved = || UnresolvedType { ty: ty.to_string() };

    let mut base = if let Some(primitive) = Primitive::from_keyword(token) {
        BaseType::Primitive(primitive)
    } else if token == "flag" {
        if depth > 0 {
            return Err(unresolved());
        }
        BaseType::Flag
    } else if cookbook.find_enum(token).is_some() {
        BaseType::EnumRef(token.to_string())
    } else {
        return Err(unresolved());
    };

    for _ in 0..depth {
        base = BaseType::Array(Box::new(base));
    }

    Ok(ParamType { base, vararg })
}

/// Render a resolved type back to its canonical string.
pub fn render_type(ty: &ParamType) -> String {
    ty.to_string()
}

impl ParamType {
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            vararg: false,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(BaseType::Primitive(primitive))
    }

    pub fn flag() -> Self {
        Self::new(BaseType::Flag)
    }

    pub fn enum_ref(name: impl Into<String>) -> Self {
        Self::new(BaseType::EnumRef(name.into()))
    }

    pub fn array_of(base: BaseType) -> Self {
        Self::new(BaseType::Array(Box::new(base)))
    }

    pub fn into_vararg(mut self) -> Self {
        self.vararg = true;
        self
    }

    pub fn is_flag(&self) -> bool {
        self.base == BaseType::Flag
    }

    /// True for non-vararg booleans and flags.
    pub fn is_boolean_like(&self) -> bool {
        !self.vararg
            && matches!(
                self.base,
                BaseType::Primitive(Primitive::Boolean) | BaseType::Flag
            )
    }

    /// True if values of this type are sequences.
    pub fn is_sequence(&self) -> bool {
        self.vararg || matches!(self.base, BaseType::Array(_))
    }

    /// Element type of a sequence type: the vararg base, or the array's
    /// inner type.
    pub fn element(&self) -> Option<ParamType> {
        if self.vararg {
            return Some(ParamType::new(self.base.clone()));
        }
        match &self.base {
            BaseType::Array(inner) => Some(ParamType::new((**inner).clone())),
            _ => None,
        }
    }

    /// The fixed-array form of this type: `T...` becomes `T[]`, anything
    /// else is returned unchanged.
    pub fn as_array(&self) -> ParamType {
        if self.vararg {
            ParamType::array_of(self.base.clone())
        } else {
            self.clone()
        }
    }

    /// Name of the innermost enum this type refers to, if any.
    pub fn enum_name(&self) -> Option<&str> {
        self.base.enum_name()
    }

    /// Check that `value` is a well-typed literal of this type.
    ///
    /// Sequence types take lists whose items conform to the element type;
    /// `int` is 32-bit; floats accept integer literals; enum values must be
    /// declared members.
    pub fn check_value(&self, cookbook: &Cookbook, value: &Value) -> Result<(), ValueError> {
        if let Some(element) = self.element() {
            let Value::List(items) = value else {
                return Err(self.mismatch(value));
            };
            return items
                .iter()
                .try_for_each(|item| element.check_value(cookbook, item));
        }

        match (&self.base, value) {
            (BaseType::Primitive(Primitive::Boolean) | BaseType::Flag, Value::Bool(_)) => Ok(()),
            (BaseType::Primitive(Primitive::Integer), Value::Integer(i))
                if i32::try_from(*i).is_ok() =>
            {
                Ok(())
            }
            (BaseType::Primitive(Primitive::Float), Value::Float(_) | Value::Integer(_)) => Ok(()),
            (BaseType::Primitive(Primitive::String), Value::String(_)) => Ok(()),
            (BaseType::EnumRef(name), Value::String(member)) => {
                let def = cookbook
                    .find_enum(name)
                    .ok_or_else(|| ValueError::UnknownEnum(name.clone()))?;
                if def.contains(member) {
                    Ok(())
                } else {
                    Err(ValueError::NotInEnum {
                        enum_name: name.clone(),
                        value: member.clone(),
                    })
                }
            }
            _ => Err(self.mismatch(value)),
        }
    }

    fn mismatch(&self, value: &Value) -> ValueError {
        ValueError::Mismatch {
            expected: self.to_string(),
            value: value.to_string(),
        }
    }
}

/// Why a literal does not fit a type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("`{value}` is not a valid `{expected}` literal")]
    Mismatch { expected: String, value: String },

    #[error("`{value}` is not a member of enum `{enum_name}`")]
    NotInEnum { enum_name: String, value: String },

    #[error("enum `{0}` is not declared")]
    UnknownEnum(String),
}

impl BaseType {
    pub fn enum_name(&self) -> Option<&str> {
        match self {
            BaseType::EnumRef(name) => Some(name),
            BaseType::Array(inner) => inner.enum_name(),
            BaseType::Primitive(_) | BaseType::Flag => None,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Primitive(p) => f.write_str(p.keyword()),
            BaseType::Flag => f.write_str("flag"),
            BaseType::EnumRef(name) => f.write_str(name),
            BaseType::Array(inner) => write!(f, "{inner}{ARRAY_SUFFIX}"),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.vararg {
            f.write_str(VARARG_SUFFIX)?;
        }
        Ok(())
    }
}
