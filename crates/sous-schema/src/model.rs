//! In-memory cookbook model.
//!
//! A [`Cookbook`] is the decoded form of a schema file. It owns every
//! ingredient and enum; cross-references (initializer params, enum types) are
//! by name, so the model stays acyclic and can be shared read-only between
//! bindings.

use serde::{Deserialize, Serialize};

/// A complete schema: domain name, ingredients, and enums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Cookbook {
    /// Domain (namespace/package) the generated code lives in.
    pub domain: String,
    /// Ingredients in declaration order.
    pub ingredients: Vec<Ingredient>,
    /// Enums in declaration order.
    pub enums: Vec<EnumDef>,
}

/// A named, typed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Ingredient {
    pub name: String,
    /// Keyed ingredients are addressed through one of their key constants.
    #[serde(default)]
    pub keyed: bool,
    #[serde(default)]
    pub required: Vec<Required>,
    #[serde(default)]
    pub initializers: Vec<Initializer>,
    #[serde(default)]
    pub optionals: Vec<Optional>,
    #[serde(default)]
    pub key_constants: Vec<String>,
}

/// A field that must be supplied, either by an initializer or by its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Required {
    pub name: String,
    /// Type in its string form (e.g. `string[]...`), resolved lazily.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, alias = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// One ordered selection of required fields used to construct an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Initializer {
    #[serde(default)]
    pub params: Vec<String>,
}

/// An optional field: a single typed value or a named group of params.
///
/// Exactly one of `ty` and `params` is expected to be set; the validator
/// rejects anything else, so the raw fields are kept as decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Optional {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Param>>,
    #[serde(default)]
    pub repeatable: bool,
}

/// A typed member of a compound optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A named set of string values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A literal value, used for required-field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

/// The shape of a well-formed optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionalShape<'a> {
    /// A single value of the given type.
    Simple(&'a str),
    /// A group of params.
    Compound(&'a [Param]),
}

impl Cookbook {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Find an enum by name.
    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Find an ingredient by name.
    pub fn find_ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyed: false,
            required: Vec::new(),
            initializers: Vec::new(),
            optionals: Vec::new(),
            key_constants: Vec::new(),
        }
    }

    pub fn keyed(mut self, constants: &[&str]) -> Self {
        self.keyed = true;
        self.key_constants = constants.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_required(mut self, required: Required) -> Self {
        self.required.push(required);
        self
    }

    pub fn with_initializer(mut self, params: &[&str]) -> Self {
        self.initializers.push(Initializer::new(params));
        self
    }

    pub fn with_optional(mut self, optional: Optional) -> Self {
        self.optionals.push(optional);
        self
    }

    /// Find a required field by name.
    pub fn find_required(&self, name: &str) -> Option<&Required> {
        self.required.iter().find(|r| r.name == name)
    }

    /// All field names, required first, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .map(|r| r.name.as_str())
            .chain(self.optionals.iter().map(|o| o.name.as_str()))
    }
}

impl Required {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

impl Initializer {
    pub fn new(params: &[&str]) -> Self {
        Self {
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Optional {
    /// A simple optional holding one value of `ty`.
    pub fn simple(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            params: None,
            repeatable: false,
        }
    }

    /// A compound optional grouping `params`.
    pub fn compound(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            params: Some(params),
            repeatable: false,
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// The optional's shape, or `None` if both or neither of `type` and
    /// `params` are set.
    pub fn shape(&self) -> Option<OptionalShape<'_>> {
        match (&self.ty, &self.params) {
            (Some(ty), None) => Some(OptionalShape::Simple(ty)),
            (None, Some(params)) => Some(OptionalShape::Compound(params)),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.shape(), Some(OptionalShape::Compound(_)))
    }
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl EnumDef {
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

impl Value {
    /// Short description of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
