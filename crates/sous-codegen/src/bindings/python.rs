//! Python binding.
//!
//! Types are PEP 585 annotations (`list[int]`). Accessors follow PEP 8
//! (`get_enum_arg`, `is_ready`) and never collide with `object` members,
//! which are all dunder names.

use crate::binding::{Binding, Literal};
use crate::naming::{escape_double_quoted, snake_case};
use sous_schema::{BaseType, ParamType, Primitive};

/// Static instance of the Python binding for the binding set.
pub static PYTHON_BINDING: PythonBinding = PythonBinding;

const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub struct PythonBinding;

impl PythonBinding {
    fn base(&self, base: &BaseType) -> String {
        match base {
            BaseType::Primitive(Primitive::Boolean) | BaseType::Flag => "bool".to_string(),
            BaseType::Primitive(Primitive::Integer) => "int".to_string(),
            BaseType::Primitive(Primitive::Float) => "float".to_string(),
            BaseType::Primitive(Primitive::String) => "str".to_string(),
            BaseType::EnumRef(name) => self.map_identifier(name),
            BaseType::Array(inner) => format!("list[{}]", self.base(inner)),
        }
    }
}

impl Binding for PythonBinding {
    fn name(&self) -> &'static str {
        "python"
    }

    fn language(&self) -> &'static str {
        "python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn inherited_accessors(&self) -> &'static [&'static str] {
        &[]
    }

    /// PEP 8 trailing underscore: `class` -> `class_`.
    fn escape_identifier(&self, name: &str) -> String {
        format!("{name}_")
    }

    /// `*args: T` annotates the element, so a native vararg is its element
    /// type.
    fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String {
        let base = self.base(&ty.base);
        if ty.vararg && array_for_vararg {
            format!("list[{base}]")
        } else {
            base
        }
    }

    fn map_accessor_name(&self, field: &str, ty: &ParamType, compound: bool) -> String {
        let prefix = if !compound && ty.is_boolean_like() {
            "is"
        } else {
            "get"
        };
        self.disambiguate_accessor(format!("{prefix}_{}", snake_case(field)))
    }

    fn literal(&self, literal: Literal<'_>) -> String {
        match literal {
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Integer(i) => i.to_string(),
            Literal::Float(x) if x.is_nan() => r#"float("nan")"#.to_string(),
            Literal::Float(x) if x.is_infinite() => {
                if x > 0.0 { r#"float("inf")"# } else { r#"float("-inf")"# }.to_string()
            }
            Literal::Float(x) => format!("{x:?}"),
            Literal::String(s) => escape_double_quoted(s),
            Literal::EnumMember {
                enum_ident,
                member_ident,
            } => format!("{enum_ident}.{member_ident}"),
            Literal::Array { items, .. } => format!("[{}]", items.join(", ")),
        }
    }
}
