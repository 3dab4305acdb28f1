//! Kotlin binding.
//!
//! Sequences are `List<T>`. A vararg parameter is declared with its element
//! type (`vararg xs: Int`), so the native vararg rendering of `int...` is
//! just `Int`; the renderer adds the `vararg` modifier.

use crate::binding::{Binding, Literal};
use crate::naming::escape_double_quoted;
use sous_schema::{BaseType, ParamType, Primitive};

/// Static instance of the Kotlin binding for the binding set.
pub static KOTLIN_BINDING: KotlinBinding = KotlinBinding;

/// Hard keywords.
const RESERVED: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Members of `Any`, plus `getClass`, which every class inherits on the JVM.
const ANY_METHODS: &[&str] = &["equals", "hashCode", "toString", "getClass"];

pub struct KotlinBinding;

impl KotlinBinding {
    fn base(&self, base: &BaseType) -> String {
        match base {
            BaseType::Primitive(Primitive::Boolean) | BaseType::Flag => "Boolean".to_string(),
            BaseType::Primitive(Primitive::Integer) => "Int".to_string(),
            BaseType::Primitive(Primitive::Float) => "Double".to_string(),
            BaseType::Primitive(Primitive::String) => "String".to_string(),
            BaseType::EnumRef(name) => self.map_identifier(name),
            BaseType::Array(inner) => format!("List<{}>", self.base(inner)),
        }
    }
}

impl Binding for KotlinBinding {
    fn name(&self) -> &'static str {
        "kotlin"
    }

    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn inherited_accessors(&self) -> &'static [&'static str] {
        ANY_METHODS
    }

    fn escape_identifier(&self, name: &str) -> String {
        format!("`{name}`")
    }

    fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String {
        let base = self.base(&ty.base);
        if ty.vararg && array_for_vararg {
            format!("List<{base}>")
        } else {
            base
        }
    }

    fn literal(&self, literal: Literal<'_>) -> String {
        match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::Integer(i) => i.to_string(),
            Literal::Float(x) if x.is_nan() => "Double.NaN".to_string(),
            Literal::Float(x) if x.is_infinite() => {
                if x > 0.0 {
                    "Double.POSITIVE_INFINITY".to_string()
                } else {
                    "Double.NEGATIVE_INFINITY".to_string()
                }
            }
            Literal::Float(x) => format!("{x:?}"),
            // `$` starts a string template in Kotlin.
            Literal::String(s) => escape_double_quoted(s).replace('$', "\\$"),
            Literal::EnumMember {
                enum_ident,
                member_ident,
            } => format!("{enum_ident}.{member_ident}"),
            Literal::Array { element, items } => {
                format!(
                    "listOf<{}>({})",
                    self.map_type(element, true),
                    items.join(", ")
                )
            }
        }
    }
}
