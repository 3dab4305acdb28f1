//! TypeScript binding.

use crate::binding::{Binding, Literal};
use crate::naming::escape_double_quoted;
use sous_schema::{BaseType, ParamType, Primitive};

/// Static instance of the TypeScript binding for the binding set.
pub static TYPESCRIPT_BINDING: TypeScriptBinding = TypeScriptBinding;

/// ECMAScript reserved words plus TypeScript's strict-mode and type keywords.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "implements", "interface", "let",
    "package", "private", "protected", "public", "static", "yield", "any", "boolean",
    "number", "string", "symbol", "type", "undefined",
];

/// Members of `Object.prototype`.
const OBJECT_PROTOTYPE: &[&str] = &[
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

pub struct TypeScriptBinding;

impl TypeScriptBinding {
    fn base(&self, base: &BaseType) -> String {
        match base {
            BaseType::Primitive(Primitive::Boolean) | BaseType::Flag => "boolean".to_string(),
            BaseType::Primitive(Primitive::Integer | Primitive::Float) => "number".to_string(),
            BaseType::Primitive(Primitive::String) => "string".to_string(),
            BaseType::EnumRef(name) => self.map_identifier(name),
            BaseType::Array(inner) => format!("{}[]", self.base(inner)),
        }
    }
}

impl Binding for TypeScriptBinding {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn inherited_accessors(&self) -> &'static [&'static str] {
        OBJECT_PROTOTYPE
    }

    /// A rest parameter is typed as the array it collects, so both vararg
    /// renderings coincide.
    fn map_type(&self, ty: &ParamType, _array_for_vararg: bool) -> String {
        let base = self.base(&ty.base);
        if ty.vararg { format!("{base}[]") } else { base }
    }

    fn literal(&self, literal: Literal<'_>) -> String {
        match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::Integer(i) => i.to_string(),
            Literal::Float(x) if x.is_nan() => "NaN".to_string(),
            Literal::Float(x) if x.is_infinite() => {
                if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
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
