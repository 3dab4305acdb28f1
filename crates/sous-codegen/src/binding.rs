//! The language binding contract.
//!
//! A [`Binding`] maps resolved schema types, literal values, identifiers, and
//! accessor names into one target language. Bindings are stateless: every
//! decision is a pure function of the arguments and the binding's static
//! reserved-word and inherited-accessor tables, so one binding value can be
//! shared freely across threads and generation runs.
//!
//! # Implementing a Binding
//!
//! ```ignore
//! use sous_codegen::{Binding, Literal};
//! use sous_schema::{BaseType, ParamType, Primitive};
//!
//! struct Swift;
//!
//! impl Binding for Swift {
//!     fn name(&self) -> &'static str { "swift" }
//!     fn language(&self) -> &'static str { "swift" }
//!     fn extension(&self) -> &'static str { "swift" }
//!     fn reserved_words(&self) -> &'static [&'static str] { &["class", "func", "let"] }
//!     fn inherited_accessors(&self) -> &'static [&'static str] { &[] }
//!     fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String { /* ... */ }
//!     fn literal(&self, literal: Literal<'_>) -> String { /* ... */ }
//! }
//! ```

use crate::naming::capitalize;
use sous_schema::{BaseType, Cookbook, ParamType, Primitive, SchemaError, Value};

/// A typed literal, ready for a binding to spell.
///
/// The shared [`Binding::map_value`] walk checks each value against its type
/// and hands the binding one of these; bindings only decide syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    Bool(bool),
    /// Always within the 32-bit `int` range.
    Integer(i64),
    Float(f64),
    String(&'a str),
    /// A member of a declared enum, with both names already mapped through
    /// [`Binding::map_identifier`].
    EnumMember { enum_ident: String, member_ident: String },
    /// A sequence literal. `element` is the item type; `items` are already
    /// rendered, in source order.
    Array {
        element: &'a ParamType,
        items: Vec<String>,
    },
}

/// A target language's type, value, identifier, and accessor mapping.
pub trait Binding: Send + Sync {
    /// Unique binding identifier (e.g., "java", "typescript").
    fn name(&self) -> &'static str;

    /// Target language (e.g., "java").
    fn language(&self) -> &'static str;

    /// File extension for generated sources (e.g., "java").
    fn extension(&self) -> &'static str;

    /// Words that cannot be used as identifiers in this language.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Method names every generated type inherits from the language's
    /// universal base type (e.g., Java's `getClass`).
    fn inherited_accessors(&self) -> &'static [&'static str];

    /// Render a resolved type as target syntax.
    ///
    /// With `array_for_vararg`, a vararg type renders as its fixed-array
    /// form instead of the language's variadic parameter syntax.
    fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String;

    /// Spell a typed literal.
    fn literal(&self, literal: Literal<'_>) -> String;

    /// Disambiguate a name that is a reserved word. Defaults to a `_` prefix.
    fn escape_identifier(&self, name: &str) -> String {
        format!("_{name}")
    }

    /// `name` unchanged, unless it is reserved in this language.
    fn map_identifier(&self, name: &str) -> String {
        if self.reserved_words().contains(&name) {
            self.escape_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Accessor name for a field: `isFoo` for non-compound booleans and
    /// flags, `getFoo` otherwise. Names that collide with an inherited
    /// accessor get a `_` suffix.
    ///
    /// `compound` marks fields that are (or belong to) a compound optional;
    /// those always use the `get` prefix.
    fn map_accessor_name(&self, field: &str, ty: &ParamType, compound: bool) -> String {
        let prefix = if !compound && ty.is_boolean_like() {
            "is"
        } else {
            "get"
        };
        let name = format!("{prefix}{}", capitalize(field));
        self.disambiguate_accessor(name)
    }

    /// Append the collision marker if `name` is an inherited accessor.
    fn disambiguate_accessor(&self, name: String) -> String {
        if self.inherited_accessors().contains(&name.as_str()) {
            format!("{name}_")
        } else {
            name
        }
    }

    /// Render `value` as a literal of type `ty`.
    ///
    /// Sequence types recurse element-wise, preserving order. Fails with
    /// `UnknownType` if an enum type is not declared in `cookbook`,
    /// `ValueNotInEnum` for a string that is not one of its members, and
    /// `ValueTypeMismatch` if the value's shape does not fit the type.
    fn map_value(
        &self,
        cookbook: &Cookbook,
        value: &Value,
        ty: &ParamType,
    ) -> Result<String, SchemaError> {
        let mismatch = || SchemaError::ValueTypeMismatch {
            subject: format!("{} literal", self.name()),
            expected: ty.to_string(),
            value: value.to_string(),
        };

        if let Some(element) = ty.element() {
            let Value::List(values) = value else {
                return Err(mismatch());
            };
            let items = values
                .iter()
                .map(|v| self.map_value(cookbook, v, &element))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(self.literal(Literal::Array {
                element: &element,
                items,
            }));
        }

        let literal = match (&ty.base, value) {
            (BaseType::Primitive(Primitive::Boolean) | BaseType::Flag, Value::Bool(b)) => {
                Literal::Bool(*b)
            }
            (BaseType::Primitive(Primitive::Integer), Value::Integer(i))
                if i32::try_from(*i).is_ok() =>
            {
                Literal::Integer(*i)
            }
            (BaseType::Primitive(Primitive::Float), Value::Float(x)) => Literal::Float(*x),
            (BaseType::Primitive(Primitive::Float), Value::Integer(i)) => Literal::Float(*i as f64),
            (BaseType::Primitive(Primitive::String), Value::String(s)) => Literal::String(s),
            (BaseType::EnumRef(name), Value::String(member)) => {
                let def = cookbook
                    .find_enum(name)
                    .ok_or_else(|| SchemaError::UnknownType {
                        subject: format!("{} literal", self.name()),
                        ty: name.clone(),
                    })?;
                if !def.contains(member) {
                    return Err(SchemaError::ValueNotInEnum {
                        enum_name: name.clone(),
                        value: member.clone(),
                    });
                }
                Literal::EnumMember {
                    enum_ident: self.map_identifier(name),
                    member_ident: self.map_enum_member(member),
                }
            }
            _ => return Err(mismatch()),
        };
        Ok(self.literal(literal))
    }

    /// Identifier for an enum member value.
    fn map_enum_member(&self, value: &str) -> String {
        self.map_identifier(&crate::naming::sanitize_identifier(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sous_schema::{EnumDef, parse_type};

    /// Minimal binding with Lisp-ish syntax to exercise the provided methods.
    struct Sexp;

    impl Binding for Sexp {
        fn name(&self) -> &'static str {
            "sexp"
        }
        fn language(&self) -> &'static str {
            "sexp"
        }
        fn extension(&self) -> &'static str {
            "el"
        }
        fn reserved_words(&self) -> &'static [&'static str] {
            &["nil", "t"]
        }
        fn inherited_accessors(&self) -> &'static [&'static str] {
            &["getType"]
        }
        fn map_type(&self, ty: &ParamType, _array_for_vararg: bool) -> String {
            ty.to_string()
        }
        fn literal(&self, literal: Literal<'_>) -> String {
            match literal {
                Literal::Bool(b) => (if b { "t" } else { "nil" }).to_string(),
                Literal::Integer(i) => i.to_string(),
                Literal::Float(x) => format!("{x:?}"),
                Literal::String(s) => format!("{s:?}"),
                Literal::EnumMember {
                    enum_ident,
                    member_ident,
                } => format!("'{enum_ident}/{member_ident}"),
                Literal::Array { items, .. } => format!("({})", items.join(" ")),
            }
        }
    }

    fn cookbook() -> Cookbook {
        Cookbook::default().with_enum(EnumDef::new("TestEnum", &["A", "B", "C"]))
    }

    #[test]
    fn identifiers_escape_reserved_words() {
        assert_eq!(Sexp.map_identifier("nil"), "_nil");
        assert_eq!(Sexp.map_identifier("nill"), "nill");
    }

    #[test]
    fn accessor_prefixes() {
        let cb = cookbook();
        let boolean = parse_type("boolean", &cb).unwrap();
        let flag = parse_type("flag", &cb).unwrap();
        let text = parse_type("string", &cb).unwrap();
        assert_eq!(Sexp.map_accessor_name("done", &boolean, false), "isDone");
        assert_eq!(Sexp.map_accessor_name("stir", &flag, false), "isStir");
        assert_eq!(Sexp.map_accessor_name("done", &boolean, true), "getDone");
        assert_eq!(Sexp.map_accessor_name("name", &text, false), "getName");
        assert_eq!(Sexp.map_accessor_name("type", &text, false), "getType_");
    }

    #[test]
    fn values_recurse_in_order() {
        let cb = cookbook();
        let ints = parse_type("int[]", &cb).unwrap();
        let value = Value::from(vec![3i64, 1, 2, 1]);
        assert_eq!(Sexp.map_value(&cb, &value, &ints).unwrap(), "(3 1 2 1)");

        let nested = parse_type("int[][]...", &cb).unwrap();
        let value = Value::List(vec![Value::List(vec![Value::from(vec![1i64])])]);
        assert_eq!(Sexp.map_value(&cb, &value, &nested).unwrap(), "(((1)))");
    }

    #[test]
    fn enum_members_are_checked() {
        let cb = cookbook();
        let ty = parse_type("TestEnum", &cb).unwrap();
        assert_eq!(
            Sexp.map_value(&cb, &Value::from("B"), &ty).unwrap(),
            "'TestEnum/B"
        );
        assert_eq!(
            Sexp.map_value(&cb, &Value::from("D"), &ty),
            Err(SchemaError::ValueNotInEnum {
                enum_name: "TestEnum".into(),
                value: "D".into()
            })
        );
        let stray = ParamType::enum_ref("Gone");
        assert_eq!(
            Sexp.map_value(&cb, &Value::from("A"), &stray)
                .unwrap_err()
                .kind(),
            sous_schema::SchemaErrorKind::UnknownType
        );
    }

    #[test]
    fn shape_mismatch() {
        let cb = cookbook();
        let ints = parse_type("int[]", &cb).unwrap();
        assert_eq!(
            Sexp.map_value(&cb, &Value::Integer(1), &ints)
                .unwrap_err()
                .kind(),
            sous_schema::SchemaErrorKind::ValueTypeMismatch
        );
        let float = parse_type("float", &cb).unwrap();
        assert_eq!(Sexp.map_value(&cb, &Value::Integer(2), &float).unwrap(), "2.0");
    }
}
