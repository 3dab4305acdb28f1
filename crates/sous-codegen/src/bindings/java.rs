//! Java binding.

use crate::binding::{Binding, Literal};
use crate::naming::escape_double_quoted;
use sous_schema::{BaseType, ParamType, Primitive};

/// Static instance of the Java binding for the binding set.
pub static JAVA_BINDING: JavaBinding = JavaBinding;

/// Java keywords and literals.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "var", "void", "volatile", "while", "yield", "record",
];

/// Public methods of `java.lang.Object`.
const OBJECT_METHODS: &[&str] = &[
    "getClass",
    "hashCode",
    "equals",
    "clone",
    "toString",
    "notify",
    "notifyAll",
    "wait",
    "finalize",
];

/// Java binding: `int`/`double`/`String`, arrays as `T[]`, varargs as `T...`.
pub struct JavaBinding;

impl JavaBinding {
    fn base(&self, base: &BaseType) -> String {
        match base {
            BaseType::Primitive(Primitive::Boolean) | BaseType::Flag => "boolean".to_string(),
            BaseType::Primitive(Primitive::Integer) => "int".to_string(),
            BaseType::Primitive(Primitive::Float) => "double".to_string(),
            BaseType::Primitive(Primitive::String) => "String".to_string(),
            BaseType::EnumRef(name) => self.map_identifier(name),
            BaseType::Array(inner) => format!("{}[]", self.base(inner)),
        }
    }
}

impl Binding for JavaBinding {
    fn name(&self) -> &'static str {
        "java"
    }

    fn language(&self) -> &'static str {
        "java"
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn inherited_accessors(&self) -> &'static [&'static str] {
        OBJECT_METHODS
    }

    fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String {
        let base = self.base(&ty.base);
        match (ty.vararg, array_for_vararg) {
            (false, _) => base,
            (true, true) => format!("{base}[]"),
            (true, false) => format!("{base}..."),
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
            Literal::String(s) => escape_double_quoted(s),
            Literal::EnumMember {
                enum_ident,
                member_ident,
            } => format!("{enum_ident}.{member_ident}"),
            Literal::Array { element, items } => {
                format!(
                    "new {}[] {{{}}}",
                    self.map_type(element, true),
                    items.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sous_schema::{Cookbook, EnumDef, Value, parse_type};

    fn cookbook() -> Cookbook {
        Cookbook::default().with_enum(EnumDef::new("TestEnum", &["A", "B", "C"]))
    }

    fn ty(s: &str) -> ParamType {
        parse_type(s, &cookbook()).unwrap()
    }

    #[test]
    fn test_map_type() {
        let java = &JAVA_BINDING;
        assert_eq!(java.map_type(&ty("boolean"), false), "boolean");
        assert_eq!(java.map_type(&ty("flag"), false), "boolean");
        assert_eq!(java.map_type(&ty("int"), false), "int");
        assert_eq!(java.map_type(&ty("float"), false), "double");
        assert_eq!(java.map_type(&ty("string[][]"), false), "String[][]");
        assert_eq!(java.map_type(&ty("TestEnum"), false), "TestEnum");
        assert_eq!(java.map_type(&ty("string..."), false), "String...");
        assert_eq!(java.map_type(&ty("string..."), true), "String[]");
        assert_eq!(java.map_type(&ty("int[]..."), false), "int[]...");
    }

    #[test]
    fn test_map_value() {
        let java = &JAVA_BINDING;
        let cb = cookbook();
        assert_eq!(
            java.map_value(&cb, &Value::from(vec![1i64, 2, 3]), &ty("int[]"))
                .unwrap(),
            "new int[] {1, 2, 3}"
        );
        assert_eq!(
            java.map_value(
                &cb,
                &Value::List(vec![Value::from(vec!["a"]), Value::List(vec![])]),
                &ty("string[][]")
            )
            .unwrap(),
            r#"new String[][] {new String[] {"a"}, new String[] {}}"#
        );
        assert_eq!(
            java.map_value(&cb, &Value::from(vec!["B"]), &ty("TestEnum..."))
                .unwrap(),
            "new TestEnum[] {TestEnum.B}"
        );
        assert_eq!(
            java.map_value(&cb, &Value::Float(f64::NAN), &ty("float"))
                .unwrap(),
            "Double.NaN"
        );
        assert_eq!(
            java.map_value(&cb, &Value::Integer(i64::from(i32::MIN)), &ty("int"))
                .unwrap(),
            "-2147483648"
        );
        assert_eq!(
            java.map_value(&cb, &Value::Integer(5_000_000_000), &ty("int"))
                .unwrap_err()
                .kind(),
            sous_schema::SchemaErrorKind::ValueTypeMismatch
        );
    }

    #[test]
    fn test_identifiers_and_accessors() {
        let java = &JAVA_BINDING;
        assert_eq!(java.map_identifier("class"), "_class");
        assert_eq!(java.map_identifier("klass"), "klass");
        assert_eq!(
            java.map_accessor_name("class", &ty("string"), false),
            "getClass_"
        );
        assert_eq!(java.map_accessor_name("ready", &ty("flag"), false), "isReady");
    }
}
