//! Semantic validation.
//!
//! Validation is a fixed, ordered list of whole-cookbook rules. Rules run one
//! after another and the first violation aborts the run; a later rule may
//! assume every earlier rule holds (for example, signature checks assume all
//! types resolve). Validation never mutates the cookbook, so re-running it on
//! a valid cookbook always succeeds again.

use crate::error::{NameScope, SchemaError};
use crate::model::{Cookbook, Ingredient, OptionalShape, Param};
use crate::types::{BUILTIN_TYPE_KEYWORDS, ParamType, parse_type};
use std::collections::{HashMap, HashSet};

type Rule = fn(&Cookbook) -> Result<(), SchemaError>;

/// Validation rules, in the order they run.
pub const RULES: &[(&str, Rule)] = &[
    ("unique-ingredient-names", unique_ingredient_names),
    ("unique-field-names", unique_field_names),
    ("types-resolve", types_resolve),
    ("initializer-params-declared", initializer_params_declared),
    ("required-coverage", required_coverage),
    ("unambiguous-initializers", unambiguous_initializers),
    ("initializer-vararg-last", initializer_vararg_last),
    ("optional-shape", optional_shape),
    ("compound-params", compound_params),
    ("compound-vararg-last", compound_vararg_last),
    ("unique-enum-names", unique_enum_names),
    ("enum-values", enum_values),
    ("enum-name-syntax", enum_name_syntax),
    ("flag-placement", flag_placement),
    ("defaults-conform", defaults_conform),
    ("key-constants", key_constants),
];

/// Validate a cookbook, failing on the first violated rule.
pub fn validate(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for (name, rule) in RULES {
        tracing::debug!(rule = name, "checking");
        if let Err(err) = rule(cookbook) {
            tracing::debug!(rule = name, error = %err, "rule failed");
            return Err(err);
        }
    }
    tracing::debug!(
        ingredients = cookbook.ingredients.len(),
        enums = cookbook.enums.len(),
        "cookbook is valid"
    );
    Ok(())
}

/// Language-neutral identifier grammar: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unique_ingredient_names(cookbook: &Cookbook) -> Result<(), SchemaError> {
    first_duplicate(cookbook.ingredients.iter().map(|i| i.name.as_str())).map_or(Ok(()), |name| {
        Err(SchemaError::DuplicateName {
            scope: NameScope::Ingredient,
            name: name.to_string(),
            owner: None,
        })
    })
}

fn unique_field_names(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        if let Some(name) = first_duplicate(ingredient.field_names()) {
            return Err(SchemaError::DuplicateName {
                scope: NameScope::Field,
                name: name.to_string(),
                owner: Some(ingredient.name.clone()),
            });
        }
    }
    Ok(())
}

fn types_resolve(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for required in &ingredient.required {
            resolve(cookbook, &required.ty, || {
                format!("{}.{}", ingredient.name, required.name)
            })?;
        }
        for optional in &ingredient.optionals {
            if let Some(ty) = &optional.ty {
                resolve(cookbook, ty, || format!("{}.{}", ingredient.name, optional.name))?;
            }
            for param in optional.params.iter().flatten() {
                resolve(cookbook, &param.ty, || {
                    format!("{}.{}.{}", ingredient.name, optional.name, param.name)
                })?;
            }
        }
    }
    Ok(())
}

fn initializer_params_declared(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for (index, initializer) in ingredient.initializers.iter().enumerate() {
            if let Some(param) = initializer
                .params
                .iter()
                .find(|p| ingredient.find_required(p).is_none())
            {
                return Err(SchemaError::UndeclaredInitializerParam {
                    ingredient: ingredient.name.clone(),
                    initializer: index,
                    param: param.clone(),
                });
            }
        }
    }
    Ok(())
}

fn required_coverage(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for required in ingredient.required.iter().filter(|r| r.default.is_none()) {
            for (index, initializer) in ingredient.initializers.iter().enumerate() {
                if !initializer.params.contains(&required.name) {
                    return Err(SchemaError::MissingRequiredCoverage {
                        ingredient: ingredient.name.clone(),
                        initializer: index,
                        field: required.name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Two initializers collide when their params have the same resolved types in
/// the same order.
///
/// This is intentionally stricter than exact type equality: a vararg compares
/// equal to the matching array type, so `(int...)` and `(int[])` collide even
/// though the resolved types differ. Java, Kotlin, and TypeScript all erase
/// `T...` to `T[]` in overload signatures.
fn unambiguous_initializers(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        let mut seen: HashMap<Vec<ParamType>, usize> = HashMap::new();
        for (index, initializer) in ingredient.initializers.iter().enumerate() {
            let signature = initializer
                .params
                .iter()
                .map(|p| required_type(cookbook, ingredient, p).map(|ty| ty.as_array()))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(&first) = seen.get(&signature) {
                return Err(SchemaError::AmbiguousInitializerSignature {
                    ingredient: ingredient.name.clone(),
                    first,
                    second: index,
                    signature: render_signature(&signature),
                });
            }
            seen.insert(signature, index);
        }
    }
    Ok(())
}

fn initializer_vararg_last(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for (index, initializer) in ingredient.initializers.iter().enumerate() {
            let types = initializer
                .params
                .iter()
                .map(|p| required_type(cookbook, ingredient, p))
                .collect::<Result<Vec<_>, _>>()?;
            check_vararg_last(
                initializer.params.iter().map(String::as_str).zip(&types),
                || format!("initializer #{index} of `{}`", ingredient.name),
            )?;
        }
    }
    Ok(())
}

fn optional_shape(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for optional in &ingredient.optionals {
            let reason = match (&optional.ty, &optional.params) {
                (Some(_), Some(_)) => "sets both `type` and `params`",
                (None, None) => "sets neither `type` nor `params`",
                _ => continue,
            };
            return Err(SchemaError::InvalidOptionalShape {
                ingredient: ingredient.name.clone(),
                optional: optional.name.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn compound_params(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for optional in &ingredient.optionals {
            let Some(OptionalShape::Compound(params)) = optional.shape() else {
                continue;
            };
            let invalid = |reason| SchemaError::InvalidOptionalShape {
                ingredient: ingredient.name.clone(),
                optional: optional.name.clone(),
                reason,
            };
            if params.is_empty() {
                return Err(invalid("has an empty `params` list"));
            }
            for ty in param_types(cookbook, ingredient, &optional.name, params)? {
                if ty.is_flag() {
                    return Err(invalid("has a `flag` param; flags cannot be grouped"));
                }
            }
        }
    }
    Ok(())
}

fn compound_vararg_last(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for optional in &ingredient.optionals {
            let Some(OptionalShape::Compound(params)) = optional.shape() else {
                continue;
            };
            let types = param_types(cookbook, ingredient, &optional.name, params)?;
            check_vararg_last(params.iter().map(|p| p.name.as_str()).zip(&types), || {
                format!("optional `{}` of `{}`", optional.name, ingredient.name)
            })?;
        }
    }
    Ok(())
}

fn unique_enum_names(cookbook: &Cookbook) -> Result<(), SchemaError> {
    first_duplicate(cookbook.enums.iter().map(|e| e.name.as_str())).map_or(Ok(()), |name| {
        Err(SchemaError::DuplicateName {
            scope: NameScope::Enum,
            name: name.to_string(),
            owner: None,
        })
    })
}

fn enum_values(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for def in &cookbook.enums {
        if def.values.is_empty() {
            return Err(SchemaError::InvalidEnum {
                name: def.name.clone(),
                reason: "no values".to_string(),
            });
        }
        if let Some(value) = first_duplicate(def.values.iter().map(String::as_str)) {
            return Err(SchemaError::InvalidEnum {
                name: def.name.clone(),
                reason: format!("duplicate value `{value}`"),
            });
        }
    }
    Ok(())
}

fn enum_name_syntax(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for def in &cookbook.enums {
        let reason = if !is_identifier(&def.name) {
            "name is not a valid identifier"
        } else if BUILTIN_TYPE_KEYWORDS.contains(&def.name.as_str()) {
            "name shadows a built-in type"
        } else {
            continue;
        };
        return Err(SchemaError::InvalidEnum {
            name: def.name.clone(),
            reason: reason.to_string(),
        });
    }
    Ok(())
}

fn flag_placement(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for required in &ingredient.required {
            if required_type(cookbook, ingredient, &required.name)?.is_flag() {
                return Err(SchemaError::FlagNotAllowed {
                    ingredient: ingredient.name.clone(),
                    field: required.name.clone(),
                });
            }
        }
        for optional in &ingredient.optionals {
            let Some(OptionalShape::Simple(ty)) = optional.shape() else {
                continue;
            };
            let ty = resolve(cookbook, ty, || format!("{}.{}", ingredient.name, optional.name))?;
            if ty.is_flag() && ty.vararg {
                return Err(SchemaError::InvalidOptionalShape {
                    ingredient: ingredient.name.clone(),
                    optional: optional.name.clone(),
                    reason: "combines `flag` with a vararg modifier",
                });
            }
        }
    }
    Ok(())
}

fn defaults_conform(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        for required in &ingredient.required {
            let Some(value) = &required.default else {
                continue;
            };
            let subject = format!("{}.{}", ingredient.name, required.name);
            let ty = resolve(cookbook, &required.ty, || subject.clone())?;
            ty.check_value(cookbook, value)
                .map_err(|err| SchemaError::from_value_error(subject, err))?;
        }
    }
    Ok(())
}

fn key_constants(cookbook: &Cookbook) -> Result<(), SchemaError> {
    for ingredient in &cookbook.ingredients {
        let reason = if !ingredient.keyed && !ingredient.key_constants.is_empty() {
            "declared on an ingredient that is not keyed".to_string()
        } else if let Some(dup) = first_duplicate(ingredient.key_constants.iter().map(String::as_str))
        {
            format!("duplicate constant `{dup}`")
        } else {
            continue;
        };
        return Err(SchemaError::InvalidKeyConstants {
            ingredient: ingredient.name.clone(),
            reason,
        });
    }
    Ok(())
}

fn resolve(
    cookbook: &Cookbook,
    ty: &str,
    subject: impl FnOnce() -> String,
) -> Result<ParamType, SchemaError> {
    parse_type(ty, cookbook).map_err(|err| SchemaError::UnknownType {
        subject: subject(),
        ty: err.ty,
    })
}

fn required_type(
    cookbook: &Cookbook,
    ingredient: &Ingredient,
    field: &str,
) -> Result<ParamType, SchemaError> {
    let required =
        ingredient
            .find_required(field)
            .ok_or_else(|| SchemaError::UndeclaredInitializerParam {
                ingredient: ingredient.name.clone(),
                initializer: 0,
                param: field.to_string(),
            })?;
    resolve(cookbook, &required.ty, || {
        format!("{}.{}", ingredient.name, required.name)
    })
}

fn param_types(
    cookbook: &Cookbook,
    ingredient: &Ingredient,
    optional: &str,
    params: &[Param],
) -> Result<Vec<ParamType>, SchemaError> {
    params
        .iter()
        .map(|p| {
            resolve(cookbook, &p.ty, || {
                format!("{}.{}.{}", ingredient.name, optional, p.name)
            })
        })
        .collect()
}

fn check_vararg_last<'a>(
    params: impl Iterator<Item = (&'a str, &'a ParamType)>,
    subject: impl FnOnce() -> String,
) -> Result<(), SchemaError> {
    let params: Vec<_> = params.collect();
    let last = params.len().saturating_sub(1);
    match params
        .iter()
        .enumerate()
        .find(|(index, (_, ty))| ty.vararg && *index != last)
    {
        Some((_, (name, _))) => Err(SchemaError::MisplacedVararg {
            subject: subject(),
            param: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn render_signature(types: &[ParamType]) -> String {
    let parts: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}

fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaErrorKind;
    use crate::model::{EnumDef, Optional, Param, Required, Value};

    fn kind(cookbook: &Cookbook) -> Option<SchemaErrorKind> {
        validate(cookbook).err().map(|e| e.kind())
    }

    #[test]
    fn identifier_grammar() {
        assert!(is_identifier("Foo"));
        assert!(is_identifier("_foo9"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("has-dash"));
        assert!(!is_identifier("spa ce"));
    }

    #[test]
    fn empty_cookbook_is_valid() {
        assert!(validate(&Cookbook::default()).is_ok());
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.first(), Some(&"unique-ingredient-names"));
        assert_eq!(names[12], "enum-name-syntax");
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn earlier_rule_wins() {
        // Both a duplicate ingredient and an unknown type: rule 1 reports first.
        let cookbook = Cookbook::default()
            .with_ingredient(Ingredient::new("Foo").with_required(Required::new("a", "Nope")))
            .with_ingredient(Ingredient::new("Foo"));
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::DuplicateName));
    }

    #[test]
    fn vararg_and_array_signatures_collide() {
        let cookbook = Cookbook::default().with_ingredient(
            Ingredient::new("Foo")
                .with_required(Required::new("a", "int...").with_default(Value::List(vec![])))
                .with_required(Required::new("b", "int[]").with_default(Value::List(vec![])))
                .with_initializer(&["a"])
                .with_initializer(&["b"]),
        );
        assert_eq!(
            kind(&cookbook),
            Some(SchemaErrorKind::AmbiguousInitializerSignature)
        );
    }

    #[test]
    fn two_varargs_in_initializer() {
        let cookbook = Cookbook::default().with_ingredient(
            Ingredient::new("Foo")
                .with_required(Required::new("a", "int..."))
                .with_required(Required::new("b", "string..."))
                .with_initializer(&["a", "b"]),
        );
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::MisplacedVararg));
    }

    #[test]
    fn flag_in_compound() {
        let cookbook = Cookbook::default().with_ingredient(Ingredient::new("Foo").with_optional(
            Optional::compound(
                "grp",
                vec![Param::new("on", "flag"), Param::new("n", "int")],
            ),
        ));
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::InvalidOptionalShape));
    }

    #[test]
    fn empty_compound() {
        let cookbook = Cookbook::default()
            .with_ingredient(Ingredient::new("Foo").with_optional(Optional::compound("grp", vec![])));
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::InvalidOptionalShape));
    }

    #[test]
    fn flag_required_rejected() {
        let cookbook = Cookbook::default().with_ingredient(
            Ingredient::new("Foo")
                .with_required(Required::new("on", "flag"))
                .with_initializer(&["on"]),
        );
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::FlagNotAllowed));
    }

    #[test]
    fn flag_vararg_optional_rejected() {
        let cookbook = Cookbook::default()
            .with_ingredient(Ingredient::new("Foo").with_optional(Optional::simple("on", "flag...")));
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::InvalidOptionalShape));
    }

    #[test]
    fn flag_array_does_not_resolve() {
        let cookbook = Cookbook::default()
            .with_ingredient(Ingredient::new("Foo").with_optional(Optional::simple("on", "flag[]")));
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::UnknownType));
    }

    #[test]
    fn enum_problems() {
        let empty = Cookbook::default().with_enum(EnumDef::new("E", &[]));
        assert_eq!(kind(&empty), Some(SchemaErrorKind::InvalidEnum));

        let dup = Cookbook::default().with_enum(EnumDef::new("E", &["A", "A"]));
        assert_eq!(kind(&dup), Some(SchemaErrorKind::InvalidEnum));

        let bad_name = Cookbook::default().with_enum(EnumDef::new("1E", &["A"]));
        assert_eq!(kind(&bad_name), Some(SchemaErrorKind::InvalidEnum));

        let shadow = Cookbook::default().with_enum(EnumDef::new("string", &["A"]));
        assert_eq!(kind(&shadow), Some(SchemaErrorKind::InvalidEnum));

        let twice = Cookbook::default()
            .with_enum(EnumDef::new("E", &["A"]))
            .with_enum(EnumDef::new("E", &["B"]));
        assert_eq!(kind(&twice), Some(SchemaErrorKind::DuplicateName));
    }

    #[test]
    fn defaults_must_conform() {
        let wrong_kind = Cookbook::default().with_ingredient(
            Ingredient::new("Foo").with_required(Required::new("a", "int").with_default("x".into())),
        );
        assert_eq!(kind(&wrong_kind), Some(SchemaErrorKind::ValueTypeMismatch));

        let not_member = Cookbook::default()
            .with_enum(EnumDef::new("E", &["A"]))
            .with_ingredient(
                Ingredient::new("Foo").with_required(Required::new("e", "E").with_default("B".into())),
            );
        assert_eq!(kind(&not_member), Some(SchemaErrorKind::ValueNotInEnum));
    }

    #[test]
    fn key_constants_need_keyed() {
        let mut loose = Ingredient::new("Foo");
        loose.key_constants = vec!["K".into()];
        let cookbook = Cookbook::default().with_ingredient(loose);
        assert_eq!(kind(&cookbook), Some(SchemaErrorKind::InvalidKeyConstants));

        let dup = Cookbook::default().with_ingredient(Ingredient::new("Foo").keyed(&["K", "K"]));
        assert_eq!(kind(&dup), Some(SchemaErrorKind::InvalidKeyConstants));

        let ok = Cookbook::default().with_ingredient(Ingredient::new("Foo").keyed(&["K", "L"]));
        assert_eq!(kind(&ok), None);
    }
}
