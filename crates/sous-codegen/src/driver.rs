//! Generation driver: cookbook + binding -> artifact records.
//!
//! The driver expects a cookbook that already passed
//! [`validate`](sous_schema::validate). It re-resolves every type through the
//! binding and fails with the same [`SchemaError`] kinds if something slipped
//! through, but it does not repeat the validator's checks.
//!
//! What it does check is that the names a binding produces stay distinct.
//! Sanitizing, case conversion, and reserved-word escaping can map two
//! different schema names onto one identifier; that fails with
//! `DuplicateName` instead of yielding records that would not compile.

use crate::binding::Binding;
use crate::naming::{capitalize, sanitize_identifier, upper_snake_case};
use crate::record::{
    AccessorRecord, ArtifactRecord, AssignmentRecord, CompoundRecord, ConstantRecord,
    EnumRecord, FieldRecord, IngredientRecord, InitializerRecord, ManifestRecord, MemberRecord,
    OptionalRecord, ParamRecord,
};
use sous_schema::{
    Cookbook, EnumDef, Ingredient, NameScope, Optional, OptionalShape, ParamType, Primitive,
    SchemaError, Value, parse_type,
};
use std::collections::HashSet;

/// Map a validated cookbook through one binding.
///
/// Produces one record per ingredient, then one per enum, then the manifest,
/// each in declaration order. The function is pure: it reads the cookbook and
/// the binding's static tables and performs no I/O.
pub fn generate(
    cookbook: &Cookbook,
    binding: &dyn Binding,
) -> Result<Vec<ArtifactRecord>, SchemaError> {
    let mut records = Vec::with_capacity(cookbook.ingredients.len() + cookbook.enums.len() + 1);

    for ingredient in &cookbook.ingredients {
        let mapper = IngredientMapper {
            cookbook,
            binding,
            ingredient,
        };
        records.push(ArtifactRecord::Ingredient(mapper.record()?));
        tracing::debug!(binding = binding.name(), ingredient = %ingredient.name, "mapped");
    }

    for def in &cookbook.enums {
        records.push(ArtifactRecord::Enum(enum_record(cookbook, binding, def)?));
        tracing::debug!(binding = binding.name(), enum_name = %def.name, "mapped");
    }

    records.push(ArtifactRecord::Manifest(ManifestRecord {
        binding: binding.name().to_string(),
        language: binding.language().to_string(),
        extension: binding.extension().to_string(),
        domain: cookbook.domain.clone(),
        ingredients: cookbook.ingredients.iter().map(|i| i.name.clone()).collect(),
        enums: cookbook.enums.iter().map(|e| e.name.clone()).collect(),
    }));

    tracing::info!(
        binding = binding.name(),
        records = records.len(),
        "generated records"
    );
    Ok(records)
}

fn enum_record(
    cookbook: &Cookbook,
    binding: &dyn Binding,
    def: &EnumDef,
) -> Result<EnumRecord, SchemaError> {
    let ty = ParamType::enum_ref(&def.name);
    let members = def
        .values
        .iter()
        .map(|value| {
            Ok(MemberRecord {
                value: value.clone(),
                ident: binding.map_enum_member(value),
                literal: binding.map_value(cookbook, &Value::String(value.clone()), &ty)?,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;
    ensure_distinct(
        members.iter().map(|m| m.ident.as_str()),
        NameScope::EnumMember,
        &def.name,
    )?;
    Ok(EnumRecord {
        binding: binding.name().to_string(),
        name: def.name.clone(),
        ident: binding.map_identifier(&def.name),
        members,
    })
}

/// Fail on the first name that occurs twice.
fn ensure_distinct<'a>(
    names: impl IntoIterator<Item = &'a str>,
    scope: NameScope,
    owner: &str,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SchemaError::DuplicateName {
                scope,
                name: name.to_string(),
                owner: Some(owner.to_string()),
            });
        }
    }
    Ok(())
}

/// A required field with its resolved type.
struct Resolved<'a> {
    name: &'a str,
    ty: ParamType,
    default: Option<String>,
}

struct IngredientMapper<'a> {
    cookbook: &'a Cookbook,
    binding: &'a dyn Binding,
    ingredient: &'a Ingredient,
}

impl IngredientMapper<'_> {
    fn record(&self) -> Result<IngredientRecord, SchemaError> {
        let ingredient = self.ingredient;
        let binding = self.binding;

        let fields = ingredient
            .required
            .iter()
            .map(|r| {
                let ty = self.resolve(&r.ty, &r.name)?;
                let default = r
                    .default
                    .as_ref()
                    .map(|value| binding.map_value(self.cookbook, value, &ty))
                    .transpose()?;
                Ok(Resolved {
                    name: &r.name,
                    ty,
                    default,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let required: Vec<FieldRecord> = fields
            .iter()
            .map(|f| FieldRecord {
                name: f.name.to_string(),
                ident: binding.map_identifier(f.name),
                ty: binding.map_type(&f.ty, true),
                schema_type: f.ty.to_string(),
                default: f.default.clone(),
            })
            .collect();

        let mut accessors: Vec<AccessorRecord> = fields
            .iter()
            .map(|f| AccessorRecord {
                field: f.name.to_string(),
                name: binding.map_accessor_name(f.name, &f.ty, false),
                ty: binding.map_type(&f.ty, true),
                repeatable: false,
            })
            .collect();

        let initializers = self.initializers(&fields)?;

        let mut optionals = Vec::with_capacity(ingredient.optionals.len());
        let mut compounds = Vec::new();
        for optional in &ingredient.optionals {
            let (record, accessor, compound) = self.optional(optional)?;
            optionals.push(record);
            accessors.push(accessor);
            compounds.extend(compound);
        }

        let ident = binding.map_identifier(&ingredient.name);
        let owner = ingredient.name.as_str();
        ensure_distinct(
            required
                .iter()
                .map(|f| f.ident.as_str())
                .chain(optionals.iter().map(|o| o.ident.as_str())),
            NameScope::Field,
            owner,
        )?;
        ensure_distinct(
            accessors.iter().map(|a| a.name.as_str()),
            NameScope::Accessor,
            owner,
        )?;
        // Grouping types nest inside the ingredient's own type.
        ensure_distinct(
            std::iter::once(ident.as_str()).chain(compounds.iter().map(|c| c.ident.as_str())),
            NameScope::Compound,
            owner,
        )?;
        let key_constants = self.key_constants()?;
        ensure_distinct(
            key_constants.iter().map(|k| k.ident.as_str()),
            NameScope::KeyConstant,
            owner,
        )?;

        Ok(IngredientRecord {
            binding: binding.name().to_string(),
            name: ingredient.name.clone(),
            ident,
            keyed: ingredient.keyed,
            key_constants,
            required,
            initializers,
            optionals,
            compounds,
            accessors,
        })
    }

    fn key_constants(&self) -> Result<Vec<ConstantRecord>, SchemaError> {
        let string = ParamType::primitive(Primitive::String);
        self.ingredient
            .key_constants
            .iter()
            .map(|value| {
                Ok(ConstantRecord {
                    value: value.clone(),
                    ident: self
                        .binding
                        .map_identifier(&upper_snake_case(&sanitize_identifier(value))),
                    literal: self.binding.map_value(
                        self.cookbook,
                        &Value::String(value.clone()),
                        &string,
                    )?,
                })
            })
            .collect()
    }

    /// Map initializers. A trailing vararg is exposed as an array when the
    /// initializer without it would have the same signature as another
    /// initializer.
    fn initializers(&self, fields: &[Resolved<'_>]) -> Result<Vec<InitializerRecord>, SchemaError> {
        let ingredient = self.ingredient;
        let lookup = |index: usize, param: &str| {
            fields
                .iter()
                .find(|f| f.name == param)
                .ok_or_else(|| SchemaError::UndeclaredInitializerParam {
                    ingredient: ingredient.name.clone(),
                    initializer: index,
                    param: param.to_string(),
                })
        };

        let signatures = ingredient
            .initializers
            .iter()
            .enumerate()
            .map(|(index, init)| {
                init.params
                    .iter()
                    .map(|p| lookup(index, p.as_str()).map(|f| f.ty.as_array()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(ingredient.initializers.len());
        for (index, init) in ingredient.initializers.iter().enumerate() {
            let params: Vec<&Resolved<'_>> = init
                .params
                .iter()
                .map(|p| lookup(index, p.as_str()))
                .collect::<Result<_, _>>()?;

            let array_form = params.last().is_some_and(|last| last.ty.vararg) && {
                let prefix = &signatures[index][..params.len() - 1];
                signatures
                    .iter()
                    .enumerate()
                    .any(|(other, sig)| other != index && sig.as_slice() == prefix)
            };

            let params_records = params
                .iter()
                .map(|f| ParamRecord {
                    name: f.name.to_string(),
                    ident: self.binding.map_identifier(f.name),
                    ty: self.binding.map_type(&f.ty, array_form),
                    vararg: f.ty.vararg && !array_form,
                })
                .collect();

            let mut defaults = Vec::new();
            for field in fields.iter().filter(|f| !init.params.iter().any(|p| p == f.name)) {
                let Some(value) = &field.default else {
                    return Err(SchemaError::MissingRequiredCoverage {
                        ingredient: ingredient.name.clone(),
                        initializer: index,
                        field: field.name.to_string(),
                    });
                };
                defaults.push(AssignmentRecord {
                    field: field.name.to_string(),
                    ident: self.binding.map_identifier(field.name),
                    value: value.clone(),
                });
            }

            let types: Vec<String> = params.iter().map(|f| f.ty.to_string()).collect();
            records.push(InitializerRecord {
                params: params_records,
                defaults,
                signature: format!("({})", types.join(", ")),
            });
        }
        Ok(records)
    }

    fn optional(
        &self,
        optional: &Optional,
    ) -> Result<(OptionalRecord, AccessorRecord, Option<CompoundRecord>), SchemaError> {
        let binding = self.binding;
        let invalid = |reason| SchemaError::InvalidOptionalShape {
            ingredient: self.ingredient.name.clone(),
            optional: optional.name.clone(),
            reason,
        };

        match optional.shape() {
            None => Err(invalid("is neither simple nor compound")),
            Some(OptionalShape::Simple(ty)) => {
                let ty = self.resolve(ty, &optional.name)?;
                let flag = ty.is_flag();
                let params = if flag {
                    Vec::new()
                } else {
                    vec![self.param(&optional.name, &ty)]
                };
                let record = OptionalRecord {
                    name: optional.name.clone(),
                    ident: binding.map_identifier(&optional.name),
                    repeatable: optional.repeatable,
                    flag,
                    params,
                    compound: None,
                };
                let accessor = AccessorRecord {
                    field: optional.name.clone(),
                    name: binding.map_accessor_name(&optional.name, &ty, false),
                    ty: binding.map_type(&ty, true),
                    repeatable: optional.repeatable,
                };
                Ok((record, accessor, None))
            }
            Some(OptionalShape::Compound(params)) => {
                let types = params
                    .iter()
                    .map(|p| self.resolve(&p.ty, &format!("{}.{}", optional.name, p.name)))
                    .collect::<Result<Vec<_>, _>>()?;
                let first = types
                    .first()
                    .ok_or_else(|| invalid("has an empty `params` list"))?;

                let fields: Vec<ParamRecord> = params
                    .iter()
                    .zip(&types)
                    .map(|(p, ty)| self.param(&p.name, ty))
                    .collect();
                let ident = binding.map_identifier(&capitalize(&optional.name));
                let compound = CompoundRecord {
                    optional: optional.name.clone(),
                    ident: ident.clone(),
                    fields: fields.clone(),
                    accessors: params
                        .iter()
                        .zip(&types)
                        .map(|(p, ty)| AccessorRecord {
                            field: p.name.clone(),
                            name: binding.map_accessor_name(&p.name, ty, true),
                            ty: binding.map_type(ty, true),
                            repeatable: false,
                        })
                        .collect(),
                };
                let owner = format!("{}.{}", self.ingredient.name, optional.name);
                ensure_distinct(
                    compound.fields.iter().map(|f| f.ident.as_str()),
                    NameScope::Field,
                    &owner,
                )?;
                ensure_distinct(
                    compound.accessors.iter().map(|a| a.name.as_str()),
                    NameScope::Accessor,
                    &owner,
                )?;
                let record = OptionalRecord {
                    name: optional.name.clone(),
                    ident: binding.map_identifier(&optional.name),
                    repeatable: optional.repeatable,
                    flag: false,
                    params: fields,
                    compound: Some(ident.clone()),
                };
                let accessor = AccessorRecord {
                    field: optional.name.clone(),
                    name: binding.map_accessor_name(&optional.name, first, true),
                    ty: ident,
                    repeatable: optional.repeatable,
                };
                Ok((record, accessor, Some(compound)))
            }
        }
    }

    fn param(&self, name: &str, ty: &ParamType) -> ParamRecord {
        ParamRecord {
            name: name.to_string(),
            ident: self.binding.map_identifier(name),
            ty: self.binding.map_type(ty, false),
            vararg: ty.vararg,
        }
    }

    fn resolve(&self, ty: &str, field: &str) -> Result<ParamType, SchemaError> {
        parse_type(ty, self.cookbook).map_err(|err| SchemaError::UnknownType {
            subject: format!("{}.{}", self.ingredient.name, field),
            ty: err.ty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;
    use sous_schema::{Param, Required, SchemaErrorKind, validate};

    /// Spells types as schema strings and literals as `Debug`.
    struct Plain;

    impl Binding for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }
        fn language(&self) -> &'static str {
            "plain"
        }
        fn extension(&self) -> &'static str {
            "txt"
        }
        fn reserved_words(&self) -> &'static [&'static str] {
            &["new"]
        }
        fn inherited_accessors(&self) -> &'static [&'static str] {
            &[]
        }
        fn map_type(&self, ty: &ParamType, array_for_vararg: bool) -> String {
            if array_for_vararg {
                ty.as_array().to_string()
            } else {
                ty.to_string()
            }
        }
        fn literal(&self, literal: crate::Literal<'_>) -> String {
            match literal {
                crate::Literal::Array { items, .. } => format!("[{}]", items.join(",")),
                crate::Literal::EnumMember {
                    enum_ident,
                    member_ident,
                } => format!("{enum_ident}.{member_ident}"),
                crate::Literal::String(s) => format!("{s:?}"),
                other => format!("{other:?}"),
            }
        }
    }

    fn ingredient(records: &[ArtifactRecord], name: &str) -> IngredientRecord {
        records
            .iter()
            .find_map(|r| match r {
                ArtifactRecord::Ingredient(i) if i.name == name => Some(i.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn records_follow_declaration_order() {
        let cb = Cookbook::new("demo")
            .with_enum(EnumDef::new("Size", &["S", "M"]))
            .with_ingredient(Ingredient::new("B"))
            .with_ingredient(Ingredient::new("A"));
        let records = generate(&cb, &Plain).unwrap();
        let summary: Vec<_> = records.iter().map(|r| (r.kind(), r.name())).collect();
        assert_eq!(
            summary,
            [
                (RecordKind::Ingredient, "B"),
                (RecordKind::Ingredient, "A"),
                (RecordKind::Enum, "Size"),
                (RecordKind::Manifest, "demo"),
            ]
        );
    }

    #[test]
    fn defaults_fill_uncovered_fields() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Boil")
                .with_required(Required::new("pot", "string"))
                .with_required(Required::new("minutes", "int").with_default(Value::Integer(8)))
                .with_initializer(&["pot"])
                .with_initializer(&["pot", "minutes"]),
        );
        let boil = ingredient(&generate(&cb, &Plain).unwrap(), "Boil");
        assert_eq!(boil.initializers[0].defaults.len(), 1);
        assert_eq!(boil.initializers[0].defaults[0].field, "minutes");
        assert_eq!(boil.initializers[0].defaults[0].value, "Integer(8)");
        assert!(boil.initializers[1].defaults.is_empty());
        assert_eq!(boil.initializers[1].signature, "(string, int)");
    }

    #[test]
    fn trailing_vararg_switches_to_array_when_prefix_collides() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Mix")
                .with_required(Required::new("bowl", "string"))
                .with_required(Required::new("extras", "string...").with_default(Value::List(vec![])))
                .with_initializer(&["bowl"])
                .with_initializer(&["bowl", "extras"]),
        );
        let mix = ingredient(&generate(&cb, &Plain).unwrap(), "Mix");
        let extras = &mix.initializers[1].params[1];
        assert_eq!(extras.ty, "string[]");
        assert!(!extras.vararg);

        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Mix")
                .with_required(Required::new("bowl", "string"))
                .with_required(Required::new("extras", "string..."))
                .with_initializer(&["bowl", "extras"]),
        );
        let mix = ingredient(&generate(&cb, &Plain).unwrap(), "Mix");
        let extras = &mix.initializers[0].params[1];
        assert_eq!(extras.ty, "string...");
        assert!(extras.vararg);
        assert_eq!(mix.required[1].ty, "string[]");
    }

    #[test]
    fn optionals_and_compounds() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Bake")
                .with_optional(Optional::simple("covered", "flag"))
                .with_optional(Optional::simple("note", "string").repeatable())
                .with_optional(Optional::compound(
                    "timer",
                    vec![Param::new("done", "boolean"), Param::new("alarms", "int...")],
                )),
        );
        let bake = ingredient(&generate(&cb, &Plain).unwrap(), "Bake");

        assert!(bake.optionals[0].flag);
        assert!(bake.optionals[0].params.is_empty());
        assert!(bake.optionals[1].repeatable);
        assert_eq!(bake.optionals[2].compound.as_deref(), Some("Timer"));
        assert_eq!(bake.optionals[2].params[1].ty, "int...");

        let names: Vec<_> = bake.accessors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["isCovered", "getNote", "getTimer"]);

        let timer = &bake.compounds[0];
        assert_eq!(timer.ident, "Timer");
        assert_eq!(timer.accessors[0].name, "getDone");
        assert_eq!(timer.accessors[1].ty, "int[]");
    }

    #[test]
    fn key_constants_and_reserved_names() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("new")
                .keyed(&["red onion", "garlic"])
                .with_required(Required::new("new", "int").with_default(Value::Integer(1))),
        );
        let record = ingredient(&generate(&cb, &Plain).unwrap(), "new");
        assert_eq!(record.ident, "_new");
        assert_eq!(record.required[0].ident, "_new");
        assert_eq!(record.key_constants[0].ident, "RED_ONION");
        assert_eq!(record.key_constants[0].literal, "\"red onion\"");
        assert_eq!(record.key_constants[1].ident, "GARLIC");
    }

    #[test]
    fn enum_members_are_qualified() {
        let cb = Cookbook::default().with_enum(EnumDef::new("Cut", &["dice", "fine-dice"]));
        let records = generate(&cb, &Plain).unwrap();
        let ArtifactRecord::Enum(cut) = &records[0] else {
            panic!("expected enum record");
        };
        assert_eq!(cut.members[1].ident, "fine_dice");
        assert_eq!(cut.members[1].literal, "Cut.fine_dice");
    }

    #[test]
    fn unresolved_types_are_reported() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Stew").with_optional(Optional::simple("spice", "Spice")),
        );
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::UnknownType);
        assert_eq!(err.to_string(), "unknown type `Spice` for `Stew.spice`");
    }

    #[test]
    fn sanitized_enum_members_must_stay_distinct() {
        let cb = Cookbook::default().with_enum(EnumDef::new("Cut", &["fine-dice", "fine_dice"]));
        assert!(validate(&cb).is_ok());
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateName {
                scope: NameScope::EnumMember,
                name: "fine_dice".into(),
                owner: Some("Cut".into()),
            }
        );
        assert_eq!(err.to_string(), "duplicate enum member name `fine_dice` in `Cut`");
    }

    #[test]
    fn sanitized_key_constants_must_stay_distinct() {
        let cb = Cookbook::default()
            .with_ingredient(Ingredient::new("Chop").keyed(&["red onion", "red-onion"]));
        assert!(validate(&cb).is_ok());
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate key constant name `RED_ONION` in `Chop`"
        );
    }

    #[test]
    fn accessors_must_stay_distinct() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Oven")
                .with_required(Required::new("temp", "int").with_default(Value::Integer(180)))
                .with_optional(Optional::simple("Temp", "int")),
        );
        assert!(validate(&cb).is_ok());
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::DuplicateName);
        assert_eq!(err.to_string(), "duplicate accessor name `getTemp` in `Oven`");
    }

    #[test]
    fn compound_fields_must_stay_distinct() {
        let cb = Cookbook::default().with_ingredient(Ingredient::new("Bake").with_optional(
            Optional::compound(
                "timer",
                vec![Param::new("ring", "boolean"), Param::new("Ring", "boolean")],
            ),
        ));
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate accessor name `getRing` in `Bake.timer`"
        );
    }

    #[test]
    fn compound_type_cannot_reuse_ingredient_name() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Timer")
                .with_optional(Optional::compound("timer", vec![Param::new("minutes", "int")])),
        );
        assert!(validate(&cb).is_ok());
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateName {
                scope: NameScope::Compound,
                name: "Timer".into(),
                owner: Some("Timer".into()),
            }
        );
    }

    #[test]
    fn escaped_identifiers_must_stay_distinct() {
        let cb = Cookbook::default().with_ingredient(
            Ingredient::new("Pot")
                .with_optional(Optional::simple("new", "int"))
                .with_optional(Optional::simple("_new", "string")),
        );
        let err = generate(&cb, &Plain).unwrap_err();
        assert_eq!(err.to_string(), "duplicate field name `_new` in `Pot`");
    }
}
