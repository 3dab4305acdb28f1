//! Validation and generation over a synthetic cookbook.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sous_codegen::{BindingSet, generate};
use sous_schema::{Cookbook, EnumDef, Ingredient, Optional, Param, Required, Value, validate};

/// `n` ingredients, each with three initializers, a compound optional, and
/// an enum-typed default.
fn cookbook(n: usize) -> Cookbook {
    let mut cookbook =
        Cookbook::new("bench").with_enum(EnumDef::new("Heat", &["LOW", "MEDIUM", "HIGH"]));
    for i in 0..n {
        cookbook = cookbook.with_ingredient(
            Ingredient::new(format!("Step{i}"))
                .with_required(Required::new("name", "string"))
                .with_required(Required::new("heat", "Heat").with_default(Value::from("LOW")))
                .with_required(Required::new("tags", "string...").with_default(Value::List(vec![])))
                .with_initializer(&["name"])
                .with_initializer(&["name", "heat"])
                .with_initializer(&["name", "heat", "tags"])
                .with_optional(Optional::simple("covered", "flag"))
                .with_optional(Optional::simple("note", "string").repeatable())
                .with_optional(Optional::compound(
                    "timer",
                    vec![Param::new("minutes", "int"), Param::new("alarms", "int...")],
                )),
        );
    }
    cookbook
}

fn bench_validate(c: &mut Criterion) {
    let small = cookbook(10);
    let large = cookbook(500);
    c.bench_function("validate_10", |b| b.iter(|| validate(black_box(&small))));
    c.bench_function("validate_500", |b| b.iter(|| validate(black_box(&large))));
}

fn bench_generate(c: &mut Criterion) {
    let large = cookbook(500);
    for binding in BindingSet::builtin().iter() {
        c.bench_function(&format!("generate_500_{}", binding.name()), |b| {
            b.iter(|| generate(black_box(&large), binding))
        });
    }
}

criterion_group!(benches, bench_validate, bench_generate);
criterion_main!(benches);
