//! Property 1 (§8): `compile_grammar` and `render_template` are pure
//! functions of the schema — repeated calls on the same schema produce
//! byte-identical output.

use gbnfc::prelude::*;

fn sample_schema() -> Field {
    Field::composite(
        "character",
        vec![
            Field::string("name", 3, 15).unwrap(),
            Field::int("level", 1, 20).unwrap(),
            Field::choice_str(
                "class",
                vec!["warrior".to_string(), "mage".to_string(), "rogue".to_string()],
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn compile_grammar_is_deterministic() {
    let schema = sample_schema();
    let compiler = SchemaCompiler::new(&schema);
    let a = compiler.compile_grammar().to_string();
    let b = compiler.compile_grammar().to_string();
    assert_eq!(a, b);
}

#[test]
fn render_template_is_deterministic() {
    let schema = sample_schema();
    let compiler = SchemaCompiler::new(&schema);
    assert_eq!(compiler.render_template(), compiler.render_template());
}

#[test]
fn render_hints_is_deterministic() {
    let schema = sample_schema();
    let compiler = SchemaCompiler::new(&schema);
    assert_eq!(compiler.render_hints(), compiler.render_hints());
}
