//! The literal end-to-end scenario table from §8, exercised through the
//! public facade exactly as an external caller would use it.

use gbnfc::prelude::*;

#[test]
fn scenario_1_valid_name() {
    let schema = Field::composite("character", vec![Field::string("name", 3, 15).unwrap()])
        .unwrap();
    let (valid, _) = SchemaCompiler::new(&schema).validate(r#"{"name":"Narada"}"#);
    assert!(valid);
}

#[test]
fn scenario_2_name_too_short() {
    let schema = Field::composite("character", vec![Field::string("name", 3, 15).unwrap()])
        .unwrap();
    let (valid, diagnostics) = SchemaCompiler::new(&schema).validate(r#"{"name":"Jo"}"#);
    assert!(!valid);
    assert_eq!(diagnostics[0].path, "character.name");
    assert!(diagnostics[0].message.contains("2"));
}

#[test]
fn scenario_3_class_outside_choices() {
    let schema = Field::composite(
        "character",
        vec![Field::choice_str(
            "class",
            vec!["warrior".to_string(), "mage".to_string(), "rogue".to_string()],
        )
        .unwrap()],
    )
    .unwrap();
    let (valid, diagnostics) = SchemaCompiler::new(&schema).validate(r#"{"class":"bard"}"#);
    assert!(!valid);
    assert_eq!(diagnostics[0].path, "character.class");
}

#[test]
fn scenario_4_level_in_range() {
    let schema = Field::composite("character", vec![Field::int("level", 1, 20).unwrap()])
        .unwrap();
    let (valid, _) = SchemaCompiler::new(&schema).validate(r#"{"level":5}"#);
    assert!(valid);
}

#[test]
fn scenario_5_constant_bounds() {
    let schema = Field::composite(
        "stats",
        vec![
            Field::constant_int("minVal", 0),
            Field::constant_int("maxVal", 9999),
        ],
    )
    .unwrap();
    let (valid, _) =
        SchemaCompiler::new(&schema).validate(r#"{"minVal":0,"maxVal":9999}"#);
    assert!(valid);
}

#[test]
fn scenario_6_optional_bio_omitted() {
    let schema = Field::composite(
        "profile",
        vec![
            Field::string("username", 3, 20).unwrap(),
            Field::optional("bio", Field::string("bio", 0, 200).unwrap()),
        ],
    )
    .unwrap();
    let (valid, _) = SchemaCompiler::new(&schema).validate(r#"{"username":"alice"}"#);
    assert!(valid);
}

#[test]
fn scenario_7_variant_event() {
    let combat = Composite::new(
        "combat",
        vec![
            Field::string("enemy", 3, 20).unwrap(),
            Field::int("enemyLevel", 1, 50).unwrap(),
        ],
    )
    .unwrap();
    let dialogue = Composite::new(
        "dialogue",
        vec![
            Field::string("npc", 3, 20).unwrap(),
            Field::string("message", 10, 100).unwrap(),
        ],
    )
    .unwrap();
    let schema = Field::composite(
        "event",
        vec![
            Field::choice_str("type", vec!["combat".to_string(), "dialogue".to_string()])
                .unwrap(),
            Field::variant("data", vec![combat, dialogue]).unwrap(),
        ],
    )
    .unwrap();
    let (valid, diagnostics) = SchemaCompiler::new(&schema)
        .validate(r#"{"type":"combat","data":{"enemy":"ogre","enemyLevel":7}}"#);
    assert!(valid, "unexpected diagnostics: {diagnostics:?}");
}

#[test]
fn grammar_shape_single_root_and_shared_helpers_once_per_scenario() {
    let schemas: Vec<Field> = gbnfc::demo::SCHEMA_NAMES
        .iter()
        .map(|name| gbnfc::demo::build(name).unwrap())
        .collect();

    for schema in &schemas {
        let grammar = SchemaCompiler::new(schema).compile_grammar();
        let root_count = grammar.rules.iter().filter(|r| r.name == "root").count();
        assert_eq!(root_count, 1);

        let ws_count = grammar.rules.iter().filter(|r| r.name == "ws").count();
        let string_char_count = grammar
            .rules
            .iter()
            .filter(|r| r.name == "string-char")
            .count();
        assert_eq!(ws_count, 1);
        assert_eq!(string_char_count, 1);

        let mut seen = std::collections::HashSet::new();
        for rule in &grammar.rules {
            assert!(seen.insert(rule.name.clone()), "duplicate rule name {}", rule.name);
        }
    }
}
