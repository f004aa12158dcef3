//! # Demo Schemas (C7, ambient)
//!
//! A small registry of worked-example schemas, used by the CLI's `demo`
//! subcommand for manual inspection and by the integration tests for
//! the literal end-to-end scenarios. Not part of the core library
//! contract — an embedder never needs this module.

use crate::error::{GbnfcError, GbnfcResult};
use crate::schema::{Composite, Field};

/// The name of every built-in demo schema, in listing order.
pub const SCHEMA_NAMES: &[&str] = &["character", "stats", "profile", "event"];

/// Builds a demo schema by name, or `Err(GbnfcError::UnknownSchema)` if
/// `name` isn't one of [`SCHEMA_NAMES`].
pub fn build(name: &str) -> GbnfcResult<Field> {
    match name {
        "character" => Ok(character_schema()),
        "stats" => Ok(stats_schema()),
        "profile" => Ok(profile_schema()),
        "event" => Ok(event_schema()),
        other => Err(GbnfcError::UnknownSchema(other.to_string())),
    }
}

fn unwrap_schema(field: Result<Field, crate::error::InvalidSchema>) -> Field {
    field.expect("demo schemas are constructed from fixed, valid literals")
}

/// A character with a name, a level and a class.
fn character_schema() -> Field {
    unwrap_schema(Field::composite(
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
    ))
}

/// Fixed-bound stat limits, exercising `ConstantInt`.
fn stats_schema() -> Field {
    unwrap_schema(Field::composite(
        "stats",
        vec![
            Field::constant_int("minVal", 0),
            Field::constant_int("maxVal", 9999),
        ],
    ))
}

/// A username plus an optional trailing biography, exercising
/// `Optional`.
fn profile_schema() -> Field {
    unwrap_schema(Field::composite(
        "profile",
        vec![
            Field::string("username", 3, 20).unwrap(),
            Field::optional("bio", Field::string("bio", 0, 200).unwrap()),
        ],
    ))
}

/// A tagged event whose payload shape depends on its `type`, exercising
/// `Choice` alongside `Variant`.
fn event_schema() -> Field {
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
    unwrap_schema(Field::composite(
        "event",
        vec![
            Field::choice_str("type", vec!["combat".to_string(), "dialogue".to_string()]).unwrap(),
            Field::variant("data", vec![combat, dialogue]).unwrap(),
        ],
    ))
}
