//! Mirrors `compile-grammar --output <path>`: the grammar text written to
//! disk must be byte-identical to what the facade returns in memory.

use gbnfc::prelude::*;
use std::fs;

#[test]
fn compiled_grammar_round_trips_through_a_file() {
    let schema = gbnfc::demo::build("character").unwrap();
    let compiler = SchemaCompiler::new(&schema);
    let grammar = compiler.compile_grammar().to_string();

    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), &grammar).unwrap();

    let read_back = fs::read_to_string(file.path()).unwrap();
    assert_eq!(read_back, grammar);
}
