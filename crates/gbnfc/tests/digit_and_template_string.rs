//! Properties 6 & 7 (§8): `Digit(n)` exact-width acceptance, and
//! `TemplateString` prefix/suffix/middle-length round-tripping.

use gbnfc::prelude::*;

#[test]
fn digit_accepts_exact_width_only() {
    let schema = Field::composite("code", vec![Field::digit("pin", 4)]).unwrap();
    let compiler = SchemaCompiler::new(&schema);

    let (valid, _) = compiler.validate(r#"{"pin":"1234"}"#);
    assert!(valid);

    let (valid, _) = compiler.validate(r#"{"pin":"123"}"#);
    assert!(!valid, "n-1 digits must be rejected");

    let (valid, _) = compiler.validate(r#"{"pin":"12345"}"#);
    assert!(!valid, "n+1 digits must be rejected");

    let (valid, _) = compiler.validate(r#"{"pin":"12a4"}"#);
    assert!(!valid, "non-digit content must be rejected");
}

#[test]
fn digit_preserves_leading_zeros() {
    let schema = Field::composite("code", vec![Field::digit("pin", 4)]).unwrap();
    let compiler = SchemaCompiler::new(&schema);
    let (valid, _) = compiler.validate(r#"{"pin":"0007"}"#);
    assert!(valid);
}

#[test]
fn template_string_accepts_middle_within_bounds() {
    let schema = Field::composite(
        "message",
        vec![Field::template_string("text", "Hello, <generated>!", 1, 10).unwrap()],
    )
    .unwrap();
    let compiler = SchemaCompiler::new(&schema);

    let (valid, _) = compiler.validate(r#"{"text":"Hello, friend!"}"#);
    assert!(valid);
}

#[test]
fn template_string_rejects_middle_outside_bounds() {
    let schema = Field::composite(
        "message",
        vec![Field::template_string("text", "Hello, <generated>!", 3, 5).unwrap()],
    )
    .unwrap();
    let compiler = SchemaCompiler::new(&schema);

    let (valid, diagnostics) = compiler.validate(r#"{"text":"Hello, hi!"}"#);
    assert!(!valid, "middle region of length 2 is below the minimum of 3");
    assert!(diagnostics.iter().any(|d| d.path == "message.text"));

    let (valid, _) = compiler.validate(r#"{"text":"Hello, way too long a greeting!"}"#);
    assert!(!valid, "middle region above the maximum must be rejected");
}

#[test]
fn template_string_without_marker_requires_exact_match() {
    let schema = Field::composite(
        "stats",
        vec![Field::template_string("label", "fixed label", 0, 0).unwrap()],
    )
    .unwrap();
    let compiler = SchemaCompiler::new(&schema);

    let (valid, _) = compiler.validate(r#"{"label":"fixed label"}"#);
    assert!(valid);

    let (valid, _) = compiler.validate(r#"{"label":"different label"}"#);
    assert!(!valid);
}
