//! # Hint Renderer (C4)
//!
//! Produces a compact, newline-separated, English-like summary of a
//! schema's constraints (`level: integer in [1,20]`), meant to be
//! concatenated into a prompt alongside the template. Purely
//! documentation for the model; it has no bearing on grammar
//! compilation or validation.

use crate::numeric::format_fixed_float;
use crate::schema::Field;

/// Renders one bullet per field, in declared order, depth-first.
pub fn render_hints(root: &Field) -> String {
    let mut lines = Vec::new();
    collect_hints(root, "", &mut lines);
    lines.join("\n")
}

fn collect_hints(field: &Field, path: &str, lines: &mut Vec<String>) {
    match field {
        Field::Composite(c) => {
            for child in c.fields.values() {
                let child_path = join_path(path, child.name());
                collect_hints(child, &child_path, lines);
            }
        }
        Field::Variant { alternatives, .. } => {
            let alt_names: Vec<&str> = alternatives.iter().map(|a| a.name.as_str()).collect();
            lines.push(format!(
                "{}: one of the following shapes: {}",
                display_path(path),
                alt_names.join(", ")
            ));
            for alt in alternatives {
                collect_hints(&Field::Composite(alt.clone()), path, lines);
            }
        }
        Field::Optional { inner, .. } => {
            lines.push(format!("{}: optional", display_path(path)));
            collect_hints(inner, path, lines);
        }
        leaf => lines.push(format!("{}: {}", display_path(path), describe(leaf))),
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

fn describe(field: &Field) -> String {
    match field {
        Field::Int { min, max, .. } => format!("integer in [{min},{max}]"),
        Field::ConstantInt { value, .. } => format!("must be exactly {value}"),
        Field::Float { min, max, .. } => format!("decimal number in [{min},{max}]"),
        Field::ConstantFloat { value, .. } => {
            format!("must be exactly {}", format_fixed_float(*value))
        }
        Field::Digit { count, .. } => format!("string of exactly {count} digits"),
        Field::Str {
            min_len, max_len, ..
        } => format!("string of length [{min_len},{max_len}]"),
        Field::Bool { .. } => "true or false".to_string(),
        Field::ChoiceStr { options, .. } => format!("one of {}", options.join("|")),
        Field::ChoiceInt { options, .. } => format!(
            "one of {}",
            options.iter().map(i64::to_string).collect::<Vec<_>>().join("|")
        ),
        Field::TemplateString {
            min_gen, max_gen, ..
        } => format!("templated string with a {min_gen}..{max_gen}-char generated region"),
        Field::Array {
            min_len, max_len, ..
        } => format!("array of length [{min_len},{max_len}]"),
        Field::Composite(_) | Field::Variant { .. } | Field::Optional { .. } => {
            unreachable!("handled by collect_hints before describe is called")
        }
    }
}
