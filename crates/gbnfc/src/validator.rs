//! # Validator (C5)
//!
//! Parses a candidate JSON string with a strict parser and walks it in
//! lockstep with the schema, accumulating path-qualified diagnostics
//! rather than stopping at the first failure. Never panics: the
//! `validate` entry point wraps the recursive walk in
//! [`std::panic::catch_unwind`] and reports a single `validation
//! exception` diagnostic if that boundary is ever tripped, matching the
//! "defensive single error path" the rest of the crate uses for
//! conditions that should be unreachable in a correct implementation.
//!
//! `serde_json` does not reject a duplicate object key; the last
//! occurrence silently wins. That is accepted validator slack here, not
//! a rejection the schema can rely on.

use crate::error::Diagnostic;
use crate::numeric::float_close;
use crate::schema::{Composite, Field, GENERATED_MARKER};
use serde_json::Value;

/// Parses `input` and checks it against `root`, returning `(is_valid,
/// diagnostics)`. Never returns `Err` — a parse failure or an internal
/// panic both surface as a single diagnostic instead.
pub fn validate(root: &Field, input: &str) -> (bool, Vec<Diagnostic>) {
    let value: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return (false, vec![Diagnostic::parse_error(e)]),
    };

    let walk = std::panic::AssertUnwindSafe(|| {
        let mut diagnostics = Vec::new();
        check_field(root, &value, "", &mut diagnostics);
        diagnostics
    });

    match std::panic::catch_unwind(walk) {
        Ok(diagnostics) => (diagnostics.is_empty(), diagnostics),
        Err(_) => (
            false,
            vec![Diagnostic::new("", "validation exception")],
        ),
    }
}

fn path_with(path: &str, suffix: &str) -> String {
    if path.is_empty() {
        suffix.to_string()
    } else {
        format!("{path}.{suffix}")
    }
}

fn path_index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

fn check_field(field: &Field, value: &Value, path: &str, out: &mut Vec<Diagnostic>) {
    match field {
        Field::Int { min, max, .. } => match value.as_i64() {
            Some(n) if n >= *min && n <= *max => {}
            Some(n) => out.push(Diagnostic::new(
                path,
                format!("value {n} outside [{min},{max}]"),
            )),
            None => out.push(Diagnostic::new(path, "expected an integer")),
        },
        Field::ConstantInt { value: expected, .. } => match value.as_i64() {
            Some(n) if n == *expected => {}
            Some(n) => out.push(Diagnostic::new(
                path,
                format!("expected constant {expected}, got {n}"),
            )),
            None => out.push(Diagnostic::new(path, "expected an integer")),
        },
        Field::Float { min, max, .. } => match value.as_f64() {
            Some(n) if n >= *min && n <= *max => {}
            Some(n) => out.push(Diagnostic::new(
                path,
                format!("value {n} outside [{min},{max}]"),
            )),
            None => out.push(Diagnostic::new(path, "expected a number")),
        },
        Field::ConstantFloat { value: expected, .. } => match value.as_f64() {
            Some(n) if float_close(n, *expected) => {}
            Some(n) => out.push(Diagnostic::new(
                path,
                format!("expected constant {expected}, got {n}"),
            )),
            None => out.push(Diagnostic::new(path, "expected a number")),
        },
        Field::Digit { count, .. } => match value.as_str() {
            Some(s) if s.len() == *count && s.bytes().all(|b| b.is_ascii_digit()) => {}
            Some(s) => out.push(Diagnostic::new(
                path,
                format!("expected {count}-digit string, got {s:?}"),
            )),
            None => out.push(Diagnostic::new(path, "expected a string")),
        },
        Field::Str {
            min_len, max_len, ..
        } => match value.as_str() {
            Some(s) => {
                let len = s.chars().count();
                if len < *min_len || len > *max_len {
                    out.push(Diagnostic::new(
                        path,
                        format!("length {len} outside [{min_len},{max_len}]"),
                    ));
                }
            }
            None => out.push(Diagnostic::new(path, "expected a string")),
        },
        Field::Bool { .. } => {
            if value.as_bool().is_none() {
                out.push(Diagnostic::new(path, "expected a boolean"));
            }
        }
        Field::ChoiceStr { options, .. } => match value.as_str() {
            Some(s) if options.iter().any(|o| o == s) => {}
            Some(s) => out.push(Diagnostic::new(
                path,
                format!("{s:?} is not in allowed choices: {options:?}"),
            )),
            None => out.push(Diagnostic::new(path, "expected a string")),
        },
        Field::ChoiceInt { options, .. } => match value.as_i64() {
            Some(n) if options.contains(&n) => {}
            Some(n) => out.push(Diagnostic::new(
                path,
                format!("{n} is not in allowed choices: {options:?}"),
            )),
            None => out.push(Diagnostic::new(path, "expected an integer")),
        },
        Field::TemplateString {
            template,
            min_gen,
            max_gen,
            ..
        } => check_template_string(template, *min_gen, *max_gen, value, path, out),
        Field::Array {
            element,
            min_len,
            max_len,
            ..
        } => match value.as_array() {
            Some(items) => {
                let len = items.len();
                if len < *min_len || len > *max_len {
                    out.push(Diagnostic::new(
                        path,
                        format!("array length {len} outside [{min_len},{max_len}]"),
                    ));
                }
                for (i, item) in items.iter().enumerate() {
                    check_field(element, item, &path_index(path, i), out);
                }
            }
            None => out.push(Diagnostic::new(path, "expected an array")),
        },
        Field::Composite(c) => check_composite(c, value, path, out),
        Field::Variant {
            name, alternatives, ..
        } => check_variant(name, alternatives, value, path, out),
        Field::Optional { inner, .. } => check_field(inner, value, path, out),
    }
}

fn check_template_string(
    template: &str,
    min_gen: usize,
    max_gen: usize,
    value: &Value,
    path: &str,
    out: &mut Vec<Diagnostic>,
) {
    let Some(s) = value.as_str() else {
        out.push(Diagnostic::new(path, "expected a string"));
        return;
    };
    let Some(marker_pos) = template.find(GENERATED_MARKER) else {
        if s != template {
            out.push(Diagnostic::new(
                path,
                format!("expected exactly {template:?}, got {s:?}"),
            ));
        }
        return;
    };
    let prefix = &template[..marker_pos];
    let suffix = &template[marker_pos + GENERATED_MARKER.len()..];
    if !s.starts_with(prefix) || !s.ends_with(suffix) {
        out.push(Diagnostic::new(
            path,
            format!("does not match template {template:?}"),
        ));
        return;
    }
    let fixed_len = prefix.chars().count() + suffix.chars().count();
    let total_len = s.chars().count();
    if total_len < fixed_len {
        out.push(Diagnostic::new(
            path,
            format!("generated region length 0 outside [{min_gen},{max_gen}]"),
        ));
        return;
    }
    let middle_len = total_len - fixed_len;
    if middle_len < min_gen || middle_len > max_gen {
        out.push(Diagnostic::new(
            path,
            format!("generated region length {middle_len} outside [{min_gen},{max_gen}]"),
        ));
    }
}

fn check_composite(composite: &Composite, value: &Value, path: &str, out: &mut Vec<Diagnostic>) {
    let Some(obj) = value.as_object() else {
        out.push(Diagnostic::new(path, "expected an object"));
        return;
    };
    for (name, field) in composite.fields.iter() {
        let child_path = path_with(path, name);
        match obj.get(name) {
            Some(v) => check_field(field, v, &child_path, out),
            None => {
                if !field.is_optional() {
                    out.push(Diagnostic::new(&child_path, "required field missing"));
                }
            }
        }
    }
}

fn check_variant(
    _name: &str,
    alternatives: &[Composite],
    value: &Value,
    path: &str,
    out: &mut Vec<Diagnostic>,
) {
    let mut per_alt_errors: Vec<(String, Vec<Diagnostic>)> = Vec::new();
    for alt in alternatives {
        let mut errs = Vec::new();
        check_composite(alt, value, path, &mut errs);
        if errs.is_empty() {
            return;
        }
        per_alt_errors.push((alt.name.clone(), errs));
    }
    out.push(Diagnostic::new(
        path,
        format!(
            "matched no alternative ({})",
            per_alt_errors
                .iter()
                .map(|(name, errs)| format!(
                    "{name}: [{}]",
                    errs.iter().map(Diagnostic::to_string).collect::<Vec<_>>().join("; ")
                ))
                .collect::<Vec<_>>()
                .join(" | ")
        ),
    ));
}
