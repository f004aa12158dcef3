//! # Template Renderer (C3)
//!
//! Produces a pretty-printed, JSON-shaped string with placeholder tokens
//! describing each field's constraint, for inclusion in a prompt so the
//! model sees the intended shape before it starts sampling against the
//! grammar. The output is not required to be valid JSON — it carries
//! annotations the grammar doesn't.

use crate::numeric::format_fixed_float;
use crate::schema::Field;
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Renders the full placeholder document for `root`.
pub fn render_template(root: &Field) -> String {
    let mut out = String::new();
    render_value(root, 0, &mut out);
    out
}

fn render_value(field: &Field, depth: usize, out: &mut String) {
    match field {
        Field::Int { min, max, .. } => {
            let _ = write!(out, "<int {min}..{max}>");
        }
        Field::ConstantInt { value, .. } => {
            let _ = write!(out, "{value}");
        }
        Field::Float { min, max, .. } => {
            let _ = write!(out, "<float {min}..{max}>");
        }
        Field::ConstantFloat { value, .. } => {
            out.push_str(&format_fixed_float(*value));
        }
        Field::Digit { count, .. } => {
            let _ = write!(out, "\"<{count} digits>\"");
        }
        Field::Str {
            min_len, max_len, ..
        } => {
            let _ = write!(out, "\"<string {min_len}..{max_len} chars>\"");
        }
        Field::Bool { .. } => out.push_str("<true|false>"),
        Field::ChoiceStr { options, .. } => {
            let _ = write!(
                out,
                "<{}>",
                options
                    .iter()
                    .map(|o| format!("\"{o}\""))
                    .collect::<Vec<_>>()
                    .join("|")
            );
        }
        Field::ChoiceInt { options, .. } => {
            let _ = write!(
                out,
                "<{}>",
                options
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join("|")
            );
        }
        Field::TemplateString {
            template,
            min_gen,
            max_gen,
            ..
        } => {
            let rendered = template.replace(
                crate::schema::GENERATED_MARKER,
                &format!("<{min_gen}..{max_gen} chars>"),
            );
            let _ = write!(out, "\"{rendered}\"");
        }
        Field::Array { element, max_len, .. } => {
            out.push('[');
            render_value(element, depth, out);
            if *max_len > 1 {
                out.push_str(", ...");
            }
            out.push(']');
        }
        Field::Composite(c) => {
            out.push_str("{\n");
            for (i, (name, child)) in c.fields.iter().enumerate() {
                let indent = INDENT.repeat(depth + 1);
                let suffix = if child.is_optional() { "?:" } else { ":" };
                let _ = write!(out, "{indent}\"{name}\"{suffix} ");
                render_value(child, depth + 1, out);
                if i + 1 < c.fields.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            let _ = write!(out, "{}}}", INDENT.repeat(depth));
        }
        Field::Variant { alternatives, .. } => {
            for (i, alt) in alternatives.iter().enumerate() {
                if i > 0 {
                    out.push_str(" OR ");
                }
                render_value(&Field::Composite(alt.clone()), depth, out);
            }
        }
        Field::Optional { inner, .. } => render_value(inner, depth, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    #[test]
    fn test_int_placeholder() {
        let field = Field::composite("c", vec![Field::int("level", 1, 20).unwrap()]).unwrap();
        let rendered = render_template(&field);
        assert!(rendered.contains("<int 1..20>"));
    }

    #[test]
    fn test_optional_key_suffix() {
        let field = Field::composite(
            "profile",
            vec![Field::optional("bio", Field::string("bio", 0, 200).unwrap())],
        )
        .unwrap();
        let rendered = render_template(&field);
        assert!(rendered.contains("\"bio\"?:"));
    }

    #[test]
    fn test_choice_str_placeholder_is_quoted() {
        let field = Field::composite(
            "character",
            vec![Field::choice_str(
                "class",
                vec!["warrior".to_string(), "mage".to_string()],
            )
            .unwrap()],
        )
        .unwrap();
        let rendered = render_template(&field);
        assert!(rendered.contains("<\"warrior\"|\"mage\">"));
    }

    #[test]
    fn test_variant_alternatives_joined_by_or() {
        use crate::schema::Composite;
        let a = Composite::new("combat", vec![Field::string("enemy", 3, 20).unwrap()]).unwrap();
        let b = Composite::new("dialogue", vec![Field::string("npc", 3, 20).unwrap()]).unwrap();
        let field = Field::composite("event", vec![Field::variant("data", vec![a, b]).unwrap()])
            .unwrap();
        let rendered = render_template(&field);
        assert!(rendered.contains(" OR "));
    }

    #[test]
    fn test_template_string_shows_generated_span() {
        let field = Field::composite(
            "message",
            vec![Field::template_string("text", "Hello, <generated>!", 1, 20).unwrap()],
        )
        .unwrap();
        let rendered = render_template(&field);
        assert!(rendered.contains("Hello, <1..20 chars>!"));
    }
}
