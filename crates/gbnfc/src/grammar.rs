//! # Grammar Compiler (C2)
//!
//! Lowers a [`crate::schema::Field`] tree into a GBNF document: a
//! sequence of named rules `name ::= alternatives` whose accept set is
//! exactly the set of JSON documents satisfying the schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Field tree  ──lower_field──▶  Expr  ──promote (Composite/Variant)─▶ Ref │
//! │                                  │                                  │
//! │                                  ▼                                  │
//! │                         Vec<Rule> (the Grammar)                     │
//! │                                  │                                  │
//! │                           impl Display                              │
//! │                                  │                                  │
//! │                                  ▼                                  │
//! │                         GBNF text (root first)                      │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Expr`/`Rule`/`Grammar` and their `Display` impls are the same shape
//! used by GBNF generators elsewhere in the ecosystem: a small algebraic
//! type for right-hand sides, rendered by a `fmt::Display` walk rather
//! than hand-built string concatenation.

use crate::intrange::int_range_expr;
use crate::numeric::format_fixed_float;
use crate::schema::{Composite, Field};
use std::collections::HashSet;
use std::fmt::{self, Write as _};

// ============================================================================
// EXPR / RULE / GRAMMAR
// ============================================================================

/// A GBNF right-hand side.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A quoted literal; escaped for `"` and `\` on render.
    Literal(String),
    /// A `[...]` character class; `body` is the raw GBNF class interior
    /// (already escaped), e.g. `"0-9"` or `"^\"\\\\x00-\\x1F"`.
    CharClass(String),
    /// A reference to another rule by name.
    Ref(String),
    /// Concatenation, space-separated.
    Seq(Vec<Expr>),
    /// Alternation, `|`-separated.
    Choice(Vec<Expr>),
    /// Forces parenthesisation: `(expr)`.
    Group(Box<Expr>),
    /// Zero or more: `(expr)*`.
    Star(Box<Expr>),
    /// Zero or one: `(expr)?`.
    Optional(Box<Expr>),
}

impl Expr {
    fn is_empty_seq(&self) -> bool {
        matches!(self, Expr::Seq(v) if v.is_empty())
    }

    /// `Choice([a, b])`, collapsed to `Optional(a)` when `b` is the
    /// empty sequence (the common case of "this or nothing").
    fn choice_or_optional(a: Expr, b: Expr) -> Expr {
        if b.is_empty_seq() {
            Expr::Optional(Box::new(a))
        } else {
            Expr::Choice(vec![a, b])
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(s) => {
                f.write_char('"')?;
                for ch in s.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_char('\\')?;
                    }
                    f.write_char(ch)?;
                }
                f.write_char('"')
            }
            Expr::CharClass(body) => write!(f, "[{body}]"),
            Expr::Ref(s) => f.write_str(s),
            Expr::Seq(items) => {
                for (i, e) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            Expr::Choice(items) => {
                for (i, e) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            Expr::Group(e) => write!(f, "({e})"),
            Expr::Star(e) => write!(f, "({e})*"),
            Expr::Optional(e) => write!(f, "({e})?"),
        }
    }
}

/// One named production.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub name: String,
    pub expr: Expr,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ::= {}", self.name, self.expr)
    }
}

/// A complete GBNF document: an ordered list of rules, `root` first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SHARED LEXICAL HELPERS
// ============================================================================

const WS_RULE: &str = "ws";
const DIGIT_RULE: &str = "digit";
const STRING_CHAR_RULE: &str = "string-char";

fn ws_ref() -> Expr {
    Expr::Ref(WS_RULE.to_string())
}

fn digit_ref() -> Expr {
    Expr::Ref(DIGIT_RULE.to_string())
}

fn string_char_ref() -> Expr {
    Expr::Ref(STRING_CHAR_RULE.to_string())
}

fn quote() -> Expr {
    Expr::Literal("\"".to_string())
}

/// Wraps `inner` with the JSON string delimiter characters.
fn quoted(inner: Expr) -> Expr {
    Expr::Seq(vec![quote(), inner, quote()])
}

// ============================================================================
// BOUNDED REPETITION
// ============================================================================

/// Expands "between `min` and `max` (inclusive) copies of `element`,
/// `separator`-joined" into explicit GBNF alternation, factoring the
/// shared mandatory prefix of `min` copies out of the alternation so
/// grammar size grows with `max - min`, not with `max`.
fn bounded_repeat(element: &Expr, separator: Option<&Expr>, min: usize, max: usize) -> Expr {
    if max == 0 {
        return Expr::Seq(vec![]);
    }

    fn tail(element: &Expr, separator: Option<&Expr>, remaining: usize) -> Option<Expr> {
        if remaining == 0 {
            return None;
        }
        let mut seq = Vec::new();
        if let Some(sep) = separator {
            seq.push(sep.clone());
        }
        seq.push(element.clone());
        if let Some(next) = tail(element, separator, remaining - 1) {
            seq.push(next);
        }
        Some(Expr::Optional(Box::new(Expr::Seq(seq))))
    }

    let extra = max - min;
    if min == 0 {
        let mut seq = vec![element.clone()];
        if let Some(t) = tail(element, separator, extra - 1) {
            seq.push(t);
        }
        Expr::Optional(Box::new(Expr::Seq(seq)))
    } else {
        let mut seq = Vec::with_capacity(min);
        for i in 0..min {
            if i > 0 {
                if let Some(sep) = separator {
                    seq.push(sep.clone());
                }
            }
            seq.push(element.clone());
        }
        if extra > 0 {
            if let Some(t) = tail(element, separator, extra) {
                seq.push(t);
            }
        }
        Expr::Seq(seq)
    }
}

// ============================================================================
// GRAMMAR COMPILER
// ============================================================================

/// Compiles a schema root into a complete GBNF document.
///
/// Determinism and totality follow directly from `lower_field` being a
/// pure structural recursion with no fallible step: every schema that
/// passed its own constructors compiles.
pub fn compile_grammar(root: &Field) -> Grammar {
    let mut compiler = GrammarCompiler::new();
    let root_expr = compiler.lower_field(root);
    compiler.rules.insert(
        0,
        Rule {
            name: "root".to_string(),
            expr: root_expr,
        },
    );
    compiler.rules.push(Rule {
        name: WS_RULE.to_string(),
        expr: Expr::Star(Box::new(Expr::CharClass(r#" \t\n"#.to_string()))),
    });
    compiler.rules.push(Rule {
        name: DIGIT_RULE.to_string(),
        expr: Expr::CharClass("0-9".to_string()),
    });
    compiler.rules.push(Rule {
        name: STRING_CHAR_RULE.to_string(),
        expr: string_char_expr(),
    });
    compiler.into_grammar()
}

fn string_char_expr() -> Expr {
    let escape_body = Expr::Group(Box::new(Expr::Choice(vec![
        Expr::CharClass(r#""\\/bfnrt"#.to_string()),
        Expr::Seq(vec![
            Expr::Literal("u".to_string()),
            bounded_repeat(&Expr::CharClass("0-9a-fA-F".to_string()), None, 4, 4),
        ]),
    ])));
    Expr::Choice(vec![
        Expr::CharClass(r#"^"\\x00-\x1F"#.to_string()),
        Expr::Seq(vec![Expr::Literal("\\".to_string()), escape_body]),
    ])
}

struct GrammarCompiler {
    rules: Vec<Rule>,
    used_names: HashSet<String>,
}

impl GrammarCompiler {
    fn new() -> Self {
        let mut used_names = HashSet::new();
        used_names.insert("root".to_string());
        used_names.insert(WS_RULE.to_string());
        used_names.insert(DIGIT_RULE.to_string());
        used_names.insert(STRING_CHAR_RULE.to_string());
        GrammarCompiler {
            rules: Vec::new(),
            used_names,
        }
    }

    fn into_grammar(self) -> Grammar {
        Grammar { rules: self.rules }
    }

    /// Reserves a unique, rule-name-safe identifier derived from `base`,
    /// appending a numeric suffix on collision.
    fn reserve_name(&mut self, base: &str) -> String {
        let sanitized = sanitize_rule_name(base);
        if self.used_names.insert(sanitized.clone()) {
            return sanitized;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{sanitized}-{n}");
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn push_rule(&mut self, name: String, expr: Expr) {
        self.rules.push(Rule { name, expr });
    }

    /// Lowers one field into an `Expr` usable directly in a parent's
    /// right-hand side. `Composite` and `Variant` are promoted into
    /// their own named rule and returned as a `Ref`.
    fn lower_field(&mut self, field: &Field) -> Expr {
        match field {
            Field::Int { min, max, .. } => int_range_expr(*min, *max),
            Field::ConstantInt { value, .. } => Expr::Literal(value.to_string()),
            Field::Float { min, max, .. } => {
                let int_part = int_range_expr(min.trunc() as i64, max.trunc() as i64);
                Expr::Seq(vec![
                    int_part,
                    Expr::Literal(".".to_string()),
                    Expr::Seq(vec![digit_ref(), Expr::Star(Box::new(digit_ref()))]),
                ])
            }
            Field::ConstantFloat { value, .. } => Expr::Literal(format_fixed_float(*value)),
            Field::Digit { count, .. } => {
                quoted(bounded_repeat(&digit_ref(), None, *count, *count))
            }
            Field::Str {
                min_len, max_len, ..
            } => quoted(bounded_repeat(&string_char_ref(), None, *min_len, *max_len)),
            Field::Bool { .. } => Expr::Group(Box::new(Expr::Choice(vec![
                Expr::Literal("true".to_string()),
                Expr::Literal("false".to_string()),
            ]))),
            Field::ChoiceStr { options, .. } => Expr::Group(Box::new(Expr::Choice(
                options
                    .iter()
                    .map(|o| quoted(Expr::Literal(o.clone())))
                    .collect(),
            ))),
            Field::ChoiceInt { options, .. } => Expr::Group(Box::new(Expr::Choice(
                options.iter().map(|v| Expr::Literal(v.to_string())).collect(),
            ))),
            Field::TemplateString {
                template,
                min_gen,
                max_gen,
                ..
            } => self.template_string_expr(template, *min_gen, *max_gen),
            Field::Array {
                element,
                min_len,
                max_len,
                ..
            } => {
                let element_expr = self.lower_field(element);
                let separator = Expr::Seq(vec![Expr::Literal(",".to_string()), ws_ref()]);
                let content = bounded_repeat(&element_expr, Some(&separator), *min_len, *max_len);
                Expr::Seq(vec![
                    Expr::Literal("[".to_string()),
                    ws_ref(),
                    content,
                    ws_ref(),
                    Expr::Literal("]".to_string()),
                ])
            }
            Field::Composite(c) => Expr::Ref(self.compile_composite(c)),
            Field::Variant {
                name, alternatives, ..
            } => Expr::Ref(self.compile_variant(name, alternatives)),
            Field::Optional { inner, .. } => Expr::Optional(Box::new(self.lower_field(inner))),
        }
    }

    fn template_string_expr(&mut self, template: &str, min_gen: usize, max_gen: usize) -> Expr {
        const MARKER: &str = crate::schema::GENERATED_MARKER;
        match template.find(MARKER) {
            Some(pos) => {
                let prefix = &template[..pos];
                let suffix = &template[pos + MARKER.len()..];
                let middle = bounded_repeat(&string_char_ref(), None, min_gen, max_gen);
                let mut parts = Vec::new();
                if !prefix.is_empty() {
                    parts.push(Expr::Literal(prefix.to_string()));
                }
                parts.push(middle);
                if !suffix.is_empty() {
                    parts.push(Expr::Literal(suffix.to_string()));
                }
                quoted(Expr::Seq(parts))
            }
            None => quoted(Expr::Literal(template.to_string())),
        }
    }

    fn compile_composite(&mut self, composite: &Composite) -> String {
        let rule_name = self.reserve_name(&composite.name);
        let fields: Vec<&Field> = composite.fields.values().collect();
        let body = self.composite_body(&fields);
        self.push_rule(rule_name.clone(), body);
        rule_name
    }

    fn compile_variant(&mut self, name: &str, alternatives: &[Composite]) -> String {
        let rule_name = self.reserve_name(name);
        let mut choices = Vec::with_capacity(alternatives.len());
        for alt in alternatives {
            let alt_rule = self.compile_composite(alt);
            choices.push(Expr::Ref(alt_rule));
        }
        self.push_rule(rule_name.clone(), Expr::Group(Box::new(Expr::Choice(choices))));
        rule_name
    }

    /// Builds the `"{" ws <fields> ws "}"` body for a composite, with
    /// each optional field's separating comma absorbed into its own
    /// `(...)?` group as described in the lowering rules. Implemented as
    /// a right fold carrying whether anything has already been emitted,
    /// computed once per field (not per present/absent combination) so
    /// the result is linear in the field count rather than exponential
    /// in the number of optional fields.
    fn composite_body(&mut self, fields: &[&Field]) -> Expr {
        // tail_true[i]: remaining fields from i, given something was
        // already emitted before position i (so the next present field
        // needs a leading comma).
        // tail_false[i]: same, given nothing has been emitted yet.
        let n = fields.len();
        let mut tail_true: Vec<Expr> = vec![Expr::Seq(vec![]); n + 1];
        let mut tail_false: Vec<Expr> = vec![Expr::Seq(vec![]); n + 1];

        for i in (0..n).rev() {
            let field = fields[i];
            let kv = self.key_value_expr(field);
            let is_optional = field.is_optional();
            let next_true = tail_true[i + 1].clone();

            if is_optional {
                let present = Expr::Seq(vec![
                    Expr::Literal(",".to_string()),
                    ws_ref(),
                    kv.clone(),
                    next_true.clone(),
                ]);
                tail_true[i] = Expr::choice_or_optional(present, tail_true[i + 1].clone());

                let present_first = Expr::Seq(vec![kv, next_true]);
                tail_false[i] = Expr::choice_or_optional(present_first, tail_false[i + 1].clone());
            } else {
                tail_true[i] = Expr::Seq(vec![
                    Expr::Literal(",".to_string()),
                    ws_ref(),
                    kv.clone(),
                    next_true,
                ]);
                tail_false[i] = Expr::Seq(vec![kv, tail_true[i + 1].clone()]);
            }
        }

        Expr::Seq(vec![
            Expr::Literal("{".to_string()),
            ws_ref(),
            tail_false.remove(0),
            ws_ref(),
            Expr::Literal("}".to_string()),
        ])
    }

    /// `"key" ws ":" ws <value-rhs>` for one field, unwrapping an
    /// `Optional` to lower its inner value (presence is handled by the
    /// caller, not here).
    fn key_value_expr(&mut self, field: &Field) -> Expr {
        let value_expr = match field {
            Field::Optional { inner, .. } => self.lower_field(inner),
            other => self.lower_field(other),
        };
        Expr::Seq(vec![
            Expr::Literal(format!("\"{}\"", field.name())),
            ws_ref(),
            Expr::Literal(":".to_string()),
            ws_ref(),
            value_expr,
        ])
    }
}

fn sanitize_rule_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.to_ascii_lowercase().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push('-');
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    #[test]
    fn test_root_rule_is_first() {
        let schema = Field::composite("character", vec![Field::string("name", 3, 15).unwrap()])
            .unwrap();
        let grammar = compile_grammar(&schema);
        assert_eq!(grammar.rules[0].name, "root");
    }

    #[test]
    fn test_shared_helpers_emitted_once() {
        let schema = Field::composite("character", vec![Field::string("name", 3, 15).unwrap()])
            .unwrap();
        let grammar = compile_grammar(&schema);
        let ws_count = grammar.rules.iter().filter(|r| r.name == WS_RULE).count();
        let digit_count = grammar.rules.iter().filter(|r| r.name == DIGIT_RULE).count();
        let string_char_count = grammar
            .rules
            .iter()
            .filter(|r| r.name == STRING_CHAR_RULE)
            .count();
        assert_eq!(ws_count, 1);
        assert_eq!(digit_count, 1);
        assert_eq!(string_char_count, 1);
    }

    #[test]
    fn test_deterministic() {
        let schema = Field::composite("stats", vec![Field::int("level", 1, 20).unwrap()]).unwrap();
        let a = compile_grammar(&schema).to_string();
        let b = compile_grammar(&schema).to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_variant_rule_is_choice_of_alternative_refs() {
        let combat =
            Composite::new("combat", vec![Field::string("enemy", 3, 20).unwrap()]).unwrap();
        let dialogue =
            Composite::new("dialogue", vec![Field::string("npc", 3, 20).unwrap()]).unwrap();
        let schema = Field::composite(
            "event",
            vec![Field::variant("data", vec![combat, dialogue]).unwrap()],
        )
        .unwrap();
        let grammar = compile_grammar(&schema);
        let variant_rule = grammar.rules.iter().find(|r| r.name == "data").unwrap();
        let rendered = variant_rule.to_string();
        assert!(rendered.contains('|'));
        assert!(rendered.contains("combat"));
        assert!(rendered.contains("dialogue"));
    }

    #[test]
    fn test_rule_name_collision_gets_numeric_suffix() {
        let a = Composite::new("item", vec![Field::bool("flag")]).unwrap();
        let b = Composite::new("item", vec![Field::bool("flag2")]).unwrap();
        let schema = Field::composite(
            "root",
            vec![
                Field::variant("first", vec![a]).unwrap(),
                Field::variant("second", vec![b]).unwrap(),
            ],
        )
        .unwrap();
        let grammar = compile_grammar(&schema);
        let item_rules: Vec<&Rule> = grammar
            .rules
            .iter()
            .filter(|r| r.name == "item" || r.name.starts_with("item-"))
            .collect();
        assert_eq!(item_rules.len(), 2);
    }

    #[test]
    fn test_optional_trailing_field_grammar_shape() {
        let schema = Field::composite(
            "profile",
            vec![
                Field::string("username", 3, 20).unwrap(),
                Field::optional("bio", Field::string("bio", 0, 200).unwrap()),
            ],
        )
        .unwrap();
        let grammar = compile_grammar(&schema);
        let root = &grammar.rules[0];
        let rendered = root.to_string();
        assert!(rendered.contains("\"username\""));
        assert!(rendered.contains("(\",\" ws \"\\\"bio\\\"\""));
    }

    #[test]
    fn test_array_bounded_repeat_factors_shared_prefix() {
        let schema = Field::array("tags", Field::string("tag", 1, 10).unwrap(), 1, 3).unwrap();
        let rendered = compile_grammar(&schema).to_string();
        // 1 mandatory copy then up to 2 optional extras, nested not flat.
        assert_eq!(rendered.matches("string-char").count() >= 1, true);
    }

    #[test]
    fn test_scenario_7_end_to_end_schema_compiles_with_single_root() {
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
                Field::choice_str(
                    "type",
                    vec!["combat".to_string(), "dialogue".to_string()],
                )
                .unwrap(),
                Field::variant("data", vec![combat, dialogue]).unwrap(),
            ],
        )
        .unwrap();
        let grammar = compile_grammar(&schema);
        let root_count = grammar.rules.iter().filter(|r| r.name == "root").count();
        assert_eq!(root_count, 1);
    }

    #[test]
    fn test_character_name_schema_root_shape() {
        let schema = Field::composite("character", vec![Field::string("name", 3, 15).unwrap()])
            .unwrap();
        let grammar = compile_grammar(&schema);
        let expected_name_value = quoted(bounded_repeat(&string_char_ref(), None, 3, 15));
        assert_eq!(
            grammar.rules[0].to_string(),
            format!(
                r#"root ::= "{{" ws "\"name\"" ws ":" ws {expected_name_value} ws "}}""#
            )
        );
    }

    #[test]
    fn test_stats_constant_schema_root_shape() {
        let schema = Field::composite(
            "stats",
            vec![
                Field::constant_int("minVal", 0),
                Field::constant_int("maxVal", 9999),
            ],
        )
        .unwrap();
        let grammar = compile_grammar(&schema);
        assert_eq!(
            grammar.rules[0].to_string(),
            r#"root ::= "{" ws "\"minVal\"" ws ":" ws "0" "," ws "\"maxVal\"" ws ":" ws "9999" ws "}""#
        );
    }
}
