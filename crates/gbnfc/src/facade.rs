//! # Public Facade (C6)
//!
//! A single entry point bundling the four pure operations — grammar
//! compilation, template rendering, hint rendering, and validation —
//! over one schema. Wrapping the schema in a borrowing struct rather
//! than threading it through four free functions keeps call sites
//! short (`compiler.validate(json)` instead of `validate(&schema,
//! json)`) without giving up the "free function over the sum type"
//! shape described in `schema.rs`; the methods below do nothing but
//! forward to those free functions.

use crate::error::Diagnostic;
use crate::grammar::{self, Grammar};
use crate::hints;
use crate::schema::Field;
use crate::template;
use crate::validator;

/// Borrows a schema root and exposes the four public operations over
/// it. Construction is infallible and cheap (a single reference); all
/// the work happens in the methods, each of which is a pure function of
/// the borrowed schema and its argument.
pub struct SchemaCompiler<'a> {
    root: &'a Field,
}

impl<'a> SchemaCompiler<'a> {
    pub fn new(root: &'a Field) -> Self {
        SchemaCompiler { root }
    }

    /// Compiles the GBNF document for this schema.
    pub fn compile_grammar(&self) -> Grammar {
        grammar::compile_grammar(self.root)
    }

    /// Renders the placeholder-annotated JSON template for this schema.
    pub fn render_template(&self) -> String {
        template::render_template(self.root)
    }

    /// Renders the bullet-list constraint summary for this schema.
    pub fn render_hints(&self) -> String {
        hints::render_hints(self.root)
    }

    /// Validates `input` against this schema.
    pub fn validate(&self, input: &str) -> (bool, Vec<Diagnostic>) {
        validator::validate(self.root, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    #[test]
    fn test_facade_round_trip() {
        let schema =
            Field::composite("character", vec![Field::string("name", 3, 15).unwrap()]).unwrap();
        let compiler = SchemaCompiler::new(&schema);

        let grammar = compiler.compile_grammar().to_string();
        assert!(grammar.starts_with("root ::="));

        let template = compiler.render_template();
        assert!(template.contains("\"name\""));

        let hints = compiler.render_hints();
        assert!(hints.contains("character.name"));

        let (valid, _) = compiler.validate(r#"{"name":"Narada"}"#);
        assert!(valid);
    }
}
