//! # Schema Model
//!
//! The algebraic data type at the center of the crate: a recursive tagged
//! sum describing the shape of a desired JSON document. Every other
//! component (grammar compiler, template/hint renderers, validator) is a
//! pure traversal over this tree.
//!
//! ## Architecture: Closed-World Polymorphism
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         Field (the sum type)                                │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │   Int / ConstantInt / Float / ConstantFloat / Digit / Str / Bool           │
//! │   ChoiceStr / ChoiceInt / TemplateString          ── leaves ──              │
//! │                                                                             │
//! │   Array(Box<Field>)                               ── one child ──          │
//! │   Composite(Composite)                            ── named children ──     │
//! │   Variant { alternatives: Vec<Composite> }        ── named children ──     │
//! │   Optional(Box<Field>)                            ── one child ──          │
//! │                                                                             │
//! │   A tagged enum with exhaustive matching, not a class hierarchy with        │
//! │   virtual methods: the grammar compiler, template/hint renderers and       │
//! │   validator are free functions over this sum (see grammar.rs,             │
//! │   template.rs, hints.rs, validator.rs), never methods on the variants.     │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why constructors return `Result`, not a derive macro
//!
//! A schema is data assembled at runtime — compiled from a registry
//! lookup, a config file, or hand-written Rust — not a compile-time Rust
//! struct. So there is no `#[derive(Schema)]` here: every variant has a
//! plain constructor function that checks its own invariants and returns
//! [`InvalidSchema`] on violation. Construction is the only place that can
//! fail; every later traversal (compile, render, validate) is total.

use crate::error::InvalidSchema;
use indexmap::IndexMap;

// ============================================================================
// COMPOSITE
// ============================================================================

/// A JSON object with exactly the named keys from `fields`, in the
/// declared order. Order is significant: it fixes both JSON key emission
/// order in the grammar and the dotted-path order reported by the
/// validator, so `fields` is an insertion-ordered map rather than a
/// `HashMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub name: String,
    pub fields: IndexMap<String, Field>,
}

impl Composite {
    /// Builds a composite from an ordered list of fields, rejecting
    /// duplicate field names.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Result<Self, InvalidSchema> {
        let name = name.into();
        let mut map = IndexMap::with_capacity(fields.len());
        for field in fields {
            let field_name = field.name().to_string();
            if map.insert(field_name.clone(), field).is_some() {
                return Err(InvalidSchema::DuplicateField {
                    composite: name,
                    field: field_name,
                });
            }
        }
        Ok(Composite { name, fields: map })
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// One node of the schema tree. Every variant carries the field name used
/// as the JSON object key when it appears inside a composite parent (the
/// name is otherwise unused, e.g. for the schema root).
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Integer in `[min, max]`, inclusive.
    Int { name: String, min: i64, max: i64 },

    /// Must emit exactly this integer.
    ConstantInt { name: String, value: i64 },

    /// Decimal number in `[min, max]`.
    Float { name: String, min: f64, max: f64 },

    /// Must emit exactly this value (within the validator's ε).
    ConstantFloat { name: String, value: f64 },

    /// A JSON string of exactly `count` decimal digits, preserving
    /// leading zeros.
    Digit { name: String, count: usize },

    /// A JSON string whose decoded length is in `[min_len, max_len]`.
    Str {
        name: String,
        min_len: usize,
        max_len: usize,
    },

    /// JSON `true` or `false`.
    Bool { name: String },

    /// Value must equal one of the enumerated string options.
    ChoiceStr { name: String, options: Vec<String> },

    /// Value must equal one of the enumerated integer options.
    ChoiceInt { name: String, options: Vec<i64> },

    /// A JSON string equal to `template`, with the literal substring
    /// `<generated>` replaced by a free-text region of length
    /// `[min_gen, max_gen]`. If `template` contains no marker, the field
    /// must equal `template` exactly and `min_gen`/`max_gen` are ignored.
    TemplateString {
        name: String,
        template: String,
        min_gen: usize,
        max_gen: usize,
    },

    /// JSON array of homogeneous elements, length in `[min_len, max_len]`.
    Array {
        name: String,
        element: Box<Field>,
        min_len: usize,
        max_len: usize,
    },

    /// JSON object with exactly the named keys, in order.
    Composite(Composite),

    /// JSON object matching exactly one of the alternatives.
    Variant {
        name: String,
        alternatives: Vec<Composite>,
    },

    /// May be omitted entirely by the parent composite; when present,
    /// must match `inner`.
    Optional { name: String, inner: Box<Field> },
}

/// Marker substituted inside a [`Field::TemplateString`] template by a
/// free-text region.
pub const GENERATED_MARKER: &str = "<generated>";

impl Field {
    /// The JSON object key this field occupies inside its parent
    /// composite.
    pub fn name(&self) -> &str {
        match self {
            Field::Int { name, .. }
            | Field::ConstantInt { name, .. }
            | Field::Float { name, .. }
            | Field::ConstantFloat { name, .. }
            | Field::Digit { name, .. }
            | Field::Str { name, .. }
            | Field::Bool { name }
            | Field::ChoiceStr { name, .. }
            | Field::ChoiceInt { name, .. }
            | Field::TemplateString { name, .. }
            | Field::Array { name, .. }
            | Field::Variant { name, .. }
            | Field::Optional { name, .. } => name,
            Field::Composite(c) => &c.name,
        }
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    pub fn int(name: impl Into<String>, min: i64, max: i64) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if min > max {
            return Err(InvalidSchema::InvertedRange {
                field: name,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Field::Int { name, min, max })
    }

    pub fn constant_int(name: impl Into<String>, value: i64) -> Self {
        Field::ConstantInt {
            name: name.into(),
            value,
        }
    }

    pub fn float(name: impl Into<String>, min: f64, max: f64) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if min > max {
            return Err(InvalidSchema::InvertedRange {
                field: name,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Field::Float { name, min, max })
    }

    pub fn constant_float(name: impl Into<String>, value: f64) -> Self {
        Field::ConstantFloat {
            name: name.into(),
            value,
        }
    }

    pub fn digit(name: impl Into<String>, count: usize) -> Self {
        Field::Digit {
            name: name.into(),
            count,
        }
    }

    pub fn string(
        name: impl Into<String>,
        min_len: usize,
        max_len: usize,
    ) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if min_len > max_len {
            return Err(InvalidSchema::InvertedRange {
                field: name,
                min: min_len.to_string(),
                max: max_len.to_string(),
            });
        }
        Ok(Field::Str {
            name,
            min_len,
            max_len,
        })
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Field::Bool { name: name.into() }
    }

    pub fn choice_str(
        name: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if options.is_empty() {
            return Err(InvalidSchema::EmptyOptions { field: name });
        }
        Ok(Field::ChoiceStr { name, options })
    }

    pub fn choice_int(name: impl Into<String>, options: Vec<i64>) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if options.is_empty() {
            return Err(InvalidSchema::EmptyOptions { field: name });
        }
        Ok(Field::ChoiceInt { name, options })
    }

    pub fn template_string(
        name: impl Into<String>,
        template: impl Into<String>,
        min_gen: usize,
        max_gen: usize,
    ) -> Result<Self, InvalidSchema> {
        let name = name.into();
        let template = template.into();
        let marker_count = template.matches(GENERATED_MARKER).count();
        if marker_count > 1 {
            return Err(InvalidSchema::TooManyGeneratedMarkers {
                field: name,
                count: marker_count,
            });
        }
        if marker_count == 1 && min_gen > max_gen {
            return Err(InvalidSchema::InvertedRange {
                field: name,
                min: min_gen.to_string(),
                max: max_gen.to_string(),
            });
        }
        Ok(Field::TemplateString {
            name,
            template,
            min_gen,
            max_gen,
        })
    }

    pub fn array(
        name: impl Into<String>,
        element: Field,
        min_len: usize,
        max_len: usize,
    ) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if min_len > max_len {
            return Err(InvalidSchema::InvertedRange {
                field: name,
                min: min_len.to_string(),
                max: max_len.to_string(),
            });
        }
        Ok(Field::Array {
            name,
            element: Box::new(element),
            min_len,
            max_len,
        })
    }

    pub fn composite(name: impl Into<String>, fields: Vec<Field>) -> Result<Self, InvalidSchema> {
        Ok(Field::Composite(Composite::new(name, fields)?))
    }

    pub fn variant(
        name: impl Into<String>,
        alternatives: Vec<Composite>,
    ) -> Result<Self, InvalidSchema> {
        let name = name.into();
        if alternatives.is_empty() {
            return Err(InvalidSchema::EmptyOptions { field: name });
        }
        Ok(Field::Variant { name, alternatives })
    }

    pub fn optional(name: impl Into<String>, inner: Field) -> Self {
        Field::Optional {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Whether this field may be omitted by its parent composite.
    pub fn is_optional(&self) -> bool {
        matches!(self, Field::Optional { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
