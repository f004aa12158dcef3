//! # Error Types
//!
//! Defines every error the schema algebra and its compilers can produce.
//!
//! ## Architecture: Errors as Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                    ERROR HIERARCHY                                          │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │                        GbnfcError (CLI-facing)                              │
//! │                           │                                                 │
//! │       ┌───────────────────┼───────────────────┐                             │
//! │       │                   │                   │                             │
//! │       ▼                   ▼                   ▼                             │
//! │  InvalidSchema     CompilationFailure      Io / Json                        │
//! │  (construction)    (defensive, never       (CLI file handling)              │
//! │                     expected at runtime)                                    │
//! │                                                                             │
//! │                        Diagnostic (data-time)                               │
//! │                 returned, never thrown, from Validator::validate            │
//! │                                                                             │
//! │  PRINCIPLE: each error has its own type with specific data.                 │
//! │             No string-based error messages for anything the caller         │
//! │             might want to match on.                                        │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why `thiserror`?
//!
//! `thiserror` generates the `std::error::Error` and `Display` impls, plus
//! the `#[from]` conversions the CLI needs for `?`.
//!
//! ## A note on the validator's error discipline
//!
//! [`Diagnostic`] is data, not an error in the `std::error::Error` sense: the
//! validator never returns `Err`, it always returns `Ok` carrying a
//! validity flag and a (possibly empty) list of diagnostics. This mirrors
//! the spec's "the validator never throws" rule — malformed input produces
//! a diagnostic, not a propagated error.

use thiserror::Error;

// ============================================================================
// SCHEMA CONSTRUCTION ERRORS
// ============================================================================

/// Raised by schema constructors when an algebraic invariant is violated.
///
/// These are programmer errors: they surface immediately at construction
/// time, not later during compilation or validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidSchema {
    /// A numeric or length range has `min > max`.
    #[error("field '{field}': inverted range [{min}, {max}]")]
    InvertedRange {
        field: String,
        min: String,
        max: String,
    },

    /// A `Choice` or `Variant` was constructed with no alternatives.
    #[error("field '{field}': must have at least one option")]
    EmptyOptions { field: String },

    /// A `Composite` declared the same field name twice.
    #[error("composite '{composite}': duplicate field name '{field}'")]
    DuplicateField { composite: String, field: String },

    /// A `TemplateString` template contains more than one `<generated>`
    /// marker.
    #[error(
        "field '{field}': template contains {count} <generated> markers, at most one is allowed"
    )]
    TooManyGeneratedMarkers { field: String, count: usize },
}

// ============================================================================
// COMPILATION ERRORS
// ============================================================================

/// Raised by the grammar/template/hint compilers.
///
/// Compilation is total over a well-formed [`crate::schema::Schema`]
/// (every schema that passed construction compiles), so this variant is
/// never expected to be constructed in a correct implementation. It exists
/// as the "defensive single error path" the compilers fall back to if an
/// internal assumption is ever violated, instead of panicking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilationFailure {
    #[error("internal compiler error at {at}: {detail}")]
    Internal { at: String, detail: String },
}

// ============================================================================
// VALIDATION DIAGNOSTICS
// ============================================================================

/// A single, path-qualified validation finding.
///
/// `path` uses dotted names and `[i]` indices, e.g.
/// `character.stats.strength` or `objectives[2].description`. The root
/// value itself is reported with an empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// A diagnostic for JSON that failed to parse at all — there is no
    /// schema path to attach, so `path` is empty and the rendered form
    /// omits the leading `: `.
    pub fn parse_error(message: impl std::fmt::Display) -> Self {
        Self {
            path: String::new(),
            message: format!("invalid JSON format: {message}"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// ============================================================================
// TOP-LEVEL (CLI-FACING) ERROR
// ============================================================================

/// Aggregate error type for the CLI layer, which is the one place that
/// mixes schema-construction failures with ordinary I/O and JSON parsing
/// failures. The pure core (grammar/template/hint compilers, validator)
/// never needs this type — it returns `Result<_, InvalidSchema>` or a
/// `(bool, Vec<Diagnostic>)` pair directly.
#[derive(Error, Debug)]
pub enum GbnfcError {
    #[error("invalid schema: {0}")]
    Schema(#[from] InvalidSchema),

    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationFailure),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown demo schema: {0}")]
    UnknownSchema(String),

    #[error("{0}")]
    General(String),
}

/// Convenient alias for fallible `gbnfc` operations.
pub type GbnfcResult<T> = Result<T, GbnfcError>;

// ============================================================================
// TESTS
// ============================================================================
