//! # GBNFC
//!
//! Compiles a declarative, recursive JSON schema into the three
//! artifacts an LLM-constrained-generation pipeline needs: a GBNF
//! grammar that restricts token sampling, a prompt template showing the
//! model the intended shape, and a strict validator that checks the
//! model's output independently of the grammar.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                              GBNFC ARCHITECTURE                              │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │    ┌─────────────┐                                                         │
//! │    │   schema    │  Field / Composite — the recursive schema algebra       │
//! │    └──────┬──────┘                                                         │
//! │           │                                                                 │
//! │   ┌───────┼────────────┬────────────────┐                                  │
//! │   ▼       ▼            ▼                ▼                                  │
//! │ grammar template      hints         validator                              │
//! │   │       │            │                │                                  │
//! │   ▼       ▼            ▼                ▼                                  │
//! │ GBNF   placeholder   bullet      (bool, [Diagnostic])                      │
//! │ text      JSON        list                                                 │
//! │                                                                             │
//! │   All four are pure functions of a Field tree, bundled behind the          │
//! │   SchemaCompiler facade (facade.rs) for convenient call sites.             │
//! │                                                                             │
//! │   DATA FLOW: Field tree → {grammar, template, hints} → inference server    │
//! │              → raw JSON text → validator → (bool, diagnostics)             │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use gbnfc::prelude::*;
//!
//! let schema = Field::composite(
//!     "character",
//!     vec![Field::string("name", 3, 15).unwrap()],
//! )
//! .unwrap();
//!
//! let compiler = SchemaCompiler::new(&schema);
//! let grammar = compiler.compile_grammar();
//! assert!(grammar.to_string().starts_with("root ::="));
//!
//! let (valid, _diagnostics) = compiler.validate(r#"{"name":"Narada"}"#);
//! assert!(valid);
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// The schema algebra: `Field`/`Composite` and their fallible
/// constructors.
pub mod schema;

/// Error types shared by schema construction, compilation and the CLI.
pub mod error;

/// Shared numeric formatting/comparison helpers.
pub mod numeric;

/// Integer-range-to-grammar decomposition.
pub mod intrange;

/// The GBNF grammar compiler.
pub mod grammar;

/// The placeholder-annotated JSON template renderer.
pub mod template;

/// The bullet-list constraint hint renderer.
pub mod hints;

/// The strict, path-qualified validator.
pub mod validator;

/// The public facade bundling all four operations.
pub mod facade;

/// Built-in example schemas used by the CLI and integration tests.
pub mod demo;

// ============================================================================
// PRELUDE
// ============================================================================

/// Commonly used items for a single import.
///
/// ```
/// use gbnfc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CompilationFailure, Diagnostic, GbnfcError, GbnfcResult, InvalidSchema};
    pub use crate::facade::SchemaCompiler;
    pub use crate::schema::{Composite, Field};
}
