//! # GBNFC CLI
//!
//! Command-line front end driving the public facade against the
//! built-in demo schemas (or, for `validate`, arbitrary JSON).
//!
//! ```bash
//! # Compile the "character" demo schema to a GBNF grammar
//! gbnfc compile-grammar --schema character
//!
//! # Validate a JSON file against the "profile" demo schema
//! gbnfc validate --schema profile --input profile.json
//!
//! # List the built-in schemas
//! gbnfc demo
//! ```
//!
//! This binary is ambient scaffolding around the core library: it owns
//! exit codes, `anyhow::Context`-style I/O error chaining, and the one
//! piece of logging the crate does (the core itself never logs, see
//! `error.rs`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gbnfc::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// GBNFC - Constrained-generation schema compiler
#[derive(Parser)]
#[command(name = "gbnfc")]
#[command(author = "GBNFC Project")]
#[command(version)]
#[command(about = "Compiles declarative schemas to GBNF grammars, prompt templates and a validator")]
#[command(long_about = r#"
GBNFC compiles one schema into the three artifacts a constrained-generation
pipeline needs around an LLM:

  1. A GBNF grammar restricting token sampling to the schema's shape.
  2. A placeholder-annotated JSON template for prompt inclusion.
  3. A strict, path-qualified validator for the model's raw output.

Example:
  gbnfc compile-grammar --schema character
  gbnfc validate --schema profile --input profile.json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compiles a demo schema to a GBNF grammar
    CompileGrammar {
        /// Name of the built-in demo schema
        #[arg(short, long)]
        schema: String,

        /// Write the grammar to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Renders the placeholder-annotated JSON template for a demo schema
    RenderTemplate {
        #[arg(short, long)]
        schema: String,
    },

    /// Renders the bullet-list constraint hints for a demo schema
    RenderHints {
        #[arg(short, long)]
        schema: String,
    },

    /// Validates JSON (from a file or stdin) against a demo schema
    Validate {
        #[arg(short, long)]
        schema: String,

        /// Path to the JSON file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Lists the built-in demo schemas and their field hints
    Demo {
        /// Show details for a specific schema
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CompileGrammar { schema, output } => cmd_compile_grammar(&schema, output.as_deref()),
        Commands::RenderTemplate { schema } => cmd_render_template(&schema),
        Commands::RenderHints { schema } => cmd_render_hints(&schema),
        Commands::Validate { schema, input } => cmd_validate(&schema, input.as_deref()),
        Commands::Demo { name } => cmd_demo(name.as_deref()),
    }
}

fn load_schema(name: &str) -> Result<Field> {
    gbnfc::demo::build(name).map_err(|e| {
        warn!(schema = name, "unrecognised demo schema requested");
        anyhow::anyhow!(e)
    })
}

fn cmd_compile_grammar(schema_name: &str, output: Option<&std::path::Path>) -> Result<()> {
    let schema = load_schema(schema_name)?;
    debug!(schema = schema_name, "compiling grammar");
    let compiler = SchemaCompiler::new(&schema);
    let grammar = compiler.compile_grammar().to_string();

    println!("┌─────────────────────────────────────────");
    println!("│ GBNFC Grammar Compiler");
    println!("├─────────────────────────────────────────");
    println!("│ Schema: {schema_name}");

    match output {
        Some(path) => {
            std::fs::write(path, &grammar).context("could not write grammar file")?;
            println!("│ Output: {}", path.display());
        }
        None => {
            println!("├─────────────────────────────────────────");
            for line in grammar.lines() {
                println!("│ {line}");
            }
        }
    }

    println!("└─────────────────────────────────────────");
    Ok(())
}

fn cmd_render_template(schema_name: &str) -> Result<()> {
    let schema = load_schema(schema_name)?;
    let compiler = SchemaCompiler::new(&schema);
    println!("{}", compiler.render_template());
    Ok(())
}

fn cmd_render_hints(schema_name: &str) -> Result<()> {
    let schema = load_schema(schema_name)?;
    let compiler = SchemaCompiler::new(&schema);
    println!("{}", compiler.render_hints());
    Ok(())
}

fn cmd_validate(schema_name: &str, input: Option<&std::path::Path>) -> Result<()> {
    let schema = load_schema(schema_name)?;
    let json = match input {
        Some(path) => std::fs::read_to_string(path).context("could not read JSON input file")?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read JSON from stdin")?;
            buf
        }
    };

    let compiler = SchemaCompiler::new(&schema);
    let (valid, diagnostics) = compiler.validate(&json);

    println!("┌─────────────────────────────────────────");
    println!("│ GBNFC Validator");
    println!("├─────────────────────────────────────────");
    println!("│ Schema: {schema_name}");

    if valid {
        println!("│ ✓ valid");
    } else {
        println!("│ ✗ invalid");
        for diagnostic in &diagnostics {
            println!("│   {diagnostic}");
        }
    }

    println!("└─────────────────────────────────────────");

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_demo(name: Option<&str>) -> Result<()> {
    println!("┌─────────────────────────────────────────");
    println!("│ GBNFC Demo Schemas");
    println!("├─────────────────────────────────────────");

    match name {
        Some(requested) => {
            let schema = load_schema(requested)?;
            let compiler = SchemaCompiler::new(&schema);
            println!("│");
            println!("│ Schema: {requested}");
            println!("│");
            for line in compiler.render_hints().lines() {
                println!("│   {line}");
            }
        }
        None => {
            println!("│");
            println!("│ Available schemas:");
            println!("│");
            for name in gbnfc::demo::SCHEMA_NAMES {
                println!("│   {name}");
            }
        }
    }

    println!("└─────────────────────────────────────────");
    Ok(())
}
