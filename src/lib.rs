//! # insertgen
//!
//! Scan a Go source file for struct declarations and emit one
//! named-parameter INSERT template per struct.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! // models.go:
//! //   type User struct {
//! //       ID             int
//! //       Name           string
//! //       InvitationCode string
//! //   }
//! for sql in insertgen::generate_inserts("models.go") {
//!     println!("{}", sql);
//! }
//! // => INSERT INTO users (id, name, invitation_code) VALUES (:id, :name, :invitation_code)
//! ```
//!
//! ## Pipeline
//!
//! | Stage       | Module          | Output                         |
//! |-------------|-----------------|--------------------------------|
//! | Parse       | [`parser`]      | [`ast::SourceFile`]            |
//! | Extract     | [`extractor`]   | [`StructDeclaration`]s         |
//! | Normalize   | [`naming`]      | table and column names         |
//! | Generate    | [`transpiler`]  | `INSERT INTO ... VALUES (...)` |

pub mod ast;
pub mod config;
pub mod error;
pub mod extractor;
pub mod naming;
pub mod parser;
pub mod transpiler;

pub use extractor::{extract_from_source, extract_structs, try_extract_structs, StructDeclaration};

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::extractor::{
        extract_from_source, extract_structs, try_extract_structs, StructDeclaration,
    };
    pub use crate::naming::{normalize_table_name, pluralize, to_snake_case};
    pub use crate::parser::parse;
    pub use crate::transpiler::{QueryBuilder, ToSql};
}

use std::path::Path;

use transpiler::ToSql;

/// Parse Go source text into a syntax tree.
///
/// # Example
///
/// ```
/// let file = insertgen::parse("package main\n\ntype User struct {\n\tName string\n}\n").unwrap();
/// assert_eq!(file.package, "main");
/// ```
pub fn parse(source: &str) -> Result<ast::SourceFile, error::Error> {
    parser::parse(source)
}

/// Run the whole pipeline on a file: one INSERT template per struct, in
/// declaration order. Unparseable files yield nothing (see
/// [`extract_structs`]).
pub fn generate_inserts(path: impl AsRef<Path>) -> Vec<String> {
    extract_structs(path)
        .iter()
        .map(|decl| decl.to_query_builder().to_sql())
        .collect()
}
