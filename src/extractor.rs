//! Struct extraction.
//!
//! Walks a parsed file and collects every type spec whose underlying type
//! is a struct, in the order the specs appear in the source. Specs nested
//! in function bodies count too.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::ast::{self, Field, SourceFile, TypeExpr, TypeSpec, Visit};
use crate::error::{Error, Result};
use crate::parser;
use crate::transpiler::QueryBuilder;

/// A struct type declaration as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    /// Declared type name, e.g. `User`.
    pub name: String,
    /// Declared field names in source order. Embedded fields are absent.
    pub fields: Vec<String>,
}

impl StructDeclaration {
    /// Normalize names for SQL generation.
    pub fn to_query_builder(&self) -> QueryBuilder {
        QueryBuilder::from(self)
    }
}

/// Extract struct declarations from the file at `path`.
///
/// A file that cannot be read or parsed is logged once and yields no
/// declarations, exactly like a file without structs.
pub fn extract_structs(path: impl AsRef<Path>) -> Vec<StructDeclaration> {
    let path = path.as_ref();
    match try_extract_structs(path) {
        Ok(structs) => structs,
        Err(e) => {
            error!(path = %path.display(), "{}", e);
            Vec::new()
        }
    }
}

/// Like [`extract_structs`], but returns the failure to the caller.
pub fn try_extract_structs(path: impl AsRef<Path>) -> Result<Vec<StructDeclaration>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let structs = extract_from_source(&source)?;
    info!(path = %path.display(), count = structs.len(), "extracted struct declarations");
    Ok(structs)
}

/// Extract struct declarations from in-memory source text.
pub fn extract_from_source(source: &str) -> Result<Vec<StructDeclaration>> {
    let file = parser::parse(source)?;
    Ok(collect_structs(&file))
}

/// Collect struct declarations from an already parsed file.
pub fn collect_structs(file: &SourceFile) -> Vec<StructDeclaration> {
    debug!(package = %file.package, decls = file.decls.len(), "collecting structs");
    let mut collector = StructCollector::default();
    collector.visit_file(file);
    collector.structs
}

#[derive(Default)]
struct StructCollector {
    structs: Vec<StructDeclaration>,
}

impl Visit for StructCollector {
    fn visit_type_spec(&mut self, spec: &TypeSpec) {
        if let TypeExpr::Struct(st) = &spec.ty {
            let fields = st.fields.iter().filter_map(field_name).collect::<Vec<_>>();
            debug!(name = %spec.name, fields = fields.len(), "found struct");
            self.structs.push(StructDeclaration {
                name: spec.name.clone(),
                fields,
            });
        }
        ast::walk_type_spec(self, spec);
    }
}

/// First declared name of a field group; `None` for embedded fields.
///
/// `A, B int` contributes only `A`.
fn field_name(field: &Field) -> Option<String> {
    if field.is_embedded() {
        return None;
    }
    field.names.first().cloned()
}
