//! Syntax tree for the scanned subset of Go.
//!
//! Only what struct extraction reads is kept: type specs, struct fields and
//! their names. Everything else is recognized by the parser and dropped.
//! Function bodies and value initializers are opaque apart from the `type`
//! declarations nested in them, which are kept in source order.

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    pub package: String,
    pub decls: Vec<Decl>,
}

/// A top-level declaration. Imports are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `type X ...` or `type ( ... )`
    Type(Vec<TypeSpec>),
    /// `func`, `var` or `const`
    Other(Block),
}

/// Opaque run of tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Local type declarations, at any nesting depth.
    pub types: Vec<TypeSpec>,
}

/// `Name Type`, `Name[T any] Type` or `Name = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub ty: TypeExpr,
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Struct(StructType),
    /// Any other type: named, pointer, slice, map, func, ...
    Other,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
}

/// One field line. Embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    pub names: Vec<String>,
}

impl Field {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read-only traversal in document order.
///
/// Every method defaults to the matching `walk_*` function, so an
/// implementation overrides only the nodes it cares about and calls the
/// walker to keep descending.
pub trait Visit {
    fn visit_file(&mut self, file: &SourceFile) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &Decl) {
        walk_decl(self, decl);
    }

    fn visit_type_spec(&mut self, spec: &TypeSpec) {
        walk_type_spec(self, spec);
    }

    fn visit_struct_type(&mut self, st: &StructType) {
        walk_struct_type(self, st);
    }

    fn visit_field(&mut self, _field: &Field) {}
}

pub fn walk_file<V: Visit + ?Sized>(v: &mut V, file: &SourceFile) {
    for decl in &file.decls {
        v.visit_decl(decl);
    }
}

pub fn walk_decl<V: Visit + ?Sized>(v: &mut V, decl: &Decl) {
    let specs = match decl {
        Decl::Type(specs) => specs,
        Decl::Other(block) => &block.types,
    };
    for spec in specs {
        v.visit_type_spec(spec);
    }
}

pub fn walk_type_spec<V: Visit + ?Sized>(v: &mut V, spec: &TypeSpec) {
    match &spec.ty {
        TypeExpr::Struct(st) => v.visit_struct_type(st),
        TypeExpr::Other => {}
    }
}

pub fn walk_struct_type<V: Visit + ?Sized>(v: &mut V, st: &StructType) {
    for field in &st.fields {
        v.visit_field(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        specs: Vec<String>,
        fields: usize,
    }

    impl Visit for Counter {
        fn visit_type_spec(&mut self, spec: &TypeSpec) {
            self.specs.push(spec.name.clone());
            walk_type_spec(self, spec);
        }

        fn visit_field(&mut self, _field: &Field) {
            self.fields += 1;
        }
    }

    fn spec(name: &str, ty: TypeExpr) -> TypeSpec {
        TypeSpec {
            name: name.to_string(),
            ty,
        }
    }

    fn named(name: &str) -> Field {
        Field {
            names: vec![name.to_string()],
        }
    }

    #[test]
    fn test_walk_reaches_fields_and_local_types() {
        let outer = StructType {
            fields: vec![named("ID"), Field::default(), named("Items")],
        };
        let local = StructType {
            fields: vec![named("X")],
        };
        let file = SourceFile {
            package: "main".into(),
            decls: vec![
                Decl::Type(vec![
                    spec("Outer", TypeExpr::Struct(outer)),
                    spec("ID", TypeExpr::Other),
                ]),
                Decl::Other(Block {
                    types: vec![spec("Local", TypeExpr::Struct(local))],
                }),
            ],
        };

        let mut counter = Counter::default();
        counter.visit_file(&file);
        assert_eq!(counter.specs, vec!["Outer", "ID", "Local"]);
        assert_eq!(counter.fields, 4);
    }

    #[test]
    fn test_embedded_field() {
        assert!(Field::default().is_embedded());
        assert!(!named("Base").is_embedded());
    }
}
