//! SQL template generation.
//!
//! Turns a normalized table/column description into a named-parameter
//! INSERT statement. Identifiers are emitted verbatim (no quoting).

use crate::extractor::StructDeclaration;
use crate::naming::{normalize_column_name, normalize_table_name};

/// Trait for converting values to SQL strings.
pub trait ToSql {
    /// Convert this value to a SQL string.
    fn to_sql(&self) -> String;
}

/// Table name and ordered column names for one struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    pub table_name: String,
    pub fields: Vec<String>,
}

impl QueryBuilder {
    /// Build from already-normalized names.
    pub fn new(table_name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            table_name: table_name.into(),
            fields,
        }
    }

    /// Generate the INSERT template.
    ///
    /// ```
    /// use insertgen::transpiler::QueryBuilder;
    ///
    /// let q = QueryBuilder::new("users", vec!["id".into(), "name".into()]);
    /// assert_eq!(q.insert_query(), "INSERT INTO users (id, name) VALUES (:id, :name)");
    /// ```
    pub fn insert_query(&self) -> String {
        let placeholders: Vec<String> = self.fields.iter().map(|f| format!(":{}", f)).collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name.to_lowercase(),
            self.fields.join(", "),
            placeholders.join(", ")
        )
    }
}

impl ToSql for QueryBuilder {
    fn to_sql(&self) -> String {
        self.insert_query()
    }
}

impl From<&StructDeclaration> for QueryBuilder {
    fn from(decl: &StructDeclaration) -> Self {
        Self {
            table_name: normalize_table_name(&decl.name),
            fields: decl
                .fields
                .iter()
                .map(|f| normalize_column_name(f))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_query() {
        let q = QueryBuilder::new(
            "users",
            vec!["id".into(), "name".into(), "invitation_code".into()],
        );
        assert_eq!(
            q.insert_query(),
            "INSERT INTO users (id, name, invitation_code) VALUES (:id, :name, :invitation_code)"
        );
    }

    #[test]
    fn test_empty_field_list() {
        let q = QueryBuilder::new("markers", vec![]);
        assert_eq!(q.to_sql(), "INSERT INTO markers () VALUES ()");
    }

    #[test]
    fn test_table_name_is_lowercased() {
        let q = QueryBuilder::new("Audit_Logs", vec!["id".into()]);
        assert_eq!(q.to_sql(), "INSERT INTO audit_logs (id) VALUES (:id)");
    }

    #[test]
    fn test_column_names_are_not_lowercased_or_quoted() {
        let q = QueryBuilder::new("t", vec!["Weird Name".into()]);
        assert_eq!(q.to_sql(), "INSERT INTO t (Weird Name) VALUES (:Weird Name)");
    }

    #[test]
    fn test_from_struct_declaration() {
        let decl = StructDeclaration {
            name: "User".into(),
            fields: vec!["ID".into(), "Name".into(), "InvitationCode".into()],
        };
        let q = QueryBuilder::from(&decl);
        assert_eq!(q.table_name, "users");
        assert_eq!(q.fields, vec!["id", "name", "invitation_code"]);
        assert_eq!(
            q.to_sql(),
            "INSERT INTO users (id, name, invitation_code) VALUES (:id, :name, :invitation_code)"
        );
    }
}
