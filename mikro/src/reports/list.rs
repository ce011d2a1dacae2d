//! List command report data structures.

use super::output::{Output, Report};

/// Report data from listing the manifest and the module root.
#[derive(Debug)]
pub struct ListReport {
    pub databases: Vec<DatabaseInfo>,
    pub schemas: Vec<SchemaInfo>,
    pub policies: Vec<PolicyInfo>,
    /// Registered model modules, in index order.
    pub models: Vec<String>,
    /// Registered schema modules, in index order.
    pub schema_modules: Vec<String>,
    /// Registered connection modules, in index order.
    pub database_modules: Vec<String>,
}

/// A declared database connection.
#[derive(Debug)]
pub struct DatabaseInfo {
    pub name: String,
    pub dialect: Option<String>,
}

/// A declared schema.
#[derive(Debug)]
pub struct SchemaInfo {
    pub name: String,
    pub connection: String,
    pub attributes: Vec<String>,
}

/// A declared crud policy.
#[derive(Debug)]
pub struct PolicyInfo {
    pub name: String,
    pub version: String,
    pub operations: Vec<&'static str>,
    pub relations: usize,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.databases.is_empty() {
            out.section("Databases");
            for database in &self.databases {
                match &database.dialect {
                    Some(dialect) => out.list_item(&format!("{} ({})", database.name, dialect)),
                    None => out.list_item(&database.name),
                }
            }
            out.newline();
        }

        if self.schemas.is_empty() {
            out.preformatted("No schemas defined");
        } else {
            out.section("Schemas");
            for schema in &self.schemas {
                out.list_item(&format!(
                    "{} ({}): {}",
                    schema.name,
                    schema.connection,
                    schema.attributes.join(", ")
                ));
            }
        }

        if !self.policies.is_empty() {
            out.newline();
            out.section("Crud policies");
            for policy in &self.policies {
                out.list_item(&format!(
                    "{} [{}] {}, {} relation{}",
                    policy.name,
                    policy.version,
                    policy.operations.join("/"),
                    policy.relations,
                    if policy.relations == 1 { "" } else { "s" }
                ));
            }
        }

        let registered = [
            ("Database modules", &self.database_modules),
            ("Schema modules", &self.schema_modules),
            ("Models", &self.models),
        ];
        for (heading, names) in registered {
            if names.is_empty() {
                continue;
            }
            out.newline();
            out.section(heading);
            for name in names {
                out.list_item(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_databases_first() {
        let report = ListReport {
            databases: vec![
                DatabaseInfo {
                    name: "main".into(),
                    dialect: Some("mysql".into()),
                },
                DatabaseInfo {
                    name: "audit".into(),
                    dialect: None,
                },
            ],
            schemas: Vec::new(),
            policies: Vec::new(),
            models: Vec::new(),
            schema_modules: Vec::new(),
            database_modules: vec!["main".into()],
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "Databases:",
                "  - main (mysql)",
                "  - audit",
                "",
                "No schemas defined",
                "",
                "Database modules:",
                "  - main",
            ]
        );
    }
}
