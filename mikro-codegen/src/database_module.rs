//! Database connection modules (`databases/<name>.js`).

use mikrogen_manifest::DatabaseDecl;

use crate::json::{pretty, table_to_json};

/// Render a connection declaration as a module exporting its settings.
pub fn render_database_module(decl: &DatabaseDecl) -> String {
    format!(
        "module.exports = {};\n",
        pretty(&table_to_json(&decl.connection_settings()))
    )
}
