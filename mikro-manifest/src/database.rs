//! Database connection declarations (`[databases.<name>]`).

use serde::Deserialize;

/// One named database connection.
///
/// The settings are opaque to the generator and are emitted verbatim as the
/// connection module. An empty table stands for a connection whose settings
/// still have to be filled in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseDecl {
    #[serde(flatten)]
    pub settings: toml::Table,
}

impl DatabaseDecl {
    /// Settings to emit: the declared ones, or the fill-in template when none
    /// are declared.
    pub fn connection_settings(&self) -> toml::Table {
        if self.settings.is_empty() {
            template_settings()
        } else {
            self.settings.clone()
        }
    }

    /// The declared `sequelize.dialect`, if any.
    pub fn dialect(&self) -> Option<&str> {
        self.settings
            .get("sequelize")
            .and_then(|options| options.get("dialect"))
            .and_then(|dialect| dialect.as_str())
    }
}

fn template_settings() -> toml::Table {
    let mut sequelize = toml::Table::new();
    sequelize.insert("host".into(), "hostname".into());
    sequelize.insert("port".into(), "port".into());
    sequelize.insert("dialect".into(), "mysql".into());

    let mut settings = toml::Table::new();
    settings.insert("database".into(), "name_of_database".into());
    settings.insert("username".into(), "username_of_user".into());
    settings.insert("password".into(), "password_of_user".into());
    settings.insert("sequelize".into(), toml::Value::Table(sequelize));
    settings
}
