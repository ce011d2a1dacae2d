use mikrogen_core::to_camel_case;
use mikrogen_manifest::Manifest;

use super::AttributeModel;
use crate::SchemaError;

/// An introspected schema, immutable for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub connection: String,
    /// Attributes in declaration order
    pub attributes: Vec<AttributeModel>,
    /// Primary key attribute, if one is marked
    pub primary_key: Option<String>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Variable the generated model binds this schema to (`post` -> `postSchema`).
    pub fn variable(&self) -> String {
        schema_variable(&self.name)
    }
}

/// Variable name for a schema (`blog_post` -> `blogPostSchema`).
pub fn schema_variable(name: &str) -> String {
    to_camel_case(&format!("{}_schema", name))
}

/// Builds [`Schema`]s from manifest declarations.
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    /// Introspect a declared schema.
    ///
    /// Fails when the schema is undeclared, declares no attributes, or marks
    /// more than one primary key.
    pub fn introspect(name: &str, manifest: &Manifest) -> Result<Schema, SchemaError> {
        let decl = manifest
            .schema(name)
            .ok_or_else(|| SchemaError::Undefined(name.to_string()))?;

        if decl.attributes.is_empty() {
            return Err(SchemaError::NoAttributes(name.to_string()));
        }

        let attributes: Vec<AttributeModel> = decl
            .attributes
            .iter()
            .map(|(attr_name, attr)| AttributeModel::from_decl(attr_name, attr))
            .collect();

        let keys: Vec<String> = attributes
            .iter()
            .filter(|attr| attr.is_primary_key)
            .map(|attr| attr.name.clone())
            .collect();

        if keys.len() > 1 {
            return Err(SchemaError::MultiplePrimaryKeys {
                schema: name.to_string(),
                keys,
            });
        }

        Ok(Schema {
            name: name.to_string(),
            connection: decl.connection.clone(),
            attributes,
            primary_key: keys.into_iter().next(),
        })
    }
}
