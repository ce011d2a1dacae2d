use std::fmt;

use mikrogen_manifest::AttributeDecl;

/// Storage type family of an attribute, driving predicate style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    String,
    Char,
    Text,
    Json,
    Numeric,
    Date,
    Boolean,
    Other,
}

impl SemanticType {
    /// Classify a declared storage type such as `STRING(255)`,
    /// `DataTypes.INTEGER` or `jsonb`.
    pub fn classify(declared: &str) -> Self {
        let upper = declared.trim().to_ascii_uppercase();
        let bare = upper
            .strip_prefix("SEQUELIZE.DATATYPES.")
            .or_else(|| upper.strip_prefix("DATATYPES."))
            .unwrap_or(&upper);
        let base = bare
            .split(|c: char| c == '(' || c == '.' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        match base {
            "STRING" | "CITEXT" => SemanticType::String,
            "CHAR" => SemanticType::Char,
            "TEXT" => SemanticType::Text,
            "JSON" | "JSONB" => SemanticType::Json,
            "INTEGER" | "BIGINT" | "SMALLINT" | "MEDIUMINT" | "TINYINT" | "FLOAT" | "DOUBLE"
            | "REAL" | "DECIMAL" | "NUMBER" => SemanticType::Numeric,
            "DATE" | "DATEONLY" | "TIME" | "NOW" => SemanticType::Date,
            "BOOLEAN" => SemanticType::Boolean,
            _ => SemanticType::Other,
        }
    }

    /// String-like types are filtered by substring match.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            SemanticType::String | SemanticType::Char | SemanticType::Text | SemanticType::Json
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Char => "char",
            SemanticType::Text => "text",
            SemanticType::Json => "json",
            SemanticType::Numeric => "numeric",
            SemanticType::Date => "date",
            SemanticType::Boolean => "boolean",
            SemanticType::Other => "other",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An introspected attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeModel {
    pub name: String,
    pub semantic_type: SemanticType,
    pub is_primary_key: bool,
    pub is_unique: bool,
    pub is_nullable: bool,
}

impl AttributeModel {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            is_primary_key: false,
            is_unique: false,
            is_nullable: true,
        }
    }

    pub fn from_decl(name: &str, decl: &AttributeDecl) -> Self {
        Self {
            name: name.to_string(),
            semantic_type: SemanticType::classify(&decl.ty),
            is_primary_key: decl.primary_key,
            is_unique: decl.unique,
            is_nullable: decl.is_nullable(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_types() {
        assert_eq!(SemanticType::classify("STRING"), SemanticType::String);
        assert_eq!(SemanticType::classify("CITEXT"), SemanticType::String);
        assert_eq!(SemanticType::classify("CHAR"), SemanticType::Char);
        assert_eq!(SemanticType::classify("TEXT"), SemanticType::Text);
        assert_eq!(SemanticType::classify("JSONB"), SemanticType::Json);
        assert_eq!(SemanticType::classify("BIGINT"), SemanticType::Numeric);
        assert_eq!(SemanticType::classify("DECIMAL"), SemanticType::Numeric);
        assert_eq!(SemanticType::classify("DATEONLY"), SemanticType::Date);
        assert_eq!(SemanticType::classify("BOOLEAN"), SemanticType::Boolean);
        assert_eq!(SemanticType::classify("UUID"), SemanticType::Other);
    }

    #[test]
    fn test_classify_prefixes_and_arguments() {
        assert_eq!(SemanticType::classify("STRING(255)"), SemanticType::String);
        assert_eq!(SemanticType::classify("DataTypes.INTEGER"), SemanticType::Numeric);
        assert_eq!(
            SemanticType::classify("sequelize.DataTypes.TEXT('long')"),
            SemanticType::Text
        );
        assert_eq!(SemanticType::classify("integer.UNSIGNED"), SemanticType::Numeric);
        assert_eq!(SemanticType::classify(" date "), SemanticType::Date);
        assert_eq!(SemanticType::classify(""), SemanticType::Other);
    }

    #[test]
    fn test_string_like() {
        assert!(SemanticType::Json.is_string_like());
        assert!(SemanticType::Char.is_string_like());
        assert!(!SemanticType::Numeric.is_string_like());
        assert!(!SemanticType::Date.is_string_like());
    }

    #[test]
    fn test_from_decl() {
        let decl: AttributeDecl =
            toml::from_str("type = \"INTEGER\"\nprimary_key = true\nallow_null = false").unwrap();
        let attr = AttributeModel::from_decl("id", &decl);

        assert_eq!(attr, AttributeModel::new("id", SemanticType::Numeric).primary_key());
    }
}
