//! Per-attribute query clause synthesis.

use mikrogen_manifest::PolicyVersion;

use crate::{builder::CodeBuilder, schema::AttributeModel};

/// Attributes never copied from the update payload.
const UPDATE_EXCLUDED: &[&str] = &["created_at", "created_by", "deleted_at", "deleted_by"];

/// Query fragments of one model, each without a trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClauses {
    /// Equality predicates on primary and unique attributes
    pub select: String,
    /// Filter predicates on non-primary attributes
    pub list: String,
    /// Assignments copying the update payload onto the selected record
    pub update: String,
    /// Tombstone assignments and persist, or a physical destroy
    pub remove: String,
}

/// Builds [`QueryClauses`] from an attribute list.
///
/// Output depends only on the attributes and the policy version, so
/// identical input always yields byte-identical fragments.
pub struct QueryClauseBuilder {
    version: PolicyVersion,
}

impl QueryClauseBuilder {
    pub fn new(version: PolicyVersion) -> Self {
        Self { version }
    }

    pub fn build(&self, attributes: &[AttributeModel]) -> QueryClauses {
        QueryClauses {
            select: self.select(attributes),
            list: self.list(attributes),
            update: self.update(attributes),
            remove: self.remove(attributes),
        }
    }

    fn select(&self, attributes: &[AttributeModel]) -> String {
        let predicates = attributes
            .iter()
            .filter(|attr| attr.is_primary_key || attr.is_unique)
            .map(|attr| predicate(&attr.name, &format!("[Op.eq]: query.{}", attr.name)));
        join_predicates(predicates)
    }

    fn list(&self, attributes: &[AttributeModel]) -> String {
        let predicates = attributes
            .iter()
            .filter(|attr| !attr.is_primary_key)
            .map(|attr| {
                let condition = if attr.semantic_type.is_string_like() {
                    format!("[Op.like]: `%${{query.{}}}%`", attr.name)
                } else {
                    format!("[Op.eq]: query.{}", attr.name)
                };
                predicate(&attr.name, &condition)
            });
        join_predicates(predicates)
    }

    fn update(&self, attributes: &[AttributeModel]) -> String {
        let fallback = self.version.fallback_operator();

        CodeBuilder::javascript()
            .each(
                attributes.iter().filter(|attr| !attr.is_primary_key),
                |b, attr| match attr.name.as_str() {
                    "updated_at" => b.line("selected.updated_at = new Date();"),
                    "updated_by" => b.line("selected.updated_by = newer.updated_by;"),
                    name if UPDATE_EXCLUDED.contains(&name) => b,
                    name => b.line(&format!(
                        "selected.{name} = newer.{name} {fallback} selected.{name};"
                    )),
                },
            )
            .build_fragment()
    }

    fn remove(&self, attributes: &[AttributeModel]) -> String {
        let has = |name: &str| {
            attributes
                .iter()
                .any(|attr| !attr.is_primary_key && attr.name == name)
        };

        if !has("deleted_at") {
            return CodeBuilder::javascript()
                .line("await selected.destroy();")
                .build_fragment();
        }

        CodeBuilder::javascript()
            .line("selected.deleted_at = new Date();")
            .when(has("deleted_by"), |b| {
                b.line("selected.deleted_by = remover.deleted_by;")
            })
            .blank()
            .line("await selected.save();")
            .build_fragment()
    }
}

fn predicate(name: &str, condition: &str) -> String {
    CodeBuilder::javascript()
        .block_with_close(&format!("if (query.{}) {{", name), "}", |b| {
            b.line(&format!("options.where['{}'] = {{ {} }};", name, condition))
        })
        .build_fragment()
}

fn join_predicates(predicates: impl Iterator<Item = String>) -> String {
    predicates.collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    fn post_attributes() -> Vec<AttributeModel> {
        vec![
            AttributeModel::new("id", SemanticType::Numeric).primary_key(),
            AttributeModel::new("title", SemanticType::String),
            AttributeModel::new("views", SemanticType::Numeric),
            AttributeModel::new("created_at", SemanticType::Date),
            AttributeModel::new("created_by", SemanticType::Numeric),
            AttributeModel::new("updated_at", SemanticType::Date),
            AttributeModel::new("updated_by", SemanticType::Numeric),
            AttributeModel::new("deleted_at", SemanticType::Date),
            AttributeModel::new("deleted_by", SemanticType::Numeric),
        ]
    }

    #[test]
    fn test_select_uses_primary_and_unique() {
        let attributes = vec![
            AttributeModel::new("id", SemanticType::Numeric).primary_key(),
            AttributeModel::new("slug", SemanticType::String).unique(),
            AttributeModel::new("title", SemanticType::String),
        ];
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&attributes);

        assert_eq!(
            clauses.select,
            "if (query.id) {\n  options.where['id'] = { [Op.eq]: query.id };\n}\n\n\
             if (query.slug) {\n  options.where['slug'] = { [Op.eq]: query.slug };\n}"
        );
    }

    #[test]
    fn test_list_predicate_typing() {
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&post_attributes());

        assert!(clauses
            .list
            .contains("options.where['title'] = { [Op.like]: `%${query.title}%` };"));
        assert!(clauses
            .list
            .contains("options.where['views'] = { [Op.eq]: query.views };"));
        assert!(!clauses.list.contains("query.id"));
    }

    #[test]
    fn test_update_excludes_audit_fields() {
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&post_attributes());

        assert_eq!(
            clauses.update,
            "selected.title = newer.title || selected.title;\n\
             selected.views = newer.views || selected.views;\n\
             selected.updated_at = new Date();\n\
             selected.updated_by = newer.updated_by;"
        );
        for name in UPDATE_EXCLUDED {
            assert!(!clauses.update.contains(&format!("newer.{}", name)));
        }
    }

    #[test]
    fn test_update_uses_nullish_fallback_in_v3() {
        let clauses = QueryClauseBuilder::new(PolicyVersion::V3).build(&post_attributes());
        assert!(clauses
            .update
            .contains("selected.title = newer.title ?? selected.title;"));
    }

    #[test]
    fn test_remove_soft_delete() {
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&post_attributes());

        assert_eq!(
            clauses.remove,
            "selected.deleted_at = new Date();\n\
             selected.deleted_by = remover.deleted_by;\n\
             \n\
             await selected.save();"
        );
        assert!(!clauses.remove.contains("destroy"));
    }

    #[test]
    fn test_remove_soft_delete_without_deleted_by() {
        let attributes = vec![
            AttributeModel::new("id", SemanticType::Numeric).primary_key(),
            AttributeModel::new("deleted_at", SemanticType::Date),
        ];
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&attributes);
        assert_eq!(
            clauses.remove,
            "selected.deleted_at = new Date();\n\nawait selected.save();"
        );
    }

    #[test]
    fn test_remove_destroys_without_deleted_at() {
        let attributes = vec![
            AttributeModel::new("id", SemanticType::Numeric).primary_key(),
            AttributeModel::new("title", SemanticType::String),
        ];
        let clauses = QueryClauseBuilder::new(PolicyVersion::V1).build(&attributes);

        assert_eq!(clauses.remove, "await selected.destroy();");
        assert!(!clauses.remove.contains("deleted_at"));
        assert!(!clauses.remove.contains("save"));
    }

    #[test]
    fn test_deterministic() {
        let builder = QueryClauseBuilder::new(PolicyVersion::V2);
        assert_eq!(builder.build(&post_attributes()), builder.build(&post_attributes()));
    }
}
