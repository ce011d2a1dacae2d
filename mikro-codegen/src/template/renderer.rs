//! Placeholder substitution over template text.

use super::{Fragments, Placeholder, Template};
use crate::{Error, Result};

/// Comment syntax stripped from template lines after substitution.
const MARKER_OPEN: &str = "/* ";
const MARKER_CLOSE: &str = " */";

/// Rendered template text and the warnings recorded while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Substitutes [`Fragments`] into a [`Template`].
///
/// A line whose trimmed content is exactly `/* :name */` is a block marker:
/// it is replaced by the fragment, re-indented to the marker's column. An
/// empty fragment removes the line. When the following line is blank and the
/// removed line opened its block (or followed a blank line) that blank line
/// goes too. Elsewhere `:name` tokens are
/// substituted inline. Template lines then lose their `/* ` and ` */`
/// comment syntax; fragment lines are copied untouched.
///
/// The renderer never parses the text it produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer {
    strict: bool,
}

impl TemplateRenderer {
    /// Missing required fragments are warnings.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Missing required fragments are [`Error::TemplateMismatch`].
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn render(&self, template: &Template, fragments: &Fragments) -> Result<Rendered> {
        let lines: Vec<&str> = template.source.lines().collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut warnings = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            i += 1;

            let Some(name) = block_marker(line) else {
                let substituted = self.substitute_inline(template, line, fragments, &mut warnings)?;
                out.push(strip_markers(&substituted));
                continue;
            };

            let text = match Placeholder::from_name(name) {
                Some(placeholder) => self.resolve(template, placeholder, fragments, &mut warnings)?,
                None => {
                    warn_once(
                        &mut warnings,
                        format!(
                            "template '{}' has unknown placeholder ':{}', line dropped",
                            template.name, name
                        ),
                    );
                    ""
                }
            };

            if text.is_empty() {
                let prev_open = out.last().is_none_or(|l| opens_block(l));
                let next_blank = lines.get(i).is_some_and(|l| l.trim().is_empty());
                if prev_open && next_blank {
                    i += 1;
                }
                continue;
            }

            let indent = &line[..line.len() - line.trim_start().len()];
            for fragment_line in text.lines() {
                if fragment_line.trim().is_empty() {
                    out.push(String::new());
                } else {
                    out.push(format!("{}{}", indent, fragment_line));
                }
            }
        }

        let mut text = out.join("\n");
        if template.source.ends_with('\n') {
            text.push('\n');
        }
        Ok(Rendered { text, warnings })
    }

    fn resolve<'f>(
        &self,
        template: &Template,
        placeholder: Placeholder,
        fragments: &'f Fragments,
        warnings: &mut Vec<String>,
    ) -> Result<&'f str> {
        match fragments.get(placeholder) {
            Some(text) => Ok(text),
            None if placeholder.is_optional() => Ok(""),
            None if self.strict => Err(Error::TemplateMismatch {
                template: template.name.to_string(),
                placeholder: placeholder.name().to_string(),
            }),
            None => {
                warn_once(
                    warnings,
                    format!(
                        "template '{}' has no fragment for {}, rendered empty",
                        template.name, placeholder
                    ),
                );
                Ok("")
            }
        }
    }

    fn substitute_inline(
        &self,
        template: &Template,
        line: &str,
        fragments: &Fragments,
        warnings: &mut Vec<String>,
    ) -> Result<String> {
        let mut result = String::with_capacity(line.len());
        let mut rest = line;
        let mut prev: Option<char> = None;

        while let Some(pos) = rest.find(':') {
            let before = &rest[..pos];
            let after = &rest[pos + 1..];
            let preceding = before.chars().next_back().or(prev);
            let name_len = after
                .find(|c: char| !is_name_char(c))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            result.push_str(before);

            let placeholder = Placeholder::from_name(name)
                .filter(|_| !preceding.is_some_and(is_identifier_char));
            match placeholder {
                Some(placeholder) => {
                    result.push_str(self.resolve(template, placeholder, fragments, warnings)?);
                    prev = name.chars().next_back();
                    rest = &after[name_len..];
                }
                None => {
                    result.push(':');
                    prev = Some(':');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// The placeholder name of a block marker line, if the line is one.
fn block_marker(line: &str) -> Option<&str> {
    let name = line
        .trim()
        .strip_prefix("/* :")?
        .strip_suffix(MARKER_CLOSE)?;
    let valid = !name.is_empty() && name.chars().all(is_name_char);
    valid.then_some(name)
}

/// Blank, or ending in `{` or `[`.
fn opens_block(line: &str) -> bool {
    let line = line.trim_end();
    line.is_empty() || line.ends_with('{') || line.ends_with('[')
}

fn strip_markers(line: &str) -> String {
    line.replace(MARKER_OPEN, "").replace(MARKER_CLOSE, "")
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn warn_once(warnings: &mut Vec<String>, message: String) {
    if !warnings.contains(&message) {
        warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(source: &'static str) -> Template {
        Template::new("test.js", source)
    }

    #[test]
    fn test_block_marker_reindents_fragment() {
        let fragments = Fragments::new().with(
            Placeholder::Migrations,
            "a.hasMany(b, {\n  \"as\": \"bs\"\n});",
        );
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("function migration() {\n  /* :migrations */\n}\n"),
                &fragments,
            )
            .unwrap();

        assert_eq!(
            rendered.text,
            "function migration() {\n  a.hasMany(b, {\n    \"as\": \"bs\"\n  });\n}\n"
        );
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn test_fragment_blank_lines_stay_empty() {
        let fragments = Fragments::new().with(Placeholder::QueriesRemove, "a();\n\nb();");
        let rendered = TemplateRenderer::lenient()
            .render(&template("    /* :queries_remove */\n"), &fragments)
            .unwrap();
        assert_eq!(rendered.text, "    a();\n\n    b();\n");
    }

    #[test]
    fn test_empty_fragment_between_blanks_collapses() {
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("const options = {};\n\n/* :queries_select */\n\nreturn options;\n"),
                &Fragments::new(),
            )
            .unwrap();
        assert_eq!(rendered.text, "const options = {};\n\nreturn options;\n");
    }

    #[test]
    fn test_empty_fragment_at_block_start_takes_following_blank() {
        let fragments = Fragments::new().with(Placeholder::Schema, "postSchema");
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("if (single) {\n  /* :queries_select */\n\n  /* return :schema.findOne(options); */\n}\n"),
                &fragments,
            )
            .unwrap();
        assert_eq!(
            rendered.text,
            "if (single) {\n  return postSchema.findOne(options);\n}\n"
        );
    }

    #[test]
    fn test_empty_fragment_after_statement_keeps_blank() {
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("const options = {};\n/* :queries_list */\n\nreturn options;\n"),
                &Fragments::new(),
            )
            .unwrap();
        assert_eq!(rendered.text, "const options = {};\n\nreturn options;\n");
    }

    #[test]
    fn test_find_without_select_queries() {
        let fragments = Fragments::new()
            .with(Placeholder::Schema, "noteSchema")
            .with(Placeholder::PrimaryKey, "'id'");
        let rendered = TemplateRenderer::strict()
            .render(&Template::FIND, &fragments)
            .unwrap();

        assert!(rendered
            .text
            .contains("    if (single) {\n      return noteSchema.findOne(options);\n    }\n"));
    }

    #[test]
    fn test_empty_fragment_removes_only_its_line() {
        let fragments = Fragments::new().with(Placeholder::Includes, "");
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("const options = {\n  /* :includes */\n  where: {},\n};\n"),
                &fragments,
            )
            .unwrap();
        assert_eq!(rendered.text, "const options = {\n  where: {},\n};\n");
    }

    #[test]
    fn test_inline_substitution_and_marker_strip() {
        let fragments = Fragments::new()
            .with(Placeholder::Function, "modelPost")
            .with(Placeholder::Schema, "postSchema")
            .with(Placeholder::SchemaName, "post");
        let rendered = TemplateRenderer::lenient()
            .render(
                &template(
                    "module.exports = function /* :function */() {\n  /* return await :schema.create(data); */\n  // :schema_name\n};\n",
                ),
                &fragments,
            )
            .unwrap();

        assert_eq!(
            rendered.text,
            "module.exports = function modelPost() {\n  return await postSchema.create(data);\n  // post\n};\n"
        );
    }

    #[test]
    fn test_inline_ignores_object_keys_and_unknown_names() {
        let fragments = Fragments::new().with(Placeholder::Schema, "postSchema");
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("where: {}, schema: x, a ? b :other\n"),
                &fragments,
            )
            .unwrap();
        assert_eq!(rendered.text, "where: {}, schema: x, a ? b :other\n");
    }

    #[test]
    fn test_primary_key_inside_commented_code() {
        let fragments = Fragments::new().with(Placeholder::PrimaryKey, "'id'");
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("order: [\n  /* [:primary_key, query.sort || 'ASC'], */\n],\n"),
                &fragments,
            )
            .unwrap();
        assert_eq!(rendered.text, "order: [\n  ['id', query.sort || 'ASC'],\n],\n");
    }

    #[test]
    fn test_fragment_lines_are_not_stripped() {
        let fragments = Fragments::new().with(Placeholder::Operations, "/* keep */ :schema");
        let rendered = TemplateRenderer::lenient()
            .render(&template("/* :operations */"), &fragments)
            .unwrap();
        assert_eq!(rendered.text, "/* keep */ :schema");
    }

    #[test]
    fn test_unknown_block_marker_dropped_with_warning() {
        let rendered = TemplateRenderer::strict()
            .render(&template("a();\n/* :bogus */\nb();\n"), &Fragments::new())
            .unwrap();
        assert_eq!(rendered.text, "a();\nb();\n");
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains(":bogus"));
    }

    #[test]
    fn test_missing_required_fragment_strict() {
        let err = TemplateRenderer::strict()
            .render(&template("/* :schemas */\n"), &Fragments::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateMismatch { ref template, ref placeholder }
                if template == "test.js" && placeholder == "schemas"
        ));
    }

    #[test]
    fn test_missing_required_fragment_lenient() {
        let rendered = TemplateRenderer::lenient()
            .render(
                &template("x = :schema;\ny = :schema;\n"),
                &Fragments::new(),
            )
            .unwrap();
        assert_eq!(rendered.text, "x = ;\ny = ;\n");
        assert_eq!(
            rendered.warnings,
            vec!["template 'test.js' has no fragment for :schema, rendered empty"]
        );
    }

    #[test]
    fn test_missing_optional_fragment_is_silent() {
        let rendered = TemplateRenderer::strict()
            .render(&template("/* :queries_update */\nsave();\n"), &Fragments::new())
            .unwrap();
        assert_eq!(rendered.text, "save();\n");
        assert!(rendered.warnings.is_empty());
    }
}
