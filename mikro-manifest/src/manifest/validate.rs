//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Encapsulates the source content, filename, and current path through the
/// manifest (e.g. `post` while validating `[cruds.post]`), so nested
/// validation can produce labelled diagnostics.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "mikro.toml");
/// ctx.validate_name("post", "schema")?;
///
/// let nested = ctx.push("post");
/// nested.validate_name("created_at", "attribute")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages, e.g. "attribute in 'post'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a table-key name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Find the span of a quoted string value, searching from the current
    /// policy's table header when there is one.
    pub fn find_value_span(&self, value: &str) -> Option<SourceSpan> {
        match self.path.first() {
            Some(policy) => self.find_value_span_in(&format!("[cruds.{}]", policy), value),
            None => find_quoted_span(self.source.src(), value),
        }
    }

    /// Find the span of a quoted string value, searching from the given
    /// table header (or the whole source when the header is absent).
    pub fn find_value_span_in(&self, header: &str, value: &str) -> Option<SourceSpan> {
        let src = self.source.src();
        let from = src.find(header).unwrap_or(0);
        find_quoted_span(&src[from..], value)
            .map(|span| SourceSpan::from((span.offset() + from, span.len())))
    }

    /// Find the span of a `key =` assignment, searching from the current
    /// policy's table header when there is one.
    pub fn find_key_span(&self, key: &str) -> Option<SourceSpan> {
        let src = self.source.src();
        let from = self
            .path
            .first()
            .and_then(|policy| src.find(&format!("[cruds.{}]", policy)))
            .unwrap_or(0);
        src[from..]
            .find(&format!("\n{} =", key))
            .map(|pos| SourceSpan::from((from + pos + 1, key.len())))
    }

    /// Validate that a name is a valid identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate that an attribute name can be emitted as a JavaScript
    /// property name and binding.
    pub fn validate_attribute(&self, name: &str) -> Result<()> {
        if let Some(reason) = validate_property(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for("attribute"),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }
}

/// Find the span of a name in the TOML source.
/// Searches for table header patterns like `.name]` and `.name.`, then `name = "..."`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let header_patterns = [format!(".{}]", name), format!(".{}.", name)];

    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // `name = "blog"` in the [module] table
    for quote in ['"', '\''] {
        let pattern = format!("name = {}{}{}", quote, name, quote);
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 8, name.len())));
        }
    }

    // No fallback: no span is better than a wrong one
    None
}

/// Find the span of a quoted value (without its quotes).
pub(crate) fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{}{}{}", quote, value, quote);
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Validate that a name can be composed into generated identifiers.
/// Returns None if valid, Some(reason) if invalid.
///
/// Dashes are allowed (e.g. "blog-post"); they are folded into camelCase
/// variable names and kept in module file names.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    let mut prev_was_dash = false;

    for c in chars {
        if c == '-' {
            if prev_was_dash {
                return Some("name cannot contain consecutive dashes");
            }
            prev_was_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            prev_was_dash = false;
        } else {
            return Some("name must contain only letters, numbers, underscores, and dashes");
        }
    }

    if prev_was_dash {
        return Some("name cannot end with a dash");
    }

    None
}

/// Validate that an attribute name is a plain JavaScript identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_property(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("attribute names must start with a letter, underscore or `$`"),
        None => return Some("name cannot be empty"),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        None
    } else {
        Some("attribute names become JavaScript identifiers and may contain only letters, numbers, underscores and `$`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("post").is_none());
        assert!(validate_identifier("blog_post").is_none());
        assert!(validate_identifier("blog-post").is_none());
        assert!(validate_identifier("_internal").is_none());
        assert!(validate_identifier("created_at").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("-post").is_some());
        assert!(validate_identifier("post-").is_some());
        assert!(validate_identifier("blog--post").is_some());
        assert!(validate_identifier("blog post").is_some());
        assert!(validate_identifier("post.title").is_some());
    }

    #[test]
    fn test_attribute_names() {
        assert!(validate_property("created_at").is_none());
        assert!(validate_property("$raw").is_none());
        assert!(validate_property("postId").is_none());
        assert!(validate_property("created-at").is_some());
        assert!(validate_property("2fa").is_some());
        assert!(validate_property("").is_some());
    }

    #[test]
    fn test_find_name_span() {
        let src = "[schemas.post]\nconnection = \"default\"";
        let span = find_name_span(src, "post").unwrap();
        assert_eq!(span.offset(), 9);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_find_name_span_nested() {
        let src = "[schemas.post.attributes.title]\ntype = \"STRING\"";
        let span = find_name_span(src, "title").unwrap();
        assert_eq!(span.offset(), 25);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_name_span_module_name() {
        let src = "[module]\nname = \"blog\"";
        let span = find_name_span(src, "blog").unwrap();
        assert_eq!(span.offset(), 17);
    }

    #[test]
    fn test_find_value_span_scoped_to_policy() {
        let src = "[cruds.comment]\nschema = [\"tag\"]\n\n[cruds.post]\nschema = [\"tag\"]\n";
        let ctx = ParseContext::new(src, "mikro.toml");

        let span = ctx.push("post").find_value_span("tag").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "tag");
        assert!(span.offset() > src.find("[cruds.post]").unwrap());
    }

    #[test]
    fn test_find_key_span() {
        let src = "[cruds.post]\ninclude = \"[]\"\n";
        let ctx = ParseContext::new(src, "mikro.toml");
        let span = ctx.push("post").find_key_span("include").unwrap();
        assert_eq!(span.offset(), 13);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "mikro.toml");
        let nested = ctx.push("post").push("title");
        assert_eq!(nested.path_string(), "post.title");
        assert_eq!(ctx.context_for("schema"), "schema");
        assert_eq!(ctx.push("post").context_for("attribute"), "attribute in 'post'");
        assert_eq!(ctx.filename(), "mikro.toml");
    }
}
