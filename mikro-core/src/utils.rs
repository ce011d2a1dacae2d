//! Identifier helpers shared by the generators.

/// Convert a snake_case or kebab-case name to camelCase.
///
/// The whole name is lower-cased first, then every run of `-`/`_` is folded
/// into an upper-cased following character ("model_blog_post" -> "modelBlogPost").
/// A trailing run keeps its last separator.
pub fn to_camel_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut result = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();

    while let Some(c) = chars.next() {
        if !is_separator(c) {
            result.push(c);
            continue;
        }

        let mut last = c;
        while let Some(&next) = chars.peek() {
            if !is_separator(next) {
                break;
            }
            last = next;
            chars.next();
        }

        match chars.next() {
            Some(next) => result.extend(next.to_uppercase()),
            None => result.push(last),
        }
    }

    result
}

/// Convert a snake_case name to the kebab-case used for module file names.
pub fn to_kebab_case(s: &str) -> String {
    s.replace('_', "-")
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}
