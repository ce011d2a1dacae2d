//! Schema structure modules (`schemas/<name>.js`).

use mikrogen_manifest::{AttributeDecl, SchemaDecl};

use crate::{
    builder::CodeBuilder,
    json::{pretty, to_json},
};

/// Render a schema declaration as a structure module: a function of the
/// storage library returning `{ attributes, options }`.
pub fn render_schema_module(decl: &SchemaDecl) -> String {
    CodeBuilder::javascript()
        .line("module.exports = function (sequelize) {")
        .indent()
        .line("return {")
        .indent()
        .block_with_close("attributes: {", "},", |b| {
            b.each(&decl.attributes, |b, (name, attr)| {
                b.block_with_close(&format!("{}: {{", js_key(name)), "},", |b| {
                    attribute_body(b, attr)
                })
            })
        })
        .block_with_close("options: {", "},", |b| {
            b.each(&decl.options, |b, (key, value)| {
                push_entry(b, key, &pretty(&to_json(value)))
            })
        })
        .dedent()
        .line("};")
        .dedent()
        .line("};")
        .build()
}

fn attribute_body(b: CodeBuilder, attr: &AttributeDecl) -> CodeBuilder {
    b.line(&format!("type: {},", data_type(&attr.ty)))
        .when(attr.primary_key, |b| b.line("primaryKey: true,"))
        .when(attr.unique, |b| b.line("unique: true,"))
        .each(attr.allow_null, |b, allow_null| {
            b.line(&format!("allowNull: {},", allow_null))
        })
        .each(&attr.extra, |b, (key, value)| {
            push_entry(b, key, &pretty(&to_json(value)))
        })
}

/// `key: value,` where a multi-line value keeps its own relative indentation.
fn push_entry(mut b: CodeBuilder, key: &str, value: &str) -> CodeBuilder {
    let entry = format!("{}: {},", js_key(key), value);
    for line in entry.lines() {
        b.push_line(line);
    }
    b
}

/// The storage type as a `sequelize.DataTypes` member.
fn data_type(declared: &str) -> String {
    let declared = declared.trim();
    let bare = strip_prefix_ignore_case(declared, "sequelize.DataTypes.")
        .or_else(|| strip_prefix_ignore_case(declared, "DataTypes."))
        .unwrap_or(declared);
    format!("sequelize.DataTypes.{}", bare)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Bare identifiers stay bare; anything else is quoted.
fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if bare {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\'', "\\'"))
    }
}
