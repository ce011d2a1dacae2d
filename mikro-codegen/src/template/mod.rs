//! Model templates and placeholder rendering.

mod model;
mod placeholder;
mod renderer;

pub use model::{ModelInputs, ModelSynthesizer};
pub use placeholder::{Fragments, Placeholder};
pub use renderer::{Rendered, TemplateRenderer};

/// A named template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub source: &'static str,
}

impl Template {
    /// The model module shell: schema bindings, `migration()`, operations, exports.
    pub const MODEL: Template = Template::new("model.js", include_str!("js/model.js"));
    pub const ADD: Template = Template::new("add.js", include_str!("js/add.js"));
    pub const SELECT: Template = Template::new("select.js", include_str!("js/select.js"));
    pub const LIST: Template = Template::new("list.js", include_str!("js/list.js"));
    /// Unified read operation of policy v3.
    pub const FIND: Template = Template::new("find.js", include_str!("js/find.js"));
    pub const UPDATE: Template = Template::new("update.js", include_str!("js/update.js"));
    pub const REMOVE: Template = Template::new("remove.js", include_str!("js/remove.js"));

    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }
}
