//! Dialect rendering.
//!
//! One depth-first walk serves every dialect. A [`Renderer`] supplies the
//! per-node `pre`/`post` lines and path segments; the walk handles child
//! ordering (alphabetical by generic name), reference truncation, and indent
//! save/restore so that indent never leaks across node boundaries.
pub mod json;
pub mod openapi;
pub mod simple;


use serde::{Deserialize, Serialize};

use crate::schema::{ElementId, Schema};

pub use json::JsonRenderer;
pub use openapi::OpenApiRenderer;
pub use simple::SimpleRenderer;

/// Mutable state shared by every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Inline named types at each use site instead of emitting references.
    pub dereference: bool,
    /// Indent unit, repeated `indent` times.
    pub prefix: String,
    pub indent: usize,
}

impl RenderOptions {
    pub fn dereferenced() -> Self {
        Self {
            dereference: true,
            ..Self::default()
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Simple,
    Json,
    #[value(name = "openapi")]
    OpenApi,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Simple => "simple",
            Dialect::Json => "json",
            Dialect::OpenApi => "openapi",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------- Renderer --------------------------------- //

pub trait Renderer {
    fn options(&self) -> &RenderOptions;
    fn options_mut(&mut self) -> &mut RenderOptions;

    fn dereference(&self) -> bool {
        self.options().dereference
    }

    fn indent(&self) -> usize {
        self.options().indent
    }

    fn set_indent(&mut self, value: usize) {
        self.options_mut().indent = value;
    }

    /// Indent prefix for the current depth.
    fn prefix(&self) -> String {
        self.options().prefix.repeat(self.indent())
    }

    /// Lines emitted before a node's children. May adjust the indent.
    fn pre(&mut self, schema: &Schema, id: ElementId) -> Vec<String>;

    /// Lines emitted after a node's children.
    fn post(&mut self, _schema: &Schema, _id: ElementId) -> Vec<String> {
        Vec::new()
    }

    /// Path segments from the tree root down to `id`.
    fn path(&self, schema: &Schema, id: ElementId) -> Vec<String>;

    /// Hidden nodes are skipped together with their subtree.
    fn visible(&self, _schema: &Schema, _id: ElementId) -> bool {
        true
    }

    /// Lines preceding the rendered trees.
    fn header(&self) -> Vec<String> {
        Vec::new()
    }

    /// Header plus both trees.
    fn render(&mut self, schema: &Schema) -> Vec<String> {
        let mut out = self.header();
        out.extend(render_schema(schema, self));
        out
    }
}

/// Render `TypeRefs` (unless dereferencing) and then `Root`.
/// Blank lines are dropped.
pub fn render_schema<R: Renderer + ?Sized>(schema: &Schema, r: &mut R) -> Vec<String> {
    let mut out = Vec::new();

    if !r.dereference() && !schema.children(schema.type_refs()).is_empty() {
        out.extend(render_element(schema, schema.type_refs(), r));
    }
    if !schema.children(schema.root()).is_empty() {
        out.extend(render_element(schema, schema.root(), r));
    }

    out.retain(|line| !line.is_empty());
    out
}

/// Render one node and, unless it is a reference, its children.
pub fn render_element<R: Renderer + ?Sized>(
    schema: &Schema,
    id: ElementId,
    r: &mut R,
) -> Vec<String> {
    if !r.visible(schema, id) {
        return Vec::new();
    }

    let original_indent = r.indent();
    let mut out = Vec::new();
    append_lines(&mut out, r.pre(schema, id));

    let is_reference = !schema[id].native_default().type_ref.is_empty();
    if r.dereference() || !is_reference {
        let child_indent = r.indent();
        for child in schema.sorted_children(id) {
            r.set_indent(child_indent);
            out.extend(render_element(schema, child, r));
        }
    }

    r.set_indent(original_indent);
    append_lines(&mut out, r.post(schema, id));
    r.set_indent(original_indent);

    out
}

fn append_lines(out: &mut Vec<String>, lines: Vec<String>) {
    out.extend(lines.into_iter().filter(|l| !l.is_empty()));
}

/// Quote a path segment that would otherwise be ambiguous in a dotted path.
pub(crate) fn quote_segment(segment: String) -> String {
    if segment.contains('.') {
        format!("{segment:?}")
    } else {
        segment
    }
}

/// Build the renderer for `dialect`. `url_path` selects the URL-bound
/// OpenAPI variant and is ignored by the other dialects.
pub fn renderer_for(
    dialect: Dialect,
    options: RenderOptions,
    url_path: Option<&str>,
) -> Box<dyn Renderer> {
    match dialect {
        Dialect::Simple => Box::new(SimpleRenderer::new(options)),
        Dialect::Json => Box::new(JsonRenderer::new(options)),
        Dialect::OpenApi => match url_path {
            Some(url) => Box::new(OpenApiRenderer::with_url_path(url, options)),
            None => Box::new(OpenApiRenderer::new(options)),
        },
    }
}

/// Render `schema` in `dialect`.
pub fn render_lines(
    schema: &Schema,
    dialect: Dialect,
    options: RenderOptions,
    url_path: Option<&str>,
) -> Vec<String> {
    renderer_for(dialect, options, url_path).render(schema)
}
