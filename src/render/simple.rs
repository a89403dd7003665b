//! Flat dotted-path dump, one line per node.
//!
//! Segment grammar: `[name:]type[:type_ref]`, wrapped in `!…!` when the node
//! errored and quoted when it contains a `.`.

use super::{RenderOptions, Renderer, quote_segment};
use crate::schema::{ElementId, Schema};

#[derive(Debug, Clone, Default)]
pub struct SimpleRenderer {
    options: RenderOptions,
}

impl SimpleRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for SimpleRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    fn pre(&mut self, schema: &Schema, id: ElementId) -> Vec<String> {
        let element = &schema[id];
        if element.is_root() {
            return Vec::new();
        }

        let mut line = self.path(schema, id).join(".");
        if let Some(error) = element.error {
            line.push_str(" ERROR:");
            line.push_str(&error.to_string());
        }
        vec![line]
    }

    fn path(&self, schema: &Schema, id: ElementId) -> Vec<String> {
        let element = &schema[id];
        let Some(parent) = element.parent() else {
            return vec![element.name.clone()];
        };

        let mut segment = String::new();
        if !element.name.is_empty() {
            segment.push_str(&element.name);
            segment.push(':');
        }
        segment.push_str(&element.path_type());

        let type_ref = &element.native_default().type_ref;
        if !type_ref.is_empty() && (!self.dereference() || element.is_cyclical()) {
            segment.push(':');
            segment.push_str(type_ref);
        }

        if element.error.is_some() {
            segment = format!("!{segment}!");
        }

        let mut path = self.path(schema, parent);
        path.push(quote_segment(segment));
        path
    }
}
