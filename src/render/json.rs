//! JSON dialect: the simple path grammar seen through each node's `json`
//! overrides. Excluded members disappear with their subtree.

use super::{RenderOptions, Renderer, quote_segment};
use crate::generic::{TypeCategory, path_token_of};
use crate::schema::{ElementId, JSON_DIALECT, ROOT_NAME, Schema, TYPE_REFS_NAME};

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JsonRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    fn visible(&self, schema: &Schema, id: ElementId) -> bool {
        let element = &schema[id];
        element.is_root() || !element.dialect_view(JSON_DIALECT).include.is_excluded()
    }

    fn pre(&mut self, schema: &Schema, id: ElementId) -> Vec<String> {
        let element = &schema[id];
        if element.is_root() {
            return Vec::new();
        }

        let mut line = self
            .path(schema, id)
            .into_iter()
            .map(quote_segment)
            .collect::<Vec<_>>()
            .join(".");
        if let Some(error) = element.error {
            line.push_str(" ERROR:");
            line.push_str(&error.to_string());
        }
        vec![line]
    }

    fn path(&self, schema: &Schema, id: ElementId) -> Vec<String> {
        let element = &schema[id];
        if element.is_root() {
            let token = match element.name.as_str() {
                ROOT_NAME => "$",
                TYPE_REFS_NAME => "definitions",
                other => other,
            };
            return vec![token.to_string()];
        }

        let view = element.dialect_view(JSON_DIALECT);
        let mut segment = String::new();
        if !view.name.is_empty() {
            segment.push_str(&view.name);
            segment.push(':');
        }
        if element.category() == TypeCategory::Invalid {
            segment.push_str(&element.type_label());
        } else {
            segment.push_str(path_token_of(&view.type_));
        }

        if !view.type_ref.is_empty() && (!self.dereference() || element.is_cyclical()) {
            segment.push(':');
            segment.push_str(&view.type_ref);
        }

        if element.error.is_some() {
            segment = format!("!{segment}!");
        }

        let mut path = match element.parent() {
            Some(parent) => self.path(schema, parent),
            None => Vec::new(),
        };
        path.push(segment);
        path
    }
}
