//! OpenAPI dialect: YAML-shaped blocks, two spaces per nesting level.
//!
//! The plain variant emits `definitions:` and `root:` sections. The URL-bound
//! variant emits a 3.0 document with `components/schemas` and a single `GET`
//! path whose response schema is the root.

use super::{RenderOptions, Renderer};
use crate::generic::GenericType;
use crate::schema::{ElementId, JSON_DIALECT, ROOT_NAME, Schema, TYPE_REFS_NAME};

const INDENT_UNIT: &str = "  ";

#[derive(Debug, Clone, Default)]
pub struct OpenApiRenderer {
    url_path: Option<String>,
    options: RenderOptions,
}

impl OpenApiRenderer {
    pub fn new(mut options: RenderOptions) -> Self {
        options.prefix = INDENT_UNIT.to_string();
        Self {
            url_path: None,
            options,
        }
    }

    pub fn with_url_path(url_path: impl Into<String>, options: RenderOptions) -> Self {
        Self {
            url_path: Some(url_path.into()),
            ..Self::new(options)
        }
    }

    pub fn url_path(&self) -> Option<&str> {
        self.url_path.as_deref()
    }

    fn ref_base(&self) -> &'static str {
        match self.url_path {
            Some(_) => "#/components/schemas/",
            None => "#/definitions/",
        }
    }

    fn push_indented(&self, out: &mut Vec<String>, line: &str) {
        out.push(format!("{}{line}", self.prefix()));
    }

    fn step(&mut self) {
        self.set_indent(self.indent() + 1);
    }

    fn top_level(&mut self, name: &str) -> Vec<String> {
        match (name, self.url_path.clone()) {
            (ROOT_NAME, Some(url)) => {
                self.step();
                let mut out = vec!["paths:".to_string()];
                self.push_indented(&mut out, &format!("{url}:"));
                self.step();
                self.push_indented(&mut out, "get:");
                self.step();
                self.push_indented(&mut out, "summary: Return data.");
                self.push_indented(&mut out, "responses:");
                self.step();
                self.push_indented(&mut out, "'200':");
                self.step();
                self.push_indented(&mut out, "description: Success");
                self.push_indented(&mut out, "content:");
                self.step();
                self.push_indented(&mut out, "application/json:");
                self.step();
                self.push_indented(&mut out, "schema:");
                self.step();
                out
            }
            (TYPE_REFS_NAME, Some(_)) => {
                self.set_indent(self.indent() + 2);
                vec!["components:".to_string(), format!("{INDENT_UNIT}schemas:")]
            }
            (ROOT_NAME, None) => {
                self.step();
                vec!["root:".to_string()]
            }
            (TYPE_REFS_NAME, None) => {
                self.step();
                vec!["definitions:".to_string()]
            }
            (other, _) => {
                self.step();
                vec![format!("{other}:")]
            }
        }
    }
}

impl Renderer for OpenApiRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    fn header(&self) -> Vec<String> {
        match self.url_path {
            Some(_) => vec!["openapi: 3.0.0".to_string()],
            None => Vec::new(),
        }
    }

    fn visible(&self, schema: &Schema, id: ElementId) -> bool {
        let element = &schema[id];
        element.is_root() || !element.dialect_view(JSON_DIALECT).include.is_excluded()
    }

    fn pre(&mut self, schema: &Schema, id: ElementId) -> Vec<String> {
        let element = &schema[id];
        if element.is_root() {
            return self.top_level(&element.name);
        }

        let view = element.dialect_view(JSON_DIALECT);
        let mut out = Vec::new();

        if !view.name.is_empty() {
            self.push_indented(&mut out, &format!("{}:", view.name));
            self.step();
        }

        let reference = if !self.dereference() || element.is_cyclical() {
            view.type_ref.as_str()
        } else {
            ""
        };

        if !reference.is_empty() {
            self.push_indented(&mut out, &format!("$ref: '{}{reference}'", self.ref_base()));
        } else {
            let native_type = element.native_default().type_.as_str();
            match element.generic {
                GenericType::Struct => {
                    self.push_indented(&mut out, "type: object");
                    self.push_indented(&mut out, "properties:");
                    self.step();
                }
                GenericType::List => {
                    self.push_indented(&mut out, "type: array");
                    self.push_indented(&mut out, "items:");
                    self.step();
                }
                GenericType::Boolean => self.push_indented(&mut out, "type: boolean"),
                GenericType::Integer => {
                    self.push_indented(&mut out, "type: integer");
                    if matches!(native_type, "i64" | "u64") {
                        self.push_indented(&mut out, "format: int64");
                    }
                }
                GenericType::Float => {
                    self.push_indented(&mut out, "type: number");
                    if native_type == "f64" {
                        self.push_indented(&mut out, "format: double");
                    }
                }
                GenericType::String => self.push_indented(&mut out, "type: string"),
                GenericType::DateTime => {
                    self.push_indented(&mut out, "type: string");
                    self.push_indented(&mut out, "format: date-time");
                }
                _ => self.push_indented(&mut out, &format!("type: {}", element.type_label())),
            }
        }

        if let Some(error) = element.error {
            self.push_indented(&mut out, &format!("error: {error}"));
        }

        out
    }

    fn path(&self, _schema: &Schema, _id: ElementId) -> Vec<String> {
        Vec::new()
    }
}
