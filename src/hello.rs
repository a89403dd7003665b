//! The single-shot example: one small struct rendered as an OpenAPI document
//! bound to a `GET` path.

use crate::reflector::derive;
use crate::render::{Dialect, RenderOptions, render_lines};

pub const DEFAULT_URL_PATH: &str = "/hello/world";

#[derive(Debug, Clone, Default)]
pub struct HelloStruct {
    pub hello: String,
    pub world: f64,
}
crate::reflect_struct!(HelloStruct { pub hello as "Hello", pub world as "World" });

pub fn hello_lines(url_path: &str) -> Vec<String> {
    let schema = derive(&HelloStruct::default());
    render_lines(&schema, Dialect::OpenApi, RenderOptions::default(), Some(url_path))
}
