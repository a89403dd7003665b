//! Derive a language-neutral type schema from Rust values and render it in
//! several dialects (a dotted-path dump, a JSON-path flavour, OpenAPI YAML).
//!
//! ```ignore
//! use shape_schema::{derive, render::{Dialect, RenderOptions, render_lines}};
//!
//! let schema = derive(&serde_json::json!({"name": "x", "tags": ["a"]}));
//! for line in render_lines(&schema, Dialect::Simple, RenderOptions::default(), None) {
//!     println!("{line}");
//! }
//! ```
pub mod cli;
pub mod config;
pub mod error;
pub mod generic;
pub mod hello;
pub mod jq_exec;
pub mod reflect;
pub mod reflector;
pub mod render;
pub mod schema;
pub mod tags;

pub use error::{Error, Result};
pub use reflect::Reflect;
pub use reflector::{Reflector, derive};
pub use render::{Dialect, RenderOptions, Renderer};
pub use schema::Schema;
