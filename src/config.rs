//! Render configuration file.
//!
//! ```json
//! { "dialect": "openapi", "url_path": "/hello/world", "render": { "dereference": true } }
//! ```
//!
//! Every field is optional. Command line flags take precedence.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{Dialect, RenderOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dialect: Dialect,
    pub url_path: Option<String>,
    pub render: RenderOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&source).map_err(|error| match error {
            Error::Json { path: at, message, .. } => Error::Config {
                path: path.to_path_buf(),
                message: format!("at {at}: {message}"),
            },
            other => other,
        })
    }

    pub fn from_json(source: &str) -> Result<Self> {
        from_str_with_path("config", source)
    }

    /// Apply command line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        dialect: Option<Dialect>,
        dereference: bool,
        url_path: Option<&str>,
    ) -> Self {
        if let Some(dialect) = dialect {
            self.dialect = dialect;
        }
        if dereference {
            self.render.dereference = true;
        }
        if let Some(url_path) = url_path {
            self.url_path = Some(url_path.to_string());
        }
        self
    }
}

/// Deserialize with JSON-path context in error messages. `origin` names the
/// document in the error (a file path, or `config`).
pub fn from_str_with_path<T: DeserializeOwned>(origin: &str, src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Json {
        origin: origin.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.dialect, Dialect::Simple);
        assert!(!config.render.dereference);
    }

    #[test]
    fn nested_values_are_read() {
        let config = Config::from_json(
            r#"{"dialect": "openapi", "url_path": "/hello/world", "render": {"dereference": true}}"#,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::OpenApi);
        assert_eq!(config.url_path.as_deref(), Some("/hello/world"));
        assert!(config.render.dereference);
    }

    #[test]
    fn errors_name_the_offending_path() {
        let err = Config::from_json(r#"{"render": {"dereference": "yes"}}"#).unwrap_err();
        let Error::Json { path, .. } = err else {
            panic!("expected a json error");
        };
        assert_eq!(path, "render.dereference");

        assert!(Config::from_json(r#"{"colour": true}"#).is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let config = Config::from_json(r#"{"dialect": "json"}"#)
            .unwrap()
            .with_overrides(Some(Dialect::OpenApi), true, Some("/x"));
        assert_eq!(config.dialect, Dialect::OpenApi);
        assert!(config.render.dereference);
        assert_eq!(config.url_path.as_deref(), Some("/x"));

        let kept = Config::from_json(r#"{"dialect": "json"}"#)
            .unwrap()
            .with_overrides(None, false, None);
        assert_eq!(kept.dialect, Dialect::Json);
    }
}
