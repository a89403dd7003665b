//! CLI: hello | render (JSON documents → schema lines)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{Config, from_str_with_path};
use crate::error::{Error, Result};
use crate::render::{Dialect, render_lines};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// derive a type schema from JSON documents and render it as a path dump, JSON paths, or OpenAPI
#[derive(Parser, Debug)]
#[command(name = "shape-schema", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render the built-in HelloStruct example as an OpenAPI document
    Hello(HelloOut),
    /// derive and render the schema of each input document
    Render(RenderOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct HelloOut {
    /// URL path of the GET operation
    #[arg(long, default_value = crate::hello::DEFAULT_URL_PATH)]
    url_path: String,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output dialect (overrides the config file)
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,

    /// inline named types instead of emitting references
    #[arg(long)]
    dereference: bool,

    /// bind the OpenAPI output to a GET path
    #[arg(long)]
    url_path: Option<String>,

    /// JSON config file with dialect and render settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// print the schema tree as JSON instead of rendering
    #[arg(long)]
    tree: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One input document, named for headers and error messages.
#[derive(Debug, Clone)]
pub struct Document {
    pub origin: String,
    pub value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .map_err(|e| Error::io(&source_path, e))?;

            let values = if self.ndjson {
                source
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| !line.trim().is_empty())
                    .map(|(i, line)| {
                        from_str_with_path::<Value>(&format!("{source_path_str}:{}", i + 1), line)
                    })
                    .collect::<Result<Vec<_>>>()?
            } else {
                vec![from_str_with_path::<Value>(&source_path_str, &source)?]
            };

            for (index, value) in values.into_iter().enumerate() {
                let value = select_pointer(&source_path_str, value, self.json_pointer.as_deref())?;
                let outputs = crate::jq_exec::apply(self.jq_expr.as_deref(), value)?;
                let many = self.ndjson || outputs.len() > 1;
                for (sub, value) in outputs.into_iter().enumerate() {
                    let origin = if many {
                        format!("{source_path_str}#{}", index + sub)
                    } else {
                        source_path_str.clone()
                    };
                    out.push(Document { origin, value });
                }
            }
        }
        debug!(documents = out.len(), "inputs loaded");
        Ok(out)
    }
}

impl RenderOut {
    fn config(&self) -> Result<Config> {
        let base = match self.config.as_deref() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Ok(base.with_overrides(self.dialect, self.dereference, self.url_path.as_deref()))
    }

    /// Every document gets its own engine, so derivation runs in parallel.
    fn process(&self, config: &Config, docs: &[Document]) -> Result<Vec<Vec<String>>> {
        docs.par_iter()
            .map(|doc| -> Result<Vec<String>> {
                let schema = crate::reflector::derive(&doc.value);
                if self.tree {
                    let text = serde_json::to_string_pretty(&schema).map_err(|source| {
                        Error::Tree {
                            origin: doc.origin.clone(),
                            source,
                        }
                    })?;
                    Ok(text.lines().map(str::to_string).collect())
                } else {
                    Ok(render_lines(
                        &schema,
                        config.dialect,
                        config.render.clone(),
                        config.url_path.as_deref(),
                    ))
                }
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Hello(target) => {
                for line in crate::hello::hello_lines(&target.url_path) {
                    println!("{line}");
                }
            }
            Command::Render(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let config = target.config().context("failed to load config")?;
                let docs = target
                    .input_settings
                    .load()
                    .context("failed to load inputs")?;
                info!(
                    documents = docs.len(),
                    dialect = %config.dialect,
                    dereference = config.render.dereference,
                    "rendering"
                );

                let results = target
                    .process(&config, &docs)
                    .context("failed to render documents")?;
                let with_headers = docs.len() > 1;

                if let Some(out) = target.out.as_ref() {
                    let mut text = String::new();
                    for (doc, lines) in docs.iter().zip(&results) {
                        if with_headers {
                            text.push_str(&format!("==> {} <==\n", doc.origin));
                        }
                        for line in lines {
                            text.push_str(line);
                            text.push('\n');
                        }
                    }
                    write_output(out, &text)?;
                } else {
                    for (doc, lines) in docs.iter().zip(&results) {
                        if with_headers {
                            println!("{}", format!("==> {} <==", doc.origin).bold());
                        }
                        for line in lines {
                            println!("{line}");
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Narrow a document to the node at `pointer`. A pointer that matches
/// nothing is an input error, not a nil document.
fn select_pointer(origin: &str, value: Value, pointer: Option<&str>) -> Result<Value> {
    let Some(pointer) = pointer else {
        return Ok(value);
    };
    value.pointer(pointer).cloned().ok_or_else(|| Error::Pointer {
        path: origin.to_string(),
        pointer: pointer.to_string(),
    })
}

fn write_output(out: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                match entry {
                    Ok(p) => {
                        matched_any = true;
                        out.push(p);
                    }
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        return Err(Error::io(path, std::io::Error::from(e)));
                    }
                }
            }
            if !matched_any {
                return Err(Error::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(matches!(err, Error::NoMatches(_)));
        assert!(matches!(
            resolve_file_path_patterns(["[".to_string()]),
            Err(Error::Pattern(_))
        ));
    }

    #[test]
    fn render_flags_parse() {
        let cli = CommandLineInterface::try_parse_from([
            "shape-schema",
            "render",
            "--input",
            "a.json",
            "--dialect",
            "openapi",
            "--dereference",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd else {
            panic!("expected render");
        };
        let config = target.config().unwrap();
        assert_eq!(config.dialect, Dialect::OpenApi);
        assert!(config.render.dereference);
    }

    #[test]
    fn documents_render_independently() {
        let cli = CommandLineInterface::try_parse_from([
            "shape-schema", "render", "--input", "x.json",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd else {
            panic!("expected render");
        };
        let docs = vec![
            Document {
                origin: "a".into(),
                value: serde_json::json!({"a": 1}),
            },
            Document {
                origin: "b".into(),
                value: serde_json::json!({"b": "x"}),
            },
        ];
        let results = target.process(&Config::default(), &docs).unwrap();
        assert_eq!(results[0], vec!["Root.{}", "Root.{}.A:float"]);
        assert_eq!(results[1], vec!["Root.{}", "Root.{}.B:string"]);
    }

    #[test]
    fn tree_output_is_the_json_dump() {
        let cli = CommandLineInterface::try_parse_from([
            "shape-schema", "render", "--input", "x.json", "--tree",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd else {
            panic!("expected render");
        };
        let docs = vec![Document {
            origin: "a".into(),
            value: serde_json::json!({"a": 1}),
        }];
        let results = target.process(&Config::default(), &docs).unwrap();
        let dump: Value = serde_json::from_str(&results[0].join("\n")).unwrap();
        assert_eq!(dump["Root"]["name"], "Root");
        assert_eq!(dump["TypeRefs"]["name"], "TypeRefs");
    }

    #[test]
    fn json_pointer_selects_a_subnode() {
        let doc = serde_json::json!({"data": {"items": [{"id": 1}]}});
        let picked = select_pointer("doc.json", doc.clone(), Some("/data/items/0")).unwrap();
        assert_eq!(picked, serde_json::json!({"id": 1}));
        assert_eq!(select_pointer("doc.json", doc.clone(), None).unwrap(), doc);
    }

    #[test]
    fn missing_json_pointer_is_an_input_error() {
        let dir = std::env::temp_dir().join(format!("shape-schema-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("doc.json");
        std::fs::write(&file, r#"{"a": 1}"#).unwrap();

        let cli = CommandLineInterface::try_parse_from([
            "shape-schema",
            "render",
            "--input",
            file.to_str().unwrap(),
            "--json-pointer",
            "/nope",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd else {
            panic!("expected render");
        };
        let err = target.input_settings.load().unwrap_err();
        let Error::Pointer { path, pointer } = err else {
            panic!("expected a pointer error, got {err}");
        };
        assert_eq!(pointer, "/nope");
        assert!(path.ends_with("doc.json"));

        assert!(cli_run_fails(&file));
        std::fs::remove_dir_all(&dir).ok();
    }

    fn cli_run_fails(file: &Path) -> bool {
        let cli = CommandLineInterface::try_parse_from([
            "shape-schema",
            "render",
            "--input",
            file.to_str().unwrap(),
            "--json-pointer",
            "/nope",
        ])
        .unwrap();
        cli.run().is_err()
    }
}
