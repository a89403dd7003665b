//! Golden-case runner.
//!
//! Each `cases/*.json` file holds one case:
//! `{ "name", "input", "dialect"?, "dereference"?, "url_path"?, "expect": [lines] }`.
//! An optional first argument is a regex over case names.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use shape_schema::render::{Dialect, RenderOptions, render_lines};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Case {
    name: String,
    input: serde_json::Value,
    #[serde(default)]
    dialect: Dialect,
    #[serde(default)]
    dereference: bool,
    #[serde(default)]
    url_path: Option<String>,
    expect: Vec<String>,
}

fn load_case(path: &Path) -> Result<Case> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&source);
    serde_path_to_error::deserialize(de).map_err(|err| {
        anyhow::anyhow!(
            "{}: at JSON path {} → {}",
            path.display(),
            err.path(),
            err.inner()
        )
    })
}

fn case_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

fn run_case(case: &Case) -> Option<String> {
    let schema = shape_schema::derive(&case.input);
    let options = RenderOptions {
        dereference: case.dereference,
        ..RenderOptions::default()
    };
    let actual = render_lines(&schema, case.dialect, options, case.url_path.as_deref());
    if actual == case.expect {
        return None;
    }

    let mut report = String::new();
    let longest = actual.len().max(case.expect.len());
    for i in 0..longest {
        let want = case.expect.get(i).map(String::as_str).unwrap_or("<none>");
        let got = actual.get(i).map(String::as_str).unwrap_or("<none>");
        if want != got {
            report.push_str(&format!("  line {i}:\n    want: {want}\n    got:  {got}\n"));
        }
    }
    Some(report)
}

fn main() -> Result<()> {
    let filter = match std::env::args().nth(1) {
        Some(pattern) => Some(Regex::new(&pattern).context("invalid case filter")?),
        None => None,
    };
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cases");

    let mut passed = 0usize;
    let mut failed = 0usize;
    for path in case_paths(&dir)? {
        let case = load_case(&path)?;
        if filter.as_ref().is_some_and(|re| !re.is_match(&case.name)) {
            continue;
        }
        match run_case(&case) {
            None => {
                passed += 1;
                eprintln!("✅ {}", case.name);
            }
            Some(report) => {
                failed += 1;
                eprintln!("❌ {}\n{report}", case.name);
            }
        }
    }

    eprintln!("{passed} passed, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
