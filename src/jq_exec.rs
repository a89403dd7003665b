//! `jq` pre-filtering of input documents through `jaq`.

use jaq_core::{Compiler, Ctx, RcIter, compile::Undefined, load};
use jaq_json::Val;
use serde_json::Value;

use crate::error::{Error, Result};

/// Run `filter_src` over `input`. Each output becomes its own document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| Error::Jq(format!("{e:?}")))?;
        // Val's Display is JSON text.
        let text = v.to_string();
        let value = serde_json::from_str(&text)
            .map_err(|e| Error::Jq(format!("filter produced non-JSON output `{text}`: {e}")))?;
        out.push(value);
    }
    Ok(out)
}

/// Apply an optional filter; without one the document passes through as is.
pub fn apply(filter_src: Option<&str>, input: Value) -> Result<Vec<Value>> {
    match filter_src {
        None => Ok(vec![input]),
        Some(filter_src) => run_jaq(filter_src, &input),
    }
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    Error::Jq(s.trim_end().to_string())
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    Error::Jq(s.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_and_splits_documents() {
        let doc = json!({"items": [{"a": "x"}, {"a": "y"}]});
        let out = run_jaq(".items[]", &doc).unwrap();
        assert_eq!(out, vec![json!({"a": "x"}), json!({"a": "y"})]);
    }

    #[test]
    fn missing_filter_passes_through() {
        let doc = json!({"a": true});
        assert_eq!(apply(None, doc.clone()).unwrap(), vec![doc]);
    }

    #[test]
    fn bad_filters_are_reported() {
        let doc = json!({});
        assert!(matches!(run_jaq(".[", &doc), Err(Error::Jq(_))));
        assert!(matches!(run_jaq("no_such_function", &doc), Err(Error::Jq(_))));
    }
}
