//! Canonical form of YAML documents.
//!
//! The check itself only needs a [`Canonicalizer`]; [`YamlCanonicalizer`] is
//! the implementation the binary uses. It loads every document of a stream
//! into a generic value tree, rebuilds every mapping with its keys in
//! lexicographic order, and emits the tree back as YAML.
//!
//! Idempotence: the emitted text is parsed again and must yield the same
//! value tree, otherwise canonicalization fails. Emitting is deterministic, so
//! `canonicalize(canonicalize(x)) == canonicalize(x)` whenever it succeeds.

use serde_json::Value;

/// Produces the canonical text of a document.
///
/// Implementations must be pure and deterministic, must not modify their
/// input, and must be idempotent. An `Err` is reported as a failure for the
/// file being checked and never affects other files.
pub trait Canonicalizer: Sync {
    /// Return the canonical form of `content`.
    ///
    /// # Errors
    ///
    /// Returns a message if `content` cannot be canonicalized.
    fn canonicalize(&self, content: &str) -> Result<String, String>;
}

impl<F> Canonicalizer for F
where
    F: Fn(&str) -> Result<String, String> + Sync,
{
    fn canonicalize(&self, content: &str) -> Result<String, String> {
        self(content)
    }
}

/// Sorted-key YAML canonicalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCanonicalizer;

impl Canonicalizer for YamlCanonicalizer {
    fn canonicalize(&self, content: &str) -> Result<String, String> {
        let documents: Vec<Value> = parse_stream(content)?
            .into_iter()
            .map(sort_keys)
            .collect();
        let text = emit_stream(&documents)?;
        ensure_round_trip(&documents, &text)?;
        Ok(text)
    }
}

/// Rebuild every mapping, at every depth, with its keys in sorted order.
///
/// Insertion order decides iteration order when `serde_json` keeps insertion
/// order, so the map is rebuilt rather than trusted to sort itself.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Fail if `text` does not parse back to exactly `documents`.
fn ensure_round_trip(documents: &[Value], text: &str) -> Result<(), String> {
    let reparsed =
        parse_stream(text).map_err(|e| format!("canonical form does not parse back: {e}"))?;
    if reparsed.as_slice() == documents {
        Ok(())
    } else {
        Err("content cannot be written in canonical form without changing its values".to_owned())
    }
}

/// Parse a YAML stream into one value per document.
///
/// # Errors
///
/// Returns the parser message if any document is malformed.
pub fn parse_stream(content: &str) -> Result<Vec<Value>, String> {
    serde_saphyr::from_multiple::<Value>(content).map_err(|e| e.to_string())
}

fn emit_stream(documents: &[Value]) -> Result<String, String> {
    let multi = documents.len() > 1;
    let mut out = String::new();

    for doc in documents {
        let body = serde_saphyr::to_string(doc).map_err(|e| e.to_string())?;
        // The emitter may or may not write its own start marker; ours is the
        // only one that ends up in the output.
        let body = body.strip_prefix("---\n").unwrap_or(&body);
        let body = body.trim_end_matches('\n');

        if multi {
            out.push_str("---\n");
        }
        out.push_str(body);
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(s: &str) -> String {
        YamlCanonicalizer.canonicalize(s).unwrap()
    }

    #[test]
    fn test_keys_are_sorted_at_every_depth() {
        let out = canon("b: 1\na:\n  z: true\n  c: false\n");
        let a = out.find("a:").unwrap();
        let b = out.find("b:").unwrap();
        let c = out.find("c:").unwrap();
        let z = out.find("z:").unwrap();
        assert!(a < b, "got:\n{out}");
        assert!(c < z, "got:\n{out}");
    }

    #[test]
    fn test_sort_keys_rebuilds_maps_in_order() {
        let mut inner = serde_json::Map::new();
        inner.insert("z".to_owned(), Value::Bool(true));
        inner.insert("c".to_owned(), Value::Bool(false));
        let mut outer = serde_json::Map::new();
        outer.insert("b".to_owned(), Value::from(1));
        outer.insert("a".to_owned(), Value::Array(vec![Value::Object(inner)]));

        let sorted = sort_keys(Value::Object(outer));
        let keys: Vec<_> = sorted.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        let nested: Vec<_> = sorted["a"][0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(nested, vec!["c", "z"]);
    }

    #[test]
    fn test_round_trip_mismatch_is_rejected() {
        let docs = vec![serde_json::json!({ "a": "trail " })];
        let err = ensure_round_trip(&docs, "a: trail \n").unwrap_err();
        assert!(err.contains("without changing"), "got: {err}");
        assert!(ensure_round_trip(&docs, "a: \"trail \"\n").is_ok());
    }

    #[test]
    fn test_whitespace_edged_strings_are_stable_or_rejected() {
        for raw in ["a: \"trail \"\n", "a: \" lead\"\n", "a: \"\"\n"] {
            match YamlCanonicalizer.canonicalize(raw) {
                Ok(once) => {
                    assert_eq!(parse_stream(&once).unwrap(), parse_stream(raw).unwrap());
                    assert_eq!(canon(&once), once, "not idempotent for:\n{raw}");
                }
                Err(e) => assert!(!e.is_empty()),
            }
        }
    }

    #[test]
    fn test_idempotent_single_document() {
        let inputs = [
            "zeta: 1\nalpha:\n  - one\n  - two\n",
            "list:\n- b\n- a\nname: \"quoted\"\n",
            "nested:\n  deeper:\n    k2: v\n    k1: v\n",
        ];
        for input in inputs {
            let once = canon(input);
            let twice = canon(&once);
            assert_eq!(once, twice, "not idempotent for input:\n{input}");
        }
    }

    #[test]
    fn test_idempotent_multi_document() {
        let input = "b: 2\na: 1\n---\n- x\n- y\n";
        let once = canon(input);
        assert_eq!(once.matches("---\n").count(), 2, "got:\n{once}");
        assert_eq!(canon(&once), once);
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert_eq!(canon(""), "");
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        let out = canon("a: 1\n\n\n");
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = YamlCanonicalizer.canonicalize("key: [unclosed\n").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_closure_canonicalizer() {
        let upper = |s: &str| -> Result<String, String> { Ok(s.to_uppercase()) };
        assert_eq!(upper.canonicalize("abc").unwrap(), "ABC");
    }
}
