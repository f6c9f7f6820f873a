use std::collections::HashMap;

use thiserror::Error;

use crate::label::Args;

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;
const MAX_NESTING: usize = 8;
const MAX_EXPANDED_BYTES: usize = 64 * 1024;

fn is_valid_segment(segment: &str) -> bool {
    let mut it = segment.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("catalog entry `{key}`: {msg}")]
    Entry { key: String, msg: String },
}

fn entry_error(key: &str, msg: impl Into<String>) -> CatalogParseError {
    CatalogParseError::Entry {
        key: key.to_string(),
        msg: msg.into(),
    }
}

/// One locale's strings, flattened to dotted keys (`auth.login`).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Parse a nested YAML mapping of namespaces to templates.
    ///
    /// ```yaml
    /// auth:
    ///   login: "Login"
    /// ```
    ///
    /// becomes the single entry `auth.login`.
    pub fn parse_yaml(src: &str) -> Result<Self, CatalogParseError> {
        let root = serde_yaml::from_str::<serde_yaml::Value>(src)
            .map_err(|e| CatalogParseError::Yaml(format!("yaml parse error: {e}")))?;

        let mut cat = Self::new();
        match root {
            serde_yaml::Value::Mapping(map) => cat.flatten_into("", map, 0)?,
            // An empty document is an empty catalog.
            serde_yaml::Value::Null => {}
            _ => {
                return Err(CatalogParseError::Yaml(
                    "catalog root must be a mapping".to_string(),
                ))
            }
        }
        Ok(cat)
    }

    fn flatten_into(
        &mut self,
        prefix: &str,
        map: serde_yaml::Mapping,
        depth: usize,
    ) -> Result<(), CatalogParseError> {
        if depth >= MAX_NESTING {
            return Err(entry_error(
                prefix,
                format!("nested too deeply (max {MAX_NESTING} levels)"),
            ));
        }

        for (k, v) in map {
            let Some(segment) = k.as_str() else {
                return Err(entry_error(prefix, "yaml keys must be strings"));
            };
            if !is_valid_segment(segment) {
                return Err(entry_error(
                    segment,
                    "invalid key segment (allowed: [A-Za-z0-9][A-Za-z0-9_-]*)",
                ));
            }
            let key = if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{prefix}.{segment}")
            };
            if key.len() > MAX_KEY_BYTES {
                return Err(entry_error(
                    &key,
                    format!("key is too long (max {MAX_KEY_BYTES} bytes)"),
                ));
            }

            match v {
                serde_yaml::Value::Mapping(inner) => self.flatten_into(&key, inner, depth + 1)?,
                serde_yaml::Value::String(val) => {
                    if val.len() > MAX_VALUE_BYTES {
                        return Err(entry_error(
                            &key,
                            format!("value is too long (max {MAX_VALUE_BYTES} bytes)"),
                        ));
                    }
                    if self.entries.len() >= MAX_CATALOG_ENTRIES {
                        return Err(CatalogParseError::Yaml(format!(
                            "too many entries (max {MAX_CATALOG_ENTRIES})"
                        )));
                    }
                    if self.entries.insert(key.clone(), val).is_some() {
                        return Err(entry_error(&key, "duplicate key"));
                    }
                }
                _ => return Err(entry_error(&key, "value must be a string or a mapping")),
            }
        }
        Ok(())
    }

    /// Look up `key` and substitute `args` into it.
    pub fn format(&self, key: &str, args: &Args) -> Option<String> {
        self.get(key).map(|tmpl| interpolate(tmpl, args))
    }
}

fn take_prefix_by_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Append `s`, truncating at the expansion limit. Returns true once full.
fn push_str_limited(out: &mut String, s: &str) -> bool {
    if out.len() >= MAX_EXPANDED_BYTES {
        return true;
    }
    let remaining = MAX_EXPANDED_BYTES - out.len();
    out.push_str(take_prefix_by_bytes(s, remaining));
    out.len() >= MAX_EXPANDED_BYTES
}

/// Replace `{{name}}` placeholders with values from `args`.
///
/// Whitespace inside the braces is ignored (`{{ count }}`). Placeholders with
/// no matching argument, and an unterminated `{{`, are kept verbatim.
pub fn interpolate(tmpl: &str, args: &Args) -> String {
    if args.is_empty() || !tmpl.contains("{{") {
        return tmpl.to_string();
    }

    let mut out = String::with_capacity(std::cmp::min(tmpl.len() + 8, MAX_EXPANDED_BYTES));
    let mut rest = tmpl;

    while let Some(open) = rest.find("{{") {
        if push_str_limited(&mut out, &rest[..open]) {
            return out;
        }

        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            push_str_limited(&mut out, &rest[open..]);
            return out;
        };

        let name = after[..close].trim();
        let value = if name.is_empty() {
            None
        } else {
            args.get(name)
        };
        let full = match value {
            Some(v) => push_str_limited(&mut out, &v.to_string()),
            None => push_str_limited(&mut out, &rest[open..open + 2 + close + 2]),
        };
        if full {
            return out;
        }

        rest = &after[close + 2..];
    }

    push_str_limited(&mut out, rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_nested_and_lookup() {
        let src = r#"
auth:
  login: "Login"
  createPinDescription: "Choose a {{count}}-digit PIN"
send:
  review:
    title: "Review transfer"
"#;

        let cat = Catalog::parse_yaml(src).unwrap();
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.get("auth.login"), Some("Login"));
        assert_eq!(cat.get("send.review.title"), Some("Review transfer"));
        assert_eq!(cat.get("auth"), None);
        assert_eq!(
            cat.keys(),
            vec!["auth.createPinDescription", "auth.login", "send.review.title"]
        );

        let s = cat
            .format("auth.createPinDescription", &Args::new().arg("count", 4))
            .unwrap();
        assert_eq!(s, "Choose a 4-digit PIN");
    }

    #[test]
    fn empty_document_is_empty_catalog() {
        assert!(Catalog::parse_yaml("").unwrap().is_empty());
    }

    #[test]
    fn leaves_must_be_strings() {
        let err = Catalog::parse_yaml("auth:\n  attempts: 3\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Entry { ref key, .. } if key == "auth.attempts"));

        let err = Catalog::parse_yaml("- a\n- b\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Yaml(_)));
    }

    #[test]
    fn key_validation() {
        let err = Catalog::parse_yaml("bad key: \"nope\"\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Entry { .. }));

        let err = Catalog::parse_yaml("auth:\n  .login: \"nope\"\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Entry { .. }));
    }

    #[test]
    fn placeholders() {
        let args = Args::new().arg("name", "Awa").arg("amount", 5000);
        assert_eq!(interpolate("Hi {{name}}", &args), "Hi Awa");
        assert_eq!(interpolate("Hi {{ name }}!", &args), "Hi Awa!");
        assert_eq!(
            interpolate("{{name}} sent {{amount}} XAF", &args),
            "Awa sent 5000 XAF"
        );
        assert_eq!(interpolate("Fee: {{fee}}", &args), "Fee: {{fee}}");
        assert_eq!(interpolate("{{}} and {{name}}", &args), "{{}} and Awa");
        assert_eq!(interpolate("single {name}", &args), "single {name}");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let args = Args::new().arg("name", "Awa");
        assert_eq!(interpolate("Hello, {{name", &args), "Hello, {{name");
        assert_eq!(interpolate("{{name}} {{", &args), "Awa {{");
    }

    #[test]
    fn no_args_returns_template() {
        assert_eq!(interpolate("{{count}} digits", &Args::new()), "{{count}} digits");
    }

    #[test]
    fn placeholder_output_is_limited() {
        let args = Args::new().arg("name", "a".repeat(MAX_EXPANDED_BYTES * 2));
        let s = interpolate("{{name}}{{name}}{{name}}", &args);
        assert!(s.len() <= MAX_EXPANDED_BYTES);
    }
}
