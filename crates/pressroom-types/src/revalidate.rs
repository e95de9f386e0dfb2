//! Revalidation webhook payload.
//!
//! The builder sends `{ "tags": ..., "paths": ..., "redirect": ... }` where
//! `tags` and `paths` are either a comma-separated string or an array of
//! strings, and `redirect` is any JSON value interpreted for truthiness.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A list of cache tags or paths accepted in either comma-separated or array form.
///
/// Entries are trimmed and empty entries are dropped. `null` or a missing
/// field is an empty list. Non-string array items are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split a comma-separated string into a list.
    pub fn from_csv(csv: &str) -> Self {
        Self::from_items(csv.split(','))
    }

    fn from_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            items
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self::from_items(items.iter().map(String::as_str))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Csv(String),
    Items(Vec<Value>),
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawList>::deserialize(deserializer)?;
        Ok(match raw {
            None => StringList::default(),
            Some(RawList::Csv(csv)) => StringList::from_csv(&csv),
            Some(RawList::Items(items)) => {
                StringList::from_items(items.iter().filter_map(Value::as_str))
            }
        })
    }
}

/// Body of `POST /api/revalidate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevalidateRequest {
    #[serde(default)]
    pub tags: StringList,
    #[serde(default)]
    pub paths: StringList,
    /// Redirect to the first path after revalidating.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub redirect: bool,
}

/// JSON truthiness: `false`, `null`, `0`, `""` are falsy, everything else truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn deserialize_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> RevalidateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn comma_string_and_array_are_equivalent() {
        let csv = parse(json!({ "tags": "page-1,page-2", "paths": "/a, /b" }));
        let arr = parse(json!({ "tags": ["page-1", "page-2"], "paths": ["/a", "/b"] }));
        assert_eq!(csv.tags, arr.tags);
        assert_eq!(csv.paths, arr.paths);
        assert_eq!(csv.paths.as_slice(), &["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn missing_and_null_fields_are_empty() {
        let req = parse(json!({}));
        assert!(req.tags.is_empty());
        assert!(req.paths.is_empty());
        assert!(!req.redirect);

        let req = parse(json!({ "tags": null, "paths": null, "redirect": null }));
        assert!(req.tags.is_empty());
        assert!(req.paths.is_empty());
        assert!(!req.redirect);
    }

    #[test]
    fn empty_entries_are_dropped() {
        let req = parse(json!({ "tags": "", "paths": ",/about,, " }));
        assert!(req.tags.is_empty());
        assert_eq!(req.paths.as_slice(), &["/about".to_string()]);
    }

    #[test]
    fn non_string_array_items_are_ignored() {
        let req = parse(json!({ "tags": ["a", 1, null, "b"] }));
        assert_eq!(req.tags.as_slice(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn redirect_follows_truthiness() {
        assert!(parse(json!({ "redirect": true })).redirect);
        assert!(parse(json!({ "redirect": "yes" })).redirect);
        assert!(parse(json!({ "redirect": 1 })).redirect);
        assert!(!parse(json!({ "redirect": 0 })).redirect);
        assert!(!parse(json!({ "redirect": "" })).redirect);
        assert!(!parse(json!({ "redirect": false })).redirect);
    }
}
