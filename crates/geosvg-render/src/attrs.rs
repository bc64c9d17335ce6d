//! Attribute strings attached to rendered elements.
//!
//! Values are written as-is. Quotes, `<` and `&` in values are not escaped and will corrupt the
//! surrounding markup; callers that accept untrusted properties must sanitize them first.
//!
//! Non-string property values are written as compact JSON: `null` stays `null` (not `<nil>`),
//! `1000000` stays `1000000` (not `1e+06`).

use geosvg_core::Properties;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Serializes `attrs` as ` key="value"` pairs in ascending key order.
///
/// Input order does not matter. If a key occurs more than once, the last value wins.
pub fn format_attributes<K, V>(attrs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let pairs: Vec<(K, V)> = attrs.into_iter().collect();
    let sorted: BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();

    let mut out = String::new();
    for (k, v) in sorted {
        let _ = write!(out, r#" {k}="{v}""#);
    }
    out
}

/// Builds the attribute string for a feature from the properties accepted by `use_property`.
pub fn attributes_from_properties(
    use_property: impl Fn(&str) -> bool,
    properties: &Properties,
) -> String {
    format_attributes(
        properties
            .iter()
            .filter(|(k, _)| use_property(k.as_str()))
            .map(|(k, v)| (k.as_str(), property_text(v))),
    )
}

/// Text form of a property value: strings verbatim, everything else as compact JSON.
pub fn property_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn sorts_keys_regardless_of_insertion_order() {
        let mut a = HashMap::new();
        a.insert("id", "the_id");
        a.insert("class", "a_class");
        assert_eq!(format_attributes(&a), r#" class="a_class" id="the_id""#);

        let b = [("id", "the_id"), ("class", "a_class")];
        assert_eq!(format_attributes(b), r#" class="a_class" id="the_id""#);
    }

    #[test]
    fn empty_attributes_are_empty() {
        assert_eq!(format_attributes(Vec::<(String, String)>::new()), "");
    }

    #[test]
    fn last_duplicate_wins() {
        let a = [("class", "first"), ("class", "second")];
        assert_eq!(format_attributes(a), r#" class="second""#);
    }

    #[test]
    fn values_are_not_escaped() {
        let a = [("title", r#"a "b" <c>"#)];
        assert_eq!(format_attributes(a), r#" title="a "b" <c>""#);
    }

    #[test]
    fn non_string_values_use_json_text() {
        assert_eq!(property_text(&json!(null)), "null");
        assert_eq!(property_text(&json!(1000000)), "1000000");
        assert_eq!(property_text(&json!(0.5)), "0.5");
        assert_eq!(property_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn filters_and_stringifies_properties() {
        let props = json!({
            "name": "Lake",
            "class": "water",
            "depth": 12.5,
            "id": 7,
            "visible": true,
            "note": null,
            "tags": ["a", "b"]
        });
        let props = props.as_object().unwrap();

        assert_eq!(
            attributes_from_properties(|k| k == "class", props),
            r#" class="water""#
        );
        assert_eq!(
            attributes_from_properties(|k| k != "name", props),
            r#" class="water" depth="12.5" id="7" note="null" tags="["a","b"]" visible="true""#
        );
    }
}
