//! cURL and Python samples for the documentation tabs.
//!
//! Both embed the exact body a live search would send for the same query,
//! filters and settings with `limit = 1`.

use crate::request::SearchRequest;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;

pub const API_KEY_PLACEHOLDER: &str = "<PEARCH_API_KEY>";

fn pretty(request: &SearchRequest, indent: &[u8]) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    // SearchRequest has no fallible fields
    if request.serialize(&mut ser).is_err() {
        return String::from("{}");
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Single quotes cannot be escaped inside a shell single-quoted word.
fn shell_single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

pub fn curl_snippet(endpoint: &str, request: &SearchRequest) -> String {
    format!(
        "curl -X POST \"{endpoint}\" \\\n  -H \"Content-Type: application/json\" \\\n  -H \"Authorization: Bearer {key}\" \\\n  -d {body}",
        endpoint = endpoint,
        key = API_KEY_PLACEHOLDER,
        body = shell_single_quoted(&pretty(request, b"  ")),
    )
}

pub fn python_snippet(endpoint: &str, request: &SearchRequest) -> String {
    let data = serde_json::to_value(request)
        .map(|v| python_literal(&v, 0))
        .unwrap_or_else(|_| "{}".to_string());
    format!(
        "import requests\n\nurl = {url}\nheaders = {{\n    \"Content-Type\": \"application/json\",\n    \"Authorization\": \"Bearer {key}\"\n}}\ndata = {data}\n\nresponse = requests.post(url, json=data, headers=headers)\nresults = response.json()\nprint(results)",
        url = JsonValue::from(endpoint),
        key = API_KEY_PLACEHOLDER,
        data = data,
    )
}

/// Python source for a JSON value, laid out like 4-space pretty JSON.
fn python_literal(v: &JsonValue, depth: usize) -> String {
    let pad = "    ".repeat(depth + 1);
    let close = "    ".repeat(depth);
    match v {
        JsonValue::Null => "None".into(),
        JsonValue::Bool(true) => "True".into(),
        JsonValue::Bool(false) => "False".into(),
        // JSON string escapes are valid Python escapes
        JsonValue::Number(_) | JsonValue::String(_) => v.to_string(),
        JsonValue::Array(items) if items.is_empty() => "[]".into(),
        JsonValue::Array(items) => {
            let body: Vec<String> = items
                .iter()
                .map(|i| format!("{}{}", pad, python_literal(i, depth + 1)))
                .collect();
            format!("[\n{}\n{}]", body.join(",\n"), close)
        }
        JsonValue::Object(m) if m.is_empty() => "{}".into(),
        JsonValue::Object(m) => {
            let body: Vec<String> = m
                .iter()
                .map(|(k, val)| {
                    format!(
                        "{}{}: {}",
                        pad,
                        JsonValue::from(k.as_str()),
                        python_literal(val, depth + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", body.join(",\n"), close)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, FilterGroup};
    use crate::request::{build, SNIPPET_LIMIT};
    use crate::settings::AppSettings;

    const URL: &str = "https://api.pearch.ai/v1/search";

    fn req() -> SearchRequest {
        let g = FilterGroup::with_filters(
            "Location",
            vec![Filter::new("Location", "NYC"), Filter::new("Location", "SF").negated()],
        );
        build("CEO who's a founder", &[g], &AppSettings::default(), SNIPPET_LIMIT)
    }

    #[test]
    fn curl_body_is_the_request_json() {
        let snippet = curl_snippet(URL, &req());
        assert!(snippet.starts_with("curl -X POST \"https://api.pearch.ai/v1/search\" \\\n"));
        assert!(snippet.contains("Bearer <PEARCH_API_KEY>"));
        assert!(!snippet.contains("pick_top1"));
        let start = snippet.find("-d '").unwrap() + 4;
        let body = snippet[start..snippet.len() - 1].replace(r"'\''", "'");
        let parsed: JsonValue = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, serde_json::to_value(req()).unwrap());
    }

    #[test]
    fn python_uses_python_literals() {
        let snippet = python_snippet(URL, &req());
        assert!(snippet.contains("url = \"https://api.pearch.ai/v1/search\""));
        assert!(snippet.contains("    \"with_contacts\": True,"));
        assert!(snippet.contains("\"limit\": 1,"));
        assert!(snippet.contains(&format!("{{\n{}\"not\": \"SF\"\n{}}}", " ".repeat(20), " ".repeat(16))));
        assert!(!snippet.contains("true"));
    }

    #[test]
    fn python_literal_matches_pretty_json_shape() {
        let v = serde_json::json!({"a": [1, {"b": null}], "c": false, "d": []});
        assert_eq!(
            python_literal(&v, 0),
            "{\n    \"a\": [\n        1,\n        {\n            \"b\": None\n        }\n    ],\n    \"c\": False,\n    \"d\": []\n}"
        );
    }
}
