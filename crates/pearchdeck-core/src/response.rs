use crate::projector::{project, ProjectedProfile, INSIGHTS};
use crate::settings::SearchResultsSettings;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

const LINKEDIN_BASE: &str = "https://linkedin.com/in/";

/// Lenient typed view over a stored response body. The raw value stays the
/// source of truth; this is re-derived on every render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: Option<JsonValue>,
    #[serde(default)]
    pub total_estimate: Option<JsonValue>,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub docid: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub profile: Option<JsonValue>,
    #[serde(default)]
    pub insights: Option<JsonValue>,
}

impl SearchResponse {
    /// Typed parse first; on failure each field is read on its own so one bad
    /// entry only loses what cannot be read.
    pub fn from_raw(raw: &JsonValue) -> Self {
        if let Ok(resp) = serde_json::from_value::<SearchResponse>(raw.clone()) {
            return resp;
        }
        let present = |key: &str| raw.get(key).filter(|v| !v.is_null()).cloned();
        SearchResponse {
            query: raw.get("query").and_then(|v| v.as_str()).map(String::from),
            status: present("status"),
            total_estimate: present("total_estimate"),
            search_results: raw
                .get("search_results")
                .and_then(|v| v.as_array())
                .map(|items| items.iter().map(SearchResult::lenient).collect())
                .unwrap_or_default(),
        }
    }
}

impl SearchResult {
    fn lenient(item: &JsonValue) -> Self {
        SearchResult {
            docid: item.get("docid").and_then(|v| v.as_str()).map(String::from),
            score: item.get("score").and_then(|v| v.as_f64()),
            profile: item.get("profile").cloned(),
            insights: item.get(INSIGHTS).cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedResult {
    pub docid: Option<String>,
    pub score: Option<f64>,
    pub profile: ProjectedProfile,
    pub insights: Option<JsonValue>,
}

impl ProjectedResult {
    pub fn to_json(&self) -> JsonValue {
        let mut m = Map::new();
        m.insert("docid".into(), json!(self.docid));
        m.insert("score".into(), json!(self.score));
        m.insert("profile".into(), JsonValue::Object(self.profile.clone()));
        if let Some(i) = &self.insights {
            m.insert(INSIGHTS.into(), i.clone());
        }
        JsonValue::Object(m)
    }
}

pub fn project_result(result: &SearchResult, settings: &SearchResultsSettings) -> ProjectedResult {
    let profile = result
        .profile
        .as_ref()
        .map(|p| project(p, settings))
        .unwrap_or_default();
    let insights = if settings.matching_insights {
        result.insights.clone()
    } else {
        None
    };
    ProjectedResult {
        docid: result.docid.clone(),
        score: result.score,
        profile,
        insights,
    }
}

pub fn linkedin_url(slug: &str) -> String {
    format!("{}{}", LINKEDIN_BASE, slug)
}

/// What the JSON tab shows for a stored response.
pub fn json_view(raw: &JsonValue, settings: &SearchResultsSettings) -> JsonValue {
    if settings.full_json {
        return raw.clone();
    }
    let resp = SearchResponse::from_raw(raw);
    let results: Vec<JsonValue> = resp
        .search_results
        .iter()
        .map(|r| {
            let mut projected = project_result(r, settings);
            if settings.linkedin_profile_url {
                let slug = projected
                    .profile
                    .get("linkedin_slug")
                    .and_then(|v| v.as_str())
                    .map(linkedin_url);
                if let Some(url) = slug {
                    projected.profile.insert("linkedin_url".into(), json!(url));
                }
            }
            projected.to_json()
        })
        .collect();
    json!({
        "query": resp.query,
        "status": resp.status,
        "total_estimate": resp.total_estimate,
        "search_results": results,
    })
}

/// What the rendered tab shows for a stored response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    NoResults,
    Profiles(Vec<ProjectedResult>),
}

impl ResultsView {
    pub fn from_raw(raw: &JsonValue, settings: &SearchResultsSettings) -> Self {
        let resp = SearchResponse::from_raw(raw);
        if resp.search_results.is_empty() {
            return ResultsView::NoResults;
        }
        ResultsView::Profiles(
            resp.search_results
                .iter()
                .map(|r| project_result(r, settings))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> JsonValue {
        json!({
            "query": "founders",
            "status": "ok",
            "total_estimate": 120,
            "credits_remaining": 42,
            "search_results": [{
                "docid": "abc",
                "score": 3,
                "internal_rank": 7,
                "insights": {"overall_summary": "fits"},
                "profile": {
                    "linkedin_slug": "jdoe",
                    "first_name": "Jane",
                    "last_name": "Doe",
                    "title": "CEO",
                    "emails": ["jane@acme.io"]
                }
            }]
        })
    }

    #[test]
    fn full_json_returns_raw_verbatim() {
        let s = SearchResultsSettings {
            full_json: true,
            ..SearchResultsSettings::default()
        };
        assert_eq!(json_view(&body(), &s), body());
    }

    #[test]
    fn projected_json_is_allow_listed() {
        let v = json_view(&body(), &SearchResultsSettings::default());
        assert!(v.get("credits_remaining").is_none());
        let r = &v["search_results"][0];
        assert!(r.get("internal_rank").is_none());
        assert_eq!(r["docid"], json!("abc"));
        assert_eq!(r["score"], json!(3.0));
        assert_eq!(r["insights"], json!({"overall_summary": "fits"}));
        assert_eq!(r["profile"]["linkedin_url"], json!("https://linkedin.com/in/jdoe"));
        assert_eq!(r["profile"]["emails"], json!(["jane@acme.io"]));
    }

    #[test]
    fn linkedin_url_and_insights_follow_toggles() {
        let s = SearchResultsSettings {
            linkedin_profile_url: false,
            matching_insights: false,
            ..SearchResultsSettings::default()
        };
        let r = &json_view(&body(), &s)["search_results"][0];
        assert!(r["profile"].get("linkedin_url").is_none());
        assert!(r.get("insights").is_none());
    }

    #[test]
    fn empty_or_garbage_body_is_no_results() {
        let s = SearchResultsSettings::default();
        assert_eq!(ResultsView::from_raw(&json!({"search_results": []}), &s), ResultsView::NoResults);
        assert_eq!(ResultsView::from_raw(&json!("oops"), &s), ResultsView::NoResults);
    }

    #[test]
    fn malformed_entries_are_tolerated() {
        let raw = json!({"search_results": [{"docid": 5, "score": "high", "profile": {"first_name": "A"}}]});
        match ResultsView::from_raw(&raw, &SearchResultsSettings::default()) {
            ResultsView::Profiles(p) => {
                assert_eq!(p.len(), 1);
                assert_eq!(p[0].docid, None);
                assert_eq!(p[0].score, None);
                assert_eq!(p[0].profile["first_name"], json!("A"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn header_fields_survive_a_malformed_entry() {
        let raw = json!({
            "query": "founders",
            "status": "ok",
            "total_estimate": 7,
            "search_results": [
                {"docid": "a", "score": "high", "profile": {"first_name": "A"}},
                {"docid": "b", "score": 2, "profile": {"first_name": "B"}}
            ]
        });
        let v = json_view(&raw, &SearchResultsSettings::default());
        assert_eq!(v["query"], json!("founders"));
        assert_eq!(v["status"], json!("ok"));
        assert_eq!(v["total_estimate"], json!(7));
        assert_eq!(v["search_results"][0]["score"], JsonValue::Null);
        assert_eq!(v["search_results"][1]["docid"], json!("b"));
        assert_eq!(v["search_results"][1]["score"], json!(2.0));
    }
}
