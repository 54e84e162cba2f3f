use crate::compile::{compile, CompiledFilterSet};
use crate::filter::FilterGroup;
use crate::settings::{AppSettings, SearchSpeedMode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Result count requested by the interactive search panel.
pub const LIVE_SEARCH_LIMIT: u32 = 30;
/// Limit used for the cURL/Python samples.
pub const SNIPPET_LIMIT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Fast,
    Pro,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    pub with_contacts: bool,
    pub r#type: SearchType,
    pub profile_scoring: Option<bool>,
    pub custom_filters: Option<Vec<serde_json::Value>>,
    pub insights: Option<bool>,
    pub pick_top1: Option<bool>,
    pub filters: Option<CompiledFilterSet>,
}

/// (type, profile_scoring, insights) for a speed mode.
fn mode_flags(mode: &SearchSpeedMode) -> (SearchType, bool, bool) {
    match mode {
        SearchSpeedMode::SuperFast => (SearchType::Fast, false, false),
        SearchSpeedMode::Fast => (SearchType::Fast, true, true),
        _ => (SearchType::Pro, true, true),
    }
}

/// Compose the request body for a search. Pure: reads settings, touches nothing.
pub fn build(
    query: &str,
    groups: &[FilterGroup],
    settings: &AppSettings,
    limit: u32,
) -> SearchRequest {
    let (r#type, scoring, insights) = mode_flags(&settings.search_speed.mode);
    let compiled = compile(groups);
    SearchRequest {
        query: query.to_string(),
        limit,
        with_contacts: true,
        r#type,
        profile_scoring: Some(scoring),
        custom_filters: None,
        insights: Some(insights),
        pick_top1: (limit > 1).then_some(true),
        filters: (!compiled.is_empty()).then_some(compiled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::settings::SearchSpeed;
    use serde_json::json;

    fn with_mode(mode: SearchSpeedMode) -> AppSettings {
        AppSettings {
            search_speed: SearchSpeed { mode },
            ..AppSettings::default()
        }
    }

    #[test]
    fn super_fast_snippet_request() {
        let r = build("x", &[], &with_mode(SearchSpeedMode::SuperFast), 1);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], json!("fast"));
        assert_eq!(v["profile_scoring"], json!(false));
        assert_eq!(v["insights"], json!(false));
        assert!(v.get("pick_top1").is_none());
        assert_eq!(v["with_contacts"], json!(true));
    }

    #[test]
    fn fast_live_request_picks_top1() {
        let r = build("x", &[], &with_mode(SearchSpeedMode::Fast), 30);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["pick_top1"], json!(true));
        assert_eq!(v["profile_scoring"], json!(true));
        assert_eq!(v["type"], json!("fast"));
        assert_eq!(v["limit"], json!(30));
    }

    #[test]
    fn other_modes_use_pro() {
        for mode in [
            SearchSpeedMode::DeepResearch,
            SearchSpeedMode::AutoMode,
            SearchSpeedMode::Custom,
            SearchSpeedMode::Other,
        ] {
            let r = build("x", &[], &with_mode(mode), 1);
            assert_eq!(r.r#type, SearchType::Pro);
            assert_eq!(r.profile_scoring, Some(true));
            assert_eq!(r.insights, Some(true));
        }
    }

    #[test]
    fn empty_filters_are_omitted_not_sent_as_object() {
        let blank = FilterGroup::with_filters("Title", vec![Filter::new("Title", " ")]);
        let r = build("x", &[blank], &AppSettings::default(), 30);
        let v = serde_json::to_value(&r).unwrap();
        assert!(v.get("filters").is_none());
        assert!(v.get("custom_filters").is_none());
    }

    #[test]
    fn compiled_filters_are_attached() {
        let g = FilterGroup::with_filters("Title", vec![Filter::new("Title", "CEO")]);
        let r = build("founders", &[g], &AppSettings::default(), 1);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["filters"], json!({"title": "CEO"}));
        assert_eq!(v["query"], json!("founders"));
    }

    #[test]
    fn field_order_is_stable() {
        let r = build("q", &[], &with_mode(SearchSpeedMode::Fast), 1);
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"query":"q","limit":1,"with_contacts":true,"type":"fast","profile_scoring":true,"insights":true}"#
        );
    }
}
