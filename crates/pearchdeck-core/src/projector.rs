//! Settings-driven projection of raw profile records.
//!
//! The projector allow-lists: a key reaches the output only through one of the
//! rules below, so fields the search API adds later stay hidden until a rule
//! names them.

use crate::settings::SearchResultsSettings;
use serde_json::{Map, Value as JsonValue};

pub type ProjectedProfile = Map<String, JsonValue>;

/// Always projected, whatever the settings.
pub const IDENTITY_FIELDS: &[&str] = &["linkedin_slug", "first_name", "last_name", "title"];

pub const EXPERIENCES: &str = "experiences";
pub const COMPANY_INFO: &str = "company_info";
pub const INSIGHTS: &str = "insights";
pub const EMAILS: &str = "emails";
pub const PHONE_NUMBERS: &str = "phone_numbers";

pub const PERSONAL_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Business,
    Personal,
}

pub fn classify_email(address: &str) -> EmailKind {
    let domain = address
        .rsplit_once('@')
        .map(|(_, d)| d.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if PERSONAL_EMAIL_DOMAINS.contains(&domain.as_str()) {
        EmailKind::Personal
    } else {
        EmailKind::Business
    }
}

pub fn project(raw: &JsonValue, settings: &SearchResultsSettings) -> ProjectedProfile {
    let mut out = Map::new();
    let Some(src) = raw.as_object() else {
        return out;
    };

    for key in IDENTITY_FIELDS {
        if let Some(v) = src.get(*key) {
            out.insert((*key).to_string(), v.clone());
        }
    }

    let raw_experiences = src.get(EXPERIENCES).and_then(|v| v.as_array());
    if settings.enriched_profile {
        if let Some(exps) = raw_experiences {
            out.insert(
                EXPERIENCES.to_string(),
                JsonValue::Array(exps.iter().map(strip_company_info).collect()),
            );
        }
    }
    if settings.enriched_company_data {
        if let Some(exps) = raw_experiences {
            match out.get_mut(EXPERIENCES).and_then(|v| v.as_array_mut()) {
                Some(filtered) => {
                    for (entry, raw_entry) in filtered.iter_mut().zip(exps.iter()) {
                        if let (Some(obj), Some(info)) =
                            (entry.as_object_mut(), raw_entry.get(COMPANY_INFO))
                        {
                            obj.insert(COMPANY_INFO.to_string(), info.clone());
                        }
                    }
                }
                None => {
                    out.insert(EXPERIENCES.to_string(), JsonValue::Array(exps.clone()));
                }
            }
        }
    }

    if settings.matching_insights {
        if let Some(v) = src.get(INSIGHTS) {
            out.insert(INSIGHTS.to_string(), v.clone());
        }
    }

    if settings.business_emails || settings.personal_emails {
        let addresses: Vec<&str> = src
            .get(EMAILS)
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(|e| e.as_str()).collect())
            .unwrap_or_default();
        let (personal, business): (Vec<&str>, Vec<&str>) = addresses
            .into_iter()
            .partition(|a| classify_email(a) == EmailKind::Personal);
        let mut emails = Vec::new();
        if settings.business_emails {
            emails.extend(business);
        }
        if settings.personal_emails {
            emails.extend(personal);
        }
        out.insert(
            EMAILS.to_string(),
            JsonValue::Array(emails.into_iter().map(JsonValue::from).collect()),
        );
    }

    if settings.phone_numbers {
        if let Some(v) = src.get(PHONE_NUMBERS) {
            out.insert(PHONE_NUMBERS.to_string(), v.clone());
        }
    }

    out
}

fn strip_company_info(entry: &JsonValue) -> JsonValue {
    match entry {
        JsonValue::Object(m) => JsonValue::Object(
            m.iter()
                .filter(|(k, _)| k.as_str() != COMPANY_INFO)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
