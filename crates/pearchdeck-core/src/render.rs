use crate::projector::{COMPANY_INFO, EMAILS, EXPERIENCES, INSIGHTS, PHONE_NUMBERS};
use crate::response::{ProjectedResult, ResultsView};
use serde_json::Value as JsonValue;
use std::fmt::{self, Write};

pub const NO_RESULTS_TEXT: &str = "No results found. Try adjusting your search terms or filters.";

fn s<'a>(v: &'a JsonValue, key: &str) -> Option<&'a str> {
    v.get(key).and_then(|x| x.as_str()).filter(|x| !x.is_empty())
}

fn str_list(v: Option<&JsonValue>) -> Vec<String> {
    v.and_then(|x| x.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|e| match e {
                    JsonValue::String(s) => Some(s.clone()),
                    JsonValue::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn score_label(score: Option<f64>) -> String {
    match score {
        Some(v) if v.fract() == 0.0 => format!("{}/4", v as i64),
        Some(v) => format!("{}/4", v),
        None => "-/4".to_string(),
    }
}

pub fn render_text(view: &ResultsView) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    write_results(&mut out, view).ok();
    out
}

/// Streams the profile cards into any `fmt::Write` sink.
pub fn write_results<W: Write>(out: &mut W, view: &ResultsView) -> fmt::Result {
    match view {
        ResultsView::NoResults => writeln!(out, "{}", NO_RESULTS_TEXT),
        ResultsView::Profiles(results) => {
            writeln!(out, "Found {} results", results.len())?;
            for (i, r) in results.iter().enumerate() {
                out.write_char('\n')?;
                write_card(out, i + 1, r)?;
            }
            Ok(())
        }
    }
}

fn write_card<W: Write>(out: &mut W, n: usize, r: &ProjectedResult) -> fmt::Result {
    let p = JsonValue::Object(r.profile.clone());
    writeln!(out, "#{} Score: {}", n, score_label(r.score))?;

    let name = [s(&p, "first_name"), s(&p, "last_name")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "  {}", if name.is_empty() { "(unnamed)" } else { name.as_str() })?;
    if let Some(t) = s(&p, "title") {
        writeln!(out, "  {}", t)?;
    }
    if let Some(url) = s(&p, "linkedin_slug") {
        writeln!(out, "  LinkedIn: {}", crate::response::linkedin_url(url))?;
    }

    let insight = r.insights.as_ref().or_else(|| p.get(INSIGHTS));
    if let Some(summary) = insight.and_then(|i| s(i, "overall_summary")) {
        writeln!(out, "  Insight: {}", summary)?;
    }

    for email in str_list(p.get(EMAILS)) {
        writeln!(out, "  Email: {}", email)?;
    }
    for phone in str_list(p.get(PHONE_NUMBERS)) {
        writeln!(out, "  Phone: {}", phone)?;
    }

    if let Some(exps) = p.get(EXPERIENCES).and_then(|v| v.as_array()) {
        if !exps.is_empty() {
            writeln!(out, "  Experience:")?;
        }
        for exp in exps {
            let company = exp.get(COMPANY_INFO);
            let company_name = company.and_then(|c| s(c, "name"));
            let roles = exp.get("company_roles").and_then(|v| v.as_array());
            for role in roles.into_iter().flatten() {
                let title = s(role, "title").unwrap_or("Unknown role");
                let at = company_name
                    .or_else(|| s(role, "company"))
                    .unwrap_or("Unknown Company");
                writeln!(out, "    - {} at {}", title, at)?;
            }
            if let Some(c) = company {
                let industries = str_list(c.get("industries"));
                if !industries.is_empty() {
                    writeln!(out, "      Industry: {}", industries.join(", "))?;
                }
                if let Some(size) = s(c, "num_employees_range") {
                    writeln!(out, "      Size: {}", size)?;
                }
                if let Some(site) = s(c, "website") {
                    writeln!(out, "      Website: {}", site)?;
                }
            }
        }
    }
    Ok(())
}
