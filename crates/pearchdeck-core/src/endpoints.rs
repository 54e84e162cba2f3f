use crate::settings::ApiEndpointGroups;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointGroupKind {
    Search,
    JobRecommendations,
    CustomIndex,
    ProfileEnrichment,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointGroup {
    pub kind: EndpointGroupKind,
    pub title: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<Endpoint>,
}

fn ep(method: &'static str, path: &'static str, description: &'static str) -> Endpoint {
    Endpoint {
        method,
        path,
        description,
    }
}

pub fn catalog() -> Vec<EndpointGroup> {
    vec![
        EndpointGroup {
            kind: EndpointGroupKind::Search,
            title: "Search APIs",
            description: "Powerful semantic search capabilities with different performance tiers",
            endpoints: vec![
                ep("POST", "/v1/search/fast", "High-speed search with basic semantic matching"),
                ep("POST", "/v1/search/pro", "Advanced search with enhanced relevance and filtering"),
                ep("POST", "/v1/search/auto", "Intelligent auto-complete and suggestions"),
            ],
        },
        EndpointGroup {
            kind: EndpointGroupKind::JobRecommendations,
            title: "Job Recommendations",
            description: "AI-powered job matching and recommendation system",
            endpoints: vec![
                ep("POST", "/v1/upsert_jobs", "Add or update job listings in the recommendation engine"),
                ep("POST", "/v1/find_relevant_jobs", "Find jobs that match candidate profiles and preferences"),
            ],
        },
        EndpointGroup {
            kind: EndpointGroupKind::CustomIndex,
            title: "Custom Index Management",
            description: "Create and manage custom search indices for your data",
            endpoints: vec![ep(
                "POST",
                "/v1/upsert_profiles",
                "Add or update candidate profiles in custom indices",
            )],
        },
        EndpointGroup {
            kind: EndpointGroupKind::ProfileEnrichment,
            title: "Profile Enrichment",
            description: "Get comprehensive profile information and contact details",
            endpoints: vec![ep(
                "GET",
                "/v1/profile",
                "Retrieve enriched profile data including contacts, social links, and enhanced information",
            )],
        },
    ]
}

pub fn visible_groups(enabled: &ApiEndpointGroups) -> Vec<EndpointGroup> {
    catalog()
        .into_iter()
        .filter(|g| match g.kind {
            EndpointGroupKind::Search => enabled.search,
            EndpointGroupKind::JobRecommendations => enabled.job_recommendations,
            EndpointGroupKind::CustomIndex => enabled.custom_index,
            EndpointGroupKind::ProfileEnrichment => enabled.profile_enrichment,
        })
        .collect()
}
