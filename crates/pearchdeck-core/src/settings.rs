//! Persisted deck settings.
//!
//! Every nested section is `#[serde(default)]`, so a partial blob written by an
//! older build fills missing fields from the defaults below.

use crate::filter::FilterMode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub packages: PackagesConfig,
    pub api_endpoint_groups: ApiEndpointGroups,
    pub profile_display: ProfileDisplaySettings,
    pub query_options: QueryOptions,
    pub search_speed: SearchSpeed,
    pub search_results: SearchResultsSettings,
    // presentation keys owned by other consumers of the blob
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    pub name: String,
    pub limit: u64,
    pub monthly_price: f64,
    pub per_candidate_price: f64,
}

/// Missing fields of a stored tier are filled from that tier's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagesConfig {
    pub starter: PackageConfig,
    pub professional: PackageConfig,
    pub enterprise: PackageConfig,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackagePatch {
    name: Option<String>,
    limit: Option<u64>,
    monthly_price: Option<f64>,
    per_candidate_price: Option<f64>,
}

impl PackagePatch {
    fn apply(self, base: PackageConfig) -> PackageConfig {
        PackageConfig {
            name: self.name.unwrap_or(base.name),
            limit: self.limit.unwrap_or(base.limit),
            monthly_price: self.monthly_price.unwrap_or(base.monthly_price),
            per_candidate_price: self.per_candidate_price.unwrap_or(base.per_candidate_price),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PackagesPatch {
    starter: PackagePatch,
    professional: PackagePatch,
    enterprise: PackagePatch,
}

impl<'de> Deserialize<'de> for PackagesConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let patch = PackagesPatch::deserialize(deserializer)?;
        let base = PackagesConfig::default();
        Ok(Self {
            starter: patch.starter.apply(base.starter),
            professional: patch.professional.apply(base.professional),
            enterprise: patch.enterprise.apply(base.enterprise),
        })
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            starter: PackageConfig {
                name: "Starter".into(),
                limit: 10_000,
                monthly_price: 99.0,
                per_candidate_price: 0.01,
            },
            professional: PackageConfig {
                name: "Professional".into(),
                limit: 100_000,
                monthly_price: 499.0,
                per_candidate_price: 0.005,
            },
            enterprise: PackageConfig {
                name: "Enterprise".into(),
                limit: 1_000_000,
                monthly_price: 1999.0,
                per_candidate_price: 0.002,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiEndpointGroups {
    pub search: bool,
    pub job_recommendations: bool,
    pub custom_index: bool,
    pub profile_enrichment: bool,
}

impl Default for ApiEndpointGroups {
    fn default() -> Self {
        Self {
            search: true,
            job_recommendations: true,
            custom_index: true,
            profile_enrichment: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfileDisplayMode {
    LinkedinOnly,
    Contacts,
    #[default]
    FullProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfileDisplaySettings {
    pub mode: ProfileDisplayMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterModeSetting {
    pub mode: FilterMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryOptions {
    pub natural_language: bool,
    pub filters: bool,
    pub filter_mode: FilterModeSetting,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            natural_language: true,
            filters: true,
            filter_mode: FilterModeSetting::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchSpeedMode {
    SuperFast,
    #[default]
    Fast,
    DeepResearch,
    AutoMode,
    Custom,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchSpeed {
    pub mode: SearchSpeedMode,
}

/// Which profile categories survive projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResultsSettings {
    pub linkedin_profile_url: bool,
    pub full_json: bool,
    pub matching_insights: bool,
    pub enriched_company_data: bool,
    pub enriched_profile: bool,
    pub business_emails: bool,
    pub personal_emails: bool,
    pub phone_numbers: bool,
}

impl Default for SearchResultsSettings {
    fn default() -> Self {
        Self {
            linkedin_profile_url: true,
            full_json: false,
            matching_insights: true,
            enriched_company_data: true,
            enriched_profile: true,
            business_emails: true,
            personal_emails: false,
            phone_numbers: true,
        }
    }
}

impl SearchResultsSettings {
    /// Everything off: only the identity floor is projected.
    pub fn minimal() -> Self {
        Self {
            linkedin_profile_url: false,
            full_json: false,
            matching_insights: false,
            enriched_company_data: false,
            enriched_profile: false,
            business_emails: false,
            personal_emails: false,
            phone_numbers: false,
        }
    }
}
