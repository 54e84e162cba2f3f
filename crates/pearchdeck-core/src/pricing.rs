use crate::settings::{PackageConfig, PackagesConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    #[default]
    Starter,
    Professional,
    Enterprise,
}

impl PackageTier {
    pub fn select<'a>(&self, packages: &'a PackagesConfig) -> &'a PackageConfig {
        match self {
            PackageTier::Starter => &packages.starter,
            PackageTier::Professional => &packages.professional,
            PackageTier::Enterprise => &packages.enterprise,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub package: String,
    pub total_candidates: u64,
    pub overage_candidates: u64,
    pub base_cost: f64,
    pub overage_cost: f64,
    pub total_cost: f64,
}

/// Monthly cost: flat package price plus per-candidate overage above the limit.
pub fn estimate(
    package: &PackageConfig,
    searches_per_month: u64,
    candidates_per_search: u64,
) -> CostEstimate {
    let total_candidates = searches_per_month.saturating_mul(candidates_per_search);
    let overage_candidates = total_candidates.saturating_sub(package.limit);
    let overage_cost = overage_candidates as f64 * package.per_candidate_price;
    CostEstimate {
        package: package.name.clone(),
        total_candidates,
        overage_candidates,
        base_cost: package.monthly_price,
        overage_cost,
        total_cost: package.monthly_price + overage_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_limit_costs_base_price() {
        let p = PackagesConfig::default();
        let e = estimate(PackageTier::Professional.select(&p), 1_000, 50);
        assert_eq!(e.total_candidates, 50_000);
        assert_eq!(e.overage_candidates, 0);
        assert_eq!(e.total_cost, 499.0);
    }

    #[test]
    fn overage_is_charged_per_candidate() {
        let p = PackagesConfig::default();
        let e = estimate(PackageTier::Starter.select(&p), 50_000, 50);
        assert_eq!(e.total_candidates, 2_500_000);
        assert_eq!(e.overage_candidates, 2_490_000);
        assert!((e.overage_cost - 24_900.0).abs() < 1e-6);
        assert!((e.total_cost - 24_999.0).abs() < 1e-6);
        assert_eq!(e.package, "Starter");
    }

    #[test]
    fn partially_stored_tier_prices_with_its_own_rates() {
        let settings: crate::settings::AppSettings = serde_json::from_value(
            serde_json::json!({"packages": {"professional": {"monthlyPrice": 600}}}),
        )
        .unwrap();
        let e = estimate(PackageTier::Professional.select(&settings.packages), 1_000, 110);
        assert_eq!(e.package, "Professional");
        assert_eq!(e.overage_candidates, 10_000);
        assert_eq!(e.base_cost, 600.0);
        assert!((e.overage_cost - 50.0).abs() < 1e-9);
    }
}
