use anyhow::Context;

use case_api::models::{Case, CaseReward};
use case_api::utils::logger;
use case_api::{CaseCatalog, CatalogConfig};

fn main() -> anyhow::Result<()> {
    logger::init();

    let config = CatalogConfig::from_toml().context("Failed to load case catalog")?;
    let catalog = CaseCatalog::from_config(config).context("Case catalog is invalid")?;

    log::info!("Loaded {} case(s)", catalog.len());

    for case in catalog.cases() {
        let total = catalog.total_chance(case.case_id()).unwrap_or_default();
        log::info!(
            "Case {} ({}) price={} permission={:?}",
            case.case_id(),
            case.display_name(),
            case.price(),
            case.permission(),
        );
        for reward in catalog.rewards(case.case_id()).unwrap_or_default() {
            let draws = if reward.is_limited() {
                format!("{}/{}", reward.remaining_draws(), reward.max_draws())
            } else {
                "unlimited".to_string()
            };
            log::info!(
                "  #{} {} win={:.2}% draws={}",
                reward.index(),
                reward.reward_type(),
                reward.win_chance(total) * 100.0,
                draws,
            );
        }
        if total <= 0.0 {
            log::warn!("Case {} has no reward that can be drawn", case.case_id());
        }
    }

    Ok(())
}
