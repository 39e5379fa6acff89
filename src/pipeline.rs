// 🔗 Pipeline - load → index → resolve → write
// Every input is read and validated before a single output byte is written

use crate::config::Config;
use crate::output::render_results;
use crate::plans::PlanIndex;
use crate::rate_area::RateAreaIndex;
use crate::records::{read_records, REQUEST_FIELDS};
use crate::resolver::{ResolvedCode, Resolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

// ============================================================================
// DATASETS
// ============================================================================

/// The three inputs, fully loaded and indexed
#[derive(Debug, Clone)]
pub struct Datasets {
    pub rate_areas: RateAreaIndex,
    pub plans: PlanIndex,
    pub requests: Vec<String>,
}

impl Datasets {
    pub fn load(config: &Config) -> Result<Self> {
        let rate_areas = RateAreaIndex::from_path(&config.zips_path)
            .context("Failed to load geography dataset")?;
        log::info!(
            "Loaded {} postal codes from {}",
            rate_areas.len(),
            config.zips_path.display()
        );

        let plans = PlanIndex::from_path(&config.plans_path).context("Failed to load plan dataset")?;
        log::info!(
            "Loaded {} plans in {} rate areas from {}",
            plans.plan_count(),
            plans.area_count(),
            config.plans_path.display()
        );

        let requests = load_requests(&config.requests_path)
            .context("Failed to load requested postal codes")?;
        log::info!(
            "Loaded {} requested postal codes from {}",
            requests.len(),
            config.requests_path.display()
        );

        Ok(Datasets {
            rate_areas,
            plans,
            requests,
        })
    }

    pub fn resolve(&self, tier: &str) -> Vec<ResolvedCode> {
        Resolver::new(&self.rate_areas, &self.plans)
            .with_tier(tier)
            .resolve_all(&self.requests)
    }
}

/// Requested codes in file order (column 0)
pub fn load_requests(path: &Path) -> Result<Vec<String>> {
    let rows = read_records(path, REQUEST_FIELDS)?;
    Ok(rows.iter().map(|row| row.field(0).to_string()).collect())
}

// ============================================================================
// RUN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub requested: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ResolvedCode]) -> Self {
        let resolved = results
            .iter()
            .filter(|result| result.resolution.is_resolved())
            .count();

        RunSummary {
            requested: results.len(),
            resolved,
            unresolved: results.len() - resolved,
        }
    }
}

/// Run the whole computation and write the table to `writer`
pub fn run<W: Write>(config: &Config, mut writer: W) -> Result<RunSummary> {
    let datasets = Datasets::load(config)?;
    let results = datasets.resolve(&config.tier);

    let table = render_results(&results)?;
    writer
        .write_all(table.as_bytes())
        .context("Failed to write output table")?;
    writer.flush().context("Failed to flush output table")?;

    let summary = RunSummary::from_results(&results);
    log::info!(
        "Resolved {} of {} postal codes ({} without answer)",
        summary.resolved,
        summary.requested,
        summary.unresolved
    );

    Ok(summary)
}
