// 📋 Plan Index - rate area → plans
// Shares its key space with the rate area index via normalize()

use crate::error::SlcspError;
use crate::rate_area::{normalize, RateArea};
use crate::records::{read_records, Row, PLAN_FIELDS};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

// Known tiers (metal levels). Anything else is passed through as-is.
pub const BRONZE: &str = "bronze";
pub const SILVER: &str = "silver";
pub const GOLD: &str = "gold";
pub const PLATINUM: &str = "platinum";
pub const CATASTROPHIC: &str = "catastrophic";

// ============================================================================
// PLAN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub id: String,

    /// Lower-cased metal level
    pub tier: String,

    pub rate: f64,

    pub rate_area: RateArea,
}

impl Plan {
    /// Parse a plan row: plan_id,state,metal_level,rate,rate_area
    pub fn from_row(row: &Row, source_name: &str) -> Result<Self> {
        let rate = parse_rate(row.field(3)).ok_or_else(|| SlcspError::InvalidRate {
            source_name: source_name.to_string(),
            line: row.line,
            value: row.field(3).to_string(),
        })?;

        Ok(Plan {
            id: row.field(0).to_string(),
            tier: row.field(2).to_lowercase(),
            rate,
            rate_area: normalize(row.field(1), row.field(4)),
        })
    }

    pub fn is_tier(&self, tier: &str) -> bool {
        self.tier.eq_ignore_ascii_case(tier)
    }
}

/// NaN and infinities are rejected along with plain garbage
fn parse_rate(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|rate| rate.is_finite())
}

// ============================================================================
// INDEX
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PlanIndex {
    plans_by_area: HashMap<RateArea, Vec<Plan>>,
}

impl PlanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plan rows, failing on the first unparseable rate
    pub fn from_rows(rows: &[Row], source_name: &str) -> Result<Self> {
        let mut index = PlanIndex::new();

        for row in rows {
            index.insert(Plan::from_row(row, source_name)?);
        }

        log::debug!(
            "Plan index built: {} plans across {} rate areas",
            index.plan_count(),
            index.area_count()
        );

        Ok(index)
    }

    /// Read and build from a plans CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let rows = read_records(path, PLAN_FIELDS)?;
        PlanIndex::from_rows(&rows, &path.display().to_string())
            .with_context(|| format!("Failed to build plan index from {}", path.display()))
    }

    /// Append a plan to its rate area, keeping source order
    pub fn insert(&mut self, plan: Plan) {
        self.plans_by_area
            .entry(plan.rate_area.clone())
            .or_default()
            .push(plan);
    }

    /// All plans for an area (empty for unknown areas)
    pub fn plans(&self, area: &RateArea) -> &[Plan] {
        self.plans_by_area
            .get(area)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn plans_with_tier<'a>(
        &'a self,
        area: &RateArea,
        tier: &'a str,
    ) -> impl Iterator<Item = &'a Plan> + 'a {
        self.plans(area).iter().filter(move |plan| plan.is_tier(tier))
    }

    pub fn area_count(&self) -> usize {
        self.plans_by_area.len()
    }

    pub fn plan_count(&self) -> usize {
        self.plans_by_area.values().map(Vec::len).sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================
