// 🎯 SLCSP Resolver - second lowest cost silver plan per postal code
// "No answer" is a normal outcome, never an error

use crate::plans::{PlanIndex, SILVER};
use crate::rate_area::RateAreaIndex;
use serde::Serialize;
use std::fmt;

// ============================================================================
// OUTCOMES
// ============================================================================

/// Why a postal code has no rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NoAnswerReason {
    /// Zero (unknown code) or several (ambiguous code) rate areas
    RateAreaCount(usize),

    /// Fewer than two plans of the target tier in the rate area
    InsufficientPlans { tier: String, count: usize },

    /// Every plan of the target tier shares this one price
    AllTied(f64),
}

impl fmt::Display for NoAnswerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoAnswerReason::RateAreaCount(count) => write!(f, "has {} rate areas", count),
            NoAnswerReason::InsufficientPlans { tier, count } => {
                write!(f, "has {} {} plan(s)", count, tier)
            }
            NoAnswerReason::AllTied(rate) => {
                write!(f, "has no second lowest rate (all plans at {:.2})", rate)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Resolution {
    Rate(f64),
    NoAnswer(NoAnswerReason),
}

impl Resolution {
    pub fn rate(&self) -> Option<f64> {
        match self {
            Resolution::Rate(rate) => Some(*rate),
            Resolution::NoAnswer(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Rate(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCode {
    pub postal_code: String,
    pub resolution: Resolution,
}

// ============================================================================
// SELECTION
// ============================================================================

/// Second lowest *distinct* rate
///
/// Sorts, takes the minimum, then scans forward for the first rate strictly
/// above it. Ties on the minimum never count as the second lowest, so
/// [200, 200, 250] gives 250, not 200.
pub fn second_lowest_distinct(rates: &[f64]) -> Option<f64> {
    let mut sorted = rates.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (&lowest, rest) = sorted.split_first()?;
    rest.iter().copied().find(|&rate| rate > lowest)
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Reads both indexes; holds no mutable state
pub struct Resolver<'a> {
    rate_areas: &'a RateAreaIndex,
    plans: &'a PlanIndex,
    tier: String,
}

impl<'a> Resolver<'a> {
    /// Resolver for the silver tier
    pub fn new(rate_areas: &'a RateAreaIndex, plans: &'a PlanIndex) -> Self {
        Resolver {
            rate_areas,
            plans,
            tier: SILVER.to_string(),
        }
    }

    /// Use another target tier (matched case-insensitively)
    pub fn with_tier(mut self, tier: &str) -> Self {
        self.tier = tier.to_lowercase();
        self
    }

    pub fn tier(&self) -> &str {
        &self.tier
    }

    pub fn resolve(&self, postal_code: &str) -> Resolution {
        let area = match self.rate_areas.single_rate_area(postal_code) {
            Some(area) => area,
            None => {
                let count = self.rate_areas.rate_area_count(postal_code);
                return Resolution::NoAnswer(NoAnswerReason::RateAreaCount(count));
            }
        };

        let rates: Vec<f64> = self
            .plans
            .plans_with_tier(area, &self.tier)
            .map(|plan| plan.rate)
            .collect();

        // A second lowest needs at least two values
        if rates.len() < 2 {
            return Resolution::NoAnswer(NoAnswerReason::InsufficientPlans {
                tier: self.tier.clone(),
                count: rates.len(),
            });
        }

        match second_lowest_distinct(&rates) {
            Some(rate) => Resolution::Rate(rate),
            None => Resolution::NoAnswer(NoAnswerReason::AllTied(rates[0])),
        }
    }

    /// Resolve every code, one result per code, input order kept
    pub fn resolve_all<S: AsRef<str>>(&self, postal_codes: &[S]) -> Vec<ResolvedCode> {
        postal_codes
            .iter()
            .map(|code| {
                let postal_code = code.as_ref();
                let resolution = self.resolve(postal_code);

                match &resolution {
                    Resolution::Rate(rate) => log::info!(
                        "Zip code {} has second lowest {} plan rate of {:.2}",
                        postal_code,
                        self.tier,
                        rate
                    ),
                    Resolution::NoAnswer(reason) => {
                        log::info!("Zip code {} {}; no result", postal_code, reason)
                    }
                }

                ResolvedCode {
                    postal_code: postal_code.to_string(),
                    resolution,
                }
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
