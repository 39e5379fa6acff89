// 🗺️ Rate Area Index - postal code → set of rate areas
// A postal code may legitimately straddle several rate areas

use crate::records::{read_records, Row, GEOGRAPHY_FIELDS};
use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

/// Column holding the region (state) code
const REGION_COLUMN: usize = 1;

/// Column holding the rate area number
const NUMBER_COLUMN: usize = 4;

// ============================================================================
// RATE AREA
// ============================================================================

/// Normalized rate area key, e.g. "al 11"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RateArea(String);

impl RateArea {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RateArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the shared key for a (region, number) pair
///
/// Region is lower-cased, number is kept verbatim:
/// - ("AL", "11") → "al 11"
/// - ("", "") → " "
pub fn normalize(region: &str, number: &str) -> RateArea {
    RateArea(format!("{} {}", region.to_lowercase(), number))
}

// ============================================================================
// INDEX
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RateAreaIndex {
    areas_by_code: HashMap<String, BTreeSet<RateArea>>,
}

impl RateAreaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from geography rows (zipcode at column 0)
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut index = RateAreaIndex::new();

        for row in rows {
            let area = normalize(row.field(REGION_COLUMN), row.field(NUMBER_COLUMN));
            index.insert(row.field(0), area);
        }

        log::debug!(
            "Rate area index built: {} postal codes from {} rows",
            index.len(),
            rows.len()
        );

        index
    }

    /// Read and build from a geography CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let rows = read_records(path, GEOGRAPHY_FIELDS)?;
        Ok(RateAreaIndex::from_rows(&rows))
    }

    /// Add an area for a code; returns false if it was already known
    pub fn insert(&mut self, postal_code: &str, area: RateArea) -> bool {
        self.areas_by_code
            .entry(postal_code.to_string())
            .or_default()
            .insert(area)
    }

    pub fn rate_areas(&self, postal_code: &str) -> Option<&BTreeSet<RateArea>> {
        self.areas_by_code.get(postal_code)
    }

    /// Number of distinct rate areas (0 for unknown codes)
    pub fn rate_area_count(&self, postal_code: &str) -> usize {
        self.rate_areas(postal_code).map_or(0, BTreeSet::len)
    }

    /// The rate area, only when the code maps to exactly one
    pub fn single_rate_area(&self, postal_code: &str) -> Option<&RateArea> {
        match self.rate_areas(postal_code) {
            Some(areas) if areas.len() == 1 => areas.iter().next(),
            _ => None,
        }
    }

    /// Number of postal codes
    pub fn len(&self) -> usize {
        self.areas_by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas_by_code.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
