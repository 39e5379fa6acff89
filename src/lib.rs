// SLCSP Calculator - Core Library
// Second lowest cost silver plan per postal code, from three CSV datasets

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod plans;
pub mod rate_area;
pub mod records;
pub mod resolver;

// Re-export commonly used types
pub use config::Config;
pub use error::SlcspError;
pub use output::{render_results, write_results};
pub use pipeline::{load_requests, run, Datasets, RunSummary};
pub use plans::{Plan, PlanIndex};
pub use rate_area::{normalize, RateArea, RateAreaIndex};
pub use records::{read_records, read_records_from, Row};
pub use resolver::{second_lowest_distinct, NoAnswerReason, Resolution, ResolvedCode, Resolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
