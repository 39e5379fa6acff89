// 🧾 Output table - zipcode,rate

use crate::resolver::ResolvedCode;
use anyhow::{Context, Result};
use std::io::Write;

pub const HEADER: [&str; 2] = ["zipcode", "rate"];

/// Write the header plus one row per result; unresolved rows get an empty rate
pub fn write_results<W: Write>(writer: W, results: &[ResolvedCode]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .context("Failed to write output header")?;

    for result in results {
        let rate = result
            .resolution
            .rate()
            .map(|rate| format!("{:.2}", rate))
            .unwrap_or_default();

        csv_writer
            .write_record([result.postal_code.as_str(), rate.as_str()])
            .with_context(|| format!("Failed to write output row for {}", result.postal_code))?;
    }

    csv_writer.flush().context("Failed to flush output")?;

    Ok(())
}

pub fn render_results(results: &[ResolvedCode]) -> Result<String> {
    let mut buffer = Vec::new();
    write_results(&mut buffer, results)?;
    String::from_utf8(buffer).context("Output table is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{NoAnswerReason, Resolution};

    fn resolved(code: &str, resolution: Resolution) -> ResolvedCode {
        ResolvedCode {
            postal_code: code.to_string(),
            resolution,
        }
    }

    #[test]
    fn test_render_table() {
        let results = vec![
            resolved("10001", Resolution::Rate(250.0)),
            resolved("07001", Resolution::NoAnswer(NoAnswerReason::RateAreaCount(2))),
            resolved("64148", Resolution::Rate(245.2)),
        ];

        let table = render_results(&results).unwrap();

        assert_eq!(table, "zipcode,rate\n10001,250.00\n07001,\n64148,245.20\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_results(&[]).unwrap(), "zipcode,rate\n");
    }

    #[test]
    fn test_rate_rounds_to_cents() {
        let results = vec![resolved("1", Resolution::Rate(290.604))];
        assert_eq!(render_results(&results).unwrap(), "zipcode,rate\n1,290.60\n");
    }
}
