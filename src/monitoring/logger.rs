use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use crate::data::types::ParsedMarket;
use crate::monitoring::display::display_percentage;

pub struct CsvLogger {
    log_path: String,
}

impl CsvLogger {
    pub fn new(log_path: String) -> Result<Self> {
        // Create CSV file with headers if it doesn't exist
        if !std::path::Path::new(&log_path).exists() {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .open(&log_path)?;

            writeln!(
                file,
                "timestamp,asset,rank,market_id,event_slug,top_outcome,top_pct,volume_24hr,volume,liquidity"
            )?;
        }

        Ok(Self { log_path })
    }

    /// Append one row per ranked market for an asset's search
    pub fn log_results(&self, asset: &str, markets: &[ParsedMarket]) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)?;

        let timestamp = Utc::now().to_rfc3339();
        for (rank, market) in markets.iter().enumerate() {
            let (top_name, top_pct) = match market.top_outcome() {
                Some(outcome) => (outcome.name.as_str(), display_percentage(outcome.price).to_string()),
                None => ("", String::new()),
            };

            writeln!(
                file,
                "{},{},{},{},{},{},{},{:.2},{:.2},{:.2}",
                timestamp,
                csv_field(asset),
                rank + 1,
                csv_field(&market.id),
                csv_field(&market.event_slug),
                csv_field(top_name),
                top_pct,
                market.volume_24h,
                market.volume,
                market.liquidity
            )?;
        }

        Ok(())
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
