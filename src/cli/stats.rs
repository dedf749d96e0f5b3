use super::print_json;
use anyhow::{Context, Result};
use palate_core::FeedbackEngine;

/// Handle the stats command
pub async fn handle_stats_command(engine: &FeedbackEngine, customer: &str) -> Result<()> {
    let statistics = engine
        .statistics(customer)
        .await
        .with_context(|| format!("No statistics for customer '{customer}'"))?;
    print_json(&statistics)
}
