use super::{notify_degraded, print_json};
use anyhow::Result;
use palate_core::FeedbackEngine;

/// Handle the analyze command
pub async fn handle_analyze_command(engine: &FeedbackEngine, customer: &str) -> Result<()> {
    let analysis = engine.analyze(customer).await;
    if analysis.is_error {
        notify_degraded("analysis", "fell back to defaults; see the log for the cause");
    }
    print_json(&analysis)
}
