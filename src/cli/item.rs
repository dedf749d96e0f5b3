use super::{notify_degraded, print_json};
use anyhow::Result;
use palate_core::FeedbackEngine;

/// Handle the item command
pub async fn handle_item_command(engine: &FeedbackEngine, text: &[String], context: &str) -> Result<()> {
    let analysis = engine.analyze_text(&text.join(" "), context).await;
    if analysis.is_error {
        notify_degraded("huggingface", "language services unavailable; showing defaults");
    }
    print_json(&analysis)
}
