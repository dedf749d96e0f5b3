//! Command-line interface module
//!
//! Argument definitions live in `args`; each subcommand has its own handler
//! module. Handlers print pretty JSON on stdout and leave diagnostics to
//! tracing on stderr.

pub mod analyze;
pub mod args;
pub mod assess;
pub mod init;
pub mod item;
pub mod stats;

pub use analyze::handle_analyze_command;
pub use args::{Cli, Commands};
pub use assess::handle_assess_command;
pub use init::handle_init_command;
pub use item::handle_item_command;
pub use stats::handle_stats_command;

use anyhow::{Context, Result};
use palate_core::llm::error_display;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// Tell the user on stderr that a result fell back to defaults.
pub(crate) fn notify_degraded(service: &str, message: &str) {
    eprintln!("{}", error_display::format_service_warning(service, message));
}
