use anyhow::{Context, Result};
use console::style;
use palate_core::PalateConfig;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize palate configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    let created = PalateConfig::bootstrap_project(workspace, force)
        .with_context(|| "failed to initialize configuration files")?;

    if created.is_empty() {
        println!(
            "{} palate.toml already exists; pass --force to overwrite",
            style("Skipped:").yellow().bold()
        );
    } else {
        for file in created {
            println!("{} {file}", style("Created:").green().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("palate.toml");

        handle_init_command(temp_dir.path(), false).unwrap();
        std::fs::write(&path, "[cache]\nttl_seconds = 5\n").unwrap();

        handle_init_command(temp_dir.path(), false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("ttl_seconds = 5"));

        handle_init_command(temp_dir.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("ttl_seconds = 3600"));
    }
}
