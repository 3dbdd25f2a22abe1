//! Version command implementation

use anyhow::{Context, Result};
use tally_store::VersionStore;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, open_store};

/// Execute the version command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = open_store(&config, global).await?;

    match store
        .latest_version()
        .await
        .context("Failed to read latest version")?
    {
        Some(version) => println!("{}", version),
        None => println!("no migrations applied"),
    }
    Ok(())
}
