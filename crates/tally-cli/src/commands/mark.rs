//! Mark command implementation

use anyhow::{Context, Result};
use tally_store::VersionStore;

use crate::cli::{GlobalArgs, MarkArgs};
use crate::commands::common::{load_config, open_store};

/// Execute the mark command
pub async fn execute(args: &MarkArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = open_store(&config, global).await?;

    let applied = !args.down;
    store
        .insert_version(args.version, applied)
        .await
        .with_context(|| format!("Failed to record version {}", args.version))?;

    let state = if applied { "applied" } else { "not applied" };
    println!("Recorded version {} as {}", args.version, state);
    Ok(())
}
