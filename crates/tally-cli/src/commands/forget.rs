//! Forget command implementation

use anyhow::{Context, Result};
use tally_store::VersionStore;

use crate::cli::{ForgetArgs, GlobalArgs};
use crate::commands::common::{load_config, open_store};

/// Execute the forget command
pub async fn execute(args: &ForgetArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = open_store(&config, global).await?;

    if store.get_migration(args.version).await?.is_none() {
        println!("Version {} has no records", args.version);
        return Ok(());
    }

    store
        .delete_version(args.version)
        .await
        .with_context(|| format!("Failed to delete version {}", args.version))?;
    println!("Deleted all records of version {}", args.version);
    Ok(())
}
