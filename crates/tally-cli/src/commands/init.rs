//! Init command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, open_store};

/// Execute the init command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    open_store(&config, global).await?;
    println!(
        "Bookkeeping table {} ready in {}",
        config.table, config.database.path
    );
    Ok(())
}
