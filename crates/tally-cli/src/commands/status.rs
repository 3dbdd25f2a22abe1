//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use tally_store::VersionStore;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_config, open_store};

/// Current state of one version
#[derive(Debug, Serialize)]
struct VersionStatus {
    version_id: i64,
    is_applied: bool,
    recorded_at: String,
    records: usize,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = open_store(&config, global).await?;

    let records = store
        .list_migrations()
        .await
        .context("Failed to list migrations")?;

    // Rows arrive highest version first; repeated versions are adjacent.
    let mut statuses: Vec<VersionStatus> = Vec::new();
    for record in &records {
        if let Some(last) = statuses.last_mut() {
            if last.version_id == record.version_id {
                last.records += 1;
                continue;
            }
        }
        let state = store
            .get_migration(record.version_id)
            .await
            .with_context(|| format!("Failed to read version {}", record.version_id))?;
        let (is_applied, recorded_at) = match state {
            Some(s) => (s.is_applied, s.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => (record.is_applied, String::new()),
        };
        statuses.push(VersionStatus {
            version_id: record.version_id,
            is_applied,
            recorded_at,
            records: 1,
        });
    }

    match args.output {
        StatusOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
        StatusOutput::Table => print_table(&statuses),
    }
    Ok(())
}

fn print_table(statuses: &[VersionStatus]) {
    if statuses.is_empty() {
        println!("no migrations recorded");
        return;
    }
    println!("{:<20} {:<12} {:<20} RECORDS", "VERSION", "APPLIED", "RECORDED AT");
    for s in statuses {
        println!(
            "{:<20} {:<12} {:<20} {}",
            s.version_id,
            if s.is_applied { "yes" } else { "no" },
            s.recorded_at,
            s.records
        );
    }
}
