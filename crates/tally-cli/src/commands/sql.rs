//! Sql command implementation

use anyhow::{Context, Result};
use tally_dialect::{check_operation, querier_from_config, CheckOutcome, Operation};

use crate::cli::{GlobalArgs, SqlArgs};
use crate::commands::common::{load_config, verbose};

/// Execute the sql command
pub async fn execute(args: &SqlArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let querier = querier_from_config(&config);

    let operations: Vec<Operation> = if args.operations.is_empty() {
        Operation::ALL.to_vec()
    } else {
        args.operations.iter().copied().map(Operation::from).collect()
    };

    for (i, op) in operations.iter().enumerate() {
        let sql = op.render(querier.as_ref(), &config.table);
        if args.check {
            let outcome = check_operation(querier.as_ref(), *op, &config.table)
                .with_context(|| format!("{} {} is not valid SQL", config.dialect, op))?;
            match outcome {
                CheckOutcome::Parsed => verbose(global, &format!("Checked {}", op)),
                CheckOutcome::Skipped(construct) => verbose(
                    global,
                    &format!("Skipped check of {} (parser lacks {})", op, construct),
                ),
            }
        }
        if i > 0 {
            println!();
        }
        println!("-- {}", op);
        println!("{};", sql);
    }
    Ok(())
}
