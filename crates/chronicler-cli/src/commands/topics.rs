//! Topics command implementation.

use crate::cli::TopicsArgs;
use crate::commands::load_records;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the topics command: list what a records file holds.
pub fn execute_topics(args: TopicsArgs, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.records)?;
    println!("{}", formatter.format_records(&records)?);
    Ok(())
}
