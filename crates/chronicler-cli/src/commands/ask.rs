//! Ask command implementation.

use crate::cli::AskArgs;
use crate::commands::{build_provider, load_records};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chronicler_dispatch::Dispatcher;

/// Execute the ask command: answer questions over harvested records.
pub async fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.questions.is_empty() {
        return Err(CliError::InvalidInput("No questions provided".to_string()));
    }

    let records = load_records(&args.records)?;
    if records.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} holds no records; run harvest first",
            args.records.display()
        )));
    }

    let provider = build_provider(config, args.model)?;
    let dispatcher = Dispatcher::new(provider, records);

    for question in &args.questions {
        let outcome = dispatcher.answer(question).await;
        println!("{}\n", formatter.format_answer(question, &outcome));
    }

    Ok(())
}
