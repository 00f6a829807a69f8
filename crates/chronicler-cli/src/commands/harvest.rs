//! Harvest command implementation.

use crate::cli::HarvestArgs;
use crate::commands::build_provider;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chronicler_extractor::TopicExtractor;
use chronicler_fetch::ArticleFetcher;
use std::fs;

/// Execute the harvest command: fetch, extract, persist.
pub async fn execute_harvest(
    args: HarvestArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let urls = collect_urls(&args)?;

    let fetcher = ArticleFetcher::new();
    let articles = fetcher.fetch_all(&urls).await;

    for article in &articles {
        if article.success {
            println!(
                "{}",
                formatter.success(&format!(
                    "{}: {} characters",
                    article.title,
                    article.content.len()
                ))
            );
        } else {
            println!(
                "{}",
                formatter.warning(&format!("{}: fetch failed ({})", article.url, article.content))
            );
        }
    }

    if !articles.iter().any(|a| a.is_extractable()) {
        return Err(CliError::InvalidInput(
            "No article was fetched successfully".to_string(),
        ));
    }

    let provider = build_provider(config, args.model)?;
    let mut extractor = TopicExtractor::new(provider, config.extractor.clone());
    let records = extractor.batch_extract(&articles).await;

    fs::write(&args.output, serde_json::to_string_pretty(&records)?)?;

    println!("{}", formatter.format_records(&records)?);
    println!(
        "{}",
        formatter.success(&format!(
            "Wrote {} records to {}",
            records.len(),
            args.output.display()
        ))
    );

    Ok(())
}

/// Combine positional URLs with the optional URL file.
fn collect_urls(args: &HarvestArgs) -> Result<Vec<String>> {
    let mut urls = args.urls.clone();

    if let Some(path) = &args.urls_file {
        let contents = fs::read_to_string(path)?;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            urls.push(line.to_string());
        }
    }

    if urls.is_empty() {
        return Err(CliError::InvalidInput(
            "No URLs provided; pass them as arguments or via --urls-file".to_string(),
        ));
    }

    Ok(urls)
}
