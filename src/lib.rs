pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod history;
pub mod http_client;
pub mod models;
pub mod recommendations;
pub mod reporter;
pub mod scorer;
pub mod server;
pub mod tag_status;

use analyzer::Analyzer;
use anyhow::Result;
use cli::Cli;
use colored::*;
use config::Config;
use history::MemoryHistory;
use http_client::HttpFetcher;
use indicatif::{ProgressBar, ProgressStyle};
use reporter::Reporter;
use std::time::Duration;

pub async fn run(args: Cli) -> Result<()> {
    let args = match Config::load(args.config.as_deref())? {
        Some(config) => config.merge_with_cli(&args),
        None => args,
    };

    if args.history_capacity == 0 {
        anyhow::bail!("History capacity must be at least 1");
    }

    let fetcher = HttpFetcher::new(args.timeout)?;
    let analyzer = Analyzer::new(fetcher, MemoryHistory::new(args.history_capacity));

    if args.serve {
        println!("{}", "SEO Tag Inspector - API Server".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!(
            "{} http://{}:{}",
            "Listening on:".bright_white().bold(),
            args.host,
            args.port
        );
        println!(
            "{} {}",
            "History capacity:".bright_white().bold(),
            args.history_capacity
        );
        println!();

        return server::serve(analyzer, &args.host, args.port).await;
    }

    let Some(url) = args.url.as_deref() else {
        anyhow::bail!("A URL is required unless --serve is given");
    };

    let text_output = args.output != "json";

    let spinner = if text_output {
        println!("{}", "SEO Tag Inspector".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} {msg}")
                .expect("Progress bar template should be valid"),
        );
        pb.set_message(format!("Analyzing {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = analyzer.analyze(url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let record = result?;

    if text_output {
        Reporter::print_text_report(&record);
    } else {
        let json = serde_json::to_string_pretty(&record)?;
        println!("{}", json);
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(&record, filename)?;
    }

    Ok(())
}
