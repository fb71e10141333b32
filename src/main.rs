mod client;
mod config;
mod discover;
mod extract;
mod output;
mod pipeline;
mod sort_key;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::error;

use client::HttpClient;
use config::Settings;
use pipeline::RunOutcome;

#[derive(Parser)]
#[command(
    name = "ipg_rules",
    about = "Collect official ruling notes from the IPG annotation pages into one text file"
)]
struct Cli {
    /// Page linking to every rule sub-page
    #[arg(long, default_value = config::LISTING_URL)]
    listing_url: String,
    /// Output file (overwritten)
    #[arg(short, long, default_value = config::OUTPUT_FILE)]
    output: PathBuf,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = config::REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            listing_url: self.listing_url,
            output: self.output,
            timeout: Duration::from_secs(self.timeout_secs),
            show_progress: !self.no_progress,
            ..Settings::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let settings = Cli::parse().into_settings();
    let client = HttpClient::new(&settings)?;

    match pipeline::run(&client, &settings).await {
        Ok(RunOutcome::NoRuleLinks) => {
            println!("Nothing to process: no rule pages were discovered.");
        }
        Ok(RunOutcome::NoCallouts { pages }) => {
            println!("No ruling notes extracted from any of the {} rule pages.", pages);
        }
        Ok(RunOutcome::Written { path, pages }) => {
            println!("Saved {} pages of ruling notes to {}", pages, path.display());
        }
        Err(e) => {
            error!("{:#}", e);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
