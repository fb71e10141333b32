use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::client::Fetch;
use crate::config::Settings;
use crate::discover::fetch_rule_urls;
use crate::extract::fetch_callouts;
use crate::output::write_document;
use crate::sort_key::sort_urls;

/// How a run ended when nothing went wrong on disk.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Listing page unreachable or linked no rule pages.
    NoRuleLinks,
    /// Rule pages were found but none had a callout with text.
    NoCallouts { pages: usize },
    Written { path: PathBuf, pages: usize },
}

/// Discover, fetch each page in chapter order, and write the document.
///
/// Only a failed write is an `Err`; network failures are absorbed upstream.
pub async fn run<F: Fetch>(fetcher: &F, settings: &Settings) -> Result<RunOutcome> {
    let mut urls: Vec<String> = fetch_rule_urls(fetcher, &settings.listing_url)
        .await
        .into_iter()
        .collect();
    if urls.is_empty() {
        return Ok(RunOutcome::NoRuleLinks);
    }
    sort_urls(&mut urls);

    let pb = progress_bar(settings, urls.len())?;

    let mut results: HashMap<String, Vec<String>> = HashMap::new();
    for (i, url) in urls.iter().enumerate() {
        pb.set_message(url.clone());
        if pb.is_hidden() {
            info!("[{}/{}] {}", i + 1, urls.len(), url);
        } else {
            debug!("[{}/{}] {}", i + 1, urls.len(), url);
        }
        let paragraphs = fetch_callouts(fetcher, url).await;
        if !paragraphs.is_empty() {
            results.insert(url.clone(), paragraphs);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if results.is_empty() {
        return Ok(RunOutcome::NoCallouts { pages: urls.len() });
    }

    let mut order: Vec<String> = results.keys().cloned().collect();
    sort_urls(&mut order);
    info!(
        "Writing {} of {} pages to {}",
        order.len(),
        urls.len(),
        settings.output.display()
    );
    write_document(&settings.output, &order, &results)?;

    Ok(RunOutcome::Written {
        path: settings.output.clone(),
        pages: order.len(),
    })
}

/// Bar over `len` pages, hidden when progress is off. A hidden bar means
/// per-page lines go to the log instead.
fn progress_bar(settings: &Settings, len: usize) -> Result<ProgressBar> {
    let pb = if settings.show_progress {
        ProgressBar::new(len as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(pb)
}
