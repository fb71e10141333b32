use std::path::PathBuf;
use std::time::Duration;

pub const LISTING_URL: &str = "https://blogs.magicjudges.org/rules/ipg/";
pub const OUTPUT_FILE: &str = "extracted_rules.txt";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Run-wide settings, fixed once the client is built.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listing_url: String,
    pub output: PathBuf,
    pub user_agent: String,
    /// Applied to every request, listing page included.
    pub timeout: Duration,
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listing_url: LISTING_URL.to_string(),
            output: PathBuf::from(OUTPUT_FILE),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            show_progress: true,
        }
    }
}
