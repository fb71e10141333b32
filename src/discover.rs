use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, error, info};
use url::Url;

use crate::client::Fetch;

static RULE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/rules/ipg\d+(-\d+)?/?$").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Fetch the listing page and return every rule page it links to.
///
/// A failed fetch is logged and yields an empty set; the caller decides
/// whether that ends the run.
pub async fn fetch_rule_urls<F: Fetch>(fetcher: &F, listing_url: &str) -> HashSet<String> {
    info!("Discovering rule links from {}", listing_url);
    let html = match fetcher.get_text(listing_url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to fetch listing page {}: {}", listing_url, e);
            return HashSet::new();
        }
    };

    let base = match Url::parse(listing_url) {
        Ok(base) => base,
        Err(e) => {
            error!("Listing URL {} is not absolute: {}", listing_url, e);
            return HashSet::new();
        }
    };

    let urls = parse_rule_links(&html, &base);
    info!("Found {} unique rule pages", urls.len());
    urls
}

/// Resolve every anchor against `base` and keep those ending in
/// `/rules/ipg<N>[-<M>][/]`. Trailing slashes are stripped so both spellings
/// collapse into one entry.
pub fn parse_rule_links(html: &str, base: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut urls = HashSet::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let resolved = match base.join(href.trim()) {
            Ok(u) => u,
            Err(e) => {
                debug!("Skipping unresolvable href {:?}: {}", href, e);
                continue;
            }
        };
        if resolved.query().is_some() || resolved.fragment().is_some() {
            continue;
        }
        if !RULE_PATH_RE.is_match(resolved.path()) {
            continue;
        }
        urls.insert(resolved.as_str().trim_end_matches('/').to_string());
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StubFetch;

    const LISTING: &str = "https://blogs.magicjudges.org/rules/ipg/";

    fn base() -> Url {
        Url::parse(LISTING).unwrap()
    }

    fn sorted(set: HashSet<String>) -> Vec<String> {
        let mut v: Vec<String> = set.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn keeps_only_rule_links() {
        let html = r#"
            <a href="https://blogs.magicjudges.org/rules/ipg1/">Chapter 1</a>
            <a href="https://blogs.magicjudges.org/rules/ipg2-3">2.3</a>
            <a href="https://blogs.magicjudges.org/rules/ipg/">Listing</a>
            <a href="https://blogs.magicjudges.org/rules/ipg2-3/comments">Comments</a>
            <a href="https://blogs.magicjudges.org/rules/mtr1-1/">MTR</a>
            <a href="https://blogs.magicjudges.org/rules/ipg4-1/#respond">Anchor</a>
            <a>No href</a>
        "#;
        assert_eq!(
            sorted(parse_rule_links(html, &base())),
            [
                "https://blogs.magicjudges.org/rules/ipg1",
                "https://blogs.magicjudges.org/rules/ipg2-3",
            ]
        );
    }

    #[test]
    fn trailing_slash_variants_dedupe() {
        let html = r#"
            <a href="https://blogs.magicjudges.org/rules/ipg3-2/">with</a>
            <a href="https://blogs.magicjudges.org/rules/ipg3-2">without</a>
        "#;
        let urls = parse_rule_links(html, &base());
        assert_eq!(urls.len(), 1);
        assert!(urls.contains("https://blogs.magicjudges.org/rules/ipg3-2"));
    }

    #[test]
    fn relative_hrefs_resolve_against_listing() {
        let html = r#"
            <a href="/rules/ipg5/">root-relative</a>
            <a href="../ipg5-1/">dot-relative</a>
        "#;
        assert_eq!(
            sorted(parse_rule_links(html, &base())),
            [
                "https://blogs.magicjudges.org/rules/ipg5",
                "https://blogs.magicjudges.org/rules/ipg5-1",
            ]
        );
    }

    #[test]
    fn rule_path_in_query_string_is_rejected() {
        let html = r#"
            <a href="https://blogs.magicjudges.org/login?redirect=/rules/ipg2-1">Log in</a>
            <a href="/rules/ipg2-1/?replytocom=7">Reply</a>
            <a href="/rules/ipg2-1/">2.1</a>
        "#;
        assert_eq!(
            sorted(parse_rule_links(html, &base())),
            ["https://blogs.magicjudges.org/rules/ipg2-1"]
        );
    }

    #[tokio::test]
    async fn failed_listing_fetch_is_empty() {
        let urls = fetch_rule_urls(&StubFetch::default(), LISTING).await;
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn fetches_and_parses_listing() {
        let stub = StubFetch::default()
            .with_page(LISTING, r#"<ul><li><a href="/rules/ipg1/">1</a></li></ul>"#);
        let urls = fetch_rule_urls(&stub, LISTING).await;
        assert_eq!(sorted(urls), ["https://blogs.magicjudges.org/rules/ipg1"]);
    }
}
