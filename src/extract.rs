use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

use crate::client::Fetch;

static CALLOUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div.alert.alert-info[role="alert"]"#).unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Fetch one rule page and pull its ruling-note paragraphs.
///
/// Failures are not fatal: the page is logged and comes back empty.
pub async fn fetch_callouts<F: Fetch>(fetcher: &F, url: &str) -> Vec<String> {
    match fetcher.get_text(url).await {
        Ok(html) => extract_callouts(&html),
        Err(e) => {
            warn!("Skipping {}: {}", url, e);
            Vec::new()
        }
    }
}

/// Paragraphs from every callout block, in document order.
///
/// Per callout: the text sitting outside any `<p>` comes first (when there is
/// any), followed by each non-empty `<p>`.
pub fn extract_callouts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for callout in document.select(&CALLOUT) {
        let mut bare = String::new();
        collect_bare_text(callout, &mut bare);
        let bare = collapse_ws(&bare);
        if !bare.is_empty() {
            out.push(bare);
        }

        for p in callout.select(&PARAGRAPH) {
            let text = collapse_ws(&p.text().collect::<String>());
            if !text.is_empty() {
                out.push(text);
            }
        }
    }

    out
}

/// Text of `el` and its descendants, skipping `<p>` subtrees.
fn collect_bare_text(el: ElementRef, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(e) if e.name() == "p" => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_bare_text(child_el, buf);
                }
            }
            _ => {}
        }
    }
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
