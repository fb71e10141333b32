use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ipg(\d+)-(\d+)").unwrap());
static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ipg(\d+)").unwrap());
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ipg\d+(-\d+)?").unwrap());

/// (chapter, section) ordering key for a rule page URL.
///
/// Derived `Ord` compares chapter first, then section, both numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub chapter: u32,
    pub section: u32,
}

impl SortKey {
    /// Key for URLs with no recognizable chapter. Sorts after every real
    /// chapter as long as chapters stay below 999.
    pub const UNSORTED: SortKey = SortKey {
        chapter: 999,
        section: 999,
    };
}

pub fn sort_key(url: &str) -> SortKey {
    if let Some(caps) = SECTION_RE.captures(url) {
        return match (caps[1].parse(), caps[2].parse()) {
            (Ok(chapter), Ok(section)) => SortKey { chapter, section },
            _ => SortKey::UNSORTED,
        };
    }
    if let Some(caps) = CHAPTER_RE.captures(url) {
        return match caps[1].parse() {
            Ok(chapter) => SortKey { chapter, section: 0 },
            Err(_) => SortKey::UNSORTED,
        };
    }
    SortKey::UNSORTED
}

/// Sort key order, ties broken on the URL itself.
pub fn compare_urls(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

pub fn sort_urls(urls: &mut [String]) {
    urls.sort_by(|a, b| compare_urls(a, b));
}

/// Short header for a page: "ipg3-2", "ipg3", or the whole URL.
pub fn section_label(url: &str) -> &str {
    LABEL_RE.find(url).map(|m| m.as_str()).unwrap_or(url)
}
