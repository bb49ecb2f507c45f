//! Scraping *spec* for the image-search results page.
//!
//! Purpose:
//! - Read a results page body and return **one** image URL, or nothing.
//! - Three strategies, tried in a fixed order; the first accepted candidate wins:
//!   1. `embedded_data` – URL tuples inside `AF_initDataCallback(...)` script payloads.
//!   2. `inline_images` – `<img src>` (or `data-src` when `src` is empty) absolute URLs.
//!   3. `preview_meta`  – `<meta property="og:image" content=...>`.
//!
//! Acceptance:
//! - Strategies 1 and 2 drop anything hosted on the engine's thumbnail cache.
//! - Strategy 2 also drops short URLs (heuristic icon filter; configurable).
//! - Strategy 3 is taken as-is when present.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::consts::DATA_CALLBACK_MARKER;
use crate::config::options::ResolverOptions;

/// `["https://host/path.jpg",1200,800]` – url, height, width.
static DATA_TUPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\["(https://[^"]+?)",\d+,\d+\]"#).expect("static regex")
});

/// One named heuristic over a parsed page.
pub struct Strategy {
    pub name: &'static str,
    pub extract: fn(&Html, &Acceptance) -> Option<String>,
}

/// Fixed priority order.
pub const STRATEGIES: &[Strategy] = &[
    Strategy { name: "embedded_data", extract: embedded_data },
    Strategy { name: "inline_images", extract: inline_images },
    Strategy { name: "preview_meta", extract: preview_meta },
];

/// Candidate filter shared by the strategies.
#[derive(Clone, Debug)]
pub struct Acceptance {
    thumbnail_token: String,
    min_inline_url_len: usize,
    /// Lowercased, without the dot.
    extensions: Vec<String>,
}

impl Acceptance {
    pub fn new(thumbnail_token: &str, min_inline_url_len: usize, extensions: &[String]) -> Self {
        Self {
            thumbnail_token: s!(thumbnail_token),
            min_inline_url_len,
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn from_options(opts: &ResolverOptions) -> Self {
        Self::new(&opts.thumbnail_token, opts.min_inline_url_len, &opts.extensions)
    }

    fn is_thumbnail(&self, url: &str) -> bool {
        !self.thumbnail_token.is_empty() && url.contains(&self.thumbnail_token)
    }

    /// URL *ends* with `.ext` (script payload rule).
    fn ends_with_extension(&self, url: &str) -> bool {
        let lc = url.to_ascii_lowercase();
        self.extensions.iter().any(|ext| {
            lc.len() > ext.len() + 1
                && lc.ends_with(ext.as_str())
                && lc.as_bytes()[lc.len() - ext.len() - 1] == b'.'
        })
    }

    /// URL *contains* `.ext` anywhere (element rule; tolerates `?w=800` tails).
    fn mentions_extension(&self, url: &str) -> bool {
        let lc = url.to_ascii_lowercase();
        self.extensions.iter().any(|ext| lc.contains(&format!(".{ext}")))
    }

    fn accepts_embedded(&self, url: &str) -> bool {
        self.ends_with_extension(url) && !self.is_thumbnail(url)
    }

    fn accepts_inline(&self, url: &str) -> bool {
        is_absolute(url)
            && self.mentions_extension(url)
            && !self.is_thumbnail(url)
            && url.len() > self.min_inline_url_len
    }
}

impl Default for Acceptance {
    fn default() -> Self {
        Self::from_options(&ResolverOptions::default())
    }
}

/// Run the strategy chain over a raw body.
/// Returns the winning strategy's name alongside the URL.
pub fn extract_image(body: &str, acceptance: &Acceptance) -> Option<(&'static str, String)> {
    let doc = Html::parse_document(body);
    STRATEGIES
        .iter()
        .find_map(|s| (s.extract)(&doc, acceptance).map(|url| (s.name, url)))
}

/* ---------- strategies ---------- */

/// Script blocks carrying the data-callback marker, URL tuples in document order.
pub fn embedded_data(doc: &Html, acceptance: &Acceptance) -> Option<String> {
    let Ok(sel) = Selector::parse("script") else { return None };

    for script in doc.select(&sel) {
        let text: String = script.text().collect();
        if !text.contains(DATA_CALLBACK_MARKER) {
            continue;
        }
        let hit = DATA_TUPLE
            .captures_iter(&text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .find(|url| acceptance.accepts_embedded(url));
        if let Some(url) = hit {
            return Some(s!(url));
        }
    }
    None
}

/// `<img>` elements: one source each, `src` unless it is missing or empty,
/// else the lazy-load `data-src`. A rejected `src` rejects the element.
pub fn inline_images(doc: &Html, acceptance: &Acceptance) -> Option<String> {
    let Ok(sel) = Selector::parse("img") else { return None };

    doc.select(&sel).find_map(|img| {
        let el = img.value();
        el.attr("src")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| el.attr("data-src").map(str::trim))
            .filter(|url| acceptance.accepts_inline(url))
            .map(String::from)
    })
}

/// `og:image` page metadata, unfiltered.
pub fn preview_meta(doc: &Html, _acceptance: &Acceptance) -> Option<String> {
    let Ok(sel) = Selector::parse(r#"meta[property="og:image"]"#) else { return None };

    doc.select(&sel)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
}

fn is_absolute(url: &str) -> bool {
    let lc = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lc.starts_with("http://") || lc.starts_with("https://")
}
