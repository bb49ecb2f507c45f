// tests/resolve_fixtures.rs
//
// Resolver against captured search pages, no network.
//
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use facility_images::config::options::ResolverOptions;
use facility_images::core::net::Fetch;
use facility_images::error::{Error, Result};
use facility_images::{EntityQuery, ImageRef, Resolve, Resolver};
use url::Url;

fn fixture(name: &str) -> String {
    let p: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name].iter().collect();
    fs::read_to_string(p).unwrap()
}

/// Serves one body; counts requests.
struct Page {
    body: Option<String>,
    hits: Cell<usize>,
}

impl Page {
    fn new(name: &str) -> Self {
        Self { body: Some(fixture(name)), hits: Cell::new(0) }
    }
    fn unreachable() -> Self {
        Self { body: None, hits: Cell::new(0) }
    }
}

impl Fetch for &Page {
    fn get(&self, _url: &Url) -> Result<String> {
        self.hits.set(self.hits.get() + 1);
        self.body.clone().ok_or(Error::Status(503))
    }
}

fn resolve_with(page: &Page) -> ImageRef {
    let resolver = Resolver::new(page, ResolverOptions::default());
    resolver.resolve(&EntityQuery::new("Maple Archery Club", "Ottawa", "Ontario"))
}

fn looks_like_image_url(url: &str) -> bool {
    let lc = url.to_ascii_lowercase();
    lc.starts_with("https://")
        && [".jpg", ".jpeg", ".png", ".webp"].iter().any(|e| lc.contains(e))
}

#[test]
fn script_data_beats_img_and_meta() {
    let page = Page::new("search_all_strategies.html");
    assert_eq!(
        resolve_with(&page),
        ImageRef::Found("https://www.mapleclub.example.org/images/range-outdoor.jpg".into())
    );
    assert_eq!(page.hits.get(), 1);
}

#[test]
fn thumbnails_and_placeholders_skipped_then_lazy_img_used() {
    let page = Page::new("search_inline_only.html");
    let got = resolve_with(&page);
    assert_eq!(
        got,
        ImageRef::Found(
            "https://www.bowhunters.example.com/media/club/3d-course-entrance.webp?w=1200".into()
        )
    );
    assert!(!got.as_str().contains("gstatic"));
    assert!(!got.as_str().contains("placeholder-backed-banner"));
}

#[test]
fn meta_image_is_last_resort() {
    let page = Page::new("search_meta_only.html");
    assert_eq!(
        resolve_with(&page),
        ImageRef::Found("https://www.maplearcheryclub.example.ca/og/clubhouse.jpg".into())
    );
}

#[test]
fn block_page_is_not_found() {
    let page = Page::new("search_empty.html");
    assert_eq!(resolve_with(&page), ImageRef::NotFound);
}

#[test]
fn transport_failure_is_not_found_after_one_attempt() {
    let page = Page::unreachable();
    assert_eq!(resolve_with(&page), ImageRef::NotFound);
    assert_eq!(page.hits.get(), 1);
}

#[test]
fn every_fixture_yields_url_or_sentinel() {
    for name in [
        "search_all_strategies.html",
        "search_inline_only.html",
        "search_meta_only.html",
        "search_empty.html",
    ] {
        match resolve_with(&Page::new(name)) {
            ImageRef::Found(url) => assert!(looks_like_image_url(&url), "{name}: {url}"),
            ImageRef::NotFound => {}
        }
    }
}
