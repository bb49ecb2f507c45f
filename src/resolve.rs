// src/resolve.rs
//! One search-and-extract cycle per entity.
//!
//! Network failures and non-success statuses are routine here: they are logged
//! and mapped to `ImageRef::NotFound`, never returned as errors.

use url::Url;

use crate::config::consts::IMAGE_MODE_PARAM;
use crate::config::options::ResolverOptions;
use crate::core::net::{self, Fetch, HttpFetcher};
use crate::error::Result;
use crate::model::{EntityQuery, ImageRef};
use crate::specs::search_page::{Acceptance, extract_image};

/// Anything that can turn a query into an image reference.
/// The driver only depends on this.
pub trait Resolve {
    fn resolve(&self, query: &EntityQuery) -> ImageRef;
}

pub struct Resolver<F: Fetch> {
    fetcher: F,
    opts: ResolverOptions,
    acceptance: Acceptance,
}

impl Resolver<HttpFetcher> {
    /// Resolver backed by a real blocking HTTP client.
    pub fn http(opts: ResolverOptions) -> Result<Self> {
        let fetcher = HttpFetcher::new(&opts)?;
        Ok(Self::new(fetcher, opts))
    }
}

impl<F: Fetch> Resolver<F> {
    pub fn new(fetcher: F, opts: ResolverOptions) -> Self {
        let acceptance = Acceptance::from_options(&opts);
        Self { fetcher, opts, acceptance }
    }

    pub fn search_url(&self, query: &EntityQuery) -> Result<Url> {
        let text = compose_query(query, &self.opts.keyword);
        net::search_url(&self.opts.endpoint, &text, IMAGE_MODE_PARAM)
    }
}

impl<F: Fetch> Resolve for Resolver<F> {
    fn resolve(&self, query: &EntityQuery) -> ImageRef {
        let url = match self.search_url(query) {
            Ok(url) => url,
            Err(e) => {
                loge!("Error searching for {}: {e}", query.name);
                return ImageRef::NotFound;
            }
        };
        logd!("GET {url}");

        let body = match self.fetcher.get(&url) {
            Ok(body) => body,
            Err(e) => {
                loge!("Error searching for {}: {e}", query.name);
                return ImageRef::NotFound;
            }
        };

        let hit = extract_image(&body, &self.acceptance);
        match &hit {
            Some((strategy, image)) => logd!("{}: {strategy} → {image}", query.name),
            None => logd!("{}: no strategy matched ({} bytes)", query.name, body.len()),
        }
        ImageRef::from_candidate(hit.map(|(_, image)| image))
    }
}

/// `name locality region keyword`, blanks skipped, each part trimmed.
pub fn compose_query(query: &EntityQuery, keyword: &str) -> String {
    join!(
        query.name.trim(),
        query.locality.trim(),
        query.region.trim(),
        keyword.trim(),
    )
}
