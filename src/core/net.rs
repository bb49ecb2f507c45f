// src/core/net.rs
// Blocking HTTP GET. One client per run, reused for every search.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use url::Url;

use crate::config::options::ResolverOptions;
use crate::error::{Error, Result};

/// Source of response bodies. The resolver only ever needs a GET.
pub trait Fetch {
    fn get(&self, url: &Url) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &ResolverOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .timeout(opts.timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &Url) -> Result<String> {
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}

/// `<endpoint>?q=<form-escaped query>&tbm=isch`
pub fn search_url(endpoint: &str, query: &str, mode: (&str, &str)) -> Result<Url> {
    Url::parse_with_params(endpoint, &[("q", query), mode])
        .map_err(|e| Error::Endpoint(s!(endpoint), e))
}
