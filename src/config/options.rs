// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub resolver: ResolverOptions,
    pub driver: DriverOptions,
    pub input: InputOptions,
    pub output: OutputOptions,
}

impl AppOptions {
    /// Load options from a TOML file. A missing file yields defaults;
    /// a present but malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)
                .map_err(|source| Error::Config { path: path.to_path_buf(), source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Error::Io { path: path.to_path_buf(), source }),
        }
    }
}

/// Everything the resolver needs; no globals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Appended to every query after the region.
    pub keyword: String,
    /// Candidates containing this are search-engine thumbnails.
    pub thumbnail_token: String,
    /// Inline `<img>` URLs must be longer than this. Heuristic icon filter.
    pub min_inline_url_len: usize,
    pub extensions: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            endpoint: s!(SEARCH_ENDPOINT),
            user_agent: s!(USER_AGENT),
            timeout_secs: TIMEOUT_SECS,
            keyword: s!(DOMAIN_KEYWORD),
            thumbnail_token: s!(THUMBNAIL_HOST_TOKEN),
            min_inline_url_len: MIN_INLINE_URL_LEN,
            extensions: IMAGE_EXTENSIONS.iter().map(|e| s!(*e)).collect(),
        }
    }
}

impl ResolverOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Minimum spacing between two consecutive searches.
    pub delay_ms: u64,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { delay_ms: REQUEST_PAUSE_MS }
    }
}

impl DriverOptions {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    pub path: Option<PathBuf>,
    pub name_column: String,
    pub locality_column: String,
    /// Per-row region; falls back to `region` when absent or blank.
    pub region_column: Option<String>,
    pub region: String,
    /// Window over the valid entities (after empty names are dropped).
    pub skip: usize,
    pub limit: Option<usize>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            path: None,
            name_column: s!(NAME_COLUMN),
            locality_column: s!(LOCALITY_COLUMN),
            region_column: None,
            region: s!(DEFAULT_REGION),
            skip: 0,
            limit: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub path: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_OUT_FILE) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let opts = AppOptions::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(opts, AppOptions::default());
        assert_eq!(opts.driver.delay(), Duration::from_secs(2));
        assert_eq!(opts.resolver.min_inline_url_len, 50);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
[driver]
delay_ms = 500

[input]
name_column = "Name"
region = "British Columbia"
"#,
        )
        .unwrap();

        let opts = AppOptions::load_from(&path).unwrap();
        assert_eq!(opts.driver.delay_ms, 500);
        assert_eq!(opts.input.name_column, "Name");
        assert_eq!(opts.input.region, "British Columbia");
        assert_eq!(opts.input.locality_column, "post_city");
        assert_eq!(opts.resolver.keyword, "archery");
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[driver\ndelay_ms = ").unwrap();
        assert!(matches!(AppOptions::load_from(&path), Err(Error::Config { .. })));
    }
}
