// src/model.rs
//! Records flowing through a run: one `EntityQuery` in, one
//! `ResolutionResult` out, and a `RunSummary` computed at the end.

use std::fmt;

use crate::config::consts::NOT_FOUND;

/// One facility to look up. Built once from an input row, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityQuery {
    pub name: String,
    pub locality: String,
    pub region: String,
}

impl EntityQuery {
    pub fn new(name: impl Into<String>, locality: impl Into<String>, region: impl Into<String>) -> Self {
        Self { name: name.into(), locality: locality.into(), region: region.into() }
    }
}

/// Outcome of one resolution. `Found` never holds an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageRef {
    Found(String),
    NotFound,
}

impl ImageRef {
    /// Wrap a candidate; empty/blank strings collapse to `NotFound`.
    pub fn from_candidate(candidate: Option<String>) -> Self {
        match candidate {
            Some(url) if !url.trim().is_empty() => ImageRef::Found(url),
            _ => ImageRef::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ImageRef::Found(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Found(url) => url,
            ImageRef::NotFound => NOT_FOUND,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionResult {
    pub entity_name: String,
    pub image: ImageRef,
}

impl ResolutionResult {
    /// Report row: `[name, url-or-sentinel]`.
    pub fn to_row(&self) -> Vec<String> {
        vec![self.entity_name.clone(), s!(self.image.as_str())]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ResolutionResult]) -> Self {
        let found = results.iter().filter(|r| r.image.is_found()).count();
        Self { total: results.len(), found, not_found: results.len() - found }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total facilities: {}", self.total)?;
        writeln!(f, "Images found: {}", self.found)?;
        write!(f, "Images not found: {}", self.not_found)
    }
}
