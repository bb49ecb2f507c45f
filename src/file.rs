// src/file.rs

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use crate::config::consts::REPORT_HEADERS;
use crate::config::options::InputOptions;
use crate::core::sanitize::{normalize_ws, strip_bom};
use crate::csv::{Delim, parse_rows, rows_to_string};
use crate::error::{Error, Result};
use crate::model::{EntityQuery, ResolutionResult};

/// Read entities from a header-keyed CSV/TSV file.
///
/// Rows with a blank name are dropped silently. Short rows read missing cells
/// as empty. Only a missing name *column* is an error.
pub fn read_entities(path: &Path, opts: &InputOptions) -> Result<Vec<EntityQuery>> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    parse_entities(strip_bom(&text), Delim::for_path(path), path, opts)
}

/// Same as `read_entities` over in-memory text; `origin` only labels errors.
pub fn parse_entities(
    text: &str,
    delim: Delim,
    origin: &Path,
    opts: &InputOptions,
) -> Result<Vec<EntityQuery>> {
    let mut rows = parse_rows(text, delim).into_iter();
    let headers = rows.next().ok_or_else(|| Error::EmptyInput { path: origin.to_path_buf() })?;

    let name_ix = column_index(&headers, &opts.name_column).ok_or_else(|| Error::MissingColumn {
        path: origin.to_path_buf(),
        column: opts.name_column.clone(),
        found: headers.join(", "),
    })?;

    let locality_ix = column_index(&headers, &opts.locality_column);
    if locality_ix.is_none() {
        logw!("{}: no {:?} column; searching without locality", origin.display(), opts.locality_column);
    }
    let region_ix = opts.region_column.as_deref().and_then(|c| {
        let ix = column_index(&headers, c);
        if ix.is_none() {
            logw!("{}: no {c:?} column; using region {:?}", origin.display(), opts.region);
        }
        ix
    });

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let name = cell(&row, Some(name_ix));
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        let region = Some(cell(&row, region_ix))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| opts.region.clone());
        out.push(EntityQuery::new(name, cell(&row, locality_ix), region));
    }

    logd!("{}: {} entities, {} rows without a name", origin.display(), out.len(), skipped);
    Ok(out)
}

/// Contiguous window over the entity list.
pub fn select_window(entities: Vec<EntityQuery>, skip: usize, limit: Option<usize>) -> Vec<EntityQuery> {
    let it = entities.into_iter().skip(skip);
    match limit {
        Some(n) => it.take(n).collect(),
        None => it.collect(),
    }
}

/// Check that the report can be written *before* spending a whole run on it.
/// Creates missing parent directories; leaves an existing file untouched.
pub fn check_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::OutputIsDirectory(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let existed = path.exists();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    if !existed {
        let _ = fs::remove_file(path);
    }
    Ok(())
}

/// Write the two-column report in one go. Returns the path written.
pub fn write_report(path: &Path, results: &[ResolutionResult]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let rows: Vec<Vec<String>> = results.iter().map(ResolutionResult::to_row).collect();
    let contents = rows_to_string(&REPORT_HEADERS, &rows, Delim::for_path(path));

    fs::write(path, contents).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::Io { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}

/// Cell `ix` with whitespace collapsed; missing cells read as empty.
fn cell(row: &[String], ix: Option<usize>) -> String {
    ix.and_then(|i| row.get(i)).map(|s| normalize_ws(s)).unwrap_or_default()
}

/// Header lookup: exact (trimmed) match first, then ASCII case-insensitive.
fn column_index(headers: &[String], name: &str) -> Option<usize> {
    let name = name.trim();
    headers
        .iter()
        .position(|h| h.trim() == name)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)))
}
