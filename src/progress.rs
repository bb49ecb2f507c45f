// src/progress.rs
use std::io::Write;

use crate::core::sanitize::truncate_chars;
use crate::model::{ImageRef, ResolutionResult, RunSummary};

/// Lightweight progress reporting for a batch run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of entities.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// About to search for entity `index` (1-based).
    fn item_started(&mut self, _index: usize, _name: &str) {}

    /// Entity `index` (1-based) has its result.
    fn item_done(&mut self, _index: usize, _result: &ResolutionResult) {}

    /// Called once at the end with the computed summary.
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Shown URL width in progress lines.
const URL_PREVIEW_CHARS: usize = 80;

/// Human-readable lines on any writer (stdout for the CLI).
pub struct ConsoleProgress<W: Write> {
    out: W,
    total: usize,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, total: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

// Console output is best-effort; a closed stdout must not abort the run.
impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
        let _ = writeln!(self.out, "Found {total} facilities to process");
    }

    fn log(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{msg}");
    }

    fn item_started(&mut self, index: usize, name: &str) {
        let _ = writeln!(self.out, "[{index}/{}] Searching for: {name}", self.total);
    }

    fn item_done(&mut self, _index: usize, result: &ResolutionResult) {
        let _ = match &result.image {
            ImageRef::Found(url) => {
                writeln!(self.out, "  ✓ Found: {}...", truncate_chars(url, URL_PREVIEW_CHARS))
            }
            ImageRef::NotFound => writeln!(self.out, "  ✗ No image found"),
        };
    }

    fn finish(&mut self, summary: &RunSummary) {
        let rule = "=".repeat(60);
        let _ = writeln!(self.out, "\n{rule}\nCOMPLETE!\n{rule}\n{summary}");
        let _ = self.out.flush();
    }
}
