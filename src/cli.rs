// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::options::AppOptions,
    enrich::{Pause, ThreadPause, enrich},
    error::{Error, Result},
    file::{check_output_path, read_entities, select_window, write_report},
    model::RunSummary,
    progress::{ConsoleProgress, Progress},
    resolve::{Resolve, Resolver},
};

/// Resolve one representative image URL per facility listed in a CSV/TSV file.
#[derive(Debug, Parser)]
#[command(name = "facility_images", version)]
pub struct Args {
    /// Input CSV/TSV with a header row
    pub input: Option<PathBuf>,

    /// Report path (.tsv → tab separated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with [resolver], [driver], [input], [output] tables
    #[arg(long, default_value = "facility_images.toml")]
    pub config: PathBuf,

    /// Region appended to every query unless the row has its own
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub name_column: Option<String>,

    #[arg(long)]
    pub locality_column: Option<String>,

    /// Per-row region column (optional)
    #[arg(long)]
    pub region_column: Option<String>,

    /// Fixed keyword appended after the region
    #[arg(long)]
    pub keyword: Option<String>,

    /// Pause between two searches
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Inline <img> URLs must be longer than this
    #[arg(long)]
    pub min_url_len: Option<usize>,

    /// Skip the first N facilities (after blank names are dropped)
    #[arg(long)]
    pub skip: Option<usize>,

    /// Process at most N facilities
    #[arg(long)]
    pub limit: Option<usize>,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug logging (RUST_LOG wins when set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file first, then flags on top.
    pub fn to_options(&self) -> Result<AppOptions> {
        let mut opts = AppOptions::load_from(&self.config)?;

        if let Some(v) = &self.input { opts.input.path = Some(v.clone()); }
        if let Some(v) = &self.output { opts.output.path = v.clone(); }
        if let Some(v) = &self.region { opts.input.region = v.clone(); }
        if let Some(v) = &self.name_column { opts.input.name_column = v.clone(); }
        if let Some(v) = &self.locality_column { opts.input.locality_column = v.clone(); }
        if let Some(v) = &self.region_column { opts.input.region_column = Some(v.clone()); }
        if let Some(v) = &self.keyword { opts.resolver.keyword = v.clone(); }
        if let Some(v) = self.delay_ms { opts.driver.delay_ms = v; }
        if let Some(v) = self.timeout_secs { opts.resolver.timeout_secs = v; }
        if let Some(v) = self.min_url_len { opts.resolver.min_inline_url_len = v; }
        if let Some(v) = self.skip { opts.input.skip = v; }
        if let Some(v) = self.limit { opts.input.limit = Some(v); }

        Ok(opts)
    }
}

/// Parse flags, run against the live search endpoint, print progress to stdout.
pub fn run(args: &Args) -> Result<RunSummary> {
    let opts = args.to_options()?;
    let resolver = Resolver::http(opts.resolver.clone())?;
    let mut progress = ConsoleProgress::stdout();
    let (_, summary) = run_with(&opts, &resolver, &mut ThreadPause, &mut progress)?;
    Ok(summary)
}

/// Whole pipeline with injected collaborators: read → enrich → write.
///
/// Fatal only for file problems; the output path is checked before the first
/// search so a bad path fails fast, and the report is written once at the end.
pub fn run_with<R: Resolve + ?Sized>(
    opts: &AppOptions,
    resolver: &R,
    pause: &mut dyn Pause,
    progress: &mut dyn Progress,
) -> Result<(PathBuf, RunSummary)> {
    let input = opts.input.path.as_deref().ok_or(Error::NoInput)?;
    let output = opts.output.path.as_path();

    let rule = "=".repeat(60);
    progress.log(&format!("{rule}\nFACILITY IMAGE COLLECTOR\n{rule}"));
    progress.log(&format!("Input: {}\nOutput: {}\n{rule}\n", input.display(), output.display()));

    check_output_path(output)?;

    progress.log(&format!("Reading facilities from {}...", input.display()));
    let entities = read_entities(input, &opts.input)?;
    let entities = select_window(entities, opts.input.skip, opts.input.limit);

    let (results, summary) = enrich(resolver, &entities, &opts.driver, pause, Some(&mut *progress));

    progress.log(&format!("\nWriting results to {}...", output.display()));
    let written = write_report(output, &results)?;
    progress.log(&format!("Results saved to: {}", written.display()));
    logf!("Report: {} rows → {}", results.len(), written.display());

    Ok((written, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "facility_images",
            "ranges.csv",
            "-o",
            "out/images.tsv",
            "--config",
            "/definitely/not/here.toml",
            "--region",
            "British Columbia",
            "--delay-ms",
            "250",
            "--min-url-len",
            "30",
            "--limit",
            "3",
        ]);
        let opts = args.to_options().unwrap();
        assert_eq!(opts.input.path, Some(PathBuf::from("ranges.csv")));
        assert_eq!(opts.output.path, PathBuf::from("out/images.tsv"));
        assert_eq!(opts.input.region, "British Columbia");
        assert_eq!(opts.driver.delay_ms, 250);
        assert_eq!(opts.resolver.min_inline_url_len, 30);
        assert_eq!(opts.input.limit, Some(3));
        assert_eq!(opts.input.skip, 0);
        assert_eq!(opts.resolver.keyword, "archery");
    }

    #[test]
    fn no_input_is_error() {
        struct Never;
        impl Resolve for Never {
            fn resolve(&self, _: &crate::model::EntityQuery) -> crate::model::ImageRef {
                unreachable!()
            }
        }
        let opts = AppOptions::default();
        let err = run_with(&opts, &Never, &mut ThreadPause, &mut crate::progress::NullProgress)
            .unwrap_err();
        assert!(matches!(err, Error::NoInput));
    }
}
