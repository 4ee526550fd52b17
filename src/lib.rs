use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod aliases;
mod collector;
mod detector;
mod output;
mod scanner;

pub use aliases::load_alias_map;
pub use collector::collect_candidates;
pub use detector::{DetectionOutcome, Verdict, detect_unused};
pub use scanner::{is_referenced, substitute_aliases};

use output::{print_human_report, print_progress_mark, relative_display};

const TARGET_EXTENSIONS: &[&str] = &[".svelte", ".png", ".jpg", ".jpeg"];
const IGNORED_DIR_SEGMENTS: &[&str] = &["__tests__"];
const COMPONENT_EXTENSION: &str = ".svelte";
const COMPONENT_IGNORE_PREFIXES: &[&str] = &["+"];
const COMPONENT_IGNORE_MARKERS: &[&str] = &[".story.", ".test."];
const SOURCE_SUFFIXES: &[&str] = &[".ts", ".svelte"];
const SCAN_DIR: &str = "src";

static TRAILING_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#",\s*([}\]])"#).unwrap());

/// Alias token -> resolved absolute path. Built once at startup, read-only
/// afterwards; empty when no tsconfig is found.
pub type AliasMap = BTreeMap<String, String>;

#[derive(Parser, Debug)]
#[command(name = "molly")]
#[command(about = "Find unused Svelte components and assets under a project's src tree")]
struct Cli {
    /// Project root (tsconfig.json is read here; the src subdirectory is scanned)
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Emit JSON output
    #[arg(long)]
    json: bool,
}

/// The rule sets driving collection and the used/unused decision.
///
/// `Default` yields the built-in SvelteKit-flavored rules; tests substitute
/// their own. Extension matching is exact and case-sensitive, with the
/// leading dot included.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub target_extensions: Vec<String>,
    pub ignored_dir_segments: Vec<String>,
    pub component_extension: String,
    pub component_ignore_prefixes: Vec<String>,
    pub component_ignore_markers: Vec<String>,
    pub source_suffixes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            target_extensions: owned(TARGET_EXTENSIONS),
            ignored_dir_segments: owned(IGNORED_DIR_SEGMENTS),
            component_extension: COMPONENT_EXTENSION.to_string(),
            component_ignore_prefixes: owned(COMPONENT_IGNORE_PREFIXES),
            component_ignore_markers: owned(COMPONENT_IGNORE_MARKERS),
            source_suffixes: owned(SOURCE_SUFFIXES),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[derive(Debug, Serialize)]
struct Report {
    root: String,
    summary: ReportSummary,
    unused_files: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ReportSummary {
    total_candidates: usize,
    used_files: usize,
    skipped_components: usize,
    unused_files_count: usize,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let root = fs::canonicalize(&cli.root)
        .with_context(|| format!("Failed to access root: {}", cli.root.display()))?;

    let config = ScanConfig::default();
    let aliases = load_alias_map(&root)?;
    let scan_root = root.join(SCAN_DIR);

    let outcome = detect_unused(&scan_root, &config, &aliases, &mut |verdict| {
        if !cli.json {
            print_progress_mark(verdict);
        }
    })?;

    let unused_files: Vec<String> = outcome
        .unused
        .iter()
        .map(|path| relative_display(&root, path))
        .collect();
    let found_unused = !unused_files.is_empty();

    if cli.json {
        let report = Report {
            root: root.display().to_string(),
            summary: ReportSummary {
                total_candidates: outcome.total_candidates,
                used_files: outcome.used,
                skipped_components: outcome.skipped,
                unused_files_count: unused_files.len(),
            },
            unused_files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if outcome.total_candidates > 0 {
            println!();
        }
        print_human_report(&unused_files);
    }

    Ok(if found_unused {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn dot_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}
