use super::*;

/// Per-candidate decision, surfaced to the progress callback as it is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Used,
    Unused,
    Skipped,
}

#[derive(Debug, Default)]
pub struct DetectionOutcome {
    /// Unreferenced candidates, in collection order.
    pub unused: Vec<PathBuf>,
    pub total_candidates: usize,
    pub used: usize,
    pub skipped: usize,
}

/// Runs the used/unused decision over every candidate under `scan_root`.
///
/// Component files whose base name starts with an ignore prefix or contains
/// an ignore marker are carved out: they land in neither the used nor the
/// unused set. Everything else goes to the usage scanner, which re-walks
/// the tree once per candidate.
pub fn detect_unused(
    scan_root: &Path,
    config: &ScanConfig,
    aliases: &AliasMap,
    progress: &mut dyn FnMut(Verdict),
) -> Result<DetectionOutcome> {
    let candidates = collect_candidates(scan_root, config)?;

    let mut outcome = DetectionOutcome {
        total_candidates: candidates.len(),
        ..Default::default()
    };

    for candidate in candidates {
        let file_name = candidate
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = dot_extension(&candidate).unwrap_or_default();

        if ext == config.component_extension && is_carved_out(&file_name, config) {
            outcome.skipped += 1;
            progress(Verdict::Skipped);
            continue;
        }

        if is_referenced(&file_name, scan_root, aliases, config)? {
            outcome.used += 1;
            progress(Verdict::Used);
        } else {
            progress(Verdict::Unused);
            outcome.unused.push(candidate);
        }
    }

    Ok(outcome)
}

fn is_carved_out(file_name: &str, config: &ScanConfig) -> bool {
    config
        .component_ignore_prefixes
        .iter()
        .any(|prefix| file_name.starts_with(prefix.as_str()))
        || config
            .component_ignore_markers
            .iter()
            .any(|marker| file_name.contains(marker.as_str()))
}
