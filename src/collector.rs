use super::*;
use walkdir::WalkDir;

/// Collects candidate files under `scan_root`, depth-first.
///
/// Directories whose path relative to `scan_root` contains an ignored
/// segment are pruned wholesale: their entries are never listed, not just
/// filtered out. Files are kept when their dot-prefixed extension is in
/// the target set. Order is the underlying directory-listing order; any
/// filesystem error aborts the walk.
pub fn collect_candidates(scan_root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(scan_root)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_ignored_dir(e.path(), scan_root, config)))
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", scan_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(ext) = dot_extension(entry.path()) else {
            continue;
        };
        if config.target_extensions.contains(&ext) {
            candidates.push(entry.into_path());
        }
    }

    Ok(candidates)
}

fn is_ignored_dir(path: &Path, scan_root: &Path, config: &ScanConfig) -> bool {
    let rel = path.strip_prefix(scan_root).unwrap_or(path);
    let rel = rel.to_string_lossy();

    config
        .ignored_dir_segments
        .iter()
        .any(|segment| rel.contains(segment.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn extension_match_is_exact_and_case_sensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/a.svelte");
        touch(dir.path(), "src/b.PNG");
        touch(dir.path(), "src/c.jpeg");
        touch(dir.path(), "src/Makefile");

        let found = collect_candidates(&dir.path().join("src"), &ScanConfig::default()).unwrap();
        let mut names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["a.svelte", "c.jpeg"]);
    }

    #[test]
    fn ignored_directories_are_pruned_not_filtered() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/components/Keep.svelte");
        touch(dir.path(), "src/__tests__/Dropped.svelte");
        touch(dir.path(), "src/__tests__/nested/AlsoDropped.png");

        let found = collect_candidates(&dir.path().join("src"), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("components/Keep.svelte"));
    }

    #[test]
    fn files_matching_a_directory_segment_are_not_skipped() {
        // The exclusion applies to directories only.
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/a__tests__b.svelte");

        let found = collect_candidates(&dir.path().join("src"), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
    }
}
