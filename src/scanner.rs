use super::*;
use walkdir::WalkDir;

/// Tests whether `file_name` is referenced anywhere under `search_root`.
///
/// Every file whose name ends in a recognized source suffix is read in
/// full; alias tokens are rewritten to their resolved paths; the test is
/// plain substring containment of `file_name` or `/file_name`. The walk
/// short-circuits on the first hit and visits every directory, including
/// ones the collector would prune.
///
/// This is a text-containment heuristic, not import resolution: a name
/// inside a comment or string literal counts as a reference.
pub fn is_referenced(
    file_name: &str,
    search_root: &Path,
    aliases: &AliasMap,
    config: &ScanConfig,
) -> Result<bool> {
    let qualified = format!("/{file_name}");

    for entry in WalkDir::new(search_root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", search_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !config
            .source_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            continue;
        }

        let bytes = fs::read(entry.path())
            .with_context(|| format!("Failed to read source file: {}", entry.path().display()))?;
        let content = substitute_aliases(&String::from_utf8_lossy(&bytes), aliases);

        if content.contains(file_name) || content.contains(&qualified) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Replaces every occurrence of each alias token, one token at a time, with
/// no word-boundary check. A token that prefixes a longer identifier gets
/// rewritten too; that collision is accepted behavior.
pub fn substitute_aliases(content: &str, aliases: &AliasMap) -> String {
    let mut content = content.to_string();
    for (alias, replacement) in aliases {
        content = content.replace(alias.as_str(), replacement.as_str());
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn aliases(pairs: &[(&str, &str)]) -> AliasMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitution_replaces_every_occurrence() {
        let map = aliases(&[("$lib", "/proj/src/lib")]);
        let out = substitute_aliases("import '$lib/A.svelte'; import '$lib/B.svelte';", &map);
        assert_eq!(
            out,
            "import '/proj/src/lib/A.svelte'; import '/proj/src/lib/B.svelte';"
        );
    }

    #[test]
    fn substitution_has_no_token_boundary() {
        let map = aliases(&[("$lib", "/proj/src/lib")]);
        assert_eq!(
            substitute_aliases("const $library = 1", &map),
            "const /proj/src/library = 1"
        );
    }

    #[test]
    fn only_source_suffix_files_are_read() {
        let dir = TempDir::new().unwrap();
        // The reference lives in a file the scanner must not read.
        write(dir.path(), "src/notes.md", "see Button.svelte");
        write(dir.path(), "src/app.ts", "const x = 1");

        let hit =
            is_referenced("Button.svelte", dir.path(), &AliasMap::new(), &ScanConfig::default())
                .unwrap();
        assert!(!hit);
    }

    #[test]
    fn match_on_replacement_text_counts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/img.ts", "const src = '~logo.png'");

        let config = ScanConfig::default();
        let with_alias = aliases(&[("~logo", "/assets/Logo")]);
        assert!(is_referenced("Logo.png", dir.path(), &with_alias, &config).unwrap());
        assert!(!is_referenced("Logo.png", dir.path(), &AliasMap::new(), &config).unwrap());
    }

    #[test]
    fn prefix_collision_without_resulting_match_stays_unreferenced() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.ts", "import { x } from '$libFoo'");

        let map = aliases(&[("$lib", "/abs/path/lib")]);
        // "$libFoo" becomes "/abs/path/libFoo", which does not contain
        // "Foo.svelte", so the candidate stays unreferenced.
        assert!(!is_referenced("Foo.svelte", dir.path(), &map, &ScanConfig::default()).unwrap());
    }

    #[test]
    fn excluded_directories_are_still_scanned_for_usage() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "src/__tests__/helper.ts",
            "import Card from '../components/Card.svelte'",
        );

        let hit =
            is_referenced("Card.svelte", dir.path(), &AliasMap::new(), &ScanConfig::default())
                .unwrap();
        assert!(hit);
    }
}
