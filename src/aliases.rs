use super::*;

/// Loads the alias map from `<root>/tsconfig.json`.
///
/// A missing file, unparsable JSON, or an absent `compilerOptions.paths`
/// section all yield an empty map; none of these is an error. Only the
/// first element of each paths array is honored, and a trailing `/*`
/// wildcard is stripped from both the key and the path element. Path
/// elements resolve against the config file's directory.
pub fn load_alias_map(root: &Path) -> Result<AliasMap> {
    let config_path = root.join("tsconfig.json");
    if !config_path.exists() {
        return Ok(AliasMap::new());
    }

    let raw = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let value: serde_json::Value = match serde_json::from_str(&sanitize_jsonc(&raw)) {
        Ok(value) => value,
        Err(_) => return Ok(AliasMap::new()),
    };

    let config_dir = config_path.parent().unwrap_or(root);
    let mut map = AliasMap::new();

    let Some(paths) = value
        .get("compilerOptions")
        .and_then(|v| v.get("paths"))
        .and_then(|v| v.as_object())
    else {
        return Ok(map);
    };

    for (key, targets) in paths {
        let Some(first) = targets
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|v| v.as_str())
        else {
            continue;
        };

        let alias = key.strip_suffix("/*").unwrap_or(key);
        let target = first.strip_suffix("/*").unwrap_or(first);
        map.insert(alias.to_string(), absolutize(config_dir, target));
    }

    Ok(map)
}

fn absolutize(base: &Path, target: &str) -> String {
    let joined = if Path::new(target).is_absolute() {
        PathBuf::from(target)
    } else {
        base.join(target)
    };

    fs::canonicalize(&joined)
        .unwrap_or(joined)
        .display()
        .to_string()
}

// tsconfig files are JSONC in the wild; serde_json wants the real thing.
fn sanitize_jsonc(input: &str) -> String {
    let mut current = strip_comments(input);

    loop {
        let next = TRAILING_COMMA_RE.replace_all(&current, "$1").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Removes `//` and `/* */` comments, leaving string literals untouched and
/// preserving line numbers inside block comments.
fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];

        if let Some(quote) = in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' => {
                in_string = Some(b);
                out.push(b);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    if bytes[i] == b'\n' {
                        out.push(b'\n');
                    }
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_default()
}
