use super::*;
use crossterm::style::Stylize;
use std::io::{self, Write};

pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// One mark per candidate, no newline: bold red `x` for unused, green `•`
/// otherwise (carved-out files get the same dot as used ones).
pub(crate) fn print_progress_mark(verdict: Verdict) {
    let mut stdout = io::stdout();
    let _ = match verdict {
        Verdict::Unused => write!(stdout, "{}", "x".red().bold()),
        Verdict::Used | Verdict::Skipped => write!(stdout, "{}", "•".green()),
    };
    let _ = stdout.flush();
}

pub(crate) fn print_human_report(unused_files: &[String]) {
    if unused_files.is_empty() {
        return;
    }

    println!("Found unused files:");
    for path in unused_files {
        println!("{path}");
    }
}
