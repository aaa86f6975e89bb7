use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use pulse_core::parse_targets;

const STDIN_MARKER: &str = "-";

/// Gather targets from arguments, files and stdin, in that order.
///
/// Stdin is read when a file is `-`, or when no arguments and no files were
/// given at all.
pub fn collect_targets(args: &[String], files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    let mut targets: Vec<String> = args
        .iter()
        .flat_map(|arg| parse_targets(arg))
        .collect();

    for file in files {
        if file.as_os_str() == STDIN_MARKER {
            targets.extend(read_stdin()?);
        } else {
            targets.extend(read_file(file)?);
        }
    }

    if args.is_empty() && files.is_empty() {
        if std::io::stdin().is_terminal() {
            bail!("no targets given: pass hosts as arguments, use --file, or pipe a list on stdin");
        }
        targets.extend(read_stdin()?);
    }

    Ok(targets)
}

fn read_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read target file {}", path.display()))?;
    Ok(parse_targets(&content))
}

fn read_stdin() -> anyhow::Result<Vec<String>> {
    read_targets(std::io::stdin().lock()).context("failed to read targets from stdin")
}

fn read_targets<R: Read>(mut reader: R) -> std::io::Result<Vec<String>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(parse_targets(&content))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_targets_filters_lines() {
        let input = Cursor::new("example.com\n\n# comment\n  http://example.org  \n");
        assert_eq!(
            read_targets(input).unwrap(),
            vec!["example.com", "http://example.org"]
        );
    }

    #[test]
    fn test_args_then_files_in_order() {
        let path = std::env::temp_dir().join(format!("pulse-targets-{}.txt", std::process::id()));
        std::fs::write(&path, "from-file.example\n# skipped\nsecond.example\n").unwrap();

        let args = vec!["first.example".to_string(), "  ".to_string()];
        let targets = collect_targets(&args, &[path.clone()]).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            targets,
            vec!["first.example", "from-file.example", "second.example"]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/targets.txt");
        let err = collect_targets(&[], &[missing]).unwrap_err();
        assert!(err.to_string().contains("failed to read target file"));
    }
}
