//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::collections::HashSet;
use std::path::PathBuf;

/// Resolve file patterns to actual file paths
///
/// Patterns keep their command-line order; the matches of one pattern are
/// sorted. A file matched twice is kept at its first position.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        let mut matched = Vec::new();
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                matched.push(path);
            }
        }
        matched.sort();

        for path in matched {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pattern_order_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b-2.txt", "b-1.txt", "a.txt"] {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }
        let dir = temp_dir.path().display();

        let files = resolve_patterns(&[
            format!("{dir}/b-*.txt"),
            format!("{dir}/a.txt"),
            format!("{dir}/b-1.txt"),
        ])
        .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b-1.txt", "b-2.txt", "a.txt"]);
    }

    #[test]
    fn test_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.missing", temp_dir.path().display());
        let err = resolve_patterns(&[pattern]).unwrap_err();
        assert!(err.to_string().contains("No files found"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[invalid".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern: [invalid"));
    }
}
