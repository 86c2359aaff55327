use crate::error::{Result, TransfoError};
use crate::template::expand_tokens;
use globset::GlobSet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling a copy run.
#[derive(Debug, Default)]
pub struct CopyOptions {
    /// Discard intermediate directories, placing every file directly under
    /// the destination root. On basename collision the last file wins.
    pub flatten: bool,
    /// Globs excluded from directory copies, matched against source-relative
    /// paths.
    pub exclude: Option<GlobSet>,
    /// Variables substituted into `{{ token }}` references in the
    /// destination path before any I/O.
    pub vars: BTreeMap<String, String>,
}

/// Outcome of a successful copy run.
#[derive(Debug, Serialize)]
pub struct CopyReport {
    /// Destination paths written, in traversal order.
    pub copied: Vec<PathBuf>,
}

/// Expands `{{ token }}` references in a destination path against `vars`.
/// Unknown tokens expand to the empty string.
///
/// # Errors
///
/// Returns `TransfoError::Regex` if the token pattern fails to compile.
pub fn expand_dest(dest: &Path, vars: &BTreeMap<String, String>) -> Result<PathBuf> {
    let expanded = expand_tokens(&dest.to_string_lossy(), |name| vars.get(name).cloned())?;
    Ok(PathBuf::from(expanded))
}

/// Copies `src` to `dest` without transforming content.
///
/// The destination path is template-expanded first. A file source is copied
/// to `dest` directly (or into it when `dest` is an existing directory). A
/// directory source is walked recursively: each file lands under `dest` at
/// its source-relative path, or directly under `dest` when flattening.
///
/// # Errors
///
/// - `TransfoError::SourceNotFound` if `src` does not exist.
/// - `TransfoError::WalkDir` if directory traversal fails.
/// - `TransfoError::Destination` if a destination entry cannot be written.
pub fn copy(src: &Path, dest: &Path, options: &CopyOptions) -> Result<CopyReport> {
    let dest = expand_dest(dest, &options.vars)?;
    let mut copied = Vec::new();

    if src.is_dir() {
        for entry in WalkDir::new(src) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
            if let Some(exclude) = &options.exclude
                && exclude.is_match(relative)
            {
                log::debug!("excluded {}", relative.display());
                continue;
            }

            let target = if options.flatten {
                dest.join(entry.file_name())
            } else {
                dest.join(relative)
            };
            copy_file(entry.path(), &target)?;
            copied.push(target);
        }
    } else if src.is_file() {
        let target = if dest.is_dir() {
            dest.join(src.file_name().unwrap_or_default())
        } else {
            dest.clone()
        };
        copy_file(src, &target)?;
        copied.push(target);
    } else {
        return Err(TransfoError::SourceNotFound {
            path: src.to_path_buf(),
        });
    }

    log::info!("copied {} file(s) to {}", copied.len(), dest.display());
    Ok(CopyReport { copied })
}

/// Copies a single file, creating parent directories as needed.
fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| TransfoError::Destination {
            path: dest.to_path_buf(),
            source,
        })?;
    }

    fs::copy(src, dest).map_err(|source| TransfoError::Destination {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::{Glob, GlobSetBuilder};
    use std::fs;
    use tempfile::TempDir;

    fn make_tree(root: &Path) {
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
        fs::write(root.join("sub/mid.txt"), "mid").unwrap();
        fs::write(root.join("sub/deeper/leaf.txt"), "leaf").unwrap();
    }

    #[test]
    fn test_copy_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("single.js");
        fs::write(&src, "content").unwrap();
        let dest = temp_dir.path().join("out/single.js");

        let report = copy(&src, &dest, &CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "content");
        assert_eq!(report.copied, vec![dest]);
    }

    #[test]
    fn test_copy_single_file_into_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("single.js");
        fs::write(&src, "content").unwrap();
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest).unwrap();

        copy(&src, &dest, &CopyOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("single.js")).unwrap(),
            "content"
        );
    }

    #[test]
    fn test_copy_directory_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("tree");
        make_tree(&src);
        let dest = temp_dir.path().join("out");

        let report = copy(&src, &dest, &CopyOptions::default()).unwrap();

        assert_eq!(report.copied.len(), 3);
        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(fs::read_to_string(dest.join("sub/mid.txt")).unwrap(), "mid");
        assert_eq!(
            fs::read_to_string(dest.join("sub/deeper/leaf.txt")).unwrap(),
            "leaf"
        );
    }

    #[test]
    fn test_copy_directory_flatten() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("tree");
        make_tree(&src);
        let dest = temp_dir.path().join("flat");

        let options = CopyOptions {
            flatten: true,
            ..Default::default()
        };
        let report = copy(&src, &dest, &options).unwrap();

        // Only basenames, one level deep, matching the source file count.
        let mut entries: Vec<String> = fs::read_dir(&dest)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["leaf.txt", "mid.txt", "top.txt"]);
        assert_eq!(report.copied.len(), 3);
        assert!(fs::read_dir(&dest).unwrap().all(|e| e
            .unwrap()
            .file_type()
            .unwrap()
            .is_file()));
    }

    #[test]
    fn test_copy_dest_template_expansion() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("single.js");
        fs::write(&src, "content").unwrap();
        let dest = temp_dir.path().join("copy_test_v{{ version }}/single.js");

        let options = CopyOptions {
            vars: BTreeMap::from([("version".to_string(), "0.1.0".to_string())]),
            ..Default::default()
        };
        copy(&src, &dest, &options).unwrap();

        let expanded = temp_dir.path().join("copy_test_v0.1.0/single.js");
        assert_eq!(fs::read_to_string(&expanded).unwrap(), "content");
    }

    #[test]
    fn test_copy_with_exclude_globs() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("tree");
        make_tree(&src);
        fs::write(src.join("notes.md"), "skip me").unwrap();
        let dest = temp_dir.path().join("out");

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new("*.md").unwrap());
        builder.add(Glob::new("sub/deeper/**").unwrap());
        let options = CopyOptions {
            exclude: Some(builder.build().unwrap()),
            ..Default::default()
        };
        let report = copy(&src, &dest, &options).unwrap();

        assert_eq!(report.copied.len(), 2);
        assert!(dest.join("top.txt").exists());
        assert!(dest.join("sub/mid.txt").exists());
        assert!(!dest.join("notes.md").exists());
        assert!(!dest.join("sub/deeper/leaf.txt").exists());
    }

    #[test]
    fn test_copy_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("nope");
        let dest = temp_dir.path().join("out");

        let result = copy(&src, &dest, &CopyOptions::default());
        assert!(matches!(result, Err(TransfoError::SourceNotFound { .. })));
    }

    #[test]
    fn test_expand_dest_unknown_token_is_empty() {
        let dest = expand_dest(Path::new("out_{{ missing }}.txt"), &BTreeMap::new()).unwrap();
        assert_eq!(dest, PathBuf::from("out_.txt"));
    }
}
