//! Filesystem helpers shared by the store and the document writer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the tool's config directory under the project root.
pub const CONFIG_DIR: &str = ".treedoc";

/// Write `contents` to `path` by way of a sibling temp file and rename,
/// creating parent directories as needed.
///
/// An existing file is either replaced wholesale or left untouched; a
/// failed write never leaves a truncated document behind.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "out".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Resolve the project root.
///
/// An explicit override wins. Otherwise, when the process is started from
/// inside the tool's nested config directory (`<root>/.treedoc` or
/// `<root>/.treedoc/tools`), the enclosing project root is used; any other
/// working directory is taken as the root itself.
pub fn detect_project_root(override_path: Option<&Path>) -> PathBuf {
    if let Some(root) = override_path {
        return root.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if dir_is_named(&cwd, "tools")
        && cwd.parent().is_some_and(|p| dir_is_named(p, CONFIG_DIR))
    {
        if let Some(root) = cwd.parent().and_then(Path::parent) {
            return root.to_path_buf();
        }
    }
    if dir_is_named(&cwd, CONFIG_DIR) {
        if let Some(root) = cwd.parent() {
            return root.to_path_buf();
        }
    }
    cwd
}

fn dir_is_named(path: &Path, name: &str) -> bool {
    path.file_name().is_some_and(|n| n == name)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_atomic_creates_parents_and_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("docs").join("out.md");
        write_atomic(&target, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_atomic_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.md");
        write_atomic(&target, "first").unwrap();
        write_atomic(&target, "second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.md");
        write_atomic(&target, "content").unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.md".to_string()]);
    }

    #[test]
    fn test_explicit_root_override_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_project_root(Some(dir.path())), dir.path());
    }
}
