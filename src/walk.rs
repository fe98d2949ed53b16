//! Ordered depth-first collection of project entries
//!
//! The walk produces a flat sequence of depth-tagged entries in document
//! order: pre-order, directories before files, case-insensitive name order
//! within each kind. The project root itself is never emitted; its direct
//! children sit at depth 0.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ignore::IgnoreMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One filesystem node visited during a walk.
///
/// `relative` is the project-relative path, forward-slash normalized. It is
/// the identity used for ignore matching and description lookup.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    pub depth: usize,
    pub relative: String,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// A project-relative path with components joined by `/`.
///
/// Returns `None` for the root itself or a path outside the root.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let stripped = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Walk `root` and return all non-ignored entries in document order.
///
/// An unreadable subdirectory is reported as a warning and skipped; the
/// directory entry itself stays in the sequence with no children. An
/// unreadable root yields an empty sequence.
pub fn collect(root: &Path, matcher: &IgnoreMatcher) -> Vec<Entry> {
    let mut entries = Vec::new();
    match sorted_children(root) {
        Ok(children) => {
            for child in children {
                walk_into(child, 0, root, matcher, &mut entries);
            }
        }
        Err(e) => {
            eprintln!(
                "treedoc: error: cannot read project root {}: {}",
                root.display(),
                e
            );
        }
    }
    entries
}

fn walk_into(
    child: Child,
    depth: usize,
    root: &Path,
    matcher: &IgnoreMatcher,
    entries: &mut Vec<Entry>,
) {
    let Some(relative) = relative_path(root, &child.path) else {
        return;
    };
    if matcher.is_ignored(&relative, &child.name) {
        return;
    }

    let kind = if child.is_dir {
        EntryKind::Dir
    } else {
        EntryKind::File
    };
    entries.push(Entry {
        path: child.path.clone(),
        name: child.name,
        kind,
        depth,
        relative,
    });

    if child.is_dir {
        match sorted_children(&child.path) {
            Ok(children) => {
                for grandchild in children {
                    walk_into(grandchild, depth + 1, root, matcher, entries);
                }
            }
            Err(e) => {
                eprintln!(
                    "treedoc: warning: cannot read directory {}: {}",
                    child.path.display(),
                    e
                );
            }
        }
    }
}

struct Child {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// List a directory's children, directories first, then case-insensitive
/// name order (with the raw name as tiebreaker so the walk is fully
/// deterministic).
///
/// Symlinks are not followed: the kind comes from the un-followed file
/// type, so a symlinked directory is treated as a leaf.
fn sorted_children(dir: &Path) -> io::Result<Vec<Child>> {
    let mut children: Vec<Child> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            Some(Child {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            })
        })
        .collect();
    children.sort_by_key(|c| (!c.is_dir, c.name.to_lowercase(), c.name.clone()));
    Ok(children)
}
