//! Treedoc - annotated directory trees for project documentation
//!
//! Walks a project's file tree, renders it as an ASCII tree document, and
//! merges in one-line descriptions that persist across runs in a JSON
//! config document alongside user-supplied ignore rules.

pub mod document;
pub mod fs_utils;
pub mod ignore;
pub mod render;
pub mod store;
pub mod walk;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use document::{Generator, update_directory_structure};
pub use ignore::IgnoreMatcher;
pub use render::{RenderedTree, render};
pub use store::DescriptionStore;
pub use walk::{Entry, EntryKind, collect};
