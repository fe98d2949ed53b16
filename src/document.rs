//! Document assembly and the top-level generate operation
//!
//! `Generator` wires the other components together: it owns the resolved
//! project root, loads the store, builds the matcher from the store's
//! ignore list, and writes the final Markdown document. External hook
//! scripts go through [`update_directory_structure`], which reports all
//! diagnostics on stdout/stderr and returns a plain success flag.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::fs_utils::{CONFIG_DIR, detect_project_root, write_atomic};
use crate::ignore::IgnoreMatcher;
use crate::render::{self, RenderedTree};
use crate::store::DescriptionStore;
use crate::walk;

/// Config document location, relative to the project root.
pub const CONFIG_FILE: &str = "descriptions.json";
/// Generated document location, relative to the project root.
pub const OUTPUT_FILE: &str = "docs/directory-structure.md";

/// Sample descriptions suggested after a generation run.
const SUGGESTION_LIMIT: usize = 3;

pub struct Generator {
    root: PathBuf,
    config_path: PathBuf,
    output_path: PathBuf,
    store: DescriptionStore,
    use_color: bool,
}

impl Generator {
    /// Resolve the root (see [`detect_project_root`]) and load the store.
    pub fn new(root: Option<&Path>) -> Self {
        let root = detect_project_root(root);
        let root = fs::canonicalize(&root).unwrap_or(root);
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);
        let store = DescriptionStore::load(&config_path);
        Self {
            output_path: root.join(OUTPUT_FILE),
            config_path,
            root,
            store,
            use_color: false,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record a description, normalized to project-relative form.
    pub fn add_description(&mut self, path: &str, text: &str) -> Result<String, String> {
        self.store.add(&self.root, path, text)
    }

    /// Persist the store. Called at the end of every completed run so the
    /// on-disk document always mirrors the in-memory state.
    pub fn save_store(&self) -> io::Result<()> {
        self.store.save(&self.config_path)?;
        println!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    /// Collect and render the project tree.
    pub fn generate(&self) -> RenderedTree {
        let matcher = IgnoreMatcher::new(self.store.ignore());
        let entries = walk::collect(&self.root, &matcher);
        render::render(&entries, &self.store)
    }

    /// Full generation run: render, write the Markdown document, report
    /// entries missing descriptions, and save the store.
    pub fn generate_and_save(&self) -> io::Result<()> {
        if !self.root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("project root {} is not a directory", self.root.display()),
            ));
        }
        let tree = self.generate();
        write_atomic(&self.output_path, &wrap_document(&tree.text))?;
        println!("Directory structure written to {}", self.output_path.display());
        self.report_missing(&tree.missing)?;
        self.save_store()
    }

    /// Print only the entries lacking descriptions; writes nothing.
    pub fn show_missing(&self) {
        let tree = self.generate();
        if tree.missing.is_empty() {
            println!("All entries have descriptions!");
        } else {
            println!("Entries missing descriptions ({}):", tree.missing.len());
            for path in &tree.missing {
                println!("  {}", path);
            }
        }
    }

    fn report_missing(&self, missing: &BTreeSet<String>) -> io::Result<()> {
        if missing.is_empty() {
            return Ok(());
        }
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(stdout, "\nFound {} entries missing descriptions:", missing.len())?;
        stdout.reset()?;
        for path in missing {
            writeln!(stdout, "  - {}", path)?;
        }

        writeln!(stdout, "\nSuggested commands:")?;
        for path in missing.iter().take(SUGGESTION_LIMIT) {
            writeln!(stdout, "  treedoc --add '{}' '<description>'", path)?;
        }
        if missing.len() > SUGGESTION_LIMIT {
            writeln!(stdout, "  ... and {} more", missing.len() - SUGGESTION_LIMIT)?;
        }
        Ok(())
    }
}

/// Wrap the rendered tree in the fixed Markdown boilerplate.
fn wrap_document(tree: &str) -> String {
    format!(
        "# Project Directory Structure\n\
         \n\
         ```\n\
         {tree}\n\
         ```\n\
         \n\
         ## File Descriptions\n\
         \n\
         This document is generated by `treedoc`.\n\
         \n\
         - Run `treedoc` to regenerate the directory structure\n\
         - Run `treedoc --add <path> \"<description>\"` to describe an entry\n\
         - Run `treedoc --missing` to list entries without descriptions\n"
    )
}

/// Entry point for external hook scripts: one reusable update operation.
///
/// Runs collect + render + write + save, sending diagnostics to
/// stdout/stderr, and returns whether the run completed.
pub fn update_directory_structure(root: Option<&Path>) -> bool {
    let generator = Generator::new(root);
    if let Err(e) = generator.generate_and_save() {
        eprintln!(
            "treedoc: error: failed to update directory structure: {}",
            e
        );
        return false;
    }
    true
}
