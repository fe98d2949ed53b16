//! Persistent description and ignore-rule storage
//!
//! The store is a pure path -> text association plus the user's ignore
//! list; both live in one JSON document so they never drift apart. Loading
//! tolerates a missing file, malformed JSON, and the legacy layout where
//! the whole document was the description map.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fs_utils::write_atomic;
use crate::walk::relative_path;

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default)]
    descriptions: BTreeMap<String, String>,
}

/// Layout of a parsed config document, decided once by structural
/// inspection, before normalization into [`DescriptionStore`].
enum ConfigFormat {
    Current(ConfigDocument),
    Legacy(BTreeMap<String, String>),
}

/// Mapping from project-relative path to a one-line description, plus the
/// user-supplied ignore rules persisted alongside it.
///
/// Descriptions are kept in a sorted map so serialization order is stable
/// across runs.
#[derive(Debug, Default)]
pub struct DescriptionStore {
    ignore: Vec<String>,
    descriptions: BTreeMap<String, String>,
}

impl DescriptionStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store; malformed JSON or an I/O
    /// failure is reported as a warning and also yields an empty store.
    /// Loading never aborts a run.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!(
                    "treedoc: warning: cannot read config {}: {}",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };
        match serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(classify)
        {
            Some(ConfigFormat::Current(doc)) => Self {
                ignore: doc.ignore,
                descriptions: doc.descriptions,
            },
            Some(ConfigFormat::Legacy(descriptions)) => Self {
                ignore: Vec::new(),
                descriptions,
            },
            None => {
                eprintln!(
                    "treedoc: warning: cannot parse config {}, starting empty",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// User-supplied ignore rules, verbatim as loaded.
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn lookup(&self, relative: &str) -> Option<&str> {
        self.descriptions.get(relative).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Record a description for `path`, normalizing it to project-relative
    /// form. Absolute paths outside `root` are declined; the store is left
    /// unchanged in that case. Returns the normalized key.
    pub fn add(&mut self, root: &Path, path: &str, text: &str) -> Result<String, String> {
        let given = Path::new(path);
        let relative = if given.is_absolute() {
            relative_path(root, given).ok_or_else(|| {
                format!(
                    "path {} is not under the project root {}",
                    path,
                    root.display()
                )
            })?
        } else {
            path.replace('\\', "/")
        };
        self.descriptions.insert(relative.clone(), text.to_string());
        Ok(relative)
    }

    /// Write the current ignore list and descriptions back to `path` as one
    /// document, replacing any previous file wholesale.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let doc = ConfigDocument {
            ignore: self.ignore.clone(),
            descriptions: self.descriptions.clone(),
        };
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        write_atomic(path, &(json + "\n"))
    }
}

/// Decide which layout a parsed document uses.
///
/// An object carrying an `ignore` or `descriptions` key is the current
/// layout; any other object is the legacy all-descriptions layout. A
/// non-object (or legacy object with non-string values) is unrecognized.
fn classify(value: serde_json::Value) -> Option<ConfigFormat> {
    let obj = value.as_object()?;
    if obj.contains_key("ignore") || obj.contains_key("descriptions") {
        serde_json::from_value(value).ok().map(ConfigFormat::Current)
    } else {
        serde_json::from_value(value).ok().map(ConfigFormat::Legacy)
    }
}
