//! Icon extraction from entry text.
//!
//! An entry may start with a `[[name]]` marker. The marker is removed from the
//! text and `name` is resolved against the configured images directory.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::arena::Entry;

const MARKER_PATTERN: &str = r"^\[{2}(.*?)\]{2}";

/// Resolves `[[name]]` markers into icon paths.
#[derive(Debug, Clone)]
pub struct IconResolver {
    images_path: PathBuf,
    images_suffix: String,
    marker_regex: Regex,
}

impl IconResolver {
    /// `images_suffix` is the file extension without the dot; empty means none.
    pub fn new(images_path: impl Into<PathBuf>, images_suffix: impl Into<String>) -> Self {
        Self {
            images_path: images_path.into(),
            images_suffix: images_suffix.into(),
            marker_regex: Regex::new(MARKER_PATTERN).unwrap(),
        }
    }

    /// Splits a leading marker off `text`.
    ///
    /// Returns the icon path and the text with the marker removed, or `None`
    /// when `text` does not start with a marker. The remaining text is not trimmed.
    pub fn extract(&self, text: &str) -> Option<(String, String)> {
        let caps = self.marker_regex.captures(text)?;
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        let icon = self.icon_path(name);
        let rest = self.marker_regex.replace(text, "").into_owned();
        Some((icon, rest))
    }

    /// Moves a leading marker of the entry's text into its icon.
    #[instrument(level = "trace", skip(self, entry), fields(id = %entry.id()))]
    pub fn enrich(&self, entry: &mut Entry) {
        if let Some((icon, text)) = self.extract(entry.text()) {
            debug!(%icon, "icon marker found");
            entry.set_icon(icon, text);
        }
    }

    /// Joins `name` below the images directory. Names are always relative,
    /// and `.`/`..` segments are resolved lexically.
    fn icon_path(&self, name: &str) -> String {
        let name = name.trim_start_matches('/');
        let joined = self.images_path.join(name);
        let joined = if joined.as_os_str().is_empty() {
            joined
        } else {
            clean_path(&joined)
        };
        let joined = joined.to_string_lossy();
        if self.images_suffix.is_empty() {
            joined.into_owned()
        } else {
            format!("{}.{}", joined, self.images_suffix)
        }
    }
}

/// Lexical path cleanup: drops `.` and empty segments, folds `..` into the
/// preceding segment. `..` never climbs above a root. Nothing touches the filesystem.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut normal = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if normal > 0 {
                    cleaned.pop();
                    normal -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(segment) => {
                cleaned.push(segment);
                normal += 1;
            }
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
