//! File index construction by filesystem walking.
//!
//! The index is the lookup table the rewriter resolves navigation
//! references against: every `.md` file under the documentation root,
//! keyed by its lowercased filename. Building the index is Phase 1 of
//! a fix run; the nav rewrite in [`crate::nav`] is Phase 2.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

/// Error returned while building the file index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Filesystem error, including a missing documentation root.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved navigation reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Corrected path, relative to the documentation root,
    /// forward-slash separated.
    pub path: String,
    /// True when several files share the reference's filename and the
    /// reference did not narrow them down to one.
    pub ambiguous: bool,
}

/// Lookup table from lowercased filename to relative file locations.
///
/// All files sharing a lowercased name are retained as candidates, in
/// sorted order, so that [`FileIndex::resolve`] can disambiguate by
/// nearest path match instead of silently keeping the last file visited.
/// Built once per run, immutable afterward.
#[derive(Debug, Default)]
pub struct FileIndex {
    entries: HashMap<String, Vec<String>>,
}

impl FileIndex {
    /// Walk `docs_dir` recursively and index every `.md` file found.
    ///
    /// Hidden files and symlinks receive no special treatment. An empty
    /// or `.md`-free tree produces an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if `docs_dir` (or any directory below
    /// it) cannot be read.
    pub fn build(docs_dir: &Path) -> Result<Self, IndexError> {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        collect(docs_dir, "", &mut entries)?;

        for candidates in entries.values_mut() {
            candidates.sort();
        }
        for (name, candidates) in &entries {
            if candidates.len() > 1 {
                warn!(
                    filename = name.as_str(),
                    count = candidates.len(),
                    "filename appears in multiple directories"
                );
            }
        }

        Ok(Self { entries })
    }

    /// Number of distinct lowercased filenames in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no `.md` files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a navigation reference to its on-disk location.
    ///
    /// Matching is case-insensitive on the final path segment (the
    /// filename including extension) only, never on directory segments.
    /// When several files share that filename, the candidate nearest the
    /// reference wins: an exact case-insensitive path match first, then
    /// a case-insensitive path-suffix match, then the first candidate in
    /// sorted order with `ambiguous` set.
    ///
    /// Returns `None` when no indexed file has the reference's filename.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<Lookup> {
        let basename = reference.rsplit('/').next().unwrap_or(reference);
        let candidates = self.entries.get(&basename.to_lowercase())?;

        if let [only] = candidates.as_slice() {
            return Some(Lookup {
                path: only.clone(),
                ambiguous: false,
            });
        }

        let reference_lower = reference.to_lowercase();
        if let Some(exact) = candidates
            .iter()
            .find(|c| c.to_lowercase() == reference_lower)
        {
            return Some(Lookup {
                path: exact.clone(),
                ambiguous: false,
            });
        }

        let suffix_matches: Vec<&String> = candidates
            .iter()
            .filter(|c| {
                let lower = c.to_lowercase();
                lower
                    .strip_suffix(&reference_lower)
                    .is_some_and(|head| head.ends_with('/'))
            })
            .collect();

        match suffix_matches.as_slice() {
            [only] => Some(Lookup {
                path: (*only).clone(),
                ambiguous: false,
            }),
            [first, ..] => Some(Lookup {
                path: (*first).clone(),
                ambiguous: true,
            }),
            [] => Some(Lookup {
                path: candidates[0].clone(),
                ambiguous: true,
            }),
        }
    }
}

/// Collect `.md` files under `dir` into `entries`, keyed by lowercased
/// filename, with values relative to the walk root (`prefix` tracks the
/// relative directory during recursion, forward-slash separated).
fn collect(
    dir: &Path,
    prefix: &str,
    entries: &mut HashMap<String, Vec<String>>,
) -> Result<(), IndexError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel_path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        if entry.path().is_dir() {
            collect(&entry.path(), &rel_path, entries)?;
        } else if name.ends_with(".md") {
            entries.entry(name.to_lowercase()).or_default().push(rel_path);
        }
    }
    Ok(())
}
