//! Site configuration document load and save.
//!
//! The mkdocs-style configuration file is handled as a generic YAML
//! mapping: only the `nav` key is interpreted, every other key passes
//! through the fix run untouched and in its original order
//! (`serde_yaml::Mapping` preserves insertion order).

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Sequence, Value};

/// Key of the navigation tree in the configuration document.
const NAV_KEY: &str = "nav";

/// Error returned while loading or saving the configuration document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Filesystem error, including a missing input document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid YAML.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document's top level is not a mapping.
    #[error("expected a mapping at the top level of {0}")]
    NotMapping(String),
}

/// A loaded site configuration document.
#[derive(Debug)]
pub struct NavDocument {
    root: Mapping,
}

impl NavDocument {
    /// Load and parse the configuration document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read,
    /// [`DocumentError::Parse`] if it is not valid YAML, and
    /// [`DocumentError::NotMapping`] if its top level is not a mapping.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&content)?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            _ => Err(DocumentError::NotMapping(path.display().to_string())),
        }
    }

    /// The navigation tree, if the document declares one as a sequence.
    #[must_use]
    pub fn nav(&self) -> Option<&Sequence> {
        self.root.get(NAV_KEY).and_then(Value::as_sequence)
    }

    /// Replace the navigation tree, keeping the key's original position.
    pub fn set_nav(&mut self, nav: Sequence) {
        self.root
            .insert(Value::from(NAV_KEY), Value::Sequence(nav));
    }

    /// Serialize the document and write it to `path`.
    ///
    /// Unicode is written verbatim; key order is the load order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if serialization fails and
    /// [`DocumentError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let content = serde_yaml::to_string(&self.root)?;
        fs::write(path, content)?;
        Ok(())
    }
}
