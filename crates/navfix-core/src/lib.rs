//! Navigation reconciliation for mkdocs-style documentation sites.
//!
//! This crate repairs the `nav` section of a site configuration file
//! whose path references have drifted from the files on disk (case
//! changes, moved files). It does so in two phases:
//!
//! 1. [`FileIndex::build`] walks the documentation root and indexes
//!    every `.md` file by lowercased filename.
//! 2. [`rewrite_nav`] walks the navigation tree and replaces each leaf
//!    reference with the indexed location, preserving the tree's shape
//!    and falling back to the original string when no file matches.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use navfix_core::{FileIndex, NavDocument, rewrite_nav};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = NavDocument::load(Path::new("mkdocs.yml"))?;
//! let index = FileIndex::build(Path::new("docs"))?;
//! if let Some(nav) = doc.nav() {
//!     let (fixed, report) = rewrite_nav(nav, &index);
//!     for reference in &report.unresolved {
//!         eprintln!("no file for {reference}");
//!     }
//!     doc.set_nav(fixed);
//! }
//! doc.save(Path::new("mkdocs_fixed.yml"))?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod index;
pub mod nav;

pub use document::{DocumentError, NavDocument};
pub use index::{FileIndex, IndexError, Lookup};
pub use nav::{RewriteReport, rewrite_nav};
