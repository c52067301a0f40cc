//! Portfolio manifest loading.
//!
//! A manifest is the `index.json` that backs a portfolio listing view: one
//! summary entry per case study, so the list renders without loading each
//! full document. Validation happens here at the loading boundary, never
//! inside rendering code.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One portfolio item summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// URL-safe identifier naming the backing content document.
    pub slug: String,

    /// Display title.
    pub title: String,

    /// Short listing blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Tag labels shown as chips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

/// An ordered list of portfolio entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load and validate a manifest from JSON.
    ///
    /// Unknown fields in entries are ignored; an empty or duplicate slug is
    /// an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate()?;
        log::debug!("loaded manifest: {} entries", manifest.len());
        Ok(manifest)
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Look up an entry by slug.
    pub fn get(&self, slug: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if entry.slug.trim().is_empty() {
                return Err(Error::Manifest(format!(
                    "entry {:?} has an empty slug",
                    entry.title
                )));
            }
            if !seen.insert(entry.slug.as_str()) {
                return Err(Error::Manifest(format!("duplicate slug: {}", entry.slug)));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
