//! Newline-delimited artwork manifest.
//!
//! Each non-empty line names one artwork. Lines carry a one-character prefix
//! and usually a `.jpg` suffix; [`ArtworkId::from_manifest_line`] strips both.
//! Duplicates are preserved.

use viewconfig::SortOrder;

use crate::ArtworkId;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManifestEntry {
    line: String,
}

impl ManifestEntry {
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn artwork_id(&self) -> ArtworkId {
        ArtworkId::from_manifest_line(&self.line)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn parse(text: &str) -> Self {
        let entries = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ManifestEntry {
                line: line.to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Artwork ids in navigation order.
    pub fn artwork_ids(&self, order: SortOrder) -> Vec<ArtworkId> {
        match order {
            SortOrder::BeforeTransform => {
                let mut entries = self.entries.clone();
                entries.sort();
                entries.iter().map(ManifestEntry::artwork_id).collect()
            }
            SortOrder::AfterTransform => {
                let mut ids: Vec<ArtworkId> =
                    self.entries.iter().map(ManifestEntry::artwork_id).collect();
                ids.sort();
                ids
            }
        }
    }
}
