use std::fmt;

/// Key of a single artwork, as used by the `art` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtworkId(String);

impl ArtworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the id from a manifest line: the first character is dropped
    /// and every literal `.jpg` is removed. A one-character line yields an
    /// empty id.
    pub fn from_manifest_line(line: &str) -> Self {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        chars.next();
        Self(chars.as_str().replace(".jpg", ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Id with every `/` replaced by `+`, as used in depth-map file names.
    pub fn slug(&self) -> String {
        self.0.replace('/', "+")
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtworkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_first_character_and_extension() {
        assert_eq!(ArtworkId::from_manifest_line("1eurydice-02.jpg").as_str(), "eurydice-02");
        assert_eq!(ArtworkId::from_manifest_line("  2foo.jpg \r").as_str(), "foo");
    }

    #[test]
    fn removes_every_literal_extension() {
        let id = ArtworkId::from_manifest_line("xa.jpg/b.jpg");
        assert_eq!(id.as_str(), "a/b");
    }

    #[test]
    fn keeps_other_extensions() {
        assert_eq!(ArtworkId::from_manifest_line("3bar.png").as_str(), "bar.png");
        assert_eq!(ArtworkId::from_manifest_line("3barxjpg").as_str(), "barxjpg");
    }

    #[test]
    fn single_character_line_yields_empty_id() {
        let id = ArtworkId::from_manifest_line("7");
        assert!(id.is_empty());
    }

    #[test]
    fn slug_replaces_slashes() {
        let id = ArtworkId::new("orpheus/01/b");
        assert_eq!(id.slug(), "orpheus+01+b");
        assert_eq!(id.to_string(), "orpheus/01/b");
    }
}
