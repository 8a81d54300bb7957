use url::Url;
use viewconfig::query::{with_param, ART};

use crate::ArtworkId;

/// CSS class carried by every sidebar anchor.
pub const LINK_CLASS: &str = "link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: Url,
}

/// One link per id, each pointing at `current` with `art` set to the id.
/// Other query parameters are carried over unchanged.
pub fn nav_links(ids: &[ArtworkId], current: &Url) -> Vec<NavLink> {
    ids.iter()
        .map(|id| NavLink {
            label: id.to_string(),
            href: with_param(current, ART, Some(id.as_str())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_art_and_keeps_other_parameters() {
        let current = Url::parse("https://gallery.example/?str=2&art=old&alt=").unwrap();
        let links = nav_links(&[ArtworkId::new("new")], &current);
        assert_eq!(links[0].label, "new");
        assert_eq!(links[0].href.query(), Some("str=2&art=new&alt="));
    }

    #[test]
    fn encodes_special_characters() {
        let current = Url::parse("https://gallery.example/").unwrap();
        let links = nav_links(&[ArtworkId::new("orpheus/01 b")], &current);
        assert_eq!(links[0].href.query(), Some("art=orpheus%2F01+b"));
    }
}
