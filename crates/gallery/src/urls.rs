use url::Url;
use viewconfig::ArtworkTemplates;

use crate::{ArtworkId, GalleryError};

/// Color and depth image locations for one artwork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkUrls {
    pub color: Url,
    pub depth: Url,
}

impl ArtworkUrls {
    /// Expands `{id}` and `{slug}` in both templates and resolves the result
    /// against the page URL, so relative templates stay next to the page.
    pub fn resolve(
        templates: &ArtworkTemplates,
        page: &Url,
        id: &ArtworkId,
    ) -> Result<Self, GalleryError> {
        let color = page.join(&expand(&templates.color, id))?;
        let depth = page.join(&expand(&templates.depth, id))?;
        tracing::debug!(artwork = %id, %color, %depth, "resolved artwork urls");
        Ok(Self { color, depth })
    }
}

fn expand(template: &str, id: &ArtworkId) -> String {
    template
        .replace("{id}", id.as_str())
        .replace("{slug}", &id.slug())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://gallery.example/view/index.html?art=x").unwrap()
    }

    #[test]
    fn default_templates_use_id_and_slug() {
        let urls = ArtworkUrls::resolve(
            &ArtworkTemplates::default(),
            &page(),
            &ArtworkId::new("orpheus/01"),
        )
        .unwrap();
        assert_eq!(
            urls.color.as_str(),
            "https://storage.drimgar.com/illustrations/orpheus/01.jpg"
        );
        assert_eq!(
            urls.depth.as_str(),
            "https://drimgar-temp.web.app/orpheus+01-dpt_beit_large_512.png"
        );
    }

    #[test]
    fn relative_templates_resolve_against_page() {
        let templates = ArtworkTemplates {
            color: "./color/{id}.jpg".to_string(),
            depth: "../depth/{slug}.png".to_string(),
        };
        let urls = ArtworkUrls::resolve(&templates, &page(), &ArtworkId::new("a/b")).unwrap();
        assert_eq!(urls.color.as_str(), "https://gallery.example/view/color/a/b.jpg");
        assert_eq!(urls.depth.as_str(), "https://gallery.example/depth/a+b.png");
    }
}
