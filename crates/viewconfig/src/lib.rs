//! Viewer configuration shared by the gallery loader and the browser entry
//! point.
//!
//! The configuration is a small TOML document compiled into the wasm module
//! (`viewer.toml`). It replaces the hard-coded constants that used to differ
//! between page revisions: manifest location and sort order, image URL
//! templates, embedded shader element ids, DOM ids, motion constants and the
//! alt-shader toggle values. Per-visit overrides come from the page query
//! string and are modelled in [`query`].

pub mod query;
pub mod toggle;

use serde::Deserialize;

pub use query::{with_param, QueryParams, ViewParams};
pub use toggle::AltToggle;

const BUNDLED_CONFIG: &str = include_str!("../viewer.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Order in which manifest lines are sorted relative to the id transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Sort the raw manifest lines, then derive ids.
    #[default]
    BeforeTransform,
    /// Derive ids first, then sort the ids.
    AfterTransform,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub version: u32,
    #[serde(default)]
    pub manifest: ManifestSettings,
    #[serde(default)]
    pub artwork: ArtworkTemplates,
    #[serde(default)]
    pub defaults: QueryDefaults,
    #[serde(default)]
    pub shaders: ShaderElementIds,
    #[serde(default)]
    pub dom: DomIds,
    #[serde(default)]
    pub motion: MotionSettings,
    #[serde(default)]
    pub toggle: ToggleSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManifestSettings {
    pub url: String,
    pub sort: SortOrder,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            url: "./manifest.csv".to_string(),
            sort: SortOrder::default(),
        }
    }
}

/// URL templates for the two images of an artwork.
///
/// `{id}` expands to the artwork id verbatim, `{slug}` to the id with every
/// `/` replaced by `+`. Relative templates resolve against the page URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkTemplates {
    pub color: String,
    pub depth: String,
}

impl Default for ArtworkTemplates {
    fn default() -> Self {
        Self {
            color: "https://storage.drimgar.com/illustrations/{id}.jpg".to_string(),
            depth: "https://drimgar-temp.web.app/{slug}-dpt_beit_large_512.png".to_string(),
        }
    }
}

/// Values used when the query string omits a parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    pub art: String,
    pub strength: f64,
    pub fscale: f32,
    pub fdepth: f32,
    pub log: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            art: "eurydice-02".to_string(),
            strength: 1.0,
            fscale: 1.0,
            fdepth: 0.05,
            log: "info".to_string(),
        }
    }
}

/// Element ids of the inline `<script>` blocks holding shader sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShaderElementIds {
    pub vertex: String,
    pub fragment: String,
    pub alt_fragment: String,
}

impl ShaderElementIds {
    pub fn fragment_for(&self, alt: bool) -> &str {
        if alt {
            &self.alt_fragment
        } else {
            &self.fragment
        }
    }
}

impl Default for ShaderElementIds {
    fn default() -> Self {
        Self {
            vertex: "vertex-shader-pix".to_string(),
            fragment: "fragment-shader-pix".to_string(),
            alt_fragment: "fragment-shader-pix-alt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DomIds {
    pub sidebar: String,
    pub preview: String,
    pub alt_toggle: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            sidebar: "links".to_string(),
            preview: "preview".to_string(),
            alt_toggle: "alt-toggle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Angular speed of the shift vector in radians per millisecond.
    pub speed: f64,
    pub perspective_px: f64,
    /// Container tilt in degrees per unit of shift.
    pub tilt_degrees: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            speed: 0.0025,
            perspective_px: 600.0,
            tilt_degrees: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToggleSettings {
    pub enabled: bool,
    /// Kept as text so the navigation URL carries the exact spelling.
    pub checked_fscale: String,
    pub unchecked_fscale: String,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            checked_fscale: "1.2".to_string(),
            unchecked_fscale: "1.0".to_string(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            manifest: ManifestSettings::default(),
            artwork: ArtworkTemplates::default(),
            defaults: QueryDefaults::default(),
            shaders: ShaderElementIds::default(),
            dom: DomIds::default(),
            motion: MotionSettings::default(),
            toggle: ToggleSettings::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ViewerConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Parses the configuration compiled into the crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_CONFIG)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if self.manifest.url.trim().is_empty() {
            return Err(ConfigError::Invalid("manifest.url must not be empty".into()));
        }

        for (name, template) in [
            ("artwork.color", &self.artwork.color),
            ("artwork.depth", &self.artwork.depth),
        ] {
            if !template.contains("{id}") && !template.contains("{slug}") {
                return Err(ConfigError::Invalid(format!(
                    "{name} template '{template}' must contain '{{id}}' or '{{slug}}'"
                )));
            }
        }

        if self.defaults.art.trim().is_empty() {
            return Err(ConfigError::Invalid("defaults.art must not be empty".into()));
        }
        if !self.defaults.strength.is_finite()
            || !self.defaults.fscale.is_finite()
            || !self.defaults.fdepth.is_finite()
        {
            return Err(ConfigError::Invalid(
                "defaults.strength, defaults.fscale and defaults.fdepth must be finite".into(),
            ));
        }

        for (name, id) in [
            ("shaders.vertex", &self.shaders.vertex),
            ("shaders.fragment", &self.shaders.fragment),
            ("shaders.alt_fragment", &self.shaders.alt_fragment),
            ("dom.sidebar", &self.dom.sidebar),
            ("dom.preview", &self.dom.preview),
            ("dom.alt_toggle", &self.dom.alt_toggle),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }

        if !self.motion.speed.is_finite() {
            return Err(ConfigError::Invalid("motion.speed must be finite".into()));
        }
        if self.motion.perspective_px.is_nan() || self.motion.perspective_px <= 0.0 {
            return Err(ConfigError::Invalid(
                "motion.perspective_px must be greater than zero".into(),
            ));
        }
        if !self.motion.tilt_degrees.is_finite() {
            return Err(ConfigError::Invalid("motion.tilt_degrees must be finite".into()));
        }

        for (name, value) in [
            ("toggle.checked_fscale", &self.toggle.checked_fscale),
            ("toggle.unchecked_fscale", &self.toggle.unchecked_fscale),
        ] {
            if !matches!(value.trim().parse::<f32>(), Ok(parsed) if parsed.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} '{value}' is not a finite number"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = ViewerConfig::bundled().expect("bundled config");
        assert_eq!(config.version, 1);
        assert_eq!(config.manifest.url, "./manifest.csv");
        assert_eq!(config.manifest.sort, SortOrder::BeforeTransform);
        assert_eq!(config.defaults.art, "eurydice-02");
        assert_eq!(config.shaders.fragment_for(false), "fragment-shader-pix");
        assert_eq!(config.shaders.fragment_for(true), "fragment-shader-pix-alt");
        assert_eq!(config.toggle.checked_fscale, "1.2");
    }

    #[test]
    fn sparse_config_uses_defaults() {
        let config = ViewerConfig::from_toml_str("version = 1").expect("parse config");
        assert_eq!(config.motion.speed, 0.0025);
        assert_eq!(config.defaults.fdepth, 0.05);
        assert_eq!(config.dom.sidebar, "links");
        assert!(config.toggle.enabled);
    }

    #[test]
    fn parses_after_transform_sort() {
        let config = ViewerConfig::from_toml_str(
            r#"
version = 1

[manifest]
sort = "after-transform"
"#,
        )
        .expect("parse config");
        assert_eq!(config.manifest.sort, SortOrder::AfterTransform);
        assert_eq!(config.manifest.url, "./manifest.csv");
    }

    #[test]
    fn rejects_unknown_version() {
        let err = ViewerConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = ViewerConfig::from_toml_str(
            r#"
version = 1

[artwork]
depth = "./depth/static.png"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("artwork.depth")));
    }

    #[test]
    fn rejects_non_numeric_toggle_value() {
        let err = ViewerConfig::from_toml_str(
            r#"
version = 1

[toggle]
checked_fscale = "large"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ViewerConfig::from_toml_str("version = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
