use url::Url;

use crate::query::{with_param, QueryParams, ALT, SCALE_FACTOR};
use crate::ToggleSettings;

/// Alternate-shader checkbox state and the navigation it triggers.
#[derive(Debug, Clone, Copy)]
pub struct AltToggle<'a> {
    settings: &'a ToggleSettings,
}

impl<'a> AltToggle<'a> {
    pub fn new(settings: &'a ToggleSettings) -> Self {
        Self { settings }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// The checkbox mirrors the presence of `alt`, whatever its value.
    pub fn is_checked(&self, params: &QueryParams) -> bool {
        params.contains(ALT)
    }

    /// URL to navigate to after the checkbox changes to `checked`.
    pub fn navigation_url(&self, current: &Url, checked: bool) -> Url {
        if checked {
            let url = with_param(current, ALT, Some(""));
            with_param(&url, SCALE_FACTOR, Some(&self.settings.checked_fscale))
        } else {
            let url = with_param(current, ALT, None);
            with_param(&url, SCALE_FACTOR, Some(&self.settings.unchecked_fscale))
        }
    }
}
