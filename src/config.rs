//! Runtime settings: endpoints, page selectors and pacing. Every field has a
//! default matching the recorded editor; an optional `replay.toml` in the
//! working directory overrides them.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default name of the optional settings file.
pub const SETTINGS_FILE: &str = "replay.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Avatar editor entry URL.
    #[serde(default = "defaults::editor_url")]
    pub editor_url: String,

    /// HTTP endpoint of a Chrome instance started with
    /// `--remote-debugging-port`.
    #[serde(default = "defaults::devtools_endpoint")]
    pub devtools_endpoint: String,

    #[serde(default)]
    pub page: PageSelectors,

    #[serde(default)]
    pub pacing: Pacing,
}

/// CSS selectors for the editor's stable hooks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSelectors {
    #[serde(default = "defaults::connect_button")]
    pub connect_button: String,

    #[serde(default = "defaults::modal_close")]
    pub modal_close: String,

    #[serde(default = "defaults::category_picker")]
    pub category_picker: String,

    #[serde(default = "defaults::subcategory_picker")]
    pub subcategory_picker: String,

    #[serde(default = "defaults::asset_list")]
    pub asset_list: String,

    #[serde(default = "defaults::asset_item")]
    pub asset_item: String,
}

/// Fixed waits between UI steps. The editor exposes no reliable "settled"
/// signal, so these are plain pauses rather than condition polls.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pacing {
    /// Page-load readiness deadline.
    #[serde(default = "defaults::page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Deadline for selector-wait clicks (connect button, modal close).
    #[serde(default = "defaults::click_timeout_ms")]
    pub click_timeout_ms: u64,

    /// Pause after opening a flat top-level category.
    #[serde(default = "defaults::category_settle_ms")]
    pub category_settle_ms: u64,

    /// Pause after opening a parent category or subcategory control.
    #[serde(default = "defaults::subcategory_settle_ms")]
    pub subcategory_settle_ms: u64,

    /// Pause between the opening clicks and after each replayed attribute.
    #[serde(default = "defaults::post_attribute_settle_ms")]
    pub post_attribute_settle_ms: u64,

    /// How long to incrementally scroll the lazy asset list before searching.
    #[serde(default = "defaults::scroll_reveal_secs")]
    pub scroll_reveal_secs: u64,
}

mod defaults {
    pub fn editor_url() -> String {
        "https://space-labs-avatar-editor.readyplayer.me/avatar/choose".to_string()
    }
    pub fn devtools_endpoint() -> String {
        "http://127.0.0.1:9222".to_string()
    }
    pub fn connect_button() -> String {
        r#"[data-cy="connect-new-avatar-button"]"#.to_string()
    }
    pub fn modal_close() -> String {
        r#"[data-cy="modal-close-button"]"#.to_string()
    }
    pub fn category_picker() -> String {
        ".categorypicker".to_string()
    }
    pub fn subcategory_picker() -> String {
        ".subcategorypicker".to_string()
    }
    pub fn asset_list() -> String {
        r#"[data-cy="asset-list"]"#.to_string()
    }
    pub fn asset_item() -> String {
        r#"[data-cy="asset-item"]"#.to_string()
    }
    pub fn page_timeout_ms() -> u64 {
        30_000
    }
    pub fn click_timeout_ms() -> u64 {
        3_000
    }
    pub fn category_settle_ms() -> u64 {
        1_500
    }
    pub fn subcategory_settle_ms() -> u64 {
        1_000
    }
    pub fn post_attribute_settle_ms() -> u64 {
        2_000
    }
    pub fn scroll_reveal_secs() -> u64 {
        5
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor_url: defaults::editor_url(),
            devtools_endpoint: defaults::devtools_endpoint(),
            page: PageSelectors::default(),
            pacing: Pacing::default(),
        }
    }
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            connect_button: defaults::connect_button(),
            modal_close: defaults::modal_close(),
            category_picker: defaults::category_picker(),
            subcategory_picker: defaults::subcategory_picker(),
            asset_list: defaults::asset_list(),
            asset_item: defaults::asset_item(),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_timeout_ms: defaults::page_timeout_ms(),
            click_timeout_ms: defaults::click_timeout_ms(),
            category_settle_ms: defaults::category_settle_ms(),
            subcategory_settle_ms: defaults::subcategory_settle_ms(),
            post_attribute_settle_ms: defaults::post_attribute_settle_ms(),
            scroll_reveal_secs: defaults::scroll_reveal_secs(),
        }
    }
}

impl Pacing {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }

    pub fn category_settle(&self) -> Duration {
        Duration::from_millis(self.category_settle_ms)
    }

    pub fn subcategory_settle(&self) -> Duration {
        Duration::from_millis(self.subcategory_settle_ms)
    }

    pub fn post_attribute_settle(&self) -> Duration {
        Duration::from_millis(self.post_attribute_settle_ms)
    }

    pub fn scroll_reveal(&self) -> Duration {
        Duration::from_secs(self.scroll_reveal_secs)
    }

    /// Zeroed pacing for tests that should not sleep.
    pub fn immediate() -> Self {
        Self {
            page_timeout_ms: 0,
            click_timeout_ms: 0,
            category_settle_ms: 0,
            subcategory_settle_ms: 0,
            post_attribute_settle_ms: 0,
            scroll_reveal_secs: 0,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
