//! Configuration - YAML file for theme, key bindings and bus sizing
//!
//! ```yaml
//! theme:
//!   border_color: 39
//!   active_tab_border_color: 205
//!   widget_border_color: 142
//!   tab_padding: { left: 2, right: 2 }
//!   page_alignment: center
//! keys:
//!   quit: ["ctrl+c", "q"]
//!   switch_tab_left: ["ctrl+left"]
//!   switch_tab_right: ["ctrl+right"]
//! refresh_capacity: 256
//! ```
//!
//! Every field is optional. Colors are 256-color palette indices.

use std::path::Path;

use ratatui::layout::Alignment;
use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{Result, SkeletonError};
use crate::keymap::{KeyBinding, KeyMap};
use crate::refresh::{RefreshBus, DEFAULT_CAPACITY};
use crate::skeleton::Skeleton;
use crate::theme::Theme;

const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkeletonConfig {
    pub theme: ThemeConfig,
    pub keys: KeysConfig,
    pub refresh_capacity: usize,

    /// Where the config came from, for error messages
    #[serde(skip)]
    source: String,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            keys: KeysConfig::default(),
            refresh_capacity: DEFAULT_CAPACITY,
            source: INLINE_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub border_color: Option<u8>,
    pub active_tab_border_color: Option<u8>,
    pub active_tab_text_color: Option<u8>,
    pub inactive_tab_border_color: Option<u8>,
    pub inactive_tab_text_color: Option<u8>,
    pub disabled_tab_color: Option<u8>,
    pub widget_border_color: Option<u8>,
    pub tab_padding: Option<Padding>,
    pub widget_padding: Option<Padding>,
    pub page_alignment: Option<PageAlignment>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageAlignment {
    Left,
    Center,
    Right,
}

impl From<PageAlignment> for Alignment {
    fn from(value: PageAlignment) -> Self {
        match value {
            PageAlignment::Left => Alignment::Left,
            PageAlignment::Center => Alignment::Center,
            PageAlignment::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub quit: Option<Vec<String>>,
    pub switch_tab_left: Option<Vec<String>>,
    pub switch_tab_right: Option<Vec<String>>,
}

impl SkeletonConfig {
    /// Parse and validate YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, INLINE_SOURCE)
    }

    /// Read, parse and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        Self::parse(&yaml, &path.display().to_string())
    }

    fn parse(yaml: &str, source: &str) -> Result<Self> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.source = source.to_string();
        config.validate()?;
        tracing::debug!(source, "config loaded");
        Ok(config)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check everything that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.refresh_capacity == 0 {
            return Err(SkeletonError::config(
                &self.source,
                "refresh_capacity must be at least 1",
            ));
        }
        self.keymap().map(|_| ())
    }

    /// Theme with every configured override applied
    pub fn theme(&self) -> Theme {
        let t = &self.theme;
        let mut theme = Theme::default();

        if let Some(c) = t.border_color {
            theme.border_color = Color::Indexed(c);
        }
        if let Some(c) = t.active_tab_border_color {
            theme.active_tab_border = Color::Indexed(c);
        }
        theme.active_tab_text = t.active_tab_text_color.map(Color::Indexed);
        if let Some(c) = t.inactive_tab_border_color {
            theme.inactive_tab_border = Color::Indexed(c);
        }
        theme.inactive_tab_text = t.inactive_tab_text_color.map(Color::Indexed);
        if let Some(c) = t.disabled_tab_color {
            theme.disabled_tab = Color::Indexed(c);
        }
        theme.widget_border_color = t.widget_border_color.map(Color::Indexed);
        if let Some(p) = t.tab_padding {
            theme.tab_padding_left = p.left;
            theme.tab_padding_right = p.right;
        }
        if let Some(p) = t.widget_padding {
            theme.widget_padding_left = p.left;
            theme.widget_padding_right = p.right;
        }
        if let Some(a) = t.page_alignment {
            theme.page_alignment = a.into();
        }
        theme
    }

    /// Key map with configured bindings replacing the defaults
    pub fn keymap(&self) -> Result<KeyMap> {
        let mut keymap = KeyMap::default();
        if let Some(specs) = &self.keys.quit {
            keymap.quit = self.bindings(specs, "Quit")?;
        }
        if let Some(specs) = &self.keys.switch_tab_left {
            keymap.switch_tab_left = self.bindings(specs, "Previous tab")?;
        }
        if let Some(specs) = &self.keys.switch_tab_right {
            keymap.switch_tab_right = self.bindings(specs, "Next tab")?;
        }
        Ok(keymap)
    }

    fn bindings(&self, keys: &[String], description: &'static str) -> Result<Vec<KeyBinding>> {
        keys
            .iter()
            .map(|key| {
                KeyBinding::parse(key, description).ok_or_else(|| {
                    SkeletonError::config(&self.source, format!("unknown key '{}'", key))
                })
            })
            .collect()
    }
}

impl Skeleton {
    /// Skeleton with the configured theme, key map and bus capacity
    pub fn with_config(config: &SkeletonConfig) -> Result<Self> {
        config.validate()?;
        let mut skeleton = Skeleton::with_bus(RefreshBus::with_capacity(config.refresh_capacity));
        skeleton.set_theme(config.theme());
        skeleton.set_keymap(config.keymap()?);
        Ok(skeleton)
    }
}
