//! Core shell state types used by the reducer, persistence and UI layers.

use arcade_game_contract::{GameId, PlayerProfile};
use platform_host::HostThemeColors;
use serde::{Deserialize, Serialize};

use crate::slots::GameSlots;

/// Lowest accepted particle density.
pub const MIN_PARTICLE_DENSITY: u32 = 10;
/// Highest accepted particle density.
pub const MAX_PARTICLE_DENSITY: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// What the floating window is showing.
pub enum Screen {
    /// Game picker.
    #[default]
    Menu,
    /// Appearance, sound and credential settings.
    Settings,
    /// One game's surface.
    Game(GameId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Theme selector.
pub enum ThemeMode {
    /// Follows the host's palette.
    Tavern,
    /// Slate dark palette.
    #[default]
    Dark,
    /// Light palette.
    Light,
    /// Parchment palette.
    Retro,
    /// Neon palette with a glow.
    Cyberpunk,
    /// Pink palette.
    Sakura,
    /// Deep blue palette.
    Ocean,
    /// Green palette.
    Forest,
    /// Violet night palette.
    Midnight,
    /// Player-picked colors.
    Custom,
}

impl ThemeMode {
    /// Every mode in settings order.
    pub const ALL: [ThemeMode; 10] = [
        Self::Tavern,
        Self::Dark,
        Self::Light,
        Self::Retro,
        Self::Cyberpunk,
        Self::Sakura,
        Self::Ocean,
        Self::Forest,
        Self::Midnight,
        Self::Custom,
    ];

    /// Stable token used in the snapshot and the theme catalog.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Tavern => "tavern",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Retro => "retro",
            Self::Cyberpunk => "cyberpunk",
            Self::Sakura => "sakura",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Midnight => "midnight",
            Self::Custom => "custom",
        }
    }

    /// Parses a stable token.
    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == raw.trim())
    }

    /// Whether the palette comes from runtime values rather than the catalog.
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Tavern | Self::Custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One of the ten resolved palette colors.
pub enum ColorSlot {
    /// Window body background.
    BgBase,
    /// Title bar background.
    BgHeader,
    /// Main text.
    TextMain,
    /// Secondary text.
    TextDim,
    /// Borders.
    Border,
    /// Primary buttons.
    Primary,
    /// Highlights.
    Accent,
    /// Cards and panels.
    Panel,
    /// Positive states.
    Success,
    /// Negative states.
    Danger,
}

impl ColorSlot {
    /// Every slot in palette order.
    pub const ALL: [ColorSlot; 10] = [
        Self::BgBase,
        Self::BgHeader,
        Self::TextMain,
        Self::TextDim,
        Self::Border,
        Self::Primary,
        Self::Accent,
        Self::Panel,
        Self::Success,
        Self::Danger,
    ];

    /// Settings label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BgBase => "Background",
            Self::BgHeader => "Header",
            Self::TextMain => "Text",
            Self::TextDim => "Dim text",
            Self::Border => "Border",
            Self::Primary => "Primary",
            Self::Accent => "Accent",
            Self::Panel => "Panel",
            Self::Success => "Success",
            Self::Danger => "Danger",
        }
    }

    /// CSS custom property carrying the resolved color.
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::BgBase => "--arcade-bg-base",
            Self::BgHeader => "--arcade-bg-header",
            Self::TextMain => "--arcade-text-main",
            Self::TextDim => "--arcade-text-dim",
            Self::Border => "--arcade-border",
            Self::Primary => "--arcade-primary",
            Self::Accent => "--arcade-accent",
            Self::Panel => "--arcade-panel",
            Self::Success => "--arcade-success",
            Self::Danger => "--arcade-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Player color overrides used by [`ThemeMode::Custom`]. Unset slots resolve to per-slot defaults.
pub struct CustomColors {
    /// Window body background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_base: Option<String>,
    /// Title bar background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_header: Option<String>,
    /// Main text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_main: Option<String>,
    /// Secondary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    /// Borders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Primary buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Highlights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Cards and panels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
    /// Positive states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    /// Negative states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
}

impl Default for CustomColors {
    fn default() -> Self {
        Self {
            bg_base: Some("#1a1a1a".to_string()),
            bg_header: Some("#000000".to_string()),
            text_main: Some("#ffffff".to_string()),
            text_dim: None,
            border: None,
            primary: Some("#ff0055".to_string()),
            accent: None,
            panel: Some("#2a2a2a".to_string()),
            success: None,
            danger: None,
        }
    }
}

impl CustomColors {
    /// Colors with every slot unset.
    pub fn unset() -> Self {
        Self {
            bg_base: None,
            bg_header: None,
            text_main: None,
            text_dim: None,
            border: None,
            primary: None,
            accent: None,
            panel: None,
            success: None,
            danger: None,
        }
    }

    /// Override for `slot`, ignoring blank values.
    pub fn get(&self, slot: ColorSlot) -> Option<&str> {
        self.field(slot)
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Sets or clears the override for `slot`. Blank values clear.
    pub fn set(&mut self, slot: ColorSlot, value: Option<String>) {
        *self.field_mut(slot) = value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    fn field(&self, slot: ColorSlot) -> &Option<String> {
        match slot {
            ColorSlot::BgBase => &self.bg_base,
            ColorSlot::BgHeader => &self.bg_header,
            ColorSlot::TextMain => &self.text_main,
            ColorSlot::TextDim => &self.text_dim,
            ColorSlot::Border => &self.border,
            ColorSlot::Primary => &self.primary,
            ColorSlot::Accent => &self.accent,
            ColorSlot::Panel => &self.panel,
            ColorSlot::Success => &self.success,
            ColorSlot::Danger => &self.danger,
        }
    }

    fn field_mut(&mut self, slot: ColorSlot) -> &mut Option<String> {
        match slot {
            ColorSlot::BgBase => &mut self.bg_base,
            ColorSlot::BgHeader => &mut self.bg_header,
            ColorSlot::TextMain => &mut self.text_main,
            ColorSlot::TextDim => &mut self.text_dim,
            ColorSlot::Border => &mut self.border,
            ColorSlot::Primary => &mut self.primary,
            ColorSlot::Accent => &mut self.accent,
            ColorSlot::Panel => &mut self.panel,
            ColorSlot::Success => &mut self.success,
            ColorSlot::Danger => &mut self.danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Particle tint. Serialized as `"auto"` or the color string.
pub enum ParticleColor {
    /// Follow the resolved primary color.
    #[default]
    Auto,
    /// Fixed color.
    Fixed(String),
}

impl From<String> for ParticleColor {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Fixed(trimmed.to_string())
        }
    }
}

impl From<ParticleColor> for String {
    fn from(color: ParticleColor) -> Self {
        match color {
            ParticleColor::Auto => "auto".to_string(),
            ParticleColor::Fixed(color) => color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Decorative background particle settings.
pub struct ParticleConfig {
    /// Draw particles at all.
    pub enabled: bool,
    /// Particle count, kept within [`MIN_PARTICLE_DENSITY`]..=[`MAX_PARTICLE_DENSITY`].
    pub density: u32,
    /// Tint.
    pub color: ParticleColor,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 40,
            color: ParticleColor::Auto,
        }
    }
}

impl ParticleConfig {
    /// Returns the config with density clamped into range.
    pub fn clamped(mut self) -> Self {
        self.density = self.density.clamp(MIN_PARTICLE_DENSITY, MAX_PARTICLE_DENSITY);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// User web font.
pub struct FontSettings {
    /// Stylesheet URL; empty for none.
    pub url: String,
    /// CSS font family; empty for the default.
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Named set of custom colors.
pub struct ThemePreset {
    /// Unique preset name.
    pub name: String,
    /// Saved colors.
    pub colors: CustomColors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Transient in-shell message.
pub struct Notice {
    /// Sequence number; dismissal timers only clear their own notice.
    pub id: u64,
    /// Message text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Whole shell state: preferences, identity, navigation and game slots.
pub struct ShellState {
    /// Window shown. Flipped only by the host toggle.
    pub visible: bool,
    /// Current screen.
    pub screen: Screen,
    /// Theme selector.
    pub theme_mode: ThemeMode,
    /// Custom-mode colors.
    pub custom_colors: CustomColors,
    /// Sound cues enabled.
    pub sound_enabled: bool,
    /// Background particles.
    pub particle_config: ParticleConfig,
    /// Text-generation credential.
    pub api_key: String,
    /// Player display name from the host.
    pub user_name: String,
    /// Character display name from the host.
    pub char_name: String,
    /// User web font.
    pub font_settings: FontSettings,
    /// Saved custom color presets.
    pub presets: Vec<ThemePreset>,
    /// Last palette synced from the host.
    pub host_colors: HostThemeColors,
    /// Visible notice.
    pub notice: Option<Notice>,
    /// Last issued notice id.
    pub notice_seq: u64,
    /// Per-game state.
    pub slots: GameSlots,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            visible: false,
            screen: Screen::Menu,
            theme_mode: ThemeMode::Dark,
            custom_colors: CustomColors::default(),
            sound_enabled: true,
            particle_config: ParticleConfig::default(),
            api_key: String::new(),
            user_name: "User".to_string(),
            char_name: "Character".to_string(),
            font_settings: FontSettings::default(),
            presets: Vec::new(),
            host_colors: HostThemeColors::default(),
            notice: None,
            notice_seq: 0,
            slots: GameSlots::default(),
        }
    }
}

impl ShellState {
    /// Identity and credential handed to games.
    pub fn profile(&self) -> PlayerProfile {
        PlayerProfile {
            user_name: self.user_name.clone(),
            char_name: self.char_name.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Game currently on screen.
    pub fn active_game(&self) -> Option<GameId> {
        match self.screen {
            Screen::Game(game) => Some(game),
            Screen::Menu | Screen::Settings => None,
        }
    }

    /// Whether any field covered by the autosave record differs from `other`.
    pub fn persisted_fields_differ(&self, other: &Self) -> bool {
        self.theme_mode != other.theme_mode
            || self.custom_colors != other.custom_colors
            || self.sound_enabled != other.sound_enabled
            || self.particle_config != other.particle_config
            || self.api_key != other.api_key
            || self.font_settings != other.font_settings
            || self.presets != other.presets
            || self.slots != other.slots
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Pointer position in CSS pixels.
pub struct PointerPosition {
    /// Horizontal offset from the viewport's left edge.
    pub x: i32,
    /// Vertical offset from the viewport's top edge.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Viewport size in CSS pixels.
pub struct Viewport {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { w: 1024, h: 768 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Active drag: pointer minus window origin at press time.
pub struct DragSession {
    /// Captured offset.
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Floating window geometry. Not persisted.
pub struct FloatingWindowState {
    /// Top-left corner.
    pub position: PointerPosition,
    /// Collapsed to the title bar.
    pub minimized: bool,
    /// Drag in progress.
    pub dragging: Option<DragSession>,
}

impl Default for FloatingWindowState {
    fn default() -> Self {
        Self {
            position: PointerPosition { x: 20, y: 20 },
            minimized: false,
            dragging: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let state = ShellState::default();
        assert!(!state.visible);
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert!(state.sound_enabled);
        assert_eq!(state.user_name, "User");
        assert_eq!(state.char_name, "Character");
        assert_eq!(state.particle_config.density, 40);
        assert_eq!(state.custom_colors.get(ColorSlot::Primary), Some("#ff0055"));
        assert_eq!(state.custom_colors.get(ColorSlot::Accent), None);
    }

    #[test]
    fn theme_modes_round_trip_their_tokens() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_id(mode.id()), Some(mode));
            assert_eq!(
                serde_json::to_value(mode).expect("encode"),
                json!(mode.id())
            );
        }
        assert_eq!(ThemeMode::from_id("neon"), None);
    }

    #[test]
    fn particle_color_uses_auto_token() {
        let config = ParticleConfig::default();
        assert_eq!(
            serde_json::to_value(&config).expect("encode"),
            json!({"enabled": true, "density": 40, "color": "auto"})
        );
        let fixed: ParticleConfig =
            serde_json::from_value(json!({"enabled": false, "density": 500, "color": "#fff"}))
                .expect("decode");
        assert_eq!(fixed.color, ParticleColor::Fixed("#fff".into()));
        assert_eq!(fixed.clamped().density, MAX_PARTICLE_DENSITY);
    }

    #[test]
    fn blank_custom_colors_clear_the_override() {
        let mut colors = CustomColors::default();
        colors.set(ColorSlot::Primary, Some("   ".into()));
        assert_eq!(colors.get(ColorSlot::Primary), None);
        colors.set(ColorSlot::Danger, Some(" #f00 ".into()));
        assert_eq!(colors.get(ColorSlot::Danger), Some("#f00"));
    }

    #[test]
    fn identity_and_visibility_are_not_autosaved_fields() {
        let before = ShellState::default();
        let mut after = before.clone();
        after.visible = true;
        after.user_name = "Alice".into();
        after.screen = Screen::Settings;
        assert!(!after.persisted_fields_differ(&before));
        after.api_key = "key".into();
        assert!(after.persisted_fields_differ(&before));
    }
}
