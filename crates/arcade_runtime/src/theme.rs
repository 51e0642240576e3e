//! Theme resolution: mode, custom colors, host palette and particles to a render-time style.

use std::sync::OnceLock;

use platform_host::HostThemeColors;
use serde::Deserialize;

use crate::model::{ColorSlot, CustomColors, ParticleColor, ParticleConfig, ThemeMode};

include!(concat!(env!("OUT_DIR"), "/theme_catalog_generated.rs"));

/// Fallbacks for unset custom colors, in [`ColorSlot::ALL`] order.
pub const CUSTOM_DEFAULTS: [&str; 10] = [
    "#1e293b", "#0f172a", "#e2e8f0", "#94a3b8", "#334155", "#6366f1", "#818cf8", "#1e293b",
    "#4ade80", "#f87171",
];

const TAVERN_BG_BASE: &str = "#0b0f19";
const TAVERN_BG_HEADER: &str = "#111b27";
const TAVERN_TEXT_MAIN: &str = "#e2e8f0";
const TAVERN_TEXT_DIM: &str = "#94a3b8";
const TAVERN_BORDER: &str = "#1e293b";
const TAVERN_PRIMARY: &str = "#4ade80";
const TAVERN_PANEL: &str = "#1e293b";
const TAVERN_SUCCESS: &str = "#22c55e";
const TAVERN_DANGER: &str = "#ef4444";

#[derive(Debug, Clone, Deserialize)]
struct CatalogTheme {
    id: String,
    name: String,
    effect: Option<String>,
    bg_base: String,
    bg_header: String,
    text_main: String,
    text_dim: String,
    border: String,
    primary: String,
    accent: String,
    panel: String,
    success: String,
    danger: String,
}

impl CatalogTheme {
    fn palette(&self) -> Palette {
        Palette {
            bg_base: self.bg_base.clone(),
            bg_header: self.bg_header.clone(),
            text_main: self.text_main.clone(),
            text_dim: self.text_dim.clone(),
            border: self.border.clone(),
            primary: self.primary.clone(),
            accent: self.accent.clone(),
            panel: self.panel.clone(),
            success: self.success.clone(),
            danger: self.danger.clone(),
        }
    }
}

fn catalog() -> &'static [CatalogTheme] {
    static CATALOG: OnceLock<Vec<CatalogTheme>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(THEME_CATALOG_JSON).expect("generated theme catalog should parse")
    })
}

fn catalog_theme(mode: ThemeMode) -> Option<&'static CatalogTheme> {
    catalog().iter().find(|theme| theme.id == mode.id())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ten resolved colors.
pub struct Palette {
    /// Window body background.
    pub bg_base: String,
    /// Title bar background.
    pub bg_header: String,
    /// Main text.
    pub text_main: String,
    /// Secondary text.
    pub text_dim: String,
    /// Borders.
    pub border: String,
    /// Primary buttons.
    pub primary: String,
    /// Highlights.
    pub accent: String,
    /// Cards and panels.
    pub panel: String,
    /// Positive states.
    pub success: String,
    /// Negative states.
    pub danger: String,
}

impl Palette {
    /// Color for `slot`.
    pub fn get(&self, slot: ColorSlot) -> &str {
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

    fn custom(colors: &CustomColors) -> Self {
        let pick = |slot: ColorSlot, index: usize| {
            colors
                .get(slot)
                .unwrap_or(CUSTOM_DEFAULTS[index])
                .to_string()
        };
        Self {
            bg_base: pick(ColorSlot::BgBase, 0),
            bg_header: pick(ColorSlot::BgHeader, 1),
            text_main: pick(ColorSlot::TextMain, 2),
            text_dim: pick(ColorSlot::TextDim, 3),
            border: pick(ColorSlot::Border, 4),
            primary: pick(ColorSlot::Primary, 5),
            accent: pick(ColorSlot::Accent, 6),
            panel: pick(ColorSlot::Panel, 7),
            success: pick(ColorSlot::Success, 8),
            danger: pick(ColorSlot::Danger, 9),
        }
    }

    fn tavern(host: &HostThemeColors) -> Self {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        let primary = pick(&host.primary, TAVERN_PRIMARY);
        Self {
            bg_base: pick(&host.bg_base, TAVERN_BG_BASE),
            bg_header: pick(&host.bg_header, TAVERN_BG_HEADER),
            text_main: pick(&host.text_main, TAVERN_TEXT_MAIN),
            text_dim: pick(&host.text_dim, TAVERN_TEXT_DIM),
            border: pick(&host.border, TAVERN_BORDER),
            accent: primary.clone(),
            primary,
            panel: pick(&host.panel, TAVERN_PANEL),
            success: TAVERN_SUCCESS.to_string(),
            danger: TAVERN_DANGER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved particle layer.
pub struct ParticleStyle {
    /// Draw particles.
    pub enabled: bool,
    /// Particle count.
    pub density: u32,
    /// Concrete tint.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything the window needs to paint itself.
pub struct StyleContext {
    /// Mode that produced this style.
    pub mode: ThemeMode,
    /// Display name.
    pub name: String,
    /// Resolved colors.
    pub palette: Palette,
    /// Optional glow (`box-shadow` value).
    pub effect: Option<String>,
    /// Particle layer.
    pub particles: ParticleStyle,
}

impl StyleContext {
    /// Inline CSS custom properties for the window root.
    pub fn css_vars(&self) -> String {
        let mut css = String::new();
        for slot in ColorSlot::ALL {
            css.push_str(slot.css_var());
            css.push(':');
            css.push_str(self.palette.get(slot));
            css.push(';');
        }
        css.push_str("--arcade-effect:");
        css.push_str(self.effect.as_deref().unwrap_or("none"));
        css.push(';');
        css.push_str("--arcade-particle:");
        css.push_str(&self.particles.color);
        css.push(';');
        css
    }
}

/// Display name for `mode`.
pub fn theme_name(mode: ThemeMode) -> String {
    match mode {
        ThemeMode::Tavern => "Tavern Sync".to_string(),
        ThemeMode::Custom => "Custom".to_string(),
        fixed => catalog_theme(fixed)
            .map(|theme| theme.name.clone())
            .unwrap_or_else(|| fixed.id().to_string()),
    }
}

/// Resolves the render-time style.
///
/// Custom and tavern modes fall back per slot: an unset color takes that slot's own default and
/// never another slot's value.
pub fn resolve_style(
    mode: ThemeMode,
    custom: &CustomColors,
    host: &HostThemeColors,
    particles: &ParticleConfig,
) -> StyleContext {
    let (palette, effect) = match mode {
        ThemeMode::Custom => (Palette::custom(custom), None),
        ThemeMode::Tavern => (Palette::tavern(host), None),
        fixed => match catalog_theme(fixed) {
            Some(theme) => (theme.palette(), theme.effect.clone()),
            None => (Palette::custom(&CustomColors::unset()), None),
        },
    };
    let particle_color = match &particles.color {
        ParticleColor::Auto => palette.primary.clone(),
        ParticleColor::Fixed(color) => color.clone(),
    };
    let particles = particles.clone().clamped();
    StyleContext {
        mode,
        name: theme_name(mode),
        palette,
        effect,
        particles: ParticleStyle {
            enabled: particles.enabled,
            density: particles.density,
            color: particle_color,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn style(mode: ThemeMode, custom: &CustomColors) -> StyleContext {
        resolve_style(
            mode,
            custom,
            &HostThemeColors::default(),
            &ParticleConfig::default(),
        )
    }

    #[test]
    fn every_fixed_mode_has_a_catalog_palette() {
        for mode in ThemeMode::ALL.into_iter().filter(|mode| !mode.is_dynamic()) {
            assert!(catalog_theme(mode).is_some(), "{} missing", mode.id());
        }
        assert_eq!(style(ThemeMode::Dark, &CustomColors::unset()).palette.primary, "#4f46e5");
        assert!(style(ThemeMode::Cyberpunk, &CustomColors::unset()).effect.is_some());
    }

    #[test]
    fn unset_custom_slots_use_their_own_default() {
        for (index, slot) in ColorSlot::ALL.into_iter().enumerate() {
            let mut colors = CustomColors::unset();
            for other in ColorSlot::ALL.into_iter().filter(|other| *other != slot) {
                colors.set(other, Some("#123456".into()));
            }
            let resolved = style(ThemeMode::Custom, &colors);
            assert_eq!(resolved.palette.get(slot), CUSTOM_DEFAULTS[index]);
        }
    }

    #[test]
    fn empty_custom_value_is_treated_as_unset() {
        let mut colors = CustomColors::unset();
        colors.accent = Some(String::new());
        colors.primary = Some("#ff0000".into());
        let resolved = style(ThemeMode::Custom, &colors);
        assert_eq!(resolved.palette.accent, "#818cf8");
        assert_eq!(resolved.palette.primary, "#ff0000");
    }

    #[test]
    fn tavern_palette_follows_host_with_per_field_defaults() {
        let host = HostThemeColors {
            bg_base: Some("#101010".into()),
            primary: Some("#ff8800".into()),
            ..HostThemeColors::default()
        };
        let resolved = resolve_style(
            ThemeMode::Tavern,
            &CustomColors::default(),
            &host,
            &ParticleConfig::default(),
        );
        assert_eq!(resolved.palette.bg_base, "#101010");
        assert_eq!(resolved.palette.bg_header, "#111b27");
        assert_eq!(resolved.palette.accent, "#ff8800");
        assert_eq!(resolved.palette.success, "#22c55e");
        assert_eq!(resolved.palette.danger, "#ef4444");

        let fallback = style(ThemeMode::Tavern, &CustomColors::default());
        assert_eq!(fallback.palette.primary, "#4ade80");
        assert_eq!(fallback.palette.accent, "#4ade80");
    }

    #[test]
    fn particle_color_defaults_to_primary() {
        let auto = style(ThemeMode::Light, &CustomColors::unset());
        assert_eq!(auto.particles.color, auto.palette.primary);

        let fixed = resolve_style(
            ThemeMode::Light,
            &CustomColors::unset(),
            &HostThemeColors::default(),
            &ParticleConfig {
                enabled: true,
                density: 5,
                color: ParticleColor::Fixed("#00ff00".into()),
            },
        );
        assert_eq!(fixed.particles.color, "#00ff00");
        assert_eq!(fixed.particles.density, 10);
    }

    #[test]
    fn css_vars_cover_every_slot() {
        let css = style(ThemeMode::Retro, &CustomColors::unset()).css_vars();
        for slot in ColorSlot::ALL {
            assert!(css.contains(slot.css_var()));
        }
        assert!(css.contains("--arcade-effect:none;"));
    }
}
