//! Reducer helpers for theme, color, preset, particle and font transitions.

use crate::{
    model::{ShellState, ThemeMode, ThemePreset},
    reducer::{ReducerError, ShellAction},
};

pub(super) fn reduce_appearance_action(
    state: &mut ShellState,
    action: &ShellAction,
) -> Result<bool, ReducerError> {
    match action {
        ShellAction::SetThemeMode { mode } => {
            state.theme_mode = *mode;
        }
        ShellAction::SetCustomColor { slot, value } => {
            state.custom_colors.set(*slot, value.clone());
        }
        ShellAction::SetParticleConfig { config } => {
            state.particle_config = config.clone().clamped();
        }
        ShellAction::SetFontSettings { font } => {
            state.font_settings = font.clone();
        }
        ShellAction::SavePreset { name } => {
            let name = preset_name(name)?;
            let colors = state.custom_colors.clone();
            match state.presets.iter_mut().find(|preset| preset.name == name) {
                Some(existing) => existing.colors = colors,
                None => state.presets.push(ThemePreset {
                    name: name.to_string(),
                    colors,
                }),
            }
        }
        ShellAction::ApplyPreset { name } => {
            let preset = state
                .presets
                .iter()
                .find(|preset| preset.name == name.trim())
                .ok_or_else(|| ReducerError::PresetNotFound(name.clone()))?;
            state.custom_colors = preset.colors.clone();
            state.theme_mode = ThemeMode::Custom;
        }
        ShellAction::DeletePreset { name } => {
            let before = state.presets.len();
            state.presets.retain(|preset| preset.name != name.trim());
            if state.presets.len() == before {
                return Err(ReducerError::PresetNotFound(name.clone()));
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn preset_name(raw: &str) -> Result<&str, ReducerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ReducerError::EmptyPresetName);
    }
    Ok(name)
}
