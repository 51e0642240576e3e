//! Autosave record: capture, lenient decoding and partial merge.
//!
//! The whole shell is persisted as one JSON object under [`AUTOSAVE_KEY`]. Loading is tolerant at
//! the field level: a field that is missing, `null`, or of the wrong shape leaves the in-memory
//! value alone and never spoils the rest of the record.

use std::collections::BTreeMap;

use arcade_game_contract::GameId;
use arcade_games::GameSlot;
use leptos::logging;
use platform_host::SaveStore;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::model::{
    CustomColors, FontSettings, ParticleConfig, ShellState, ThemeMode, ThemePreset,
};

/// Storage key of the autosave record.
pub const AUTOSAVE_KEY: &str = "tavern_arcade.autosave";

#[derive(Debug, Clone, Default, PartialEq)]
/// Decoded autosave record. `None` fields (and missing slots) were absent or unreadable.
pub struct PersistedSnapshot {
    /// `theme`.
    pub theme: Option<ThemeMode>,
    /// `customColors`.
    pub custom_colors: Option<CustomColors>,
    /// `soundEnabled`.
    pub sound_enabled: Option<bool>,
    /// `particleConfig`.
    pub particle_config: Option<ParticleConfig>,
    /// `apiKey`.
    pub api_key: Option<String>,
    /// One entry per stored game slot, under each game's snapshot field.
    pub slots: BTreeMap<GameId, GameSlot>,
    /// `presets`.
    pub presets: Option<Vec<ThemePreset>>,
    /// `fontUrl`.
    pub font_url: Option<String>,
    /// `fontFamily`.
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of decoding a stored record.
pub struct DecodedSnapshot {
    /// Fields that decoded.
    pub snapshot: PersistedSnapshot,
    /// Names of present fields that did not match their expected shape.
    pub rejected_fields: Vec<&'static str>,
}

fn field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    name: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    let value = object.get(name).filter(|value| !value.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            rejected.push(name);
            None
        }
    }
}

impl PersistedSnapshot {
    /// Captures every persisted field of `state`.
    pub fn capture(state: &ShellState) -> Self {
        Self {
            theme: Some(state.theme_mode),
            custom_colors: Some(state.custom_colors.clone()),
            sound_enabled: Some(state.sound_enabled),
            particle_config: Some(state.particle_config.clone()),
            api_key: Some(state.api_key.clone()),
            slots: state
                .slots
                .iter()
                .map(|(game, slot)| (game, slot.clone()))
                .collect(),
            presets: Some(state.presets.clone()),
            font_url: Some(state.font_settings.url.clone()),
            font_family: Some(state.font_settings.family.clone()),
        }
    }

    /// Encodes the record. Empty slots are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error when a field cannot be represented as JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut object = Map::new();
        let mut put = |name: &str, value: Value| {
            object.insert(name.to_string(), value);
        };
        if let Some(theme) = self.theme {
            put("theme", serde_json::to_value(theme)?);
        }
        if let Some(colors) = &self.custom_colors {
            put("customColors", serde_json::to_value(colors)?);
        }
        if let Some(sound) = self.sound_enabled {
            put("soundEnabled", Value::Bool(sound));
        }
        if let Some(particles) = &self.particle_config {
            put("particleConfig", serde_json::to_value(particles)?);
        }
        if let Some(api_key) = &self.api_key {
            put("apiKey", Value::String(api_key.clone()));
        }
        for (game, slot) in &self.slots {
            put(game.snapshot_field(), slot.to_json()?);
        }
        if let Some(presets) = &self.presets {
            put("presets", serde_json::to_value(presets)?);
        }
        if let Some(url) = &self.font_url {
            put("fontUrl", Value::String(url.clone()));
        }
        if let Some(family) = &self.font_family {
            put("fontFamily", Value::String(family.clone()));
        }
        Ok(Value::Object(object))
    }

    /// Decodes a stored record. Returns `None` when `value` is not a JSON object.
    pub fn decode(value: &Value) -> Option<DecodedSnapshot> {
        let object = value.as_object()?;
        let mut rejected = Vec::new();

        let mut slots = BTreeMap::new();
        for game in GameId::ALL {
            let name = game.snapshot_field();
            let Some(raw) = object.get(name).filter(|raw| !raw.is_null()) else {
                continue;
            };
            match GameSlot::from_json(game, raw.clone()) {
                Ok(slot) => {
                    slots.insert(game, slot);
                }
                Err(_) => rejected.push(name),
            }
        }

        let snapshot = Self {
            theme: field(object, "theme", &mut rejected),
            custom_colors: field(object, "customColors", &mut rejected),
            sound_enabled: field(object, "soundEnabled", &mut rejected),
            particle_config: field(object, "particleConfig", &mut rejected),
            api_key: field(object, "apiKey", &mut rejected),
            slots,
            presets: field(object, "presets", &mut rejected),
            font_url: field(object, "fontUrl", &mut rejected),
            font_family: field(object, "fontFamily", &mut rejected),
        };
        Some(DecodedSnapshot {
            snapshot,
            rejected_fields: rejected,
        })
    }

    /// Merges the present fields into `state`. Absent fields keep their current value.
    ///
    /// The font is replaced only when a non-empty `fontFamily` was stored; its URL then defaults
    /// to empty.
    pub fn apply_to(self, state: &mut ShellState) {
        if let Some(theme) = self.theme {
            state.theme_mode = theme;
        }
        if let Some(colors) = self.custom_colors {
            state.custom_colors = colors;
        }
        if let Some(sound) = self.sound_enabled {
            state.sound_enabled = sound;
        }
        if let Some(particles) = self.particle_config {
            state.particle_config = particles.clamped();
        }
        if let Some(api_key) = self.api_key {
            state.api_key = api_key;
        }
        for slot in self.slots.into_values() {
            state.slots.store(slot);
        }
        if let Some(presets) = self.presets {
            state.presets = presets;
        }
        if let Some(family) = self.font_family.filter(|family| !family.is_empty()) {
            state.font_settings = FontSettings {
                url: self.font_url.unwrap_or_default(),
                family,
            };
        }
    }
}

/// Reads and decodes the autosave record.
///
/// Storage failures and unparseable text are logged and reported as `None`.
pub async fn load_snapshot(store: &dyn SaveStore) -> Option<PersistedSnapshot> {
    let raw = match store.read(AUTOSAVE_KEY).await {
        Ok(raw) => raw?,
        Err(err) => {
            logging::warn!("autosave read failed: {err}");
            return None;
        }
    };
    let value = match serde_json::from_str::<Value>(&raw) {
        Ok(value) => value,
        Err(err) => {
            logging::warn!("autosave record is not valid JSON: {err}");
            return None;
        }
    };
    let Some(decoded) = PersistedSnapshot::decode(&value) else {
        logging::warn!("autosave record is not a JSON object");
        return None;
    };
    if !decoded.rejected_fields.is_empty() {
        logging::warn!(
            "autosave fields ignored: {}",
            decoded.rejected_fields.join(", ")
        );
    }
    Some(decoded.snapshot)
}

/// Writes the autosave record for `state`.
///
/// # Errors
///
/// Returns an error when encoding or the store write fails.
pub async fn save_snapshot(store: &dyn SaveStore, state: &ShellState) -> Result<(), String> {
    let value = PersistedSnapshot::capture(state)
        .to_json()
        .map_err(|err| format!("autosave encode failed: {err}"))?;
    let raw = serde_json::to_string(&value).map_err(|err| err.to_string())?;
    store.write(AUTOSAVE_KEY, &raw).await
}

#[cfg(test)]
mod tests {
    use arcade_games::{
        farming::FarmingState, game2048::Game2048State, whack_a_mole::WhackAMoleState, GameRng,
        GameState,
    };
    use futures::executor::block_on;
    use platform_host::MemorySaveStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{ColorSlot, ParticleColor, Screen};

    fn populated_state() -> ShellState {
        let mut rng = GameRng::new(21);
        let mut state = ShellState::default();
        state.theme_mode = ThemeMode::Custom;
        state.custom_colors.set(ColorSlot::Accent, Some("#abcdef".into()));
        state.sound_enabled = false;
        state.particle_config = ParticleConfig {
            enabled: false,
            density: 120,
            color: ParticleColor::Fixed("#ffffff".into()),
        };
        state.api_key = "secret".into();
        state.font_settings = FontSettings {
            url: "https://fonts.example/css".into(),
            family: "Lora".into(),
        };
        state.presets.push(ThemePreset {
            name: "Night".into(),
            colors: state.custom_colors.clone(),
        });
        for game in GameId::ALL {
            state.slots.store(GameSlot::new_game(game, &mut rng));
        }
        state
    }

    #[test]
    fn missing_record_loads_as_none() {
        let store = MemorySaveStore::default();
        assert_eq!(block_on(load_snapshot(&store)), None);
    }

    #[test]
    fn unparseable_or_non_object_records_load_as_none() {
        let broken = MemorySaveStore::with_entry(AUTOSAVE_KEY, "{oops");
        assert_eq!(block_on(load_snapshot(&broken)), None);
        let array = MemorySaveStore::with_entry(AUTOSAVE_KEY, "[1,2]");
        assert_eq!(block_on(load_snapshot(&array)), None);
    }

    #[test]
    fn save_then_load_reproduces_persisted_fields() {
        let original = populated_state();
        let store = MemorySaveStore::default();
        block_on(save_snapshot(&store, &original)).expect("save");

        let snapshot = block_on(load_snapshot(&store)).expect("snapshot");
        let mut restored = ShellState::default();
        snapshot.apply_to(&mut restored);

        assert_eq!(restored.theme_mode, original.theme_mode);
        assert_eq!(restored.custom_colors, original.custom_colors);
        assert_eq!(restored.sound_enabled, original.sound_enabled);
        assert_eq!(restored.particle_config, original.particle_config);
        assert_eq!(restored.api_key, original.api_key);
        assert_eq!(restored.font_settings, original.font_settings);
        assert_eq!(restored.presets, original.presets);
        assert_eq!(restored.slots, original.slots);
        assert!(!restored.persisted_fields_differ(&original));
    }

    #[test]
    fn transient_fields_are_not_written() {
        let mut state = populated_state();
        state.visible = true;
        state.screen = Screen::Settings;
        state.user_name = "Alice".into();
        let value = PersistedSnapshot::capture(&state).to_json().expect("encode");
        let object = value.as_object().expect("object");
        for transient in ["visible", "screen", "userName", "charName", "notice"] {
            assert!(!object.contains_key(transient), "{transient} leaked");
        }
        assert_eq!(object.len(), 19);
    }

    #[test]
    fn absent_fields_leave_memory_untouched() {
        let mut state = populated_state();
        let before = state.clone();
        let decoded = PersistedSnapshot::decode(&json!({"soundEnabled": true})).expect("object");
        decoded.snapshot.apply_to(&mut state);

        assert!(state.sound_enabled);
        assert_eq!(state.theme_mode, before.theme_mode);
        assert_eq!(state.slots, before.slots);
        assert_eq!(state.font_settings, before.font_settings);
        assert_eq!(state.api_key, before.api_key);
    }

    #[test]
    fn ill_typed_fields_are_rejected_individually() {
        let mut rng = GameRng::new(2);
        let board = Game2048State::new_game(&mut rng);
        let decoded = PersistedSnapshot::decode(&json!({
            "theme": "plaid",
            "soundEnabled": "yes",
            "apiKey": "k",
            "farming": {"money": "lots"},
            "game2048State": serde_json::to_value(&board).expect("encode"),
            "whackAMoleState": null
        }))
        .expect("object");

        assert_eq!(decoded.rejected_fields, vec!["farming", "theme", "soundEnabled"]);
        assert_eq!(decoded.snapshot.api_key.as_deref(), Some("k"));
        assert_eq!(decoded.snapshot.theme, None);
        assert_eq!(
            decoded.snapshot.slots.get(&GameId::Game2048),
            Some(&GameSlot::Game2048(board))
        );
        assert!(!decoded.snapshot.slots.contains_key(&GameId::WhackAMole));
    }

    #[test]
    fn wrong_shaped_board_is_rejected_and_the_slot_kept() {
        let mut rng = GameRng::new(6);
        let mut state = ShellState::default();
        let board = Game2048State::new_game(&mut rng);
        state.slots.set(board.clone());

        let mut tampered = serde_json::to_value(&board).expect("encode");
        tampered["grid"] = json!([[2, 2]]);
        let decoded = PersistedSnapshot::decode(&json!({"game2048State": tampered})).expect("object");
        assert_eq!(decoded.rejected_fields, vec!["game2048State"]);

        decoded.snapshot.apply_to(&mut state);
        assert_eq!(state.slots.get::<Game2048State>(), Some(&board));
    }

    #[test]
    fn font_family_drives_font_restore() {
        let mut state = ShellState::default();
        PersistedSnapshot::decode(&json!({"fontUrl": "https://x/css"}))
            .expect("object")
            .snapshot
            .apply_to(&mut state);
        assert_eq!(state.font_settings, FontSettings::default());

        PersistedSnapshot::decode(&json!({"fontFamily": "Inter"}))
            .expect("object")
            .snapshot
            .apply_to(&mut state);
        assert_eq!(
            state.font_settings,
            FontSettings {
                url: String::new(),
                family: "Inter".into()
            }
        );
    }

    #[test]
    fn stored_slots_merge_without_clearing_others() {
        let mut rng = GameRng::new(8);
        let mut state = ShellState::default();
        let farm = FarmingState::new_game(&mut rng);
        state.slots.set(farm.clone());

        let moles = WhackAMoleState::new_game(&mut rng);
        PersistedSnapshot::decode(&json!({
            "whackAMoleState": serde_json::to_value(&moles).expect("encode")
        }))
        .expect("object")
        .snapshot
        .apply_to(&mut state);

        assert_eq!(state.slots.get::<FarmingState>(), Some(&farm));
        assert_eq!(state.slots.get::<WhackAMoleState>(), Some(&moles));
    }

    #[test]
    fn failed_writes_surface_to_the_caller() {
        let store = MemorySaveStore::default();
        store.reject_writes(true);
        let err = block_on(save_snapshot(&store, &ShellState::default())).expect_err("rejected");
        assert!(err.contains("quota"));
    }
}
