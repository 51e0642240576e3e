//! Reducer actions, side-effect intents, and transition logic for the arcade shell.

mod appearance;

use arcade_game_contract::GameCommand;
use arcade_games::GameSlot;
use platform_host::{
    share_command, toast_command, HostMessage, ShellMessage, SoundCue, ToastSeverity,
};
use thiserror::Error;

use crate::{
    model::{
        ColorSlot, FloatingWindowState, FontSettings, Notice, ParticleConfig, PointerPosition,
        Screen, ShellState, ThemeMode, Viewport,
    },
    persistence::PersistedSnapshot,
    window_manager,
};

/// Notice shown after a manual save.
pub const SAVED_NOTICE: &str = "State saved";
/// Notice shown after a manual load restored a record.
pub const LOADED_NOTICE: &str = "Progress loaded";
/// Notice shown when a manual load finds no record.
pub const NOTHING_TO_LOAD_NOTICE: &str = "Nothing saved yet";
/// Host toast confirming a chat share.
pub const SHARED_TOAST: &str = "Latest story beat shared to chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Who asked for a stored record to be applied.
pub enum LoadOrigin {
    /// Startup hydration; silent.
    Boot,
    /// Player pressed load; confirmed with a cue and a notice.
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_shell`].
pub enum ShellAction {
    /// Inbound host bridge message.
    Host(HostMessage),
    /// Switch the window's screen.
    Navigate {
        /// Target screen.
        screen: Screen,
    },
    /// Select a theme mode.
    SetThemeMode {
        /// New mode.
        mode: ThemeMode,
    },
    /// Set or clear one custom color.
    SetCustomColor {
        /// Color being edited.
        slot: ColorSlot,
        /// New value; `None` or blank clears it.
        value: Option<String>,
    },
    /// Enable or disable sound cues.
    SetSoundEnabled {
        /// Whether cues play.
        enabled: bool,
    },
    /// Replace the particle settings (density is clamped).
    SetParticleConfig {
        /// New settings.
        config: ParticleConfig,
    },
    /// Replace the text-generation credential.
    SetApiKey {
        /// New key.
        api_key: String,
    },
    /// Replace the user font.
    SetFontSettings {
        /// New font.
        font: FontSettings,
    },
    /// Save the current custom colors under a name, replacing a same-named preset.
    SavePreset {
        /// Preset name.
        name: String,
    },
    /// Copy a preset into the custom colors and switch to custom mode.
    ApplyPreset {
        /// Preset name.
        name: String,
    },
    /// Remove a preset.
    DeletePreset {
        /// Preset name.
        name: String,
    },
    /// Replace a game's slot with the state its module wrote.
    SetSlot {
        /// New slot content; stored under its own game.
        slot: GameSlot,
    },
    /// Request from the mounted game.
    Game(GameCommand),
    /// Write the autosave record now and confirm it.
    ManualSave,
    /// Read the autosave record and merge it.
    ManualLoad,
    /// Merge a record read from storage.
    HydrateSnapshot {
        /// Decoded record; `None` when nothing usable was stored.
        snapshot: Option<PersistedSnapshot>,
        /// Boot hydration or manual load.
        origin: LoadOrigin,
    },
    /// Show a transient notice.
    ShowNotice {
        /// Notice text.
        text: String,
    },
    /// Dismiss a notice if it is still the one showing.
    ClearNotice {
        /// Notice id scheduled for dismissal.
        id: u64,
    },
    /// Press on the title bar.
    BeginDrag {
        /// Pointer at press time.
        pointer: PointerPosition,
    },
    /// Pointer moved.
    UpdateDrag {
        /// Current pointer.
        pointer: PointerPosition,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Pointer released or cancelled.
    EndDrag,
    /// Collapse or expand the window.
    ToggleMinimized {
        /// Current viewport.
        viewport: Viewport,
    },
    /// The browser viewport changed size.
    ResizeViewport {
        /// New viewport.
        viewport: Viewport,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_shell`] for the host effect executor.
pub enum RuntimeEffect {
    /// Write the autosave record from the current state.
    PersistSnapshot,
    /// Read the autosave record and dispatch a manual [`ShellAction::HydrateSnapshot`].
    LoadSnapshot,
    /// Post a message to the parent frame.
    PostToHost(ShellMessage),
    /// Play a sound cue.
    PlaySound(SoundCue),
    /// Dismiss notice `id` after the notice duration.
    ScheduleNoticeDismiss {
        /// Notice to dismiss.
        id: u64,
    },
    /// Inject or update the user font.
    ApplyFont(FontSettings),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for rejected actions.
pub enum ReducerError {
    /// Preset names must contain something besides whitespace.
    #[error("preset name is empty")]
    EmptyPresetName,
    /// The named preset does not exist.
    #[error("preset `{0}` not found")]
    PresetNotFound(String),
}

/// Applies a [`ShellAction`] to the shell state and collects resulting side effects.
///
/// A [`RuntimeEffect::PersistSnapshot`] is emitted whenever the action changed any autosaved
/// field.
///
/// # Errors
///
/// Returns a [`ReducerError`] when a preset action names a missing preset or an empty name. The
/// state is left unchanged in that case.
pub fn reduce_shell(
    state: &mut ShellState,
    window: &mut FloatingWindowState,
    action: ShellAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();

    match action {
        ShellAction::BeginDrag { pointer } => {
            window_manager::begin_drag(window, pointer);
            return Ok(effects);
        }
        ShellAction::UpdateDrag { pointer, viewport } => {
            window_manager::drag_to(window, pointer, viewport);
            return Ok(effects);
        }
        ShellAction::EndDrag => {
            window_manager::end_drag(window);
            return Ok(effects);
        }
        ShellAction::ToggleMinimized { viewport } => {
            window_manager::toggle_minimized(window, viewport);
            cue(state, &mut effects, SoundCue::Click);
            return Ok(effects);
        }
        ShellAction::ResizeViewport { viewport } => {
            window_manager::fit_to_viewport(window, viewport);
            return Ok(effects);
        }
        _ => {}
    }

    let before = state.clone();
    if appearance::reduce_appearance_action(state, &action)? {
        finish(state, &before, &mut effects);
        return Ok(effects);
    }

    match action {
        ShellAction::Host(HostMessage::Toggle) => {
            state.visible = !state.visible;
            effects.push(RuntimeEffect::PostToHost(if state.visible {
                ShellMessage::BecameInteractive
            } else {
                ShellMessage::BecameInactive
            }));
            effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
        }
        ShellAction::Host(HostMessage::Sync(sync)) => {
            if let Some(colors) = sync.colors {
                state.host_colors = colors;
            }
            if let Some(name) = sync.user_name.filter(|name| !name.is_empty()) {
                state.user_name = name;
            }
            if let Some(name) = sync.char_name.filter(|name| !name.is_empty()) {
                state.char_name = name;
            }
        }
        ShellAction::Navigate { screen } => {
            state.screen = screen;
            cue(state, &mut effects, SoundCue::Click);
        }
        ShellAction::SetSoundEnabled { enabled } => {
            state.sound_enabled = enabled;
        }
        ShellAction::SetApiKey { api_key } => {
            state.api_key = api_key;
        }
        ShellAction::SetSlot { slot } => {
            state.slots.store(slot);
        }
        ShellAction::Game(command) => reduce_game_command(state, command, &mut effects),
        ShellAction::ManualSave => {
            effects.push(RuntimeEffect::PersistSnapshot);
            cue(state, &mut effects, SoundCue::Success);
            show_notice(state, SAVED_NOTICE.to_string(), &mut effects);
        }
        ShellAction::ManualLoad => {
            effects.push(RuntimeEffect::LoadSnapshot);
        }
        ShellAction::HydrateSnapshot { snapshot, origin } => match (snapshot, origin) {
            (Some(snapshot), LoadOrigin::Boot) => snapshot.apply_to(state),
            (Some(snapshot), LoadOrigin::Manual) => {
                snapshot.apply_to(state);
                cue(state, &mut effects, SoundCue::Success);
                show_notice(state, LOADED_NOTICE.to_string(), &mut effects);
            }
            (None, LoadOrigin::Boot) => {}
            (None, LoadOrigin::Manual) => {
                show_notice(state, NOTHING_TO_LOAD_NOTICE.to_string(), &mut effects);
            }
        },
        ShellAction::ShowNotice { text } => show_notice(state, text, &mut effects),
        ShellAction::ClearNotice { id } => {
            if state.notice.as_ref().is_some_and(|notice| notice.id == id) {
                state.notice = None;
            }
        }
        ShellAction::SetThemeMode { .. }
        | ShellAction::SetCustomColor { .. }
        | ShellAction::SetParticleConfig { .. }
        | ShellAction::SetFontSettings { .. }
        | ShellAction::SavePreset { .. }
        | ShellAction::ApplyPreset { .. }
        | ShellAction::DeletePreset { .. }
        | ShellAction::BeginDrag { .. }
        | ShellAction::UpdateDrag { .. }
        | ShellAction::EndDrag
        | ShellAction::ToggleMinimized { .. }
        | ShellAction::ResizeViewport { .. } => {}
    }

    finish(state, &before, &mut effects);
    Ok(effects)
}

fn reduce_game_command(
    state: &mut ShellState,
    command: GameCommand,
    effects: &mut Vec<RuntimeEffect>,
) {
    match command {
        GameCommand::PlaySound(sound) => cue(state, effects, sound),
        GameCommand::HostToast { text, severity } => {
            effects.push(RuntimeEffect::PostToHost(ShellMessage::ExecuteCommand(
                toast_command(&text, severity),
            )));
        }
        GameCommand::ShareToChat { text } => {
            effects.push(RuntimeEffect::PostToHost(ShellMessage::ExecuteCommand(
                share_command(&text),
            )));
            effects.push(RuntimeEffect::PostToHost(ShellMessage::ExecuteCommand(
                toast_command(SHARED_TOAST, ToastSeverity::Success),
            )));
        }
        GameCommand::Notice(text) => show_notice(state, text, effects),
        GameCommand::ExitToMenu => {
            state.screen = Screen::Menu;
            cue(state, effects, SoundCue::Click);
        }
    }
}

fn cue(state: &ShellState, effects: &mut Vec<RuntimeEffect>, sound: SoundCue) {
    if state.sound_enabled {
        effects.push(RuntimeEffect::PlaySound(sound));
    }
}

fn show_notice(state: &mut ShellState, text: String, effects: &mut Vec<RuntimeEffect>) {
    state.notice_seq += 1;
    let id = state.notice_seq;
    state.notice = Some(Notice { id, text });
    effects.push(RuntimeEffect::ScheduleNoticeDismiss { id });
}

fn finish(state: &ShellState, before: &ShellState, effects: &mut Vec<RuntimeEffect>) {
    if state.font_settings != before.font_settings {
        effects.push(RuntimeEffect::ApplyFont(state.font_settings.clone()));
    }
    if state.persisted_fields_differ(before) && !effects.contains(&RuntimeEffect::PersistSnapshot)
    {
        effects.push(RuntimeEffect::PersistSnapshot);
    }
}

#[cfg(test)]
mod tests {
    use arcade_game_contract::GameId;
    use arcade_games::{tic_tac_toe::TicTacToeState, GameRng, GameState, SlotState};
    use futures::executor::block_on;
    use platform_host::{HostSync, HostThemeColors, MemorySaveStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::CustomColors,
        persistence::{load_snapshot, save_snapshot},
    };

    fn reduce(state: &mut ShellState, action: ShellAction) -> Vec<RuntimeEffect> {
        let mut window = FloatingWindowState::default();
        reduce_shell(state, &mut window, action).expect("reduce")
    }

    fn host_messages(effects: &[RuntimeEffect]) -> Vec<ShellMessage> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                RuntimeEffect::PostToHost(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn toggle_emits_exactly_one_visibility_message_per_transition() {
        let mut state = ShellState::default();
        for round in 0..6 {
            let effects = reduce(&mut state, ShellAction::Host(HostMessage::Toggle));
            let expected = if round % 2 == 0 {
                ShellMessage::BecameInteractive
            } else {
                ShellMessage::BecameInactive
            };
            assert_eq!(host_messages(&effects), vec![expected]);
            assert_eq!(state.visible, round % 2 == 0);
        }
    }

    #[test]
    fn toggle_click_ignores_the_sound_setting() {
        let mut state = ShellState {
            sound_enabled: false,
            ..ShellState::default()
        };
        let effects = reduce(&mut state, ShellAction::Host(HostMessage::Toggle));
        assert!(effects.contains(&RuntimeEffect::PlaySound(SoundCue::Click)));

        let effects = reduce(
            &mut state,
            ShellAction::Navigate {
                screen: Screen::Settings,
            },
        );
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn sync_without_char_name_keeps_the_previous_one() {
        let mut state = ShellState {
            char_name: "Bard".into(),
            ..ShellState::default()
        };
        let colors = HostThemeColors {
            primary: Some("#ff8800".into()),
            ..HostThemeColors::default()
        };
        let effects = reduce(
            &mut state,
            ShellAction::Host(HostMessage::Sync(HostSync {
                colors: Some(colors.clone()),
                user_name: Some("Alice".into()),
                char_name: None,
            })),
        );

        assert_eq!(state.user_name, "Alice");
        assert_eq!(state.char_name, "Bard");
        assert_eq!(state.host_colors, colors);
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn sync_ignores_empty_names() {
        let mut state = ShellState::default();
        reduce(
            &mut state,
            ShellAction::Host(HostMessage::Sync(HostSync {
                colors: None,
                user_name: Some(String::new()),
                char_name: Some("Rogue".into()),
            })),
        );
        assert_eq!(state.user_name, "User");
        assert_eq!(state.char_name, "Rogue");
    }

    #[test]
    fn first_launch_through_slot_initialization_reaches_storage() {
        let store = MemorySaveStore::default();
        assert_eq!(block_on(load_snapshot(&store)), None);

        let mut state = ShellState::default();
        let mut window = FloatingWindowState::default();
        let effects = reduce_shell(
            &mut state,
            &mut window,
            ShellAction::HydrateSnapshot {
                snapshot: None,
                origin: LoadOrigin::Boot,
            },
        )
        .expect("hydrate");
        assert_eq!(effects, Vec::new());
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert!(!state.visible);

        let effects = reduce_shell(
            &mut state,
            &mut window,
            ShellAction::Host(HostMessage::Toggle),
        )
        .expect("toggle");
        assert_eq!(host_messages(&effects), vec![ShellMessage::BecameInteractive]);

        reduce_shell(
            &mut state,
            &mut window,
            ShellAction::Navigate {
                screen: Screen::Game(GameId::TicTacToe),
            },
        )
        .expect("navigate");
        let board = TicTacToeState::new_game(&mut GameRng::new(1));
        let effects = reduce_shell(
            &mut state,
            &mut window,
            ShellAction::SetSlot {
                slot: board.clone().into_slot(),
            },
        )
        .expect("initialize slot");
        assert_eq!(effects, vec![RuntimeEffect::PersistSnapshot]);

        block_on(save_snapshot(&store, &state)).expect("autosave");
        let loaded = block_on(load_snapshot(&store)).expect("record");
        assert_eq!(
            loaded.slots.get(&GameId::TicTacToe),
            Some(&board.into_slot())
        );
    }

    #[test]
    fn leaving_and_returning_keeps_the_slot() {
        let mut state = ShellState::default();
        let slot = GameSlot::new_game(GameId::Sudoku, &mut GameRng::new(8));
        reduce(&mut state, ShellAction::SetSlot { slot: slot.clone() });

        for screen in [
            Screen::Game(GameId::Snake),
            Screen::Menu,
            Screen::Game(GameId::Sudoku),
        ] {
            let effects = reduce(&mut state, ShellAction::Navigate { screen });
            assert!(!effects.contains(&RuntimeEffect::PersistSnapshot));
        }
        assert_eq!(state.slots.slot(GameId::Sudoku), Some(&slot));
    }

    #[test]
    fn rewriting_an_identical_slot_does_not_autosave() {
        let mut state = ShellState::default();
        let slot = GameSlot::new_game(GameId::Memory, &mut GameRng::new(2));
        reduce(&mut state, ShellAction::SetSlot { slot: slot.clone() });
        assert_eq!(reduce(&mut state, ShellAction::SetSlot { slot }), Vec::new());
    }

    #[test]
    fn manual_save_persists_and_confirms() {
        let mut state = ShellState::default();
        let effects = reduce(&mut state, ShellAction::ManualSave);
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistSnapshot,
                RuntimeEffect::PlaySound(SoundCue::Success),
                RuntimeEffect::ScheduleNoticeDismiss { id: 1 },
            ]
        );
        assert_eq!(
            state.notice,
            Some(Notice {
                id: 1,
                text: SAVED_NOTICE.into()
            })
        );
    }

    #[test]
    fn manual_load_merges_and_reports_missing_records() {
        let mut state = ShellState::default();
        assert_eq!(
            reduce(&mut state, ShellAction::ManualLoad),
            vec![RuntimeEffect::LoadSnapshot]
        );

        reduce(
            &mut state,
            ShellAction::HydrateSnapshot {
                snapshot: None,
                origin: LoadOrigin::Manual,
            },
        );
        assert_eq!(
            state.notice.as_ref().map(|notice| notice.text.as_str()),
            Some(NOTHING_TO_LOAD_NOTICE)
        );

        let snapshot = PersistedSnapshot {
            theme: Some(ThemeMode::Ocean),
            font_family: Some("Inter".into()),
            ..PersistedSnapshot::default()
        };
        let effects = reduce(
            &mut state,
            ShellAction::HydrateSnapshot {
                snapshot: Some(snapshot),
                origin: LoadOrigin::Manual,
            },
        );
        assert_eq!(state.theme_mode, ThemeMode::Ocean);
        assert!(state.sound_enabled);
        assert!(effects.contains(&RuntimeEffect::PlaySound(SoundCue::Success)));
        assert!(effects.contains(&RuntimeEffect::ApplyFont(FontSettings {
            url: String::new(),
            family: "Inter".into(),
        })));
        assert!(effects.contains(&RuntimeEffect::PersistSnapshot));
        assert_eq!(
            state.notice.as_ref().map(|notice| notice.text.as_str()),
            Some(LOADED_NOTICE)
        );
    }

    #[test]
    fn stale_notice_timers_do_not_clear_newer_notices() {
        let mut state = ShellState::default();
        reduce(&mut state, ShellAction::ShowNotice { text: "one".into() });
        reduce(&mut state, ShellAction::ShowNotice { text: "two".into() });

        reduce(&mut state, ShellAction::ClearNotice { id: 1 });
        assert_eq!(state.notice.as_ref().map(|n| n.text.as_str()), Some("two"));

        reduce(&mut state, ShellAction::ClearNotice { id: 2 });
        assert_eq!(state.notice, None);
    }

    #[test]
    fn share_to_chat_posts_comment_and_toast() {
        let mut state = ShellState::default();
        let effects = reduce(
            &mut state,
            ShellAction::Game(GameCommand::ShareToChat {
                text: "[AI Adventure] a | b".into(),
            }),
        );
        assert_eq!(
            host_messages(&effects),
            vec![
                ShellMessage::ExecuteCommand("/comment [AI Adventure] a | b".into()),
                ShellMessage::ExecuteCommand(toast_command(SHARED_TOAST, ToastSeverity::Success)),
            ]
        );
    }

    #[test]
    fn game_commands_route_sound_toast_and_exit() {
        let mut state = ShellState {
            screen: Screen::Game(GameId::Farming),
            ..ShellState::default()
        };
        let effects = reduce(
            &mut state,
            ShellAction::Game(GameCommand::HostToast {
                text: "Harvested".into(),
                severity: ToastSeverity::Info,
            }),
        );
        assert_eq!(
            host_messages(&effects),
            vec![ShellMessage::ExecuteCommand(toast_command(
                "Harvested",
                ToastSeverity::Info
            ))]
        );

        let effects = reduce(&mut state, ShellAction::Game(GameCommand::PlaySound(SoundCue::Pop)));
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Pop)]);

        reduce(&mut state, ShellAction::Game(GameCommand::ExitToMenu));
        assert_eq!(state.screen, Screen::Menu);
    }

    #[test]
    fn presets_save_apply_and_delete() {
        let mut state = ShellState::default();
        state.custom_colors.set(ColorSlot::Primary, Some("#00ff00".into()));
        let effects = reduce(&mut state, ShellAction::SavePreset { name: " Neon ".into() });
        assert_eq!(effects, vec![RuntimeEffect::PersistSnapshot]);
        assert_eq!(state.presets[0].name, "Neon");

        state.custom_colors.set(ColorSlot::Primary, Some("#0000ff".into()));
        reduce(&mut state, ShellAction::SavePreset { name: "Neon".into() });
        assert_eq!(state.presets.len(), 1);
        assert_eq!(state.presets[0].colors.get(ColorSlot::Primary), Some("#0000ff"));

        state.custom_colors = CustomColors::default();
        reduce(&mut state, ShellAction::ApplyPreset { name: "Neon".into() });
        assert_eq!(state.theme_mode, ThemeMode::Custom);
        assert_eq!(state.custom_colors.get(ColorSlot::Primary), Some("#0000ff"));

        reduce(&mut state, ShellAction::DeletePreset { name: "Neon".into() });
        assert!(state.presets.is_empty());
    }

    #[test]
    fn rejected_preset_actions_leave_state_alone() {
        let mut state = ShellState::default();
        let mut window = FloatingWindowState::default();
        let before = state.clone();
        assert_eq!(
            reduce_shell(
                &mut state,
                &mut window,
                ShellAction::SavePreset { name: "  ".into() }
            ),
            Err(ReducerError::EmptyPresetName)
        );
        assert_eq!(
            reduce_shell(
                &mut state,
                &mut window,
                ShellAction::ApplyPreset {
                    name: "ghost".into()
                }
            ),
            Err(ReducerError::PresetNotFound("ghost".into()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn particle_density_is_clamped_on_set() {
        let mut state = ShellState::default();
        reduce(
            &mut state,
            ShellAction::SetParticleConfig {
                config: ParticleConfig {
                    density: 1_000,
                    ..ParticleConfig::default()
                },
            },
        );
        assert_eq!(state.particle_config.density, 200);
    }

    #[test]
    fn font_changes_are_applied_and_persisted() {
        let mut state = ShellState::default();
        let font = FontSettings {
            url: "https://fonts.example/inter.css".into(),
            family: "Inter".into(),
        };
        let effects = reduce(
            &mut state,
            ShellAction::SetFontSettings { font: font.clone() },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::ApplyFont(font),
                RuntimeEffect::PersistSnapshot
            ]
        );
    }

    #[test]
    fn window_actions_move_geometry_without_touching_shell_state() {
        let mut state = ShellState::default();
        let before = state.clone();
        let mut window = FloatingWindowState::default();
        let viewport = Viewport { w: 1000, h: 800 };

        reduce_shell(
            &mut state,
            &mut window,
            ShellAction::BeginDrag {
                pointer: PointerPosition { x: 30, y: 25 },
            },
        )
        .expect("begin");
        reduce_shell(
            &mut state,
            &mut window,
            ShellAction::UpdateDrag {
                pointer: PointerPosition { x: 230, y: 125 },
                viewport,
            },
        )
        .expect("move");
        let effects = reduce_shell(&mut state, &mut window, ShellAction::EndDrag).expect("end");

        assert_eq!(effects, Vec::new());
        assert_eq!(window.position, PointerPosition { x: 220, y: 120 });
        assert_eq!(window.dragging, None);
        assert_eq!(state, before);

        let small = Viewport { w: 400, h: 300 };
        let effects = reduce_shell(
            &mut state,
            &mut window,
            ShellAction::ResizeViewport { viewport: small },
        )
        .expect("resize");
        assert_eq!(effects, Vec::new());
        assert_eq!(window.position, PointerPosition { x: 40, y: 45 });

        reduce_shell(
            &mut state,
            &mut window,
            ShellAction::ToggleMinimized { viewport: small },
        )
        .expect("minimize");
        assert!(window.minimized);
        assert_eq!(window.position, PointerPosition { x: 40, y: 45 });
        assert_eq!(state, before);
    }
}
