//! Service handles injected into mounted games.

use std::rc::Rc;

use leptos::{Callable, Callback, Signal, SignalGetUntracked};
use platform_host::{SoundCue, TextGenerationService, ToastSeverity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Requests a game sends to the shell runtime.
pub enum GameCommand {
    /// Play a feedback tone (subject to the sound setting).
    PlaySound(SoundCue),
    /// Show a toast in the host chat application.
    HostToast {
        /// Toast text.
        text: String,
        /// Toast severity.
        severity: ToastSeverity,
    },
    /// Post text into the host chat log.
    ShareToChat {
        /// Text to post.
        text: String,
    },
    /// Show a short in-shell notice.
    Notice(String),
    /// Leave the game and return to the menu.
    ExitToMenu,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Player identity and credentials visible to games.
pub struct PlayerProfile {
    /// Player display name.
    pub user_name: String,
    /// Character display name.
    pub char_name: String,
    /// Remote text-generation credential.
    pub api_key: String,
}

/// Typed read/write access to the mounted game's state slot.
pub struct SlotHandle<S: 'static> {
    state: Signal<Option<S>>,
    writer: Callback<S>,
}

impl<S: 'static> Clone for SlotHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SlotHandle<S> {}

impl<S: Clone + 'static> SlotHandle<S> {
    /// Creates a handle from a slot signal and the runtime write callback.
    pub fn new(state: Signal<Option<S>>, writer: Callback<S>) -> Self {
        Self { state, writer }
    }

    /// Reactive slot contents. `None` until the game initializes the slot.
    pub fn state(&self) -> Signal<Option<S>> {
        self.state
    }

    /// Current slot contents without subscribing.
    pub fn current(&self) -> Option<S> {
        self.state.get_untracked()
    }

    /// Replaces the slot contents.
    pub fn write(&self, next: S) {
        self.writer.call(next);
    }
}

#[derive(Clone)]
/// Runtime service bundle handed to each mounted game.
pub struct GameServices {
    commands: Callback<GameCommand>,
    /// Player identity, kept in sync with host updates.
    pub profile: Signal<PlayerProfile>,
    /// Remote text generation.
    pub text_generation: Rc<dyn TextGenerationService>,
}

impl GameServices {
    /// Creates services from the runtime command callback.
    pub fn new(
        commands: Callback<GameCommand>,
        profile: Signal<PlayerProfile>,
        text_generation: Rc<dyn TextGenerationService>,
    ) -> Self {
        Self {
            commands,
            profile,
            text_generation,
        }
    }

    /// Sends a raw command to the runtime.
    pub fn send(&self, command: GameCommand) {
        self.commands.call(command);
    }

    /// Plays a feedback tone.
    pub fn play(&self, cue: SoundCue) {
        self.send(GameCommand::PlaySound(cue));
    }

    /// Shows a toast in the host application.
    pub fn host_toast(&self, text: impl Into<String>, severity: ToastSeverity) {
        self.send(GameCommand::HostToast {
            text: text.into(),
            severity,
        });
    }

    /// Posts text into the host chat log.
    pub fn share_to_chat(&self, text: impl Into<String>) {
        self.send(GameCommand::ShareToChat { text: text.into() });
    }

    /// Shows an in-shell notice.
    pub fn notice(&self, text: impl Into<String>) {
        self.send(GameCommand::Notice(text.into()));
    }
}
