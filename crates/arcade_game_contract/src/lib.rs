//! Contract between the arcade shell runtime and the games it hosts.
//!
//! The runtime owns every game's state slot; a mounted game sees only its own slot through a
//! [`SlotHandle`] and talks back through [`GameServices`]. The contract is generic over the slot
//! type so the runtime never has to know a game's state shape.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod ids;
mod services;
mod timers;

use leptos::View;

pub use ids::GameId;
pub use services::{GameCommand, GameServices, PlayerProfile, SlotHandle};
pub use timers::{ScopedInterval, ScopedTimeout, TimerSlot};

#[derive(Clone)]
/// Mount context injected by the runtime when a game becomes the active screen.
pub struct GameMountContext<S: 'static> {
    /// Game being mounted.
    pub game: GameId,
    /// The game's own state slot.
    pub slot: SlotHandle<S>,
    /// Runtime service bundle.
    pub services: GameServices,
}

/// Static mount function used by the runtime's game registry.
pub type GameMountFn<S> = fn(GameMountContext<S>) -> View;

/// Mountable game descriptor.
pub struct GameModule<S: 'static> {
    mount_fn: GameMountFn<S>,
}

impl<S: 'static> Clone for GameModule<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for GameModule<S> {}

impl<S: 'static> std::fmt::Debug for GameModule<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameModule").finish_non_exhaustive()
    }
}

impl<S: 'static> GameModule<S> {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: GameMountFn<S>) -> Self {
        Self { mount_fn }
    }

    /// Mounts the game view.
    pub fn mount(self, context: GameMountContext<S>) -> View {
        (self.mount_fn)(context)
    }
}
