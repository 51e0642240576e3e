//! Runtime provider and context wiring for the arcade shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue and the host
//! bootstrap wiring. UI composition stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use std::collections::BTreeMap;

use arcade_game_contract::{
    GameCommand, GameId, PlayerProfile, ScopedTimeout, SlotHandle, TimerSlot,
};
use arcade_games::GameSlot;
use leptos::*;
use platform_host::{HostServices, HostSubscription};

use crate::{
    effect_executor,
    host::ArcadeHostContext,
    model::{FloatingWindowState, ShellState},
    reducer::{reduce_shell, RuntimeEffect, ShellAction},
};

#[derive(Clone, Copy)]
/// Leptos context for reading shell state and dispatching [`ShellAction`] values.
pub struct ArcadeRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<ArcadeHostContext>,
    /// Long-lived reactive owner for resources that must outlive a mounted game.
    pub owner: Owner,
    /// Reactive shell state.
    pub state: RwSignal<ShellState>,
    /// Floating window geometry and drag state.
    pub window: RwSignal<FloatingWindowState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ShellAction>,
    /// Pending notice dismissal. A newer notice replaces (and cancels) the older timer.
    pub notice_timer: TimerSlot<ScopedTimeout>,
    /// Command sink handed to mounted games.
    pub game_commands: Callback<GameCommand>,
    /// Player profile as games see it.
    pub profile: Signal<PlayerProfile>,
    slot_handles: StoredValue<BTreeMap<GameId, SlotHandle<GameSlot>>>,
    bridge_subscription: StoredValue<Option<HostSubscription>>,
}

impl ArcadeRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: ShellAction) {
        self.dispatch.call(action);
    }

    /// Slot handle for `game`, created under the provider owner on first use.
    ///
    /// Game views come and go; the handle does not, so a write that resolves after its game
    /// unmounted (a late text-generation reply) still lands in shell state.
    pub fn slot_handle(&self, game: GameId) -> SlotHandle<GameSlot> {
        if let Some(handle) = self
            .slot_handles
            .with_value(|handles| handles.get(&game).copied())
        {
            return handle;
        }
        let handle = with_owner(self.owner, || game_slot_handle(self.state, self.dispatch, game));
        self.slot_handles.update_value(|handles| {
            handles.insert(game, handle);
        });
        handle
    }

    /// Whether the parent-frame listener is attached.
    pub fn bridge_attached(&self) -> bool {
        self.bridge_subscription
            .try_with_value(Option::is_some)
            .unwrap_or(false)
    }
}

fn game_slot_handle(
    state: RwSignal<ShellState>,
    dispatch: Callback<ShellAction>,
    game: GameId,
) -> SlotHandle<GameSlot> {
    let slot_state = Signal::derive(move || state.with(|state| state.slots.slot(game).cloned()));
    let writer = Callback::new(move |slot: GameSlot| {
        if slot.game() != game {
            logging::warn!("{} tried to write the {:?} slot", game.title(), slot.game());
            return;
        }
        dispatch.call(ShellAction::SetSlot { slot });
    });
    SlotHandle::new(slot_state, writer)
}

fn install_runtime_orchestration(runtime: ArcadeRuntimeContext) {
    let subscription = runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    runtime.bridge_subscription.set_value(subscription);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`ArcadeRuntimeContext`] to descendant components and boots persisted state.
pub fn ArcadeProvider(
    /// Browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(ArcadeHostContext::new(host_services));
    let owner = Owner::current().expect("ArcadeProvider owner");
    let state = create_rw_signal(ShellState::default());
    let window = create_rw_signal(FloatingWindowState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let notice_timer = TimerSlot::new();
    let bridge_subscription = store_value(None::<HostSubscription>);

    let dispatch = Callback::new(move |action: ShellAction| {
        let mut shell = state.get_untracked();
        let mut geometry = window.get_untracked();
        let previous_shell = shell.clone();
        let previous_geometry = geometry;

        match reduce_shell(&mut shell, &mut geometry, action) {
            Ok(new_effects) => {
                if shell != previous_shell {
                    state.set(shell);
                }
                if geometry != previous_geometry {
                    window.set(geometry);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("shell reducer error: {err}"),
        }
    });

    let game_commands = Callback::new(move |command: GameCommand| {
        dispatch.call(ShellAction::Game(command));
    });
    let profile = Signal::derive(move || state.with(ShellState::profile));

    let runtime = ArcadeRuntimeContext {
        host,
        owner,
        state,
        window,
        effects,
        dispatch,
        notice_timer,
        game_commands,
        profile,
        slot_handles: store_value(BTreeMap::new()),
        bridge_subscription,
    };

    provide_context(runtime.clone());

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`ArcadeRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ArcadeProvider`].
pub fn use_arcade_runtime() -> ArcadeRuntimeContext {
    use_context::<ArcadeRuntimeContext>().expect("ArcadeRuntimeContext not provided")
}
