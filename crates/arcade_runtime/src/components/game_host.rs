use arcade_game_contract::{GameCommand, GameId, GameMountContext, GameServices};

use super::*;
use crate::reducer::ShellAction;

/// Mounts `game` against its own slot. Only the active game is ever mounted.
///
/// The slot handle and services come from the provider, so pending async work inside the game
/// can still write after this view is gone.
#[component]
pub(super) fn GameHost(game: GameId) -> impl IntoView {
    let runtime = use_arcade_runtime();

    let services = GameServices::new(
        runtime.game_commands,
        runtime.profile,
        runtime.host.get_value().text_generation(),
    );
    let surface = untrack(move || {
        arcade_games::game_module(game).mount(GameMountContext {
            game,
            slot: runtime.slot_handle(game),
            services,
        })
    });

    view! {
        <div class="arcade-game-host" data-game=format!("{game:?}")>
            <div class="arcade-game-nav">
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(ShellAction::Game(GameCommand::ExitToMenu))
                >
                    "← Menu"
                </button>
                <button type="button" on:click=move |_| runtime.dispatch_action(ShellAction::ManualSave)>
                    "Save"
                </button>
                <button type="button" on:click=move |_| runtime.dispatch_action(ShellAction::ManualLoad)>
                    "Load"
                </button>
            </div>
            {surface}
        </div>
    }
}
