use arcade_game_contract::GameId;

use super::*;
use crate::{model::Screen, reducer::ShellAction};

#[component]
pub(super) fn GameMenu() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let greeting = create_memo(move |_| {
        runtime
            .state
            .with(|state| format!("Welcome back, {}", state.user_name))
    });

    view! {
        <nav class="arcade-menu" aria-label="Games">
            <p class="arcade-greeting">{move || greeting.get()}</p>
            <ul class="arcade-game-grid">
                {GameId::ALL
                    .into_iter()
                    .map(|game| view! { <GameTile game=game /> })
                    .collect_view()}
            </ul>
            <div class="arcade-menu-footer">
                <button
                    type="button"
                    on:click=move |_| {
                        runtime.dispatch_action(ShellAction::Navigate {
                            screen: Screen::Settings,
                        })
                    }
                >
                    "⚙ Settings"
                </button>
                <button type="button" on:click=move |_| runtime.dispatch_action(ShellAction::ManualSave)>
                    "Save"
                </button>
                <button type="button" on:click=move |_| runtime.dispatch_action(ShellAction::ManualLoad)>
                    "Load"
                </button>
            </div>
        </nav>
    }
}

#[component]
fn GameTile(game: GameId) -> impl IntoView {
    let runtime = use_arcade_runtime();
    let progress = create_memo(move |_| {
        runtime
            .state
            .with(|state| state.slots.slot(game).map(|slot| slot.status_line()))
    });

    view! {
        <li>
            <button
                type="button"
                class="arcade-game-tile"
                data-game=format!("{game:?}")
                on:click=move |_| {
                    runtime.dispatch_action(ShellAction::Navigate {
                        screen: Screen::Game(game),
                    })
                }
            >
                <span class="arcade-game-glyph" aria-hidden="true">{game.glyph()}</span>
                <span class="arcade-game-title">{game.title()}</span>
                <span class="arcade-game-progress">
                    {move || progress.get().unwrap_or_else(|| "New".to_string())}
                </span>
            </button>
        </li>
    }
}
