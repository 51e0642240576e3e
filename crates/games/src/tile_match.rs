//! Tile match: move uncovered tiles into a seven-slot dock; three alike vanish.

use arcade_game_contract::{GameId, GameMountContext};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

const KINDS: [&str; 8] = ["🍓", "🥕", "🌽", "🍇", "🍋", "🥝", "🍑", "🫐"];
/// Dock capacity; filling it loses the round.
pub const DOCK_LIMIT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One tile on the board or in the dock.
pub struct Tile {
    /// Stable tile id.
    pub id: u32,
    /// Index into the tile glyph set.
    pub kind: u8,
    /// Stack layer; higher layers cover lower ones.
    pub layer: u8,
    /// Column in half-tile units.
    pub x: u8,
    /// Row in half-tile units.
    pub y: u8,
}

impl Tile {
    fn glyph(&self) -> &'static str {
        KINDS.get(self.kind as usize).copied().unwrap_or("?")
    }

    fn overlaps(&self, other: &Tile) -> bool {
        self.x.abs_diff(other.x) < 2 && self.y.abs_diff(other.y) < 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Round status.
pub enum TileMatchStatus {
    /// Tiles remain.
    Playing,
    /// Board and dock are empty.
    Won,
    /// Dock overflowed.
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Board, dock and status.
pub struct TileMatchState {
    /// Tiles still on the board.
    pub tiles: Vec<Tile>,
    /// Picked tiles, grouped by kind.
    pub dock: Vec<Tile>,
    /// Round status.
    pub status: TileMatchStatus,
    /// Board has been dealt.
    pub is_generated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of picking a tile.
pub enum PickOutcome {
    /// Tile covered, missing, or round over.
    Ignored,
    /// Tile moved to the dock.
    Docked,
    /// Tile completed a triple that was cleared.
    Cleared,
    /// Board and dock are empty.
    Won,
    /// Dock is full.
    Lost,
}

impl TileMatchState {
    fn deal(rng: &mut GameRng) -> Self {
        let mut kinds: Vec<u8> = (0..KINDS.len() as u8).flat_map(|kind| [kind; 3]).collect();
        rng.shuffle(&mut kinds);

        let base = (0..4u8).flat_map(|row| (0..4u8).map(move |col| (0u8, col * 2, row * 2)));
        let top = (0..3u8)
            .flat_map(|row| (0..3u8).map(move |col| (1u8, col * 2 + 1, row * 2 + 1)))
            .take(8);
        let tiles = base
            .chain(top)
            .zip(kinds)
            .enumerate()
            .map(|(id, ((layer, x, y), kind))| Tile {
                id: id as u32,
                kind,
                layer,
                x,
                y,
            })
            .collect();

        Self {
            tiles,
            dock: Vec::new(),
            status: TileMatchStatus::Playing,
            is_generated: true,
        }
    }

    /// A tile is covered when a higher-layer tile overlaps it.
    pub fn is_covered(&self, tile: &Tile) -> bool {
        self.tiles
            .iter()
            .any(|other| other.layer > tile.layer && other.overlaps(tile))
    }

    /// Moves tile `id` to the dock if it is uncovered.
    pub fn pick(&mut self, id: u32) -> PickOutcome {
        if self.status != TileMatchStatus::Playing {
            return PickOutcome::Ignored;
        }
        let Some(position) = self.tiles.iter().position(|tile| tile.id == id) else {
            return PickOutcome::Ignored;
        };
        if self.is_covered(&self.tiles[position]) {
            return PickOutcome::Ignored;
        }

        let tile = self.tiles.remove(position);
        let kind = tile.kind;
        let insert_at = self
            .dock
            .iter()
            .rposition(|docked| docked.kind == kind)
            .map_or(self.dock.len(), |last| last + 1);
        self.dock.insert(insert_at, tile);

        let cleared = self.dock.iter().filter(|docked| docked.kind == kind).count() >= 3;
        if cleared {
            self.dock.retain(|docked| docked.kind != kind);
        }

        if self.tiles.is_empty() && self.dock.is_empty() {
            self.status = TileMatchStatus::Won;
            PickOutcome::Won
        } else if self.dock.len() >= DOCK_LIMIT {
            self.status = TileMatchStatus::Lost;
            PickOutcome::Lost
        } else if cleared {
            PickOutcome::Cleared
        } else {
            PickOutcome::Docked
        }
    }
}

impl GameState for TileMatchState {
    const GAME: GameId = GameId::TileMatch;

    fn new_game(rng: &mut GameRng) -> Self {
        Self::deal(rng)
    }

    fn status_line(&self) -> String {
        match self.status {
            TileMatchStatus::Won => "Board cleared!".to_string(),
            TileMatchStatus::Lost => "Dock full. Try again.".to_string(),
            TileMatchStatus::Playing => format!(
                "Tiles {} | dock {}/{}",
                self.tiles.len(),
                self.dock.len(),
                DOCK_LIMIT
            ),
        }
    }
}

/// Mounts the tile match surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<TileMatchState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);

    let on_pick = move |id: u32| {
        let cue = match slot.update(|state| state.pick(id)) {
            Some(PickOutcome::Docked) => SoundCue::Click,
            Some(PickOutcome::Cleared) => SoundCue::Pop,
            Some(PickOutcome::Won) => SoundCue::Success,
            Some(PickOutcome::Lost) => SoundCue::Fail,
            Some(PickOutcome::Ignored) | None => return,
        };
        services.with_value(|services| services.play(cue));
    };

    view! {
        <GameFrame game="tile-match" status=slot.status() on_new_game=move |_| slot.reset()>
            <div class="tile-board">
                {move || {
                    let Some(state) = slot.state().get() else {
                        return ().into_view();
                    };
                    state
                        .tiles
                        .iter()
                        .map(|tile| {
                            let id = tile.id;
                            let style = format!(
                                "left: {}px; top: {}px; z-index: {};",
                                u32::from(tile.x) * 22,
                                u32::from(tile.y) * 22,
                                tile.layer + 1
                            );
                            view! {
                                <button
                                    type="button"
                                    class="tile no-drag"
                                    data-covered=state.is_covered(tile)
                                    style=style
                                    on:click=move |_| on_pick(id)
                                >
                                    {tile.glyph()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="tile-dock">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.dock)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|tile| view! { <span class="tile docked">{tile.glyph()}</span> })
                        .collect_view()
                }}
            </div>
        </GameFrame>
    }
    .into_view()
}
