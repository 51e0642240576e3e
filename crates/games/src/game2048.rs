//! 2048 sliding tiles.

use arcade_game_contract::{GameId, GameMountContext};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Board edge length.
pub const SIZE: usize = 4;
const WINNING_TILE: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Slide direction.
pub enum Direction {
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
}

impl Direction {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Self::Left),
            "ArrowRight" | "d" => Some(Self::Right),
            "ArrowUp" | "w" => Some(Self::Up),
            "ArrowDown" | "s" => Some(Self::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Board and score. Empty cells hold `0`.
pub struct Game2048State {
    /// Row-major tile values.
    pub grid: Vec<Vec<u32>>,
    /// Sum of merged tile values.
    pub score: u32,
    /// A 2048 tile has appeared.
    pub won: bool,
    /// No move is possible.
    pub game_over: bool,
}

/// Slides one line toward index 0 and merges equal neighbours once. Returns points scored.
fn slide_line(line: &mut [u32]) -> u32 {
    let tiles: Vec<u32> = line.iter().copied().filter(|value| *value != 0).collect();
    let mut merged = Vec::with_capacity(tiles.len());
    let mut points = 0;
    let mut index = 0;
    while index < tiles.len() {
        if index + 1 < tiles.len() && tiles[index] == tiles[index + 1] {
            let value = tiles[index] * 2;
            merged.push(value);
            points += value;
            index += 2;
        } else {
            merged.push(tiles[index]);
            index += 1;
        }
    }
    merged.resize(line.len(), 0);
    line.copy_from_slice(&merged);
    points
}

impl Game2048State {
    fn empty() -> Self {
        Self {
            grid: vec![vec![0; SIZE]; SIZE],
            score: 0,
            won: false,
            game_over: false,
        }
    }

    fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.grid[row][col] == 0)
            .collect()
    }

    /// Drops a 2 (or, one time in ten, a 4) on a random empty cell.
    pub fn spawn_tile(&mut self, rng: &mut GameRng) -> bool {
        let cells = self.empty_cells();
        let Some(&(row, col)) = rng.choose(&cells) else {
            return false;
        };
        self.grid[row][col] = if rng.chance(0.1) { 4 } else { 2 };
        true
    }

    fn line(&self, direction: Direction, index: usize) -> Vec<u32> {
        match direction {
            Direction::Left => self.grid[index].clone(),
            Direction::Right => self.grid[index].iter().rev().copied().collect(),
            Direction::Up => (0..SIZE).map(|row| self.grid[row][index]).collect(),
            Direction::Down => (0..SIZE).rev().map(|row| self.grid[row][index]).collect(),
        }
    }

    fn store_line(&mut self, direction: Direction, index: usize, line: &[u32]) {
        for (offset, value) in line.iter().copied().enumerate() {
            let (row, col) = match direction {
                Direction::Left => (index, offset),
                Direction::Right => (index, SIZE - 1 - offset),
                Direction::Up => (offset, index),
                Direction::Down => (SIZE - 1 - offset, index),
            };
            self.grid[row][col] = value;
        }
    }

    /// Slides the board without spawning. Returns whether any tile moved.
    pub fn slide(&mut self, direction: Direction) -> bool {
        let before = self.grid.clone();
        for index in 0..SIZE {
            let mut line = self.line(direction, index);
            self.score += slide_line(&mut line);
            self.store_line(direction, index, &line);
        }
        if self.grid.iter().flatten().any(|value| *value >= WINNING_TILE) {
            self.won = true;
        }
        self.grid != before
    }

    fn can_move(&self) -> bool {
        [Direction::Left, Direction::Up].into_iter().any(|direction| {
            let mut trial = self.clone();
            trial.slide(direction)
        }) || !self.empty_cells().is_empty()
    }

    /// Full turn: slide, spawn and check for game over.
    pub fn play(&mut self, direction: Direction, rng: &mut GameRng) -> bool {
        if self.game_over || !self.slide(direction) {
            return false;
        }
        self.spawn_tile(rng);
        self.game_over = !self.can_move();
        true
    }
}

impl GameState for Game2048State {
    const GAME: GameId = GameId::Game2048;

    fn new_game(rng: &mut GameRng) -> Self {
        let mut state = Self::empty();
        state.spawn_tile(rng);
        state.spawn_tile(rng);
        state
    }

    fn status_line(&self) -> String {
        if self.game_over {
            format!("Game over | score {}", self.score)
        } else if self.won {
            format!("2048! | score {}", self.score)
        } else {
            format!("Score {}", self.score)
        }
    }

    fn is_well_formed(&self) -> bool {
        self.grid.len() == SIZE && self.grid.iter().all(|row| row.len() == SIZE)
    }
}

/// Mounts the 2048 surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<Game2048State>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());

    let play = move |direction: Direction| {
        let moved = rng
            .try_update_value(|rng| slot.update(|state| state.play(direction, rng)))
            .flatten()
            .unwrap_or(false);
        if moved {
            services.with_value(|services| services.play(SoundCue::Pop));
        }
    };

    let keys = window_event_listener(ev::keydown, move |ev| {
        if let Some(direction) = Direction::from_key(&ev.key()) {
            ev.prevent_default();
            play(direction);
        }
    });
    on_cleanup(move || keys.remove());

    let status = slot.status();

    view! {
        <GameFrame game="2048" status on_new_game=move |_| slot.reset()>
            <div class="g2048-grid">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.grid)
                        .unwrap_or_default()
                        .into_iter()
                        .flatten()
                        .map(|value| {
                            let label = if value == 0 { String::new() } else { value.to_string() };
                            view! { <div class="g2048-tile" data-value=value>{label}</div> }
                        })
                        .collect_view()
                }}
            </div>
            <div class="g2048-pad">
                <button type="button" class="no-drag" on:click=move |_| play(Direction::Up)>"↑"</button>
                <button type="button" class="no-drag" on:click=move |_| play(Direction::Left)>"←"</button>
                <button type="button" class="no-drag" on:click=move |_| play(Direction::Down)>"↓"</button>
                <button type="button" class="no-drag" on:click=move |_| play(Direction::Right)>"→"</button>
            </div>
        </GameFrame>
    }
    .into_view()
}
