//! Falling-block puzzle on a 10x20 well.

use std::time::Duration;

use arcade_game_contract::{GameId, GameMountContext, ScopedInterval, TimerSlot};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Well width.
pub const WIDTH: usize = 10;
/// Well height.
pub const HEIGHT: usize = 20;
const GRAVITY: Duration = Duration::from_millis(500);
const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Piece cells in a bounding box, spawn orientation. Index order: I O T S Z J L.
const SHAPES: [[(i8, i8); 4]; 7] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(2, 0), (0, 1), (1, 1), (2, 1)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Piece in flight.
pub struct ActivePiece {
    /// Index into the shape table.
    pub kind: u8,
    /// Quarter turns clockwise.
    pub rotation: u8,
    /// Bounding box column.
    pub x: i8,
    /// Bounding box row.
    pub y: i8,
}

impl ActivePiece {
    fn spawn(kind: u8) -> Self {
        Self {
            kind,
            rotation: 0,
            x: 3,
            y: 0,
        }
    }

    /// Absolute well cells covered by the piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let kind = self.kind as usize % SHAPES.len();
        let extent: i8 = match kind {
            0 => 4,
            1 => return SHAPES[1].map(|(cx, cy)| (self.x + cx, self.y + cy)),
            _ => 3,
        };
        SHAPES[kind].map(|(mut cx, mut cy)| {
            for _ in 0..self.rotation % 4 {
                (cx, cy) = (extent - 1 - cy, cx);
            }
            (self.x + cx, self.y + cy)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Well, active piece and score.
pub struct TetrisState {
    /// Row-major cells; `0` is empty, otherwise piece kind plus one.
    pub board: Vec<Vec<u8>>,
    /// Piece in flight.
    pub piece: Option<ActivePiece>,
    /// Kind of the following piece.
    pub next_kind: u8,
    /// Points this round.
    pub score: u32,
    /// Lines cleared this round.
    pub lines: u32,
    /// Gravity is running.
    pub is_playing: bool,
    /// Well overflowed.
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a gravity step or drop.
pub enum FallOutcome {
    /// Round is not running.
    Idle,
    /// Piece moved down.
    Fell,
    /// Piece landed, clearing this many lines.
    Locked(u32),
    /// New piece could not spawn.
    ToppedOut,
}

impl TetrisState {
    fn empty(rng: &mut GameRng) -> Self {
        Self {
            board: vec![vec![0; WIDTH]; HEIGHT],
            piece: None,
            next_kind: rng.index(SHAPES.len()) as u8,
            score: 0,
            lines: 0,
            is_playing: false,
            game_over: false,
        }
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            (0..WIDTH as i8).contains(&x)
                && (0..HEIGHT as i8).contains(&y)
                && self.board[y as usize][x as usize] == 0
        })
    }

    fn spawn(&mut self, rng: &mut GameRng) -> bool {
        let piece = ActivePiece::spawn(self.next_kind);
        self.next_kind = rng.index(SHAPES.len()) as u8;
        if self.fits(&piece) {
            self.piece = Some(piece);
            true
        } else {
            self.piece = None;
            self.is_playing = false;
            self.game_over = true;
            false
        }
    }

    /// Starts a fresh round.
    pub fn start(&mut self, rng: &mut GameRng) {
        *self = Self::empty(rng);
        self.is_playing = true;
        self.spawn(rng);
    }

    fn try_move(&mut self, dx: i8, dy: i8, turn: u8) -> bool {
        let Some(piece) = self.piece.filter(|_| self.is_playing) else {
            return false;
        };
        let moved = ActivePiece {
            x: piece.x + dx,
            y: piece.y + dy,
            rotation: (piece.rotation + turn) % 4,
            ..piece
        };
        if self.fits(&moved) {
            self.piece = Some(moved);
            true
        } else {
            false
        }
    }

    /// Moves the piece sideways by `dx`.
    pub fn shift(&mut self, dx: i8) -> bool {
        self.try_move(dx, 0, 0)
    }

    /// Rotates clockwise, nudging one column off a wall if needed.
    pub fn rotate(&mut self) -> bool {
        self.try_move(0, 0, 1) || self.try_move(-1, 0, 1) || self.try_move(1, 0, 1)
    }

    fn lock(&mut self, rng: &mut GameRng) -> FallOutcome {
        let Some(piece) = self.piece.take() else {
            return FallOutcome::Idle;
        };
        for (x, y) in piece.cells() {
            self.board[y as usize][x as usize] = piece.kind + 1;
        }
        let before = self.board.len();
        self.board.retain(|row| row.iter().any(|cell| *cell == 0));
        let cleared = before - self.board.len();
        for _ in 0..cleared {
            self.board.insert(0, vec![0; WIDTH]);
        }
        self.lines += cleared as u32;
        self.score += LINE_SCORES[cleared.min(4)];

        if self.spawn(rng) {
            FallOutcome::Locked(cleared as u32)
        } else {
            FallOutcome::ToppedOut
        }
    }

    /// Gravity step: fall one row or lock in place.
    pub fn tick(&mut self, rng: &mut GameRng) -> FallOutcome {
        if !self.is_playing {
            return FallOutcome::Idle;
        }
        if self.try_move(0, 1, 0) {
            FallOutcome::Fell
        } else {
            self.lock(rng)
        }
    }

    /// Drops the piece to the floor and locks it.
    pub fn hard_drop(&mut self, rng: &mut GameRng) -> FallOutcome {
        if !self.is_playing {
            return FallOutcome::Idle;
        }
        while self.try_move(0, 1, 0) {}
        self.lock(rng)
    }
}

impl GameState for TetrisState {
    const GAME: GameId = GameId::Tetris;

    fn new_game(rng: &mut GameRng) -> Self {
        Self::empty(rng)
    }

    fn status_line(&self) -> String {
        let prefix = if self.game_over { "Game over | " } else { "" };
        format!("{prefix}Score {} | lines {}", self.score, self.lines)
    }

    fn is_well_formed(&self) -> bool {
        let board_ok =
            self.board.len() == HEIGHT && self.board.iter().all(|row| row.len() == WIDTH);
        // Range-check the origin first so `cells` cannot overflow.
        let piece_ok = self.piece.map_or(true, |piece| {
            usize::from(piece.kind) < SHAPES.len()
                && (-4..=WIDTH as i8).contains(&piece.x)
                && (-4..=HEIGHT as i8).contains(&piece.y)
                && piece.cells().iter().all(|&(x, y)| {
                    (0..WIDTH as i8).contains(&x) && (0..HEIGHT as i8).contains(&y)
                })
        });
        board_ok && piece_ok && usize::from(self.next_kind) < SHAPES.len()
    }
}

/// Mounts the falling-block surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<TetrisState>::new(context.slot);
    slot.ensure();
    slot.update(|state| state.is_playing = false);
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());
    let gravity = TimerSlot::<ScopedInterval>::new();

    let report = move |outcome: Option<FallOutcome>| match outcome {
        Some(FallOutcome::Locked(0)) => services.with_value(|s| s.play(SoundCue::Click)),
        Some(FallOutcome::Locked(_)) => services.with_value(|s| s.play(SoundCue::Success)),
        Some(FallOutcome::ToppedOut) => {
            gravity.clear();
            services.with_value(|s| s.play(SoundCue::Fail));
        }
        Some(FallOutcome::Idle) => gravity.clear(),
        Some(FallOutcome::Fell) | None => {}
    };
    let fall = move |hard: bool| {
        let outcome = rng
            .try_update_value(|rng| {
                slot.update(|state| {
                    if hard {
                        state.hard_drop(rng)
                    } else {
                        state.tick(rng)
                    }
                })
            })
            .flatten();
        report(outcome);
    };

    let start = move || {
        rng.update_value(|rng| {
            slot.update(|state| state.start(rng));
        });
        match ScopedInterval::start(GRAVITY, move || fall(false)) {
            Ok(interval) => gravity.replace(interval),
            Err(err) => logging::warn!("tetris gravity unavailable: {err}"),
        }
    };

    let keys = window_event_listener(ev::keydown, move |ev| {
        let handled = match ev.key().as_str() {
            "ArrowLeft" => {
                slot.update(|state| state.shift(-1));
                true
            }
            "ArrowRight" => {
                slot.update(|state| state.shift(1));
                true
            }
            "ArrowUp" => {
                slot.update(TetrisState::rotate);
                true
            }
            "ArrowDown" => {
                fall(false);
                true
            }
            " " => {
                fall(true);
                true
            }
            _ => false,
        };
        if handled {
            ev.prevent_default();
        }
    });
    on_cleanup(move || keys.remove());

    let on_new_game = move |_: ()| {
        gravity.clear();
        slot.reset();
    };

    view! {
        <GameFrame game="tetris" status=slot.status() on_new_game>
            <div class="tetris-well">
                {move || {
                    let Some(state) = slot.state().get() else {
                        return ().into_view();
                    };
                    let mut cells = state.board.clone();
                    if let Some(piece) = state.piece {
                        for (x, y) in piece.cells() {
                            cells[y as usize][x as usize] = piece.kind + 1;
                        }
                    }
                    cells
                        .into_iter()
                        .flatten()
                        .map(|cell| view! { <div class="tetris-cell" data-kind=cell></div> })
                        .collect_view()
                }}
            </div>
            <Show when=move || slot.state().get().is_some_and(|state| !state.is_playing) fallback=|| ()>
                <button type="button" class="tetris-start no-drag" on:click=move |_| start()>
                    "Start"
                </button>
            </Show>
        </GameFrame>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn started(seed: u64) -> (TetrisState, GameRng) {
        let mut rng = GameRng::new(seed);
        let mut state = TetrisState::new_game(&mut rng);
        state.start(&mut rng);
        (state, rng)
    }

    #[test]
    fn rotations_stay_inside_the_bounding_box() {
        for kind in 0..7u8 {
            for rotation in 0..4 {
                let piece = ActivePiece {
                    kind,
                    rotation,
                    x: 0,
                    y: 0,
                };
                let mut cells = piece.cells().to_vec();
                assert!(cells.iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
                cells.sort_unstable();
                cells.dedup();
                assert_eq!(cells.len(), 4);
            }
        }
    }

    #[test]
    fn pieces_stop_at_the_walls() {
        let (mut state, _) = started(1);
        while state.shift(-1) {}
        let leftmost = state
            .piece
            .and_then(|piece| piece.cells().iter().map(|cell| cell.0).min());
        assert_eq!(leftmost, Some(0));
    }

    #[test]
    fn hard_drop_locks_on_the_floor_and_spawns_the_next_piece() {
        let (mut state, mut rng) = started(2);
        assert_eq!(state.hard_drop(&mut rng), FallOutcome::Locked(0));
        assert!(state.board[HEIGHT - 1].iter().any(|cell| *cell != 0));
        assert!(state.piece.is_some());
    }

    #[test]
    fn full_rows_are_cleared_and_scored() {
        let (mut state, mut rng) = started(3);
        for row in HEIGHT - 2..HEIGHT {
            state.board[row] = vec![1; WIDTH];
            state.board[row][0] = 0;
        }
        // Vertical I piece dropped into the gap.
        state.piece = Some(ActivePiece {
            kind: 0,
            rotation: 1,
            x: -2,
            y: 0,
        });
        assert!(state.fits(&state.piece.expect("piece")));
        assert_eq!(state.hard_drop(&mut rng), FallOutcome::Locked(2));
        assert_eq!(state.lines, 2);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn blocked_spawn_ends_the_round() {
        let (mut state, mut rng) = started(4);
        for row in 0..2 {
            state.board[row] = vec![1; WIDTH];
            state.board[row][WIDTH - 1] = 0;
        }
        state.piece = Some(ActivePiece {
            kind: 1,
            rotation: 0,
            x: 0,
            y: HEIGHT as i8 - 2,
        });
        assert_eq!(state.tick(&mut rng), FallOutcome::ToppedOut);
        assert!(state.game_over);
        assert!(!state.is_playing);
    }
}
