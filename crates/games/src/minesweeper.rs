//! Minesweeper on an 8x8 field. Mines are laid on the first reveal so it is never fatal.

use arcade_game_contract::{GameId, GameMountContext};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Field edge length.
pub const SIZE: usize = 8;
/// Mines per field.
pub const MINES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One field cell.
pub struct MineCell {
    /// Cell hides a mine.
    pub is_mine: bool,
    /// Cell has been opened.
    pub is_revealed: bool,
    /// Player marked the cell.
    pub is_flagged: bool,
    /// Mines among the eight neighbours.
    pub neighbor_mines: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Field and round outcome.
pub struct MinesweeperState {
    /// Row-major cells.
    pub board: Vec<Vec<MineCell>>,
    /// A mine was revealed.
    pub game_over: bool,
    /// Every safe cell is open.
    pub win: bool,
    /// Mines have been laid.
    pub is_generated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of revealing a cell.
pub enum RevealOutcome {
    /// Flagged, already open, or the round is over.
    Ignored,
    /// Safe cell opened.
    Opened,
    /// Mine hit; the round is lost.
    Exploded,
    /// Last safe cell opened.
    Cleared,
}

fn neighbors(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1i32..=1)
        .flat_map(|dr| (-1i32..=1).map(move |dc| (dr, dc)))
        .filter(|&(dr, dc)| dr != 0 || dc != 0)
        .filter_map(move |(dr, dc)| {
            let r = row as i32 + dr;
            let c = col as i32 + dc;
            ((0..SIZE as i32).contains(&r) && (0..SIZE as i32).contains(&c))
                .then_some((r as usize, c as usize))
        })
}

impl MinesweeperState {
    fn blank() -> Self {
        Self {
            board: vec![vec![MineCell::default(); SIZE]; SIZE],
            game_over: false,
            win: false,
            is_generated: false,
        }
    }

    /// Lays the mines anywhere except `(safe_row, safe_col)` and counts neighbours.
    pub fn generate(&mut self, safe_row: usize, safe_col: usize, rng: &mut GameRng) {
        let mut cells: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&cell| cell != (safe_row, safe_col))
            .collect();
        rng.shuffle(&mut cells);
        for &(row, col) in cells.iter().take(MINES) {
            self.board[row][col].is_mine = true;
        }
        for row in 0..SIZE {
            for col in 0..SIZE {
                self.board[row][col].neighbor_mines = neighbors(row, col)
                    .filter(|&(r, c)| self.board[r][c].is_mine)
                    .count() as u8;
            }
        }
        self.is_generated = true;
    }

    fn finished(&self) -> bool {
        self.game_over || self.win
    }

    /// Opens a cell, flooding outward through cells with no neighbouring mines.
    pub fn reveal(&mut self, row: usize, col: usize, rng: &mut GameRng) -> RevealOutcome {
        if row >= SIZE || col >= SIZE || self.finished() {
            return RevealOutcome::Ignored;
        }
        let cell = &self.board[row][col];
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::Ignored;
        }
        if !self.is_generated {
            self.generate(row, col, rng);
        }

        if self.board[row][col].is_mine {
            self.game_over = true;
            for cell in self.board.iter_mut().flatten().filter(|cell| cell.is_mine) {
                cell.is_revealed = true;
            }
            return RevealOutcome::Exploded;
        }

        let mut pending = vec![(row, col)];
        while let Some((r, c)) = pending.pop() {
            let cell = &mut self.board[r][c];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            cell.is_revealed = true;
            if cell.neighbor_mines == 0 {
                pending.extend(neighbors(r, c));
            }
        }

        let cleared = self
            .board
            .iter()
            .flatten()
            .all(|cell| cell.is_mine || cell.is_revealed);
        if cleared {
            self.win = true;
            RevealOutcome::Cleared
        } else {
            RevealOutcome::Opened
        }
    }

    /// Toggles the flag on a closed cell.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if self.finished() {
            return false;
        }
        match self.board.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(cell) if !cell.is_revealed => {
                cell.is_flagged = !cell.is_flagged;
                true
            }
            _ => false,
        }
    }

    fn flags(&self) -> usize {
        self.board.iter().flatten().filter(|cell| cell.is_flagged).count()
    }
}

impl GameState for MinesweeperState {
    const GAME: GameId = GameId::Minesweeper;

    fn new_game(_rng: &mut GameRng) -> Self {
        Self::blank()
    }

    fn status_line(&self) -> String {
        if self.win {
            "Field cleared!".to_string()
        } else if self.game_over {
            "Boom. Try again.".to_string()
        } else {
            format!("Mines {} | flags {}", MINES, self.flags())
        }
    }

    fn is_well_formed(&self) -> bool {
        self.board.len() == SIZE && self.board.iter().all(|row| row.len() == SIZE)
    }
}

fn cell_label(cell: &MineCell) -> String {
    match (cell.is_revealed, cell.is_flagged, cell.is_mine) {
        (false, true, _) => "🚩".to_string(),
        (false, false, _) => String::new(),
        (true, _, true) => "💣".to_string(),
        (true, _, false) if cell.neighbor_mines == 0 => String::new(),
        (true, _, false) => cell.neighbor_mines.to_string(),
    }
}

/// Mounts the minesweeper surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<MinesweeperState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());

    let on_reveal = move |row: usize, col: usize| {
        let outcome = rng
            .try_update_value(|rng| slot.update(|state| state.reveal(row, col, rng)))
            .flatten();
        let cue = match outcome {
            Some(RevealOutcome::Opened) => SoundCue::Click,
            Some(RevealOutcome::Exploded) => SoundCue::Fail,
            Some(RevealOutcome::Cleared) => SoundCue::Success,
            Some(RevealOutcome::Ignored) | None => return,
        };
        services.with_value(|services| services.play(cue));
    };
    let on_flag = move |row: usize, col: usize| {
        if slot.update(|state| state.toggle_flag(row, col)) == Some(true) {
            services.with_value(|services| services.play(SoundCue::Pop));
        }
    };

    view! {
        <GameFrame game="minesweeper" status=slot.status() on_new_game=move |_| slot.reset()>
            <div class="mines-grid">
                {move || {
                    let board = slot.state().get().map(|state| state.board).unwrap_or_default();
                    board
                        .into_iter()
                        .enumerate()
                        .flat_map(|(row, cells)| {
                            cells.into_iter().enumerate().map(move |(col, cell)| (row, col, cell))
                        })
                        .map(|(row, col, cell)| {
                            view! {
                                <button
                                    type="button"
                                    class="mines-cell no-drag"
                                    data-revealed=cell.is_revealed
                                    on:click=move |_| on_reveal(row, col)
                                    on:contextmenu=move |ev| {
                                        ev.prevent_default();
                                        on_flag(row, col);
                                    }
                                >
                                    {cell_label(&cell)}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </GameFrame>
    }
    .into_view()
}
