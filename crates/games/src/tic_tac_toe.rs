//! Tic-tac-toe against the computer. The player is always X and moves first.

use std::time::Duration;

use arcade_game_contract::{GameId, GameMountContext, ScopedTimeout, TimerSlot};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];
const AI_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Board mark.
pub enum Mark {
    /// The player.
    X,
    /// The computer.
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Finished round result.
pub enum Winner {
    /// Player won.
    X,
    /// Computer won.
    O,
    /// Board filled without a line.
    #[serde(rename = "draw")]
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Computer strength.
pub enum Difficulty {
    /// Random empty cell.
    Easy,
    /// Win, block, then center and corners.
    #[default]
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Running tally across rounds.
pub struct Scores {
    /// Player wins.
    pub player: u32,
    /// Computer wins.
    pub ai: u32,
    /// Draws.
    pub draw: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Board, turn and tally.
pub struct TicTacToeState {
    /// Row-major cells.
    pub board: Vec<Option<Mark>>,
    /// Player to move.
    pub is_x_next: bool,
    /// Result once the round ends.
    pub winner: Option<Winner>,
    /// Computer strength.
    pub difficulty: Difficulty,
    /// Tally across rounds.
    pub scores: Scores,
}

/// Winner of `board`, if the round is over.
pub fn evaluate(board: &[Option<Mark>]) -> Option<Winner> {
    for [a, b, c] in LINES {
        if let (Some(mark), true, true) = (board[a], board[a] == board[b], board[a] == board[c]) {
            return Some(match mark {
                Mark::X => Winner::X,
                Mark::O => Winner::O,
            });
        }
    }
    board.iter().all(Option::is_some).then_some(Winner::Draw)
}

fn completing_cell(board: &[Option<Mark>], mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&cell| board[cell] == Some(mark)).count();
        let empty: Vec<usize> = line.iter().copied().filter(|&cell| board[cell].is_none()).collect();
        (owned == 2 && empty.len() == 1).then(|| empty[0])
    })
}

/// Cell the computer plays on `board`.
pub fn choose_ai_cell(board: &[Option<Mark>], difficulty: Difficulty, rng: &mut GameRng) -> Option<usize> {
    let empty: Vec<usize> = (0..board.len()).filter(|&cell| board[cell].is_none()).collect();
    if empty.is_empty() {
        return None;
    }
    if difficulty == Difficulty::Easy {
        return rng.choose(&empty).copied();
    }
    completing_cell(board, Mark::O)
        .or_else(|| completing_cell(board, Mark::X))
        .or_else(|| board[4].is_none().then_some(4))
        .or_else(|| {
            let corners: Vec<usize> = [0, 2, 6, 8]
                .into_iter()
                .filter(|&cell| board[cell].is_none())
                .collect();
            rng.choose(&corners).copied()
        })
        .or_else(|| rng.choose(&empty).copied())
}

impl TicTacToeState {
    fn fresh(difficulty: Difficulty, scores: Scores) -> Self {
        Self {
            board: vec![None; 9],
            is_x_next: true,
            winner: None,
            difficulty,
            scores,
        }
    }

    /// Clears the board and keeps the tally.
    pub fn next_round(&mut self) {
        *self = Self::fresh(self.difficulty, self.scores);
    }

    /// Switches strength and starts a fresh round.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.next_round();
    }

    fn place(&mut self, cell: usize, mark: Mark) -> Option<Winner> {
        self.board[cell] = Some(mark);
        self.is_x_next = mark == Mark::O;
        self.winner = evaluate(&self.board);
        match self.winner {
            Some(Winner::X) => self.scores.player += 1,
            Some(Winner::O) => self.scores.ai += 1,
            Some(Winner::Draw) => self.scores.draw += 1,
            None => {}
        }
        self.winner
    }

    /// Places the player's X. Returns `false` when the move is not allowed.
    pub fn player_move(&mut self, cell: usize) -> bool {
        if self.winner.is_some() || !self.is_x_next || self.board.get(cell) != Some(&None) {
            return false;
        }
        self.place(cell, Mark::X);
        true
    }

    /// Plays the computer's O when it is its turn.
    pub fn ai_move(&mut self, rng: &mut GameRng) -> Option<usize> {
        if self.winner.is_some() || self.is_x_next {
            return None;
        }
        let cell = choose_ai_cell(&self.board, self.difficulty, rng)?;
        self.place(cell, Mark::O);
        Some(cell)
    }
}

impl GameState for TicTacToeState {
    const GAME: GameId = GameId::TicTacToe;

    fn new_game(_rng: &mut GameRng) -> Self {
        Self::fresh(Difficulty::Hard, Scores::default())
    }

    fn status_line(&self) -> String {
        let tally = format!(
            "You {} | AI {} | Draw {}",
            self.scores.player, self.scores.ai, self.scores.draw
        );
        match self.winner {
            Some(Winner::X) => format!("You win! {tally}"),
            Some(Winner::O) => format!("AI wins. {tally}"),
            Some(Winner::Draw) => format!("Draw. {tally}"),
            None => tally,
        }
    }

    fn is_well_formed(&self) -> bool {
        self.board.len() == 9
    }
}

fn result_cue(winner: Option<Winner>) -> Option<SoundCue> {
    match winner? {
        Winner::X => Some(SoundCue::Success),
        Winner::O => Some(SoundCue::Fail),
        Winner::Draw => Some(SoundCue::Pop),
    }
}

/// Mounts the tic-tac-toe surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<TicTacToeState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());
    let ai_timer = TimerSlot::<ScopedTimeout>::new();

    let run_ai = move || {
        rng.update_value(|rng| {
            slot.update(|state| state.ai_move(rng));
        });
        if let Some(cue) = slot.current().and_then(|state| result_cue(state.winner)) {
            services.with_value(|services| services.play(cue));
        }
    };
    // Resume a round left on the computer's turn.
    if slot.current().is_some_and(|state| !state.is_x_next && state.winner.is_none()) {
        run_ai();
    }

    let on_cell = move |cell: usize| {
        if slot.update(|state| state.player_move(cell)) != Some(true) {
            return;
        }
        let cue = slot
            .current()
            .and_then(|state| result_cue(state.winner))
            .unwrap_or(SoundCue::Click);
        services.with_value(|services| services.play(cue));
        if slot.current().is_some_and(|state| state.winner.is_none()) {
            match ScopedTimeout::start(AI_DELAY, run_ai) {
                Ok(timeout) => ai_timer.replace(timeout),
                Err(err) => {
                    logging::warn!("tic-tac-toe AI timer unavailable: {err}");
                    run_ai();
                }
            }
        }
    };

    let on_new_round = move |_: ()| {
        ai_timer.clear();
        slot.update(TicTacToeState::next_round);
    };
    let on_difficulty = move |difficulty: Difficulty| {
        ai_timer.clear();
        slot.update(|state| state.set_difficulty(difficulty));
    };

    view! {
        <GameFrame game="tic-tac-toe" status=slot.status() on_new_game=on_new_round>
            <div class="ttt-difficulty">
                <button type="button" class="no-drag" on:click=move |_| on_difficulty(Difficulty::Easy)>"Easy"</button>
                <button type="button" class="no-drag" on:click=move |_| on_difficulty(Difficulty::Hard)>"Hard"</button>
            </div>
            <div class="ttt-grid">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.board)
                        .unwrap_or_default()
                        .into_iter()
                        .enumerate()
                        .map(|(cell, mark)| {
                            let label = match mark {
                                Some(Mark::X) => "X",
                                Some(Mark::O) => "O",
                                None => "",
                            };
                            view! {
                                <button type="button" class="ttt-cell no-drag" on:click=move |_| on_cell(cell)>
                                    {label}
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn board(cells: &str) -> Vec<Option<Mark>> {
        cells
            .chars()
            .map(|c| match c {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn evaluate_finds_lines_and_draws() {
        assert_eq!(evaluate(&board("XXX......")), Some(Winner::X));
        assert_eq!(evaluate(&board("O...O...O")), Some(Winner::O));
        assert_eq!(evaluate(&board("XOXXOOOXX")), Some(Winner::Draw));
        assert_eq!(evaluate(&board("XO.......")), None);
    }

    #[test]
    fn hard_ai_wins_before_blocking_and_blocks_before_center() {
        let mut rng = GameRng::new(0);
        assert_eq!(choose_ai_cell(&board("OO.XX...."), Difficulty::Hard, &mut rng), Some(2));
        assert_eq!(choose_ai_cell(&board("XX......."), Difficulty::Hard, &mut rng), Some(2));
        assert_eq!(choose_ai_cell(&board("X........"), Difficulty::Hard, &mut rng), Some(4));
        let corner = choose_ai_cell(&board("....X...."), Difficulty::Hard, &mut rng);
        assert!(matches!(corner, Some(0 | 2 | 6 | 8)));
    }

    #[test]
    fn turns_alternate_and_occupied_cells_are_rejected() {
        let mut rng = GameRng::new(1);
        let mut state = TicTacToeState::new_game(&mut rng);
        assert!(state.player_move(0));
        assert!(!state.player_move(1));
        assert_eq!(state.ai_move(&mut rng), Some(4));
        assert!(!state.player_move(4));
        assert!(state.is_x_next);
    }

    #[test]
    fn finished_rounds_update_the_tally_and_next_round_keeps_it() {
        let mut state = TicTacToeState::new_game(&mut GameRng::new(2));
        state.board = board("XX.OO....");
        assert!(state.player_move(2));
        assert_eq!(state.winner, Some(Winner::X));
        assert_eq!(state.scores.player, 1);
        assert!(!state.player_move(5));

        state.set_difficulty(Difficulty::Easy);
        assert_eq!(state.board, vec![None; 9]);
        assert_eq!(state.winner, None);
        assert_eq!(state.scores.player, 1);
        assert_eq!(state.difficulty, Difficulty::Easy);
    }
}
