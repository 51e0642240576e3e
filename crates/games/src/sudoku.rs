//! Sudoku with checked entries and a three-mistake limit.

use arcade_game_contract::{GameId, GameMountContext};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

const CELLS: usize = 81;
const BLANKS: usize = 40;
/// Wrong entries allowed before the round is lost.
pub const MAX_MISTAKES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Puzzle, solution and progress.
pub struct SudokuState {
    /// Given digits; `0` marks a blank.
    pub puzzle: Vec<u8>,
    /// Full solution.
    pub solution: Vec<u8>,
    /// Current grid including correct entries.
    pub entries: Vec<u8>,
    /// Selected cell.
    pub selected: Option<usize>,
    /// Wrong entries so far.
    pub mistakes: u32,
    /// Grid is solved.
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of entering a digit.
pub enum EntryOutcome {
    /// Given cell, filled cell, bad digit, or round over.
    Ignored,
    /// Digit matches the solution.
    Correct,
    /// Digit is wrong.
    Wrong,
    /// Last blank filled.
    Solved,
    /// Mistake limit reached.
    Failed,
}

/// Shuffled valid grid built by permuting a base pattern.
pub fn solved_grid(rng: &mut GameRng) -> Vec<u8> {
    let mut digits: Vec<u8> = (1..=9).collect();
    rng.shuffle(&mut digits);

    let mut bands = [0usize, 1, 2];
    rng.shuffle(&mut bands);
    let rows: Vec<usize> = bands
        .iter()
        .flat_map(|&band| {
            let mut inner = [0usize, 1, 2];
            rng.shuffle(&mut inner);
            inner.map(|row| band * 3 + row)
        })
        .collect();

    let mut stacks = [0usize, 1, 2];
    rng.shuffle(&mut stacks);
    let cols: Vec<usize> = stacks
        .iter()
        .flat_map(|&stack| {
            let mut inner = [0usize, 1, 2];
            rng.shuffle(&mut inner);
            inner.map(|col| stack * 3 + col)
        })
        .collect();

    let mut grid = Vec::with_capacity(CELLS);
    for &row in &rows {
        for &col in &cols {
            let pattern = (row * 3 + row / 3 + col) % 9;
            grid.push(digits[pattern]);
        }
    }
    grid
}

/// Whether every row, column and box of `grid` holds 1 through 9.
pub fn is_valid_solution(grid: &[u8]) -> bool {
    let unit_ok = |cells: [usize; 9]| {
        let mut seen = [false; 10];
        cells.iter().all(|&cell| {
            let digit = grid[cell] as usize;
            (1..=9).contains(&digit) && !std::mem::replace(&mut seen[digit], true)
        })
    };
    grid.len() == CELLS
        && (0..9).all(|row| unit_ok(std::array::from_fn(|col| row * 9 + col)))
        && (0..9).all(|col| unit_ok(std::array::from_fn(|row| row * 9 + col)))
        && (0..9).all(|block| {
            let (top, left) = (block / 3 * 3, block % 3 * 3);
            unit_ok(std::array::from_fn(|i| (top + i / 3) * 9 + left + i % 3))
        })
}

impl SudokuState {
    fn deal(rng: &mut GameRng) -> Self {
        let solution = solved_grid(rng);
        let mut cells: Vec<usize> = (0..CELLS).collect();
        rng.shuffle(&mut cells);
        let mut puzzle = solution.clone();
        for &cell in cells.iter().take(BLANKS) {
            puzzle[cell] = 0;
        }
        Self {
            entries: puzzle.clone(),
            puzzle,
            solution,
            selected: None,
            mistakes: 0,
            is_complete: false,
        }
    }

    fn is_over(&self) -> bool {
        self.is_complete || self.mistakes >= MAX_MISTAKES
    }

    /// Selects a blank cell for entry.
    pub fn select(&mut self, cell: usize) {
        if cell < CELLS && !self.is_over() {
            self.selected = Some(cell);
        }
    }

    /// Enters `digit` in the selected cell.
    pub fn enter(&mut self, digit: u8) -> EntryOutcome {
        let Some(cell) = self.selected else {
            return EntryOutcome::Ignored;
        };
        if self.is_over() || !(1..=9).contains(&digit) || self.entries[cell] != 0 {
            return EntryOutcome::Ignored;
        }
        if self.solution[cell] != digit {
            self.mistakes += 1;
            return if self.mistakes >= MAX_MISTAKES {
                EntryOutcome::Failed
            } else {
                EntryOutcome::Wrong
            };
        }
        self.entries[cell] = digit;
        if self.entries == self.solution {
            self.is_complete = true;
            self.selected = None;
            EntryOutcome::Solved
        } else {
            EntryOutcome::Correct
        }
    }
}

impl GameState for SudokuState {
    const GAME: GameId = GameId::Sudoku;

    fn new_game(rng: &mut GameRng) -> Self {
        Self::deal(rng)
    }

    fn status_line(&self) -> String {
        if self.is_complete {
            "Solved!".to_string()
        } else if self.mistakes >= MAX_MISTAKES {
            "Too many mistakes.".to_string()
        } else {
            let blanks = self.entries.iter().filter(|digit| **digit == 0).count();
            format!("{blanks} left | mistakes {}/{}", self.mistakes, MAX_MISTAKES)
        }
    }

    fn is_well_formed(&self) -> bool {
        [&self.puzzle, &self.solution, &self.entries]
            .iter()
            .all(|grid| grid.len() == CELLS)
            && self.selected.map_or(true, |cell| cell < CELLS)
    }
}

/// Mounts the sudoku surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<SudokuState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);

    let on_digit = move |digit: u8| {
        let cue = match slot.update(|state| state.enter(digit)) {
            Some(EntryOutcome::Correct) => SoundCue::Click,
            Some(EntryOutcome::Solved) => SoundCue::Success,
            Some(EntryOutcome::Wrong | EntryOutcome::Failed) => SoundCue::Fail,
            Some(EntryOutcome::Ignored) | None => return,
        };
        services.with_value(|services| services.play(cue));
    };

    view! {
        <GameFrame game="sudoku" status=slot.status() on_new_game=move |_| slot.reset()>
            <div class="sudoku-grid">
                {move || {
                    let Some(state) = slot.state().get() else {
                        return ().into_view();
                    };
                    state
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(cell, digit)| {
                            let given = state.puzzle[cell] != 0;
                            let selected = state.selected == Some(cell);
                            let label = if *digit == 0 { String::new() } else { digit.to_string() };
                            view! {
                                <button
                                    type="button"
                                    class="sudoku-cell no-drag"
                                    data-given=given
                                    data-selected=selected
                                    on:click=move |_| {
                                        slot.update(|state| state.select(cell));
                                    }
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="sudoku-pad">
                {(1..=9u8)
                    .map(|digit| {
                        view! {
                            <button type="button" class="no-drag" on:click=move |_| on_digit(digit)>
                                {digit.to_string()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </GameFrame>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generated_grids_are_valid_solutions() {
        for seed in 0..16 {
            assert!(is_valid_solution(&solved_grid(&mut GameRng::new(seed))));
        }
        let mut broken = solved_grid(&mut GameRng::new(0));
        broken.swap(0, 1);
        assert!(!is_valid_solution(&broken));
    }

    #[test]
    fn deal_blanks_a_fixed_number_of_cells() {
        let state = SudokuState::new_game(&mut GameRng::new(5));
        assert_eq!(state.puzzle.iter().filter(|d| **d == 0).count(), BLANKS);
        assert_eq!(state.entries, state.puzzle);
    }

    #[test]
    fn entries_are_checked_against_the_solution() {
        let mut state = SudokuState::new_game(&mut GameRng::new(6));
        let blank = state.puzzle.iter().position(|d| *d == 0).expect("blank");
        let given = state.puzzle.iter().position(|d| *d != 0).expect("given");

        state.select(given);
        assert_eq!(state.enter(state.solution[given]), EntryOutcome::Ignored);

        state.select(blank);
        let wrong = state.solution[blank] % 9 + 1;
        assert_eq!(state.enter(wrong), EntryOutcome::Wrong);
        assert_eq!(state.enter(state.solution[blank]), EntryOutcome::Correct);
        assert_eq!(state.mistakes, 1);
    }

    #[test]
    fn third_mistake_fails_and_last_blank_solves() {
        let mut state = SudokuState::new_game(&mut GameRng::new(7));
        let blank = state.puzzle.iter().position(|d| *d == 0).expect("blank");
        state.select(blank);
        let wrong = state.solution[blank] % 9 + 1;
        state.enter(wrong);
        state.enter(wrong);
        assert_eq!(state.enter(wrong), EntryOutcome::Failed);
        assert_eq!(state.enter(state.solution[blank]), EntryOutcome::Ignored);

        let mut solving = SudokuState::new_game(&mut GameRng::new(8));
        let blanks: Vec<usize> = (0..CELLS).filter(|&c| solving.puzzle[c] == 0).collect();
        let mut last = EntryOutcome::Ignored;
        for cell in blanks {
            solving.select(cell);
            last = solving.enter(solving.solution[cell]);
        }
        assert_eq!(last, EntryOutcome::Solved);
        assert!(solving.is_complete);
    }
}
