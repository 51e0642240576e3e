//! Typed game states, initializers and surfaces for the arcade.
//!
//! Every game owns one state type implementing [`GameState`]. The runtime stores them in a
//! [`GameSlot`] tagged union and never looks inside; a mounted game reaches its own state through
//! a [`TypedSlot`], which also performs the one-time lazy initialization on first visit.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod farming;
pub mod game2048;
pub mod memory;
pub mod minesweeper;
mod rng;
pub mod snake;
pub mod sudoku;
mod surface;
pub mod tetris;
pub mod text_adventure;
pub mod tic_tac_toe;
pub mod tile_match;
pub mod whack_a_mole;

use arcade_game_contract::{GameId, GameModule, SlotHandle};
use leptos::{Signal, SignalGet};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use rng::GameRng;

/// State owned by one game.
pub trait GameState: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Game this state belongs to.
    const GAME: GameId;

    /// Fresh state for a new round.
    fn new_game(rng: &mut GameRng) -> Self;

    /// One-line summary shown in the game toolbar.
    fn status_line(&self) -> String;

    /// Whether the state has the board shape and in-range indices the game logic relies on.
    /// Decoded saves are checked with this before they reach a slot.
    fn is_well_formed(&self) -> bool {
        true
    }
}

/// Conversion between a game state and its [`GameSlot`] variant.
pub trait SlotState: GameState {
    /// Borrows the state when `slot` holds this game.
    fn from_slot(slot: &GameSlot) -> Option<&Self>;

    /// Wraps the state in its slot variant.
    fn into_slot(self) -> GameSlot;
}

macro_rules! game_slots {
    ($($variant:ident($state:ty)),+ $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        /// Tagged union over every game's state. Variant names match [`GameId`].
        pub enum GameSlot {
            $(
                #[allow(missing_docs)]
                $variant($state),
            )+
        }

        impl GameSlot {
            /// Game whose state this slot holds.
            pub fn game(&self) -> GameId {
                match self {
                    $(Self::$variant(_) => GameId::$variant,)+
                }
            }

            /// Serializes the inner state for the persisted snapshot.
            ///
            /// # Errors
            ///
            /// Returns an error when the state cannot be represented as JSON.
            pub fn to_json(&self) -> Result<Value, serde_json::Error> {
                match self {
                    $(Self::$variant(state) => serde_json::to_value(state),)+
                }
            }

            /// Decodes a persisted state for `game`.
            ///
            /// # Errors
            ///
            /// Returns an error when `value` does not match the game's state shape, including boards
            /// with the wrong dimensions or out-of-range indices.
            pub fn from_json(game: GameId, value: Value) -> Result<Self, serde_json::Error> {
                match game {
                    $(GameId::$variant => {
                        let state = serde_json::from_value::<$state>(value)?;
                        if !state.is_well_formed() {
                            return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                                "{} state is malformed",
                                game.title()
                            )));
                        }
                        Ok(Self::$variant(state))
                    })+
                }
            }

            /// Fresh state for `game`.
            pub fn new_game(game: GameId, rng: &mut GameRng) -> Self {
                match game {
                    $(GameId::$variant => Self::$variant(<$state as GameState>::new_game(rng)),)+
                }
            }

            /// Toolbar summary of the inner state.
            pub fn status_line(&self) -> String {
                match self {
                    $(Self::$variant(state) => state.status_line(),)+
                }
            }
        }

        $(
            impl SlotState for $state {
                fn from_slot(slot: &GameSlot) -> Option<&Self> {
                    match slot {
                        GameSlot::$variant(state) => Some(state),
                        _ => None,
                    }
                }

                fn into_slot(self) -> GameSlot {
                    GameSlot::$variant(self)
                }
            }
        )+
    };
}

game_slots! {
    Farming(farming::FarmingState),
    Game2048(game2048::Game2048State),
    Minesweeper(minesweeper::MinesweeperState),
    Memory(memory::MemoryState),
    TileMatch(tile_match::TileMatchState),
    TicTacToe(tic_tac_toe::TicTacToeState),
    Snake(snake::SnakeState),
    Tetris(tetris::TetrisState),
    Sudoku(sudoku::SudokuState),
    WhackAMole(whack_a_mole::WhackAMoleState),
    TextAdventure(text_adventure::TextAdventureState),
}

/// Returns a new state when the slot is still empty, `None` when it already holds one.
pub fn initialize_if_absent<T: SlotState>(
    current: Option<&GameSlot>,
    rng: &mut GameRng,
) -> Option<T> {
    match current.and_then(T::from_slot) {
        Some(_) => None,
        None => Some(T::new_game(rng)),
    }
}

/// Typed view over a mounted game's [`SlotHandle`].
///
/// [`TypedSlot::current`], [`TypedSlot::write`] and [`TypedSlot::update`] go through the handle
/// alone, so they keep working after the view that built this wrapper is disposed as long as the
/// handle itself is still alive.
pub struct TypedSlot<T: 'static> {
    handle: SlotHandle<GameSlot>,
    state: Signal<Option<T>>,
}

impl<T: 'static> Clone for TypedSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for TypedSlot<T> {}

impl<T: SlotState> TypedSlot<T> {
    /// Wraps the runtime slot handle.
    pub fn new(handle: SlotHandle<GameSlot>) -> Self {
        let state = Signal::derive(move || {
            handle
                .state()
                .get()
                .and_then(|slot| T::from_slot(&slot).cloned())
        });
        Self { handle, state }
    }

    /// Reactive typed state.
    pub fn state(&self) -> Signal<Option<T>> {
        self.state
    }

    /// Toolbar summary, empty until the slot is initialized.
    pub fn status(&self) -> Signal<String> {
        let state = self.state;
        Signal::derive(move || {
            state
                .get()
                .map(|state| state.status_line())
                .unwrap_or_default()
        })
    }

    /// Current typed state, read through the runtime-owned handle.
    pub fn current(&self) -> Option<T> {
        self.handle
            .current()
            .and_then(|slot| T::from_slot(&slot).cloned())
    }

    /// Writes a full replacement state.
    pub fn write(&self, next: T) {
        self.handle.write(next.into_slot());
    }

    /// Initializes the slot on first visit. Later calls leave it untouched.
    pub fn ensure(&self) {
        let current = self.handle.current();
        if let Some(initial) =
            initialize_if_absent::<T>(current.as_ref(), &mut GameRng::from_entropy())
        {
            self.write(initial);
        }
    }

    /// Starts a new round, replacing whatever the slot held.
    pub fn reset(&self) {
        self.write(T::new_game(&mut GameRng::from_entropy()));
    }

    /// Applies `f` to a copy of the current state and writes it back when it changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut next = self.current()?;
        let before = next.clone();
        let result = f(&mut next);
        if next != before {
            self.write(next);
        }
        Some(result)
    }
}

/// Returns the mountable module for `game`.
pub fn game_module(game: GameId) -> GameModule<GameSlot> {
    match game {
        GameId::Farming => GameModule::new(farming::mount),
        GameId::Game2048 => GameModule::new(game2048::mount),
        GameId::Minesweeper => GameModule::new(minesweeper::mount),
        GameId::Memory => GameModule::new(memory::mount),
        GameId::TileMatch => GameModule::new(tile_match::mount),
        GameId::TicTacToe => GameModule::new(tic_tac_toe::mount),
        GameId::Snake => GameModule::new(snake::mount),
        GameId::Tetris => GameModule::new(tetris::mount),
        GameId::Sudoku => GameModule::new(sudoku::mount),
        GameId::WhackAMole => GameModule::new(whack_a_mole::mount),
        GameId::TextAdventure => GameModule::new(text_adventure::mount),
    }
}
