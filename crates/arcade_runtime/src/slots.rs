//! Per-game state slots.
//!
//! One slot per [`GameId`], empty until the game writes its first state. The registry stores the
//! [`GameSlot`] union without interpreting it; typed access goes through [`SlotState`].

use std::collections::BTreeMap;

use arcade_game_contract::GameId;
use arcade_games::{GameSlot, SlotState};

#[derive(Debug, Clone, Default, PartialEq)]
/// Slot registry keyed by game.
pub struct GameSlots {
    slots: BTreeMap<GameId, GameSlot>,
}

impl GameSlots {
    /// Typed state for `T`'s game, if the slot has been written.
    pub fn get<T: SlotState>(&self) -> Option<&T> {
        self.slots.get(&T::GAME).and_then(T::from_slot)
    }

    /// Replaces `T`'s slot.
    pub fn set<T: SlotState>(&mut self, state: T) {
        self.slots.insert(T::GAME, state.into_slot());
    }

    /// Applies `f` to `T`'s slot in place. Returns `None` while the slot is empty.
    pub fn update<T: SlotState, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut state = self.get::<T>()?.clone();
        let result = f(&mut state);
        self.set(state);
        Some(result)
    }

    /// Raw slot for `game`.
    pub fn slot(&self, game: GameId) -> Option<&GameSlot> {
        self.slots.get(&game)
    }

    /// Stores `slot` under its own game. Returns whether the stored value changed.
    pub fn store(&mut self, slot: GameSlot) -> bool {
        let game = slot.game();
        if self.slots.get(&game) == Some(&slot) {
            return false;
        }
        self.slots.insert(game, slot);
        true
    }

    /// Written slots in [`GameId`] order.
    pub fn iter(&self) -> impl Iterator<Item = (GameId, &GameSlot)> {
        self.slots.iter().map(|(game, slot)| (*game, slot))
    }

    /// Number of written slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no game has written state yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use arcade_games::{
        game2048::Game2048State, tic_tac_toe::TicTacToeState, GameRng, GameState,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slots_start_empty_and_never_invent_defaults() {
        let slots = GameSlots::default();
        assert!(slots.is_empty());
        for game in GameId::ALL {
            assert_eq!(slots.slot(game), None);
        }
        assert_eq!(slots.get::<Game2048State>(), None);
    }

    #[test]
    fn typed_access_is_isolated_per_game() {
        let mut rng = GameRng::new(3);
        let mut slots = GameSlots::default();
        let board = Game2048State::new_game(&mut rng);
        slots.set(board.clone());

        assert_eq!(slots.get::<Game2048State>(), Some(&board));
        assert_eq!(slots.get::<TicTacToeState>(), None);
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn update_touches_only_written_slots() {
        let mut rng = GameRng::new(4);
        let mut slots = GameSlots::default();
        assert_eq!(slots.update::<Game2048State, _>(|state| state.score = 9), None);

        slots.set(Game2048State::new_game(&mut rng));
        slots.update::<Game2048State, _>(|state| state.score = 9);
        assert_eq!(slots.get::<Game2048State>().map(|s| s.score), Some(9));
    }

    #[test]
    fn storing_an_identical_slot_reports_no_change() {
        let mut rng = GameRng::new(5);
        let slot = GameSlot::new_game(GameId::Sudoku, &mut rng);
        let mut slots = GameSlots::default();
        assert!(slots.store(slot.clone()));
        assert!(!slots.store(slot.clone()));
        assert_eq!(slots.slot(GameId::Sudoku), Some(&slot));
    }
}
