//! Stable game identifiers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One of the eleven games shipped with the arcade. Each id owns exactly one state slot.
pub enum GameId {
    /// Farming sim.
    Farming,
    /// 2048 sliding tiles.
    #[serde(rename = "2048")]
    Game2048,
    /// Minesweeper.
    Minesweeper,
    /// Memory match.
    Memory,
    /// Three-of-a-kind tile match.
    TileMatch,
    /// Tic-tac-toe against the computer.
    TicTacToe,
    /// Snake.
    Snake,
    /// Tetris.
    Tetris,
    /// Sudoku.
    Sudoku,
    /// Whack-a-mole.
    WhackAMole,
    /// AI text adventure.
    TextAdventure,
}

impl GameId {
    /// Every game in menu order.
    pub const ALL: [GameId; 11] = [
        Self::Farming,
        Self::Game2048,
        Self::Minesweeper,
        Self::Memory,
        Self::TileMatch,
        Self::TicTacToe,
        Self::Snake,
        Self::Tetris,
        Self::Sudoku,
        Self::WhackAMole,
        Self::TextAdventure,
    ];

    /// Menu title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Farming => "Happy Farm",
            Self::Game2048 => "2048",
            Self::Minesweeper => "Minesweeper",
            Self::Memory => "Memory Match",
            Self::TileMatch => "Tile Match",
            Self::TicTacToe => "Tic-Tac-Toe",
            Self::Snake => "Snake",
            Self::Tetris => "Tetris",
            Self::Sudoku => "Sudoku",
            Self::WhackAMole => "Whack-a-Mole",
            Self::TextAdventure => "AI Adventure",
        }
    }

    /// Menu glyph.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Farming => "🌱",
            Self::Game2048 => "🔢",
            Self::Minesweeper => "💣",
            Self::Memory => "🃏",
            Self::TileMatch => "🀄",
            Self::TicTacToe => "⭕",
            Self::Snake => "🐍",
            Self::Tetris => "🧱",
            Self::Sudoku => "🧩",
            Self::WhackAMole => "🔨",
            Self::TextAdventure => "📜",
        }
    }

    /// Field name of this game's slot in the persisted snapshot.
    pub const fn snapshot_field(self) -> &'static str {
        match self {
            Self::Farming => "farming",
            Self::Game2048 => "game2048State",
            Self::Minesweeper => "minesweeperState",
            Self::Memory => "memoryState",
            Self::TileMatch => "tileMatchState",
            Self::TicTacToe => "ticTacToeState",
            Self::Snake => "snakeState",
            Self::Tetris => "tetrisState",
            Self::Sudoku => "sudokuState",
            Self::WhackAMole => "whackAMoleState",
            Self::TextAdventure => "textAdventureState",
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn all_lists_each_game_once_with_unique_snapshot_fields() {
        let ids: BTreeSet<GameId> = GameId::ALL.into_iter().collect();
        assert_eq!(ids.len(), 11);

        let fields: BTreeSet<&str> = GameId::ALL.iter().map(|id| id.snapshot_field()).collect();
        assert_eq!(fields.len(), 11);
    }

    #[test]
    fn ids_serialize_as_stable_tokens() {
        assert_eq!(
            serde_json::to_string(&GameId::Game2048).expect("serialize"),
            "\"2048\""
        );
        assert_eq!(
            serde_json::to_string(&GameId::WhackAMole).expect("serialize"),
            "\"whack-a-mole\""
        );
    }
}
