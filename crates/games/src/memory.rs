//! Memory match: flip two cards at a time and find every pair.

use std::time::Duration;

use arcade_game_contract::{GameId, GameMountContext, ScopedTimeout, TimerSlot};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

const ICONS: [&str; 8] = ["🍎", "🐱", "🚀", "🎲", "🌙", "🎸", "🍀", "⚽"];
/// Time a mismatched pair stays face up.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One card on the table.
pub struct MemoryCard {
    /// Stable card id.
    pub id: u32,
    /// Face glyph; two cards share each glyph.
    pub icon: String,
    /// Card is face up.
    pub is_flipped: bool,
    /// Card belongs to a found pair.
    pub is_matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Table and counters.
pub struct MemoryState {
    /// Shuffled deck.
    pub cards: Vec<MemoryCard>,
    /// Indices of unmatched face-up cards, at most two.
    pub flipped_cards: Vec<usize>,
    /// Pairs found.
    pub matches: u32,
    /// Pairs turned over.
    pub moves: u32,
    /// Deck has been dealt.
    pub is_generated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of flipping one card.
pub enum FlipOutcome {
    /// Card could not be flipped right now.
    Ignored,
    /// First card of a pair.
    Revealed,
    /// Second card matched the first.
    Matched,
    /// Last pair found.
    Completed,
    /// Second card differs; call [`MemoryState::hide_mismatch`] after a delay.
    Mismatched,
}

impl MemoryState {
    fn deal(rng: &mut GameRng) -> Self {
        let mut icons: Vec<&str> = ICONS.iter().chain(ICONS.iter()).copied().collect();
        rng.shuffle(&mut icons);
        let cards = icons
            .into_iter()
            .enumerate()
            .map(|(id, icon)| MemoryCard {
                id: id as u32,
                icon: icon.to_string(),
                is_flipped: false,
                is_matched: false,
            })
            .collect();
        Self {
            cards,
            flipped_cards: Vec::new(),
            matches: 0,
            moves: 0,
            is_generated: true,
        }
    }

    /// Flips the card at `index`.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.flipped_cards.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if !card.is_flipped && !card.is_matched => {}
            _ => return FlipOutcome::Ignored,
        }
        self.cards[index].is_flipped = true;
        self.flipped_cards.push(index);

        let [first, second] = self.flipped_cards[..] else {
            return FlipOutcome::Revealed;
        };
        self.moves += 1;
        if self.cards[first].icon != self.cards[second].icon {
            return FlipOutcome::Mismatched;
        }
        self.cards[first].is_matched = true;
        self.cards[second].is_matched = true;
        self.flipped_cards.clear();
        self.matches += 1;
        if self.is_complete() {
            FlipOutcome::Completed
        } else {
            FlipOutcome::Matched
        }
    }

    /// Turns a mismatched pair face down again.
    pub fn hide_mismatch(&mut self) {
        for index in std::mem::take(&mut self.flipped_cards) {
            if let Some(card) = self.cards.get_mut(index) {
                card.is_flipped = false;
            }
        }
    }

    /// Every pair has been found.
    pub fn is_complete(&self) -> bool {
        self.matches as usize == ICONS.len()
    }
}

impl GameState for MemoryState {
    const GAME: GameId = GameId::Memory;

    fn new_game(rng: &mut GameRng) -> Self {
        Self::deal(rng)
    }

    fn status_line(&self) -> String {
        if self.is_complete() {
            format!("All pairs in {} moves!", self.moves)
        } else {
            format!("Pairs {}/{} | moves {}", self.matches, ICONS.len(), self.moves)
        }
    }

    fn is_well_formed(&self) -> bool {
        self.flipped_cards.len() <= 2
            && self.flipped_cards.iter().all(|&index| index < self.cards.len())
    }
}

/// Mounts the memory surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<MemoryState>::new(context.slot);
    slot.ensure();
    // A pair left face up by an unmount would otherwise block the table.
    slot.update(|state| {
        if state.flipped_cards.len() >= 2 {
            state.hide_mismatch();
        }
    });
    let services = store_value(context.services);
    let hide_timer = TimerSlot::<ScopedTimeout>::new();

    let on_card = move |index: usize| {
        let Some(outcome) = slot.update(|state| state.flip(index)) else {
            return;
        };
        let cue = match outcome {
            FlipOutcome::Ignored => return,
            FlipOutcome::Revealed => SoundCue::Click,
            FlipOutcome::Matched => SoundCue::Pop,
            FlipOutcome::Completed => SoundCue::Success,
            FlipOutcome::Mismatched => {
                match ScopedTimeout::start(MISMATCH_DELAY, move || {
                    slot.update(MemoryState::hide_mismatch);
                }) {
                    Ok(timeout) => hide_timer.replace(timeout),
                    Err(err) => {
                        logging::warn!("memory hide timer unavailable: {err}");
                        slot.update(MemoryState::hide_mismatch);
                    }
                }
                SoundCue::Fail
            }
        };
        services.with_value(|services| services.play(cue));
    };

    let on_new_game = move |_: ()| {
        hide_timer.clear();
        slot.reset();
    };

    view! {
        <GameFrame game="memory" status=slot.status() on_new_game>
            <div class="memory-grid">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.cards)
                        .unwrap_or_default()
                        .into_iter()
                        .enumerate()
                        .map(|(index, card)| {
                            let face_up = card.is_flipped || card.is_matched;
                            view! {
                                <button
                                    type="button"
                                    class="memory-card no-drag"
                                    data-face-up=face_up
                                    data-matched=card.is_matched
                                    on:click=move |_| on_card(index)
                                >
                                    {if face_up { card.icon.clone() } else { "?".to_string() }}
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

    fn pair_of(state: &MemoryState, index: usize) -> usize {
        (0..state.cards.len())
            .find(|&other| other != index && state.cards[other].icon == state.cards[index].icon)
            .expect("every icon appears twice")
    }

    fn non_pair_of(state: &MemoryState, index: usize) -> usize {
        (0..state.cards.len())
            .find(|&other| state.cards[other].icon != state.cards[index].icon)
            .expect("deck has several icons")
    }

    #[test]
    fn dealt_deck_holds_each_icon_twice() {
        let state = MemoryState::new_game(&mut GameRng::new(8));
        assert_eq!(state.cards.len(), 16);
        for icon in ICONS {
            assert_eq!(state.cards.iter().filter(|card| card.icon == icon).count(), 2);
        }
    }

    #[test]
    fn mismatch_blocks_further_flips_until_hidden() {
        let mut state = MemoryState::new_game(&mut GameRng::new(4));
        let other = non_pair_of(&state, 0);
        assert_eq!(state.flip(0), FlipOutcome::Revealed);
        assert_eq!(state.flip(0), FlipOutcome::Ignored);
        assert_eq!(state.flip(other), FlipOutcome::Mismatched);
        assert_eq!(state.moves, 1);

        let third = (0..16).find(|i| *i != 0 && *i != other).expect("third card");
        assert_eq!(state.flip(third), FlipOutcome::Ignored);

        state.hide_mismatch();
        assert!(state.flipped_cards.is_empty());
        assert!(!state.cards[0].is_flipped && !state.cards[other].is_flipped);
    }

    #[test]
    fn finding_every_pair_completes_the_game() {
        let mut state = MemoryState::new_game(&mut GameRng::new(6));
        let mut last = FlipOutcome::Ignored;
        for index in 0..state.cards.len() {
            if state.cards[index].is_matched {
                continue;
            }
            let partner = pair_of(&state, index);
            state.flip(index);
            last = state.flip(partner);
        }
        assert_eq!(last, FlipOutcome::Completed);
        assert_eq!(state.matches, 8);
        assert_eq!(state.moves, 8);
    }
}
