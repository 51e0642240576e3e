//! Whack-a-mole: thirty seconds, nine holes, one mole at a time.
//!
//! Two timers drive a round: a one-second countdown and a self-rescheduling mole timer. Both
//! are released as soon as the round ends, so nothing keeps ticking between rounds.

use std::time::Duration;

use arcade_game_contract::{
    GameId, GameMountContext, GameServices, ScopedInterval, ScopedTimeout, TimerSlot,
};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Holes in the lawn.
pub const HOLES: usize = 9;
/// Round length in seconds.
pub const ROUND_SECONDS: u32 = 30;
/// Points per hit.
pub const HIT_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Mole pacing.
pub enum Difficulty {
    /// Slower spawns, longer stays.
    #[default]
    Easy,
    /// Faster spawns, shorter stays.
    Hard,
}

impl Difficulty {
    /// Delay before the next mole, randomized per spawn.
    pub fn spawn_delay(self, rng: &mut GameRng) -> Duration {
        let spread = match self {
            Self::Easy => 1_000,
            Self::Hard => 600,
        };
        Duration::from_millis(500 + u64::from(rng.range_u32(0..spread)))
    }

    /// How long a mole stays up.
    pub const fn stay(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(800),
            Self::Hard => Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Round state and best score.
pub struct WhackAMoleState {
    /// Points this round.
    pub score: u32,
    /// Seconds remaining.
    pub time_left: u32,
    /// Hole with a mole up.
    pub active_mole: Option<usize>,
    /// Round is running.
    pub is_playing: bool,
    /// Mole pacing.
    pub difficulty: Difficulty,
    /// Best score across rounds.
    pub high_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of one countdown tick.
pub enum ClockTick {
    /// No round is running.
    Idle,
    /// Time remains.
    Continue,
    /// Time ran out; the round is over.
    Finished,
}

impl WhackAMoleState {
    /// Starts a round, keeping the best score and pacing.
    pub fn start(&mut self) {
        self.score = 0;
        self.time_left = ROUND_SECONDS;
        self.active_mole = None;
        self.is_playing = true;
    }

    /// Ends the round early without touching the score.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.active_mole = None;
    }

    /// Changes pacing between rounds.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.is_playing {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Counts one second down.
    pub fn tick_clock(&mut self) -> ClockTick {
        if !self.is_playing {
            return ClockTick::Idle;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return ClockTick::Continue;
        }
        self.stop();
        self.high_score = self.high_score.max(self.score);
        ClockTick::Finished
    }

    /// Raises a mole in `hole`.
    pub fn pop(&mut self, hole: usize) -> bool {
        if !self.is_playing || hole >= HOLES {
            return false;
        }
        self.active_mole = Some(hole);
        true
    }

    /// Lowers the mole in `hole` if it is still up.
    pub fn hide(&mut self, hole: usize) {
        if self.active_mole == Some(hole) {
            self.active_mole = None;
        }
    }

    /// Hits `hole`. Scores only when the mole is up there.
    pub fn whack(&mut self, hole: usize) -> bool {
        if !self.is_playing || self.active_mole != Some(hole) {
            return false;
        }
        self.score += HIT_POINTS;
        self.active_mole = None;
        true
    }
}

impl GameState for WhackAMoleState {
    const GAME: GameId = GameId::WhackAMole;

    fn new_game(_rng: &mut GameRng) -> Self {
        Self {
            score: 0,
            time_left: ROUND_SECONDS,
            active_mole: None,
            is_playing: false,
            difficulty: Difficulty::Easy,
            high_score: 0,
        }
    }

    fn status_line(&self) -> String {
        format!(
            "Score {} | {}s | best {}",
            self.score, self.time_left, self.high_score
        )
    }

    fn is_well_formed(&self) -> bool {
        self.active_mole.map_or(true, |hole| hole < HOLES)
    }
}

#[derive(Clone, Copy)]
struct RoundTimers {
    clock: TimerSlot<ScopedInterval>,
    spawn: TimerSlot<ScopedTimeout>,
    hide: TimerSlot<ScopedTimeout>,
}

impl RoundTimers {
    fn clear(self) {
        self.clock.clear();
        self.spawn.clear();
        self.hide.clear();
    }
}

fn schedule_mole(
    slot: TypedSlot<WhackAMoleState>,
    rng: StoredValue<GameRng>,
    timers: RoundTimers,
    services: StoredValue<GameServices>,
) {
    let Some(state) = slot.current().filter(|state| state.is_playing) else {
        return;
    };
    let Some(delay) = rng.try_update_value(|rng| state.difficulty.spawn_delay(rng)) else {
        return;
    };
    let stay = state.difficulty.stay();

    let fire = move || {
        let Some(hole) = rng.try_update_value(|rng| rng.index(HOLES)) else {
            return;
        };
        if slot.update(|state| state.pop(hole)) != Some(true) {
            return;
        }
        services.with_value(|services| services.play(SoundCue::Pop));
        match ScopedTimeout::start(stay, move || {
            slot.update(|state| state.hide(hole));
        }) {
            Ok(timeout) => timers.hide.replace(timeout),
            Err(err) => logging::warn!("mole hide timer unavailable: {err}"),
        }
        schedule_mole(slot, rng, timers, services);
    };
    match ScopedTimeout::start(delay, fire) {
        Ok(timeout) => timers.spawn.replace(timeout),
        Err(err) => logging::warn!("mole spawn timer unavailable: {err}"),
    }
}

/// Mounts the whack-a-mole surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<WhackAMoleState>::new(context.slot);
    slot.ensure();
    // Timers do not survive an unmount, so neither does a running round.
    slot.update(WhackAMoleState::stop);
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());
    let timers = RoundTimers {
        clock: TimerSlot::new(),
        spawn: TimerSlot::new(),
        hide: TimerSlot::new(),
    };

    let start = move || {
        slot.update(WhackAMoleState::start);
        let countdown = ScopedInterval::start(Duration::from_secs(1), move || {
            match slot.update(WhackAMoleState::tick_clock) {
                Some(ClockTick::Finished) => {
                    timers.clear();
                    services.with_value(|services| services.play(SoundCue::Success));
                }
                Some(ClockTick::Idle) | None => timers.clear(),
                Some(ClockTick::Continue) => {}
            }
        });
        match countdown {
            Ok(interval) => timers.clock.replace(interval),
            Err(err) => {
                logging::warn!("whack-a-mole countdown unavailable: {err}");
                slot.update(WhackAMoleState::stop);
                return;
            }
        }
        schedule_mole(slot, rng, timers, services);
    };

    let on_hole = move |hole: usize| {
        let hit = slot.update(|state| state.whack(hole)) == Some(true);
        if hit {
            timers.hide.clear();
            services.with_value(|services| services.play(SoundCue::Success));
        } else if slot.current().is_some_and(|state| state.is_playing) {
            services.with_value(|services| services.play(SoundCue::Click));
        }
    };

    let on_difficulty = move |difficulty: Difficulty| {
        slot.update(|state| state.set_difficulty(difficulty));
    };

    let on_new_game = move |_: ()| {
        timers.clear();
        slot.update(WhackAMoleState::stop);
        start();
    };

    let playing = move || slot.state().get().is_some_and(|state| state.is_playing);

    view! {
        <GameFrame game="whack-a-mole" status=slot.status() on_new_game>
            <div class="mole-difficulty">
                <button type="button" class="no-drag" disabled=playing on:click=move |_| on_difficulty(Difficulty::Easy)>"Easy"</button>
                <button type="button" class="no-drag" disabled=playing on:click=move |_| on_difficulty(Difficulty::Hard)>"Hard"</button>
            </div>
            <div class="mole-lawn">
                {move || {
                    let active = slot.state().get().and_then(|state| state.active_mole);
                    (0..HOLES)
                        .map(|hole| {
                            let up = active == Some(hole);
                            view! {
                                <button type="button" class="mole-hole no-drag" data-up=up on:click=move |_| on_hole(hole)>
                                    {if up { "🐹" } else { "" }}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || !playing() fallback=|| ()>
                <button type="button" class="mole-start no-drag" on:click=move |_| start()>
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

    fn playing() -> WhackAMoleState {
        let mut state = WhackAMoleState::new_game(&mut GameRng::new(0));
        state.start();
        state
    }

    #[test]
    fn initial_round_waits_for_start() {
        let state = WhackAMoleState::new_game(&mut GameRng::new(0));
        assert_eq!(state.time_left, 30);
        assert!(!state.is_playing);
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(
            serde_json::to_value(&state).expect("encode")["activeMole"],
            serde_json::Value::Null
        );
    }

    #[test]
    fn hits_score_only_on_the_active_mole() {
        let mut state = playing();
        assert!(state.pop(4));
        assert!(!state.whack(3));
        assert!(state.whack(4));
        assert!(!state.whack(4));
        assert_eq!(state.score, HIT_POINTS);
    }

    #[test]
    fn countdown_ends_the_round_and_records_best() {
        let mut state = playing();
        state.score = 70;
        for _ in 0..ROUND_SECONDS - 1 {
            assert_eq!(state.tick_clock(), ClockTick::Continue);
        }
        state.pop(2);
        assert_eq!(state.tick_clock(), ClockTick::Finished);
        assert!(!state.is_playing);
        assert_eq!(state.active_mole, None);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.tick_clock(), ClockTick::Idle);
        assert!(!state.pop(1));

        state.start();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 70);
    }

    #[test]
    fn pacing_follows_difficulty() {
        let mut rng = GameRng::new(9);
        for _ in 0..50 {
            let easy = Difficulty::Easy.spawn_delay(&mut rng).as_millis();
            let hard = Difficulty::Hard.spawn_delay(&mut rng).as_millis();
            assert!((500..1_500).contains(&easy));
            assert!((500..1_100).contains(&hard));
        }
        assert_eq!(Difficulty::Easy.stay(), Duration::from_millis(800));
        assert_eq!(Difficulty::Hard.stay(), Duration::from_millis(500));
    }

    #[test]
    fn difficulty_is_locked_during_a_round() {
        let mut state = playing();
        assert!(!state.set_difficulty(Difficulty::Hard));
        state.stop();
        assert!(state.set_difficulty(Difficulty::Hard));
        assert_eq!(state.difficulty, Difficulty::Hard);
    }
}
