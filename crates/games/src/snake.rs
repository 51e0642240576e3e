//! Snake on a walled 12x12 field.

use std::time::Duration;

use arcade_game_contract::{GameId, GameMountContext, ScopedInterval, TimerSlot};
use leptos::*;
use platform_host::SoundCue;
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Field edge length.
pub const SIZE: u8 = 12;
const TICK: Duration = Duration::from_millis(160);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Heading of the snake.
pub enum Heading {
    /// Row decreasing.
    Up,
    /// Row increasing.
    Down,
    /// Column decreasing.
    Left,
    /// Column increasing.
    Right,
}

impl Heading {
    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" => Some(Self::Up),
            "ArrowDown" | "s" => Some(Self::Down),
            "ArrowLeft" | "a" => Some(Self::Left),
            "ArrowRight" | "d" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Field coordinate.
pub struct Point {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl Point {
    fn step(self, heading: Heading) -> Option<Self> {
        let (x, y) = match heading {
            Heading::Up => (Some(self.x), self.y.checked_sub(1)),
            Heading::Down => (Some(self.x), Some(self.y + 1)),
            Heading::Left => (self.x.checked_sub(1), Some(self.y)),
            Heading::Right => (Some(self.x + 1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) if x < SIZE && y < SIZE => Some(Self { x, y }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Snake body, food and score.
pub struct SnakeState {
    /// Body segments, head first.
    pub snake: Vec<Point>,
    /// Food location.
    pub food: Point,
    /// Current heading.
    pub heading: Heading,
    /// Heading applied on the next tick.
    pub queued_heading: Heading,
    /// Food eaten this round.
    pub score: u32,
    /// Best score across rounds.
    pub high_score: u32,
    /// Round is running.
    pub is_playing: bool,
    /// Snake crashed.
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of one tick.
pub enum StepOutcome {
    /// Round is not running.
    Idle,
    /// Snake moved.
    Moved,
    /// Snake ate and grew.
    Ate,
    /// Snake hit a wall or itself.
    Crashed,
}

impl SnakeState {
    fn fresh(high_score: u32, rng: &mut GameRng) -> Self {
        let mut state = Self {
            snake: vec![Point { x: 5, y: 6 }, Point { x: 4, y: 6 }, Point { x: 3, y: 6 }],
            food: Point { x: 0, y: 0 },
            heading: Heading::Right,
            queued_heading: Heading::Right,
            score: 0,
            high_score,
            is_playing: false,
            game_over: false,
        };
        state.place_food(rng);
        state
    }

    fn place_food(&mut self, rng: &mut GameRng) {
        let free: Vec<Point> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| Point { x, y }))
            .filter(|point| !self.snake.contains(point))
            .collect();
        if let Some(&food) = rng.choose(&free) {
            self.food = food;
        }
    }

    /// Starts (or restarts after a crash) a round, keeping the high score.
    pub fn start(&mut self, rng: &mut GameRng) {
        *self = Self::fresh(self.high_score, rng);
        self.is_playing = true;
    }

    /// Queues a turn. Reversing into the body is ignored.
    pub fn steer(&mut self, heading: Heading) {
        if heading != self.heading.opposite() {
            self.queued_heading = heading;
        }
    }

    /// Advances one tick.
    pub fn step(&mut self, rng: &mut GameRng) -> StepOutcome {
        if !self.is_playing {
            return StepOutcome::Idle;
        }
        self.heading = self.queued_heading;
        let head = self.snake[0].step(self.heading);
        let eats = head == Some(self.food);
        let body_end = if eats { self.snake.len() } else { self.snake.len() - 1 };
        let next = match head {
            Some(next) if !self.snake[..body_end].contains(&next) => next,
            _ => {
                self.is_playing = false;
                self.game_over = true;
                self.high_score = self.high_score.max(self.score);
                return StepOutcome::Crashed;
            }
        };

        self.snake.insert(0, next);
        if eats {
            self.score += 1;
            self.place_food(rng);
            StepOutcome::Ate
        } else {
            self.snake.pop();
            StepOutcome::Moved
        }
    }
}

impl GameState for SnakeState {
    const GAME: GameId = GameId::Snake;

    fn new_game(rng: &mut GameRng) -> Self {
        Self::fresh(0, rng)
    }

    fn status_line(&self) -> String {
        let prefix = if self.game_over { "Crashed! " } else { "" };
        format!("{prefix}Score {} | best {}", self.score, self.high_score)
    }

    fn is_well_formed(&self) -> bool {
        let on_field = |point: &Point| point.x < SIZE && point.y < SIZE;
        !self.snake.is_empty() && self.snake.iter().all(on_field) && on_field(&self.food)
    }
}

/// Mounts the snake surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<SnakeState>::new(context.slot);
    slot.ensure();
    // A round left running by an unmount resumes paused.
    slot.update(|state| state.is_playing = false);
    let services = store_value(context.services);
    let rng = store_value(GameRng::from_entropy());
    let clock = TimerSlot::<ScopedInterval>::new();

    let tick = move || {
        let outcome = rng
            .try_update_value(|rng| slot.update(|state| state.step(rng)))
            .flatten();
        match outcome {
            Some(StepOutcome::Ate) => services.with_value(|s| s.play(SoundCue::Pop)),
            Some(StepOutcome::Crashed) => {
                clock.clear();
                services.with_value(|s| s.play(SoundCue::Fail));
            }
            Some(StepOutcome::Idle) => clock.clear(),
            Some(StepOutcome::Moved) | None => {}
        }
    };

    let start = move || {
        rng.update_value(|rng| {
            slot.update(|state| state.start(rng));
        });
        match ScopedInterval::start(TICK, tick) {
            Ok(interval) => clock.replace(interval),
            Err(err) => logging::warn!("snake clock unavailable: {err}"),
        }
    };

    let keys = window_event_listener(ev::keydown, move |ev| {
        if let Some(heading) = Heading::from_key(&ev.key()) {
            ev.prevent_default();
            slot.update(|state| state.steer(heading));
        }
    });
    on_cleanup(move || keys.remove());

    let on_new_game = move |_: ()| {
        clock.clear();
        slot.reset();
    };

    view! {
        <GameFrame game="snake" status=slot.status() on_new_game>
            <div class="snake-field">
                {move || {
                    let Some(state) = slot.state().get() else {
                        return ().into_view();
                    };
                    (0..SIZE)
                        .flat_map(|y| (0..SIZE).map(move |x| Point { x, y }))
                        .map(|point| {
                            let kind = if state.snake.first() == Some(&point) {
                                "head"
                            } else if state.snake.contains(&point) {
                                "body"
                            } else if state.food == point {
                                "food"
                            } else {
                                "empty"
                            };
                            view! { <div class="snake-cell" data-kind=kind></div> }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || slot.state().get().is_some_and(|state| !state.is_playing) fallback=|| ()>
                <button type="button" class="snake-start no-drag" on:click=move |_| start()>
                    "Start"
                </button>
            </Show>
        </GameFrame>
    }
    .into_view()
}
