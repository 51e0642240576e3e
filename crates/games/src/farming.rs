//! Happy Farm: plant, water and harvest on a small grid of plots.

use std::time::Duration;

use arcade_game_contract::{GameId, GameMountContext, ScopedInterval, TimerSlot};
use leptos::*;
use platform_host::{unix_time_ms_now, SoundCue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

/// Plots on the farm grid.
pub const PLOT_COUNT: usize = 9;
const STARTING_PLOTS: usize = 3;
const STARTING_MONEY: u32 = 50;
/// Price of one seed.
pub const SEED_COST: u32 = 5;
/// Money earned per harvest.
pub const HARVEST_REWARD: u32 = 15;
/// Experience earned per harvest.
pub const HARVEST_XP: u32 = 5;
/// Price of unlocking one more plot.
pub const PLOT_UNLOCK_COST: u32 = 50;
/// Unwatered growth time.
pub const GROW_TIME_MS: u64 = 10_000;
const XP_PER_LEVEL: u32 = 50;
const CROP: &str = "wheat";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One field plot.
pub struct FarmPlot {
    /// Plot index.
    pub id: u32,
    /// Planted crop, if any.
    pub crop_id: Option<String>,
    /// Unix ms when the crop was planted.
    pub plant_time: Option<u64>,
    /// Watered crops grow twice as fast.
    pub is_watered: bool,
    /// Crop can be harvested.
    pub is_ready: bool,
    /// Plot has been bought.
    pub is_unlocked: bool,
}

impl FarmPlot {
    fn empty(id: u32, is_unlocked: bool) -> Self {
        Self {
            id,
            crop_id: None,
            plant_time: None,
            is_watered: false,
            is_ready: false,
            is_unlocked,
        }
    }

    fn clear(&mut self) {
        *self = Self::empty(self.id, self.is_unlocked);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Farm economy and plots.
pub struct FarmingState {
    /// Coins on hand.
    pub money: u32,
    /// Accumulated experience.
    pub xp: u32,
    /// Level derived from experience.
    pub level: u32,
    /// Plot grid, row-major.
    pub plots: Vec<FarmPlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Rejected farm actions.
pub enum FarmError {
    /// Plot index out of range.
    #[error("that plot does not exist")]
    NoSuchPlot,
    /// Plot is still locked.
    #[error("unlock this plot first")]
    Locked,
    /// Plot is already bought.
    #[error("plot already unlocked")]
    AlreadyUnlocked,
    /// Plot already has a crop.
    #[error("something is already growing here")]
    Occupied,
    /// Plot has no crop.
    #[error("nothing is planted here")]
    Empty,
    /// Crop is still growing.
    #[error("not ready to harvest yet")]
    NotReady,
    /// Crop was watered already.
    #[error("already watered")]
    AlreadyWatered,
    /// Not enough coins.
    #[error("need {needed} coins, have {available}")]
    InsufficientFunds {
        /// Price of the action.
        needed: u32,
        /// Coins on hand.
        available: u32,
    },
}

/// What a click on a plot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotAction {
    /// Buy the plot.
    Unlock,
    /// Plant a seed.
    Plant,
    /// Water the growing crop.
    Water,
    /// Collect the crop.
    Harvest,
    /// Crop is watered and growing.
    Wait,
}

impl FarmingState {
    /// Farm on day one.
    pub fn initial() -> Self {
        let plots = (0..PLOT_COUNT)
            .map(|index| FarmPlot::empty(index as u32, index < STARTING_PLOTS))
            .collect();
        Self {
            money: STARTING_MONEY,
            xp: 0,
            level: 1,
            plots,
        }
    }

    fn plot_mut(&mut self, index: usize) -> Result<&mut FarmPlot, FarmError> {
        self.plots.get_mut(index).ok_or(FarmError::NoSuchPlot)
    }

    fn spend(&mut self, cost: u32) -> Result<(), FarmError> {
        if self.money < cost {
            return Err(FarmError::InsufficientFunds {
                needed: cost,
                available: self.money,
            });
        }
        self.money -= cost;
        Ok(())
    }

    /// Action a click on plot `index` performs.
    pub fn action_for(&self, index: usize) -> Option<PlotAction> {
        let plot = self.plots.get(index)?;
        Some(if !plot.is_unlocked {
            PlotAction::Unlock
        } else if plot.crop_id.is_none() {
            PlotAction::Plant
        } else if plot.is_ready {
            PlotAction::Harvest
        } else if !plot.is_watered {
            PlotAction::Water
        } else {
            PlotAction::Wait
        })
    }

    /// Buys a locked plot.
    pub fn unlock(&mut self, index: usize) -> Result<(), FarmError> {
        if self.plot_mut(index)?.is_unlocked {
            return Err(FarmError::AlreadyUnlocked);
        }
        self.spend(PLOT_UNLOCK_COST)?;
        self.plot_mut(index)?.is_unlocked = true;
        Ok(())
    }

    /// Plants a seed at `now`.
    pub fn plant(&mut self, index: usize, now: u64) -> Result<(), FarmError> {
        let plot = self.plot_mut(index)?;
        if !plot.is_unlocked {
            return Err(FarmError::Locked);
        }
        if plot.crop_id.is_some() {
            return Err(FarmError::Occupied);
        }
        self.spend(SEED_COST)?;
        let plot = self.plot_mut(index)?;
        plot.crop_id = Some(CROP.to_string());
        plot.plant_time = Some(now);
        Ok(())
    }

    /// Waters a growing crop.
    pub fn water(&mut self, index: usize) -> Result<(), FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.crop_id.is_none() {
            return Err(FarmError::Empty);
        }
        if plot.is_watered {
            return Err(FarmError::AlreadyWatered);
        }
        plot.is_watered = true;
        Ok(())
    }

    /// Marks crops whose growth time has elapsed as ready. Returns whether any changed.
    pub fn grow(&mut self, now: u64) -> bool {
        let mut changed = false;
        for plot in &mut self.plots {
            let Some(planted) = plot.plant_time else {
                continue;
            };
            let needed = if plot.is_watered {
                GROW_TIME_MS / 2
            } else {
                GROW_TIME_MS
            };
            if !plot.is_ready && now.saturating_sub(planted) >= needed {
                plot.is_ready = true;
                changed = true;
            }
        }
        changed
    }

    /// Collects a ready crop and returns the coins earned.
    pub fn harvest(&mut self, index: usize) -> Result<u32, FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.crop_id.is_none() {
            return Err(FarmError::Empty);
        }
        if !plot.is_ready {
            return Err(FarmError::NotReady);
        }
        plot.clear();
        self.money += HARVEST_REWARD;
        self.xp += HARVEST_XP;
        self.level = 1 + self.xp / XP_PER_LEVEL;
        Ok(HARVEST_REWARD)
    }
}

impl Default for FarmingState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState for FarmingState {
    const GAME: GameId = GameId::Farming;

    fn new_game(_rng: &mut GameRng) -> Self {
        Self::initial()
    }

    fn status_line(&self) -> String {
        format!(
            "Lv {} | {} coins | {} xp",
            self.level, self.money, self.xp
        )
    }
}

fn plot_label(plot: &FarmPlot) -> &'static str {
    if !plot.is_unlocked {
        "🔒"
    } else if plot.crop_id.is_none() {
        "🟫"
    } else if plot.is_ready {
        "🌾"
    } else if plot.is_watered {
        "💧"
    } else {
        "🌱"
    }
}

/// Mounts the farm surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<FarmingState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);

    let growth_timer = TimerSlot::<ScopedInterval>::new();
    match ScopedInterval::start(Duration::from_secs(1), move || {
        slot.update(|state| state.grow(unix_time_ms_now()));
    }) {
        Ok(interval) => growth_timer.replace(interval),
        Err(err) => logging::warn!("farm growth timer unavailable: {err}"),
    }

    let on_plot = move |index: usize| {
        let Some(action) = slot.current().and_then(|state| state.action_for(index)) else {
            return;
        };
        let result = slot.update(|state| match action {
            PlotAction::Unlock => state.unlock(index).map(|()| SoundCue::Success),
            PlotAction::Plant => state.plant(index, unix_time_ms_now()).map(|()| SoundCue::Pop),
            PlotAction::Water => state.water(index).map(|()| SoundCue::Click),
            PlotAction::Harvest => state.harvest(index).map(|_| SoundCue::Success),
            PlotAction::Wait => Err(FarmError::NotReady),
        });
        services.with_value(|services| match result {
            Some(Ok(cue)) => services.play(cue),
            Some(Err(err)) => {
                services.play(SoundCue::Fail);
                services.notice(err.to_string());
            }
            None => {}
        });
    };

    let status = slot.status();

    view! {
        <GameFrame game="farming" status on_new_game=move |_| slot.reset()>
            <div class="farm-grid">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.plots)
                        .unwrap_or_default()
                        .into_iter()
                        .enumerate()
                        .map(|(index, plot)| {
                            view! {
                                <button
                                    type="button"
                                    class="farm-plot no-drag"
                                    data-ready=plot.is_ready
                                    on:click=move |_| on_plot(index)
                                >
                                    {plot_label(&plot)}
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
