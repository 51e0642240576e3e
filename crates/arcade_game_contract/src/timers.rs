//! Timers owned by a mounted game view.
//!
//! A game acquires its timers on start and releases them by dropping the guard. [`TimerSlot`]
//! ties a guard to the view's reactive owner so unmounting cancels it too.

use std::time::Duration;

use leptos::{
    leptos_dom::helpers::{IntervalHandle, TimeoutHandle},
    on_cleanup, set_interval_with_handle, set_timeout_with_handle, store_value, StoredValue,
};

/// Repeating timer cancelled on drop.
#[derive(Debug)]
pub struct ScopedInterval {
    handle: Option<IntervalHandle>,
}

impl ScopedInterval {
    /// Starts calling `tick` every `period`.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser refuses to schedule the timer.
    pub fn start(period: Duration, tick: impl Fn() + 'static) -> Result<Self, String> {
        let handle = set_interval_with_handle(tick, period)
            .map_err(|e| format!("interval scheduling failed: {e:?}"))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Stops the timer. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.clear();
        }
    }
}

impl Drop for ScopedInterval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot timer cancelled on drop.
#[derive(Debug)]
pub struct ScopedTimeout {
    handle: Option<TimeoutHandle>,
}

impl ScopedTimeout {
    /// Schedules `fire` after `delay`.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser refuses to schedule the timer.
    pub fn start(delay: Duration, fire: impl FnOnce() + 'static) -> Result<Self, String> {
        let handle = set_timeout_with_handle(fire, delay)
            .map_err(|e| format!("timeout scheduling failed: {e:?}"))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Cancels the timer if it has not fired.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.clear();
        }
    }
}

impl Drop for ScopedTimeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holder for at most one timer guard, released when the owning view unmounts.
pub struct TimerSlot<G: 'static> {
    guard: StoredValue<Option<G>>,
}

impl<G: 'static> Clone for TimerSlot<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: 'static> Copy for TimerSlot<G> {}

impl<G: 'static> TimerSlot<G> {
    /// Creates an empty slot bound to the current reactive owner.
    pub fn new() -> Self {
        let guard = store_value(None::<G>);
        on_cleanup(move || {
            let _ = guard.try_update_value(|slot| slot.take());
        });
        Self { guard }
    }

    /// Replaces the held guard, dropping (and so cancelling) the previous one.
    pub fn replace(&self, next: G) {
        let previous = self.guard.try_update_value(|slot| slot.replace(next));
        drop(previous);
    }

    /// Drops the held guard.
    pub fn clear(&self) {
        let previous = self.guard.try_update_value(|slot| slot.take());
        drop(previous);
    }

    /// Returns whether a guard is held.
    pub fn is_armed(&self) -> bool {
        self.guard
            .try_with_value(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

impl<G: 'static> Default for TimerSlot<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use leptos::{as_child_of_current_owner, create_runtime};

    use super::*;

    struct CountedGuard(Rc<Cell<u32>>);

    impl Drop for CountedGuard {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn replacing_a_guard_drops_the_previous_one() {
        let runtime = create_runtime();
        let dropped = Rc::new(Cell::new(0));
        let slot = TimerSlot::<CountedGuard>::new();

        slot.replace(CountedGuard(Rc::clone(&dropped)));
        assert!(slot.is_armed());
        slot.replace(CountedGuard(Rc::clone(&dropped)));
        assert_eq!(dropped.get(), 1);

        slot.clear();
        assert_eq!(dropped.get(), 2);
        assert!(!slot.is_armed());
        runtime.dispose();
    }

    #[test]
    fn disposing_the_owner_releases_the_guard() {
        let runtime = create_runtime();
        let dropped = Rc::new(Cell::new(0));
        let arm = {
            let dropped = Rc::clone(&dropped);
            as_child_of_current_owner(move |_: ()| {
                let slot = TimerSlot::<CountedGuard>::new();
                slot.replace(CountedGuard(Rc::clone(&dropped)));
                slot
            })
        };
        let (slot, view_owner) = arm(());
        assert_eq!(dropped.get(), 0);

        drop(view_owner);
        assert_eq!(dropped.get(), 1);
        assert!(!slot.is_armed());
        runtime.dispose();
    }
}
