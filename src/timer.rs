//! Timer scheduling
//!
//! The state machine never owns a real timer. It hands out `TimerId`s and asks
//! a `Scheduler` to run them; fired ids come back as `Intent::TimerFired` and
//! are matched against what the state still tracks, so a late callback from a
//! previous level is dropped.

use std::collections::BTreeMap;

/// Identifies one scheduled timer for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Platform timer capability
pub trait Scheduler {
    /// Fire `timer` every `period_ms` until cancelled
    fn start_interval(&mut self, timer: TimerId, period_ms: u32);
    /// Fire `timer` once after `delay_ms`
    fn start_timeout(&mut self, timer: TimerId, delay_ms: u32);
    /// Stop `timer`. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    due_at: u64,
    period_ms: Option<u32>,
}

/// Virtual-clock scheduler for tests and the headless binary
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    timers: BTreeMap<TimerId, ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers currently scheduled
    pub fn live(&self) -> usize {
        self.timers.len()
    }

    pub fn is_live(&self, timer: TimerId) -> bool {
        self.timers.contains_key(&timer)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its
    /// deadline. Intervals are re-armed; timeouts are removed.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerId> {
        let (&id, &timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_at <= until)
            .min_by_key(|(id, t)| (t.due_at, **id))?;

        self.now_ms = self.now_ms.max(timer.due_at);
        match timer.period_ms {
            Some(period) => {
                if let Some(t) = self.timers.get_mut(&id) {
                    t.due_at += u64::from(period.max(1));
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock to `until` once nothing else is due
    pub fn settle(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(&mut self, timer: TimerId, period_ms: u32) {
        let period = period_ms.max(1);
        self.timers.insert(
            timer,
            ManualTimer {
                due_at: self.now_ms + u64::from(period),
                period_ms: Some(period),
            },
        );
    }

    fn start_timeout(&mut self, timer: TimerId, delay_ms: u32) {
        self.timers.insert(
            timer,
            ManualTimer {
                due_at: self.now_ms + u64::from(delay_ms),
                period_ms: None,
            },
        );
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}

/// `setInterval`/`setTimeout` take an `i32` delay
#[cfg(any(target_arch = "wasm32", test))]
fn js_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{Scheduler, TimerId, js_delay};

    #[derive(Debug, Clone, Copy)]
    enum Handle {
        Interval(i32),
        Timeout(i32),
    }

    /// `setInterval` / `setTimeout` backed scheduler
    ///
    /// Callbacks are handed to the JS garbage collector, so cancelling from
    /// inside a callback never drops a closure that is still running.
    pub struct BrowserScheduler {
        on_fire: Rc<dyn Fn(TimerId)>,
        handles: HashMap<TimerId, Handle>,
    }

    impl BrowserScheduler {
        pub fn new(on_fire: Rc<dyn Fn(TimerId)>) -> Self {
            Self {
                on_fire,
                handles: HashMap::new(),
            }
        }

        fn callback(&self, timer: TimerId) -> JsValue {
            let on_fire = self.on_fire.clone();
            Closure::<dyn FnMut()>::new(move || on_fire(timer)).into_js_value()
        }
    }

    impl Scheduler for BrowserScheduler {
        fn start_interval(&mut self, timer: TimerId, period_ms: u32) {
            let Some(window) = web_sys::window() else { return };
            let callback = self.callback(timer);
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                js_delay(period_ms),
            ) {
                Ok(handle) => {
                    self.handles.insert(timer, Handle::Interval(handle));
                }
                Err(e) => log::error!("setInterval failed: {:?}", e),
            }
        }

        fn start_timeout(&mut self, timer: TimerId, delay_ms: u32) {
            let Some(window) = web_sys::window() else { return };
            let callback = self.callback(timer);
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                js_delay(delay_ms),
            ) {
                Ok(handle) => {
                    self.handles.insert(timer, Handle::Timeout(handle));
                }
                Err(e) => log::error!("setTimeout failed: {:?}", e),
            }
        }

        fn cancel(&mut self, timer: TimerId) {
            let Some(handle) = self.handles.remove(&timer) else {
                return;
            };
            let Some(window) = web_sys::window() else { return };
            match handle {
                Handle::Interval(h) => window.clear_interval_with_handle(h),
                Handle::Timeout(h) => window.clear_timeout_with_handle(h),
            }
        }
    }
}
