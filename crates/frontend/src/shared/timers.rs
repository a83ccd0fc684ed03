//! Clock and timer ports.
//!
//! Timer handles cancel their timer when dropped, the same contract as
//! `gloo_timers::callback::{Timeout, Interval}`.

use std::any::Any;

use gloo_timers::callback::{Interval, Timeout};

pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// Keeps a scheduled timer alive; dropping it cancels the timer
pub struct TimerHandle {
    _guard: Box<dyn Any>,
}

impl TimerHandle {
    pub fn new<T: 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

pub trait Scheduler {
    fn timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
    fn interval(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerHandle;
}

/// `setTimeout` / `setInterval` via gloo
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(Timeout::new(delay_ms, task))
    }

    fn interval(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::new(Interval::new(period_ms, move || task()))
    }
}
