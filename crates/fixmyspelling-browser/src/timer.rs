//! Timers on the browser event loop.

use std::time::Duration;

use fixmyspelling_core::Scheduler;
use gloo_timers::callback::Timeout;

/// Schedules tasks with `setTimeout`. Timers are never cancelled; tasks
/// check whether they still apply when they run.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
