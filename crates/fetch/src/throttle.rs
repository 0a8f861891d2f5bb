//! Request throttling between downloads.

use std::time::Duration;

/// Called after every download to limit the request rate.
pub trait Throttle {
    fn pause(&mut self);
}

/// Sleeps for a fixed delay after each download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Throttle for FixedDelay {
    fn pause(&mut self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn pause(&mut self) {}
}
