//! Movement domain: deadline values compared against the game clock.

/// A point in time after which something becomes due.
///
/// Replaces "start X after a delay" with a value checked every tick, so
/// cancelling is just clearing it and nothing keeps running in the background.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deadline {
    at: Option<f32>,
}

impl Deadline {
    pub fn after(now: f32, delay: f32) -> Self {
        Self {
            at: Some(now + delay),
        }
    }

    pub fn schedule(&mut self, now: f32, delay: f32) {
        self.at = Some(now + delay);
    }

    /// Safe to call when nothing is scheduled.
    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.at.is_some()
    }

    pub fn at(&self) -> Option<f32> {
        self.at
    }

    pub fn is_due(&self, now: f32) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Scheduled and not yet due.
    pub fn is_pending(&self, now: f32) -> bool {
        self.at.is_some_and(|at| now < at)
    }

    /// Clear and return true if the deadline has passed.
    pub fn take_due(&mut self, now: f32) -> bool {
        if self.is_due(now) {
            self.at = None;
            true
        } else {
            false
        }
    }
}
