// Input debouncing for the immediate-mode UI
// The UI calls `poll` every frame; a value is released once it has been
// stable for the configured delay.

use std::time::{Duration, Instant};

/// Delay applied to the agent search field
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest input value until it has been stable for `delay`
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new value; restarts the timer
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the delay has elapsed since its last update
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, since)) if now.saturating_duration_since(*since) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Time left before the pending value is released, if any
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, since)| self.delay.saturating_sub(now.saturating_duration_since(*since)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_released_only_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.update("ka".to_string(), start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("ka".to_string())
        );
        // Released once
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_each_keystroke_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.update("k".to_string(), start);
        debouncer.update("ka".to_string(), start + Duration::from_millis(200));
        debouncer.update("kaf".to_string(), start + Duration::from_millis(400));

        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(600)),
            Some(Duration::from_millis(100))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(700)),
            Some("kaf".to_string())
        );
        assert!(!debouncer.is_pending());
    }
}
