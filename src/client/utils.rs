//! Backoff helpers for the retry loops.
//!
//! Delays double on every consumed attempt within one operation and start
//! over from the base interval on the next operation.

use std::time::Duration;

/// Exponential backoff delay calculation
///
/// Returns `base * 2^attempt`, saturating at [`Duration::MAX`].
pub fn exponential_backoff(attempt: u32, base: Duration) -> Duration {
    2_u32
        .checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .unwrap_or(Duration::MAX)
}

/// Per-operation backoff schedule.
///
/// Created fresh at the start of each top-level read or write, so no backoff
/// state is shared between calls.
///
/// # Examples
///
/// ```
/// use resilient_stream::client::Backoff;
/// use std::time::Duration;
///
/// let mut backoff = Backoff::new(Duration::from_millis(10), None);
/// assert_eq!(backoff.advance(), Duration::from_millis(10));
/// assert_eq!(backoff.advance(), Duration::from_millis(20));
/// assert_eq!(backoff.current(), Duration::from_millis(40));
/// ```
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Option<Duration>,
    /// Delays handed out so far
    steps: u32,
}

impl Backoff {
    /// Start a schedule at `base`, optionally capped at `cap`
    pub fn new(base: Duration, cap: Option<Duration>) -> Self {
        Backoff {
            base,
            cap,
            steps: 0,
        }
    }

    /// The delay the next sleep would use
    pub fn current(&self) -> Duration {
        let delay = exponential_backoff(self.steps, self.base);
        match self.cap {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }

    /// Return the current delay and double it for the next call
    pub fn advance(&mut self) -> Duration {
        let delay = self.current();
        self.steps = self.steps.saturating_add(1);
        delay
    }

    /// Number of delays handed out
    pub fn steps(&self) -> u32 {
        self.steps
    }
}
