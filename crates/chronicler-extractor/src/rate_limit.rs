//! Minimum inter-call spacing for outbound extraction calls

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum interval of `60 / requests_per_minute` seconds between
/// permitted calls.
///
/// Single-caller serialization only: the `&mut self` receiver makes the
/// contract explicit at compile time. No queueing or fairness guarantees;
/// concurrent use would need independent limiters or a token-bucket design.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_permit: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_minute` calls per minute.
    ///
    /// A zero argument is clamped to one request per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = requests_per_minute.max(1);
        Self {
            min_interval: Duration::from_secs_f64(60.0 / f64::from(rpm)),
            last_permit: None,
        }
    }

    /// The enforced minimum spacing between calls.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until the minimum interval since the last permitted call has
    /// elapsed, then record the current time as the new last-call time.
    pub async fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_permit {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Rate limit: waiting {:.2}s", wait.as_secs_f64());
                tokio::time::sleep(wait).await;
            }
        }
        self.last_permit = Some(Instant::now());
    }
}
