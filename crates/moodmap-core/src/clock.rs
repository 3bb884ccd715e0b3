//! Time injection for cache expiry.

use chrono::{DateTime, Utc};

/// A source of the current instant.
///
/// Injectable so that cache expiry tests can move time by hand instead of
/// sleeping through real TTL windows.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}
