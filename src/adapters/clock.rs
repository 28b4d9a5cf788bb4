use crate::domain::ports::Clock;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Reads the system wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// Always reports the same instant. Used to pin "today" in tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        Ok(self.instant)
    }
}
