use chrono::{
  DateTime,
  FixedOffset,
  Local
};

/// Locale-style timestamp, e.g.
/// `3/14/2026, 9:05:07 AM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str =
  "%-m/%-d/%Y, %-I:%M:%S %p";

pub trait Clock {
  fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
  }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(
  pub DateTime<FixedOffset>
);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<FixedOffset> {
    self.0
  }
}

pub fn format_timestamp(
  at: DateTime<FixedOffset>,
  pattern: &str
) -> String {
  at.format(pattern).to_string()
}
