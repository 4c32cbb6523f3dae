//! Monotonic time source used to rate limit measurement cycles.

/// A point in time with millisecond resolution.
pub type Instant = fugit::TimerInstantU64<1000>;

/// A span of time with millisecond resolution.
pub type Duration = fugit::MillisDurationU64;

/// Monotonic millisecond clock.
///
/// Implement this on top of whatever timer the platform provides, e.g.
/// `Instant::from_ticks(embassy_time::Instant::now().as_millis())`.
pub trait Clock {
    /// Current time. Must never go backwards.
    fn now(&mut self) -> Instant;
}
