//! Time abstraction traits for the monotonic millisecond clock.
//!
//! The start menu measures how long a gesture has been held against this
//! clock. In-game countdowns do not use it; they count ticks.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by a wrapping counter should use wrapping
    /// subtraction so hold timing survives counter rollover.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds elapsed between `since` and `now`.
#[inline]
pub(crate) fn millis_between<I: TimeInstant>(since: I, now: I) -> u64 {
    now.duration_since(since).as_millis()
}
