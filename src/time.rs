//! Duration and delay traits used to pace fades.
//!
//! The crate never reads a clock. Callers plug in their platform's duration type
//! and a blocking delay, e.g. `embassy_time::Delay` or `std::thread::sleep`.

/// A platform duration, convertible to and from milliseconds.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_millis(&self) -> u64 {
        core::time::Duration::as_millis(self) as u64
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }
}

/// Trait for blocking the caller between animation steps.
pub trait Delay<D: TimeDuration> {
    /// Blocks for `duration`.
    fn delay(&mut self, duration: D);
}

impl<D: TimeDuration, T: Delay<D> + ?Sized> Delay<D> for &mut T {
    fn delay(&mut self, duration: D) {
        (**self).delay(duration);
    }
}
