//! A frame buffer shared between several callers.
//!
//! Fills, gradients and fades all read the pixel bytes and the configuration
//! (brightness, channel order, pixel count, start offset) together. The shared
//! wrapper keeps both behind one mutex so every caller sees them consistently.

use crate::board::FrameBuffer;
use crate::color::Color;
use crate::config::BoardConfig;
use crate::fade::{AnimationError, CancelToken, FadeAnimation, FadeOutcome, ServiceTiming};
use crate::pattern::Pattern;
use crate::time::{Delay, TimeDuration};
use crate::transport::Transport;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// A [`FrameBuffer`] guarded by a blocking mutex.
///
/// `M` picks the locking strategy, e.g. `CriticalSectionRawMutex` when the buffer is
/// reached from interrupts or other threads, `NoopRawMutex` when it never leaves one
/// executor.
pub struct SharedFrameBuffer<M: RawMutex> {
    inner: Mutex<M, RefCell<FrameBuffer>>,
}

impl<M: RawMutex> SharedFrameBuffer<M> {
    pub const fn new(board: FrameBuffer) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(board)),
        }
    }

    /// Runs `f` with exclusive access to the board.
    ///
    /// # Panics
    /// Panics if `f` locks the same shared buffer again.
    pub fn lock<R>(&self, f: impl FnOnce(&mut FrameBuffer) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Hands the current buffer to `transport` while holding the lock.
    pub fn show<T: Transport>(&self, transport: &mut T) {
        self.lock(|board| board.show(transport));
    }

    pub fn pixel(&self, index: usize) -> Color {
        self.lock(|board| board.pixel(index))
    }

    pub fn config(&self) -> BoardConfig {
        self.lock(|board| board.config())
    }

    /// Advances `fade` by one step under the lock.
    pub fn advance_fade<D: TimeDuration>(
        &self,
        fade: &mut FadeAnimation<D>,
    ) -> Result<ServiceTiming<D>, AnimationError> {
        self.lock(|board| fade.advance(board))
    }

    /// Blocking fade that takes the lock once per step, so other callers can read or
    /// write the board between steps.
    ///
    /// Returns [`FadeOutcome::Aborted`] if another caller resized the board while
    /// the fade was running.
    pub fn fade_to<D, T, W, C>(
        &self,
        transport: &mut T,
        delay: &mut W,
        pattern: &Pattern,
        step_count: u16,
        step_delay: D,
        cancel: &C,
    ) -> FadeOutcome
    where
        D: TimeDuration,
        T: Transport,
        W: Delay<D>,
        C: CancelToken + ?Sized,
    {
        let mut fade = FadeAnimation::new();
        self.lock(|board| fade.start(board, pattern, step_count, step_delay));

        let mut steps_applied = 0;
        while fade.is_running() {
            if cancel.is_cancelled() {
                return FadeOutcome::Cancelled { steps_applied };
            }

            let stepped = self.lock(|board| {
                let timing = fade.advance(board);
                if timing.is_ok() {
                    board.show(transport);
                }
                timing
            });
            if let Err(err) = stepped {
                return FadeOutcome::Aborted(err);
            }

            steps_applied += 1;
            delay.delay(step_delay);
        }

        FadeOutcome::Completed
    }

    pub fn into_inner(self) -> FrameBuffer {
        self.inner.into_inner().into_inner()
    }
}
