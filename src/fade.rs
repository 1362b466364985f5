//! Multi-step fade from the current buffer contents to a pattern.
//!
//! The fade is a state machine: [`AnimationState::advance`] is a pure step from one
//! state to the next that also yields the frame to display. [`FadeAnimation`] drives
//! it against a [`FrameBuffer`], and [`fade_to`] / [`fade_to_cancellable`] run the
//! whole fade in a blocking loop, showing each step and pausing in between.

use crate::board::FrameBuffer;
use crate::color::blend_channel;
use crate::pattern::Pattern;
use crate::time::{Delay, TimeDuration};
use crate::transport::Transport;
use crate::types::PixelBytes;
use core::ops::Range;
use core::sync::atomic::{AtomicBool, Ordering};

/// Number of steps a pattern fade takes.
pub const FADE_STEPS: u16 = 30;

/// Fastest caller-facing fade speed.
pub const MAX_SPEED: u8 = 10;

/// Maps a caller-facing speed (1-10, clamped) to the pause between fade steps.
///
/// Higher speeds pause less: `(10 - speed) * 10` milliseconds, so speed 10 does not
/// pause at all.
pub fn step_delay_for_speed<D: TimeDuration>(speed: u8) -> D {
    let speed = speed.clamp(1, MAX_SPEED);
    D::from_millis(u64::from(MAX_SPEED - speed) * 10)
}

/// Snapshot of a running fade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FadeProgress {
    step: u16,
    total_steps: u16,
    window: Range<usize>,
    start_offset: usize,
    generation: u32,
    initial: PixelBytes,
    target: PixelBytes,
}

impl FadeProgress {
    /// Index of the next step to apply.
    pub fn step(&self) -> u16 {
        self.step
    }

    pub fn total_steps(&self) -> u16 {
        self.total_steps
    }

    /// Buffer contents when the fade started.
    pub fn initial(&self) -> &[u8] {
        &self.initial
    }

    /// Buffer contents the fade ends on.
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Blend weight of the next step: `255 * step / total`, except the final step,
    /// which lands on the target exactly.
    pub fn alpha(&self) -> u8 {
        if self.step + 1 >= self.total_steps {
            return u8::MAX;
        }
        (255 * u32::from(self.step) / u32::from(self.total_steps)) as u8
    }

    fn check_layout(&self, board: &FrameBuffer) -> Result<(), AnimationError> {
        if self.generation != board.generation() {
            return Err(AnimationError::BufferResized);
        }
        if self.start_offset != board.start_offset() {
            return Err(AnimationError::WindowMoved);
        }
        Ok(())
    }

    fn frame(&self) -> PixelBytes {
        let alpha = self.alpha();
        let mut frame = self.initial.clone();
        for pos in self.window.clone() {
            frame[pos] = blend_channel(self.initial[pos], alpha, self.target[pos]);
        }
        frame
    }
}

/// The fade state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Nothing to animate.
    #[default]
    Idle,
    /// A fade with steps left to apply.
    Running(FadeProgress),
}

impl AnimationState {
    /// Prepares a fade of `board`'s active window to `pattern` over `step_count` steps
    /// (at least one).
    ///
    /// The pattern is repeated to the window length and painted through the board's
    /// channel order and brightness; the current contents are snapshotted as the
    /// starting point.
    pub fn fade(board: &FrameBuffer, pattern: &Pattern, step_count: u16) -> Self {
        let initial = board.snapshot();
        let mut target = initial.clone();
        let window = board.window_range();

        let extended = pattern.extended_to(board.len());
        extended.fill_buffer(
            &mut target[window.clone()],
            board.channel_order(),
            board.brightness(),
        );

        AnimationState::Running(FadeProgress {
            step: 0,
            total_steps: step_count.max(1),
            window,
            start_offset: board.start_offset(),
            generation: board.generation(),
            initial,
            target,
        })
    }

    /// Applies one step. Returns the frame to display, if any, and the next state.
    pub fn advance(self) -> (Option<PixelBytes>, AnimationState) {
        match self {
            AnimationState::Idle => (None, AnimationState::Idle),
            AnimationState::Running(mut progress) => {
                let frame = progress.frame();
                progress.step += 1;
                let next = if progress.step >= progress.total_steps {
                    AnimationState::Idle
                } else {
                    AnimationState::Running(progress)
                };
                (Some(frame), next)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, AnimationState::Running(_))
    }
}

/// Timing information returned by [`FadeAnimation::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// More steps remain. Show the buffer and advance again after this delay.
    Delay(D),

    /// The final step was applied; the buffer now holds the target exactly.
    Complete,
}

/// Errors that can occur while driving a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// No fade is running.
    NotRunning,

    /// The board was resized after the fade started. The fade is dropped.
    BufferResized,

    /// The start offset moved after the fade started. The fade is dropped.
    WindowMoved,
}

impl core::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AnimationError::NotRunning => write!(f, "no fade running"),
            AnimationError::BufferResized => {
                write!(f, "board was resized while a fade was running")
            }
            AnimationError::WindowMoved => {
                write!(f, "start offset moved while a fade was running")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AnimationError {}

/// Drives an [`AnimationState`] against a frame buffer.
#[derive(Debug, Clone)]
pub struct FadeAnimation<D: TimeDuration> {
    state: AnimationState,
    step_delay: D,
}

impl<D: TimeDuration> Default for FadeAnimation<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: TimeDuration> FadeAnimation<D> {
    /// Creates an idle animation.
    pub fn new() -> Self {
        Self {
            state: AnimationState::Idle,
            step_delay: D::ZERO,
        }
    }

    /// Starts fading `board` to `pattern`. Replaces any fade already running.
    pub fn start(
        &mut self,
        board: &FrameBuffer,
        pattern: &Pattern,
        step_count: u16,
        step_delay: D,
    ) {
        debug!(
            "starting fade over {} steps, {} ms apart",
            step_count,
            step_delay.as_millis()
        );
        self.state = AnimationState::fade(board, pattern, step_count);
        self.step_delay = step_delay;
    }

    /// Writes the next step into `board`'s active window.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(d))` - Show the board, advance again after `d`
    /// * `Ok(ServiceTiming::Complete)` - Final step applied, animation is idle
    /// * `Err(NotRunning)` - Nothing to advance
    /// * `Err(BufferResized)` - The board was reallocated, even to the same size; the
    ///   fade is dropped and the board left as it is
    /// * `Err(WindowMoved)` - The start offset changed; the fade is dropped and the
    ///   board left as it is
    pub fn advance(
        &mut self,
        board: &mut FrameBuffer,
    ) -> Result<ServiceTiming<D>, AnimationError> {
        let checked = match &self.state {
            AnimationState::Idle => return Err(AnimationError::NotRunning),
            AnimationState::Running(progress) => progress
                .check_layout(board)
                .map(|()| progress.window.clone()),
        };
        let window = match checked {
            Ok(window) => window,
            Err(err) => {
                warn!("board layout changed during fade, dropping it");
                self.state = AnimationState::Idle;
                return Err(err);
            }
        };

        let (frame, next) = core::mem::take(&mut self.state).advance();
        if let Some(frame) = frame {
            board.bytes_mut()[window.clone()].copy_from_slice(&frame[window]);
        }
        self.state = next;

        if self.state.is_running() {
            Ok(ServiceTiming::Delay(self.step_delay))
        } else {
            debug!("fade complete");
            Ok(ServiceTiming::Complete)
        }
    }

    /// Stops the fade. The board keeps the last step applied.
    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn step_delay(&self) -> D {
        self.step_delay
    }
}

/// Checked once per fade step; a cancelled fade stops before its next step.
pub trait CancelToken {
    fn is_cancelled(&self) -> bool;
}

impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: CancelToken + ?Sized> CancelToken for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// A token that never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// How a blocking fade ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeOutcome {
    /// Every step ran; the board holds the target.
    Completed,

    /// The token fired. The board holds the last step applied.
    Cancelled {
        /// Steps applied before cancellation.
        steps_applied: u16,
    },

    /// The fade could not continue.
    Aborted(AnimationError),
}

/// Fades `board` to `pattern` over `step_count` steps, showing every step on
/// `transport` and pausing `step_delay` after each.
pub fn fade_to<D, T, W>(
    board: &mut FrameBuffer,
    transport: &mut T,
    delay: &mut W,
    pattern: &Pattern,
    step_count: u16,
    step_delay: D,
) where
    D: TimeDuration,
    T: Transport,
    W: Delay<D>,
{
    let _ = fade_to_cancellable(
        board,
        transport,
        delay,
        pattern,
        step_count,
        step_delay,
        &NeverCancel,
    );
}

/// Like [`fade_to`], but checks `cancel` before every step.
pub fn fade_to_cancellable<D, T, W, C>(
    board: &mut FrameBuffer,
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
    fade.start(board, pattern, step_count, step_delay);

    let mut steps_applied = 0;
    while fade.is_running() {
        if cancel.is_cancelled() {
            debug!("fade cancelled after {} steps", steps_applied);
            return FadeOutcome::Cancelled { steps_applied };
        }
        if let Err(err) = fade.advance(board) {
            return FadeOutcome::Aborted(err);
        }
        steps_applied += 1;
        board.show(transport);
        delay.delay(step_delay);
    }

    FadeOutcome::Completed
}

/// Fades `board` to `pattern` over [`FADE_STEPS`] steps at a caller-facing speed of
/// 1 (slow) to 10 (fast).
pub fn fade_to_pattern<D, T, W>(
    board: &mut FrameBuffer,
    transport: &mut T,
    delay: &mut W,
    pattern: &Pattern,
    speed: u8,
) where
    D: TimeDuration,
    T: Transport,
    W: Delay<D>,
{
    fade_to(
        board,
        transport,
        delay,
        pattern,
        FADE_STEPS,
        step_delay_for_speed::<D>(speed),
    );
}
