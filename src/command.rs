//! Command-based control for frame buffers.

use crate::color::Color;
use crate::pattern::Pattern;
use crate::types::ChannelOrder;

/// Actions for controlling a board, dispatched by
/// [`FrameBuffer::handle_action`](crate::FrameBuffer::handle_action).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// Paint the active window with a repeating pattern.
    SetPattern(Pattern),
    /// Set every active pixel.
    SetAll(Color),
    /// Set one pixel.
    SetPixel { index: usize, color: Color },
    /// Paint a gradient of `count` pixels starting at `start`.
    Gradient {
        start: usize,
        count: usize,
        from: Color,
        to: Color,
    },
    /// Rotate the active window by a number of pixels.
    Rotate(isize),
    /// Shift the active window by a number of pixels.
    Shift(isize),
    /// Turn every active pixel off.
    Clear,
    /// Dim every active pixel in place.
    FadeAll(u8),
    /// Set brightness for subsequent writes.
    SetBrightness(u8),
    /// Set channel order.
    SetChannelOrder(ChannelOrder),
    /// Set the advisory gamma flag.
    SetGamma(bool),
    /// Change the pixel count; discards the buffer.
    Resize(usize),
}
