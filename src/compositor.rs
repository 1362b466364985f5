//! Stateless painting operations on a [`FrameBuffer`].

use crate::board::FrameBuffer;
use crate::color::{Color, blend, scale_channel};
use crate::pattern::Pattern;
use crate::types::STRIDE;

/// Paints the active window with `pattern`.
pub fn fill(board: &mut FrameBuffer, pattern: &Pattern) {
    board.set_pattern(pattern);
}

/// Paints a gradient of `count` pixels from `from` to `to`, starting at `start`.
///
/// The first pixel is exactly `from` and the last exactly `to`. Pixel `i` in between
/// is `blend(from, 255 * i / count, to)`. Indices wrap around the active window, so a
/// gradient longer than the window laps the ring and the later pixels win.
///
/// A `start` outside the window leaves that first pixel unpainted.
pub fn gradient(board: &mut FrameBuffer, start: usize, count: usize, from: Color, to: Color) {
    if count == 0 {
        return;
    }

    let len = board.len();
    let base = start % len;
    board.set_pixel(start, from);

    // Only the last `len` pixels of a lapping gradient survive.
    let first = count.saturating_sub(len).max(1);
    for i in first..count - 1 {
        let alpha = (255 * i as u128 / count as u128) as i32;
        board.set_pixel((base + i % len) % len, blend(from, alpha, to));
    }
    if count > 1 {
        board.set_pixel((base + (count - 1) % len) % len, to);
    }
}

/// Dims every active pixel in place by `brightness`. 255 leaves the buffer alone.
pub fn fade_all(board: &mut FrameBuffer, brightness: u8) {
    if brightness == u8::MAX {
        return;
    }

    // Scaling treats every channel alike, so the channel order does not matter here.
    for slot in board.window_mut().chunks_exact_mut(STRIDE) {
        for byte in slot {
            *byte = scale_channel(*byte, brightness);
        }
    }
}
