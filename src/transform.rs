//! Rotate and shift the active window of a [`FrameBuffer`].
//!
//! Offsets are in pixels. A positive offset moves every pixel towards higher indices,
//! a negative one towards lower indices. Bytes outside the active window are never
//! touched.

use crate::board::FrameBuffer;
use crate::types::STRIDE;

/// Rotates the active window by `offset` pixels; pixels leaving one end re-enter at
/// the other.
pub fn rotate(board: &mut FrameBuffer, offset: isize) {
    let window = board.window_mut();
    let pixels = window.len() / STRIDE;
    if pixels == 0 {
        return;
    }

    let bytes = offset.rem_euclid(pixels as isize) as usize * STRIDE;
    window.rotate_right(bytes);
}

/// Shifts the active window by `offset` pixels; pixels pushed past one end are lost
/// and the vacated pixels at the other end are zeroed.
pub fn shift(board: &mut FrameBuffer, offset: isize) {
    let window = board.window_mut();
    let len = window.len();
    let bytes = offset.unsigned_abs().saturating_mul(STRIDE).min(len);

    if offset >= 0 {
        window.copy_within(..len - bytes, bytes);
        window[..bytes].fill(0);
    } else {
        window.copy_within(bytes.., 0);
        window[len - bytes..].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::BoardConfig;

    fn numbered_board(pixels: usize) -> FrameBuffer {
        let mut board = FrameBuffer::new(BoardConfig::new().with_pixel_count(pixels));
        for i in 0..pixels {
            board.set_pixel(i, Color::rgb(i as u8 + 1, 0, 0));
        }
        board
    }

    fn reds(board: &FrameBuffer) -> [u8; 4] {
        [0, 1, 2, 3].map(|i| board.pixel(i).red())
    }

    #[test]
    fn rotate_positive_moves_up() {
        let mut board = numbered_board(4);
        rotate(&mut board, 1);
        assert_eq!(reds(&board), [4, 1, 2, 3]);
    }

    #[test]
    fn rotate_wraps_large_offsets() {
        let mut board = numbered_board(4);
        rotate(&mut board, -9);
        assert_eq!(reds(&board), [2, 3, 4, 1]);
    }

    #[test]
    fn shift_positive_zeroes_front() {
        let mut board = numbered_board(4);
        shift(&mut board, 1);
        assert_eq!(reds(&board), [0, 1, 2, 3]);
    }

    #[test]
    fn shift_negative_zeroes_back() {
        let mut board = numbered_board(4);
        shift(&mut board, -2);
        assert_eq!(reds(&board), [3, 4, 0, 0]);
    }

    #[test]
    fn shift_past_window_clears_it() {
        let mut board = numbered_board(4);
        shift(&mut board, 10);
        assert_eq!(reds(&board), [0, 0, 0, 0]);
    }
}
