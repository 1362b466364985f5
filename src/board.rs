//! Frame buffer for one board of addressable RGB pixels.
//!
//! Provides [`FrameBuffer`], which owns the pixel bytes together with the board
//! configuration (channel order, brightness, pixel count, start offset, gamma flag).
//! Every write is brightness-scaled and laid out in channel order on the way in, so
//! the bytes are ready to hand to a [`Transport`] as they are.

use crate::color::{BLACK, Color, restore_full_brightness, scale_channel};
use crate::command::BoardAction;
use crate::config::{BoardConfig, clamp_pixel_count};
use crate::pattern::Pattern;
use crate::transport::Transport;
use crate::types::{BoardError, ChannelOrder, MAX_PIXELS, MIN_PIXELS, PixelBytes, STRIDE};
use crate::{compositor, transform};
use core::ops::Range;

/// Pixel bytes plus the configuration that governs how they are written.
///
/// The buffer always holds exactly `pixel_count * 3` bytes. The active window starts
/// at `start_offset` and runs to the end of the buffer; index-based operations are
/// relative to the window start.
///
/// The lenient methods never fail: out-of-range writes are ignored, out-of-range reads
/// return black and out-of-range settings are clamped. The `try_*` variants report the
/// same misuse as a [`BoardError`].
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    data: PixelBytes,
    pixel_count: usize,
    start_offset: usize,
    channel_order: ChannelOrder,
    brightness: u8,
    gamma_enabled: bool,
    /// Bumped on every reallocation.
    generation: u32,
}

// Two boards are equal when their bytes and settings match, whatever their history.
impl PartialEq for FrameBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.config() == other.config()
    }
}

impl Eq for FrameBuffer {}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl FrameBuffer {
    /// Creates an all-black buffer from `config`, clamping out-of-range settings.
    pub fn new(config: BoardConfig) -> Self {
        let config = config.clamped();
        let mut board = Self {
            data: PixelBytes::new(),
            pixel_count: config.pixel_count,
            start_offset: config.start_offset,
            channel_order: config.channel_order,
            brightness: config.brightness,
            gamma_enabled: config.gamma_enabled,
            generation: 0,
        };
        board.reallocate();
        board
    }

    /// Returns the live configuration.
    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            channel_order: self.channel_order,
            brightness: self.brightness,
            pixel_count: self.pixel_count,
            start_offset: self.start_offset,
            gamma_enabled: self.gamma_enabled,
        }
    }

    /// Number of pixels in the active window.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixel_count - self.start_offset
    }

    /// Always false; the active window holds at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pixels on the board.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    #[inline]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    #[inline]
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    #[inline]
    pub fn gamma_enabled(&self) -> bool {
        self.gamma_enabled
    }

    /// The whole buffer, as handed to the transport.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The bytes of the active window.
    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.data[self.window_range()]
    }

    /// Byte range of the active window within the buffer.
    #[inline]
    pub fn window_range(&self) -> Range<usize> {
        self.start_offset * STRIDE..self.pixel_count * STRIDE
    }

    /// Changes whenever the buffer is reallocated, even to the same size.
    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    /// Copy of the whole buffer.
    pub(crate) fn snapshot(&self) -> PixelBytes {
        self.data.clone()
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub(crate) fn window_mut(&mut self) -> &mut [u8] {
        let range = self.window_range();
        &mut self.data[range]
    }

    /// Sets the brightness for subsequent writes. Existing pixels keep their values.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Sets the channel order for subsequent writes and reads. Existing bytes are not
    /// reordered.
    pub fn set_channel_order(&mut self, order: ChannelOrder) {
        self.channel_order = order;
    }

    /// Sets the advisory gamma flag passed to the transport.
    pub fn set_gamma_enabled(&mut self, enabled: bool) {
        self.gamma_enabled = enabled;
    }

    /// Moves the start of the active window, clamped so at least one pixel stays
    /// active.
    pub fn set_start_offset(&mut self, offset: usize) {
        self.start_offset = offset.min(self.pixel_count - 1);
    }

    /// Strict variant of [`set_start_offset`](Self::set_start_offset).
    pub fn try_set_start_offset(&mut self, offset: usize) -> Result<(), BoardError> {
        if offset >= self.pixel_count {
            return Err(BoardError::StartOffsetOutOfRange {
                offset,
                pixel_count: self.pixel_count,
            });
        }
        self.start_offset = offset;
        Ok(())
    }

    /// Changes the number of pixels, clamped to 2-64.
    ///
    /// The buffer is reallocated and every pixel reads black afterwards, even when
    /// the count is unchanged. The start offset is pulled back into range.
    pub fn resize(&mut self, pixel_count: usize) {
        let pixel_count = clamp_pixel_count(pixel_count);
        debug!("resizing board from {} to {} pixels", self.pixel_count, pixel_count);

        self.pixel_count = pixel_count;
        self.start_offset = self.start_offset.min(pixel_count - 1);
        self.reallocate();
    }

    /// Strict variant of [`resize`](Self::resize).
    pub fn try_resize(&mut self, pixel_count: usize) -> Result<(), BoardError> {
        if !(MIN_PIXELS..=MAX_PIXELS).contains(&pixel_count) {
            return Err(BoardError::InvalidPixelCount {
                requested: pixel_count,
            });
        }
        self.resize(pixel_count);
        Ok(())
    }

    fn reallocate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.data.clear();
        if self.data.resize(self.pixel_count * STRIDE, 0).is_err() {
            warn!("pixel count {} exceeds buffer capacity", self.pixel_count);
        }
    }

    /// Sets one pixel of the active window. Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Color) {
        if self.try_set_pixel(index, color).is_err() {
            trace!("ignoring write to pixel {}", index);
        }
    }

    /// Strict variant of [`set_pixel`](Self::set_pixel).
    pub fn try_set_pixel(&mut self, index: usize, color: Color) -> Result<(), BoardError> {
        let offset = self.slot_offset(index)?;
        let (red, green, blue) = self.scaled_channels(color);
        self.channel_order
            .write(&mut self.data[offset..offset + STRIDE], red, green, blue);
        Ok(())
    }

    /// Sets every active pixel to `color`.
    ///
    /// Scales the color once; the result matches calling `set_pixel` for every index.
    pub fn set_all(&mut self, color: Color) {
        let (red, green, blue) = self.scaled_channels(color);
        let order = self.channel_order;
        for slot in self.window_mut().chunks_exact_mut(STRIDE) {
            order.write(slot, red, green, blue);
        }
    }

    /// Turns every active pixel off.
    pub fn clear(&mut self) {
        self.set_all(BLACK);
    }

    /// Paints the active window with `pattern`, repeating it as needed.
    pub fn set_pattern(&mut self, pattern: &Pattern) {
        let order = self.channel_order;
        let brightness = self.brightness;
        pattern.fill_buffer(self.window_mut(), order, brightness);
    }

    /// Reads a pixel as stored, i.e. already brightness-scaled. Out-of-range indices
    /// read black.
    pub fn pixel(&self, index: usize) -> Color {
        self.try_pixel(index).unwrap_or(BLACK)
    }

    /// Reads a pixel and undoes the current brightness scaling.
    pub fn pixel_restored(&self, index: usize) -> Color {
        restore_full_brightness(self.pixel(index), self.brightness)
    }

    /// Strict variant of [`pixel`](Self::pixel).
    pub fn try_pixel(&self, index: usize) -> Result<Color, BoardError> {
        let offset = self.slot_offset(index)?;
        let (red, green, blue) = self.channel_order.read(&self.data[offset..offset + STRIDE]);
        Ok(Color::rgb(red, green, blue))
    }

    /// Hands the whole buffer to `transport`.
    pub fn show<T: Transport>(&self, transport: &mut T) {
        transport.transmit(&self.data, self.pixel_count, self.gamma_enabled);
    }

    /// Applies a board action.
    pub fn handle_action(&mut self, action: BoardAction) {
        match action {
            BoardAction::SetPattern(pattern) => self.set_pattern(&pattern),
            BoardAction::SetAll(color) => self.set_all(color),
            BoardAction::SetPixel { index, color } => self.set_pixel(index, color),
            BoardAction::Gradient {
                start,
                count,
                from,
                to,
            } => compositor::gradient(self, start, count, from, to),
            BoardAction::Rotate(offset) => transform::rotate(self, offset),
            BoardAction::Shift(offset) => transform::shift(self, offset),
            BoardAction::Clear => self.clear(),
            BoardAction::FadeAll(brightness) => compositor::fade_all(self, brightness),
            BoardAction::SetBrightness(brightness) => self.set_brightness(brightness),
            BoardAction::SetChannelOrder(order) => self.set_channel_order(order),
            BoardAction::SetGamma(enabled) => self.set_gamma_enabled(enabled),
            BoardAction::Resize(pixel_count) => self.resize(pixel_count),
        }
    }

    fn slot_offset(&self, index: usize) -> Result<usize, BoardError> {
        if index >= self.len() {
            return Err(BoardError::PixelOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok((index + self.start_offset) * STRIDE)
    }

    fn scaled_channels(&self, color: Color) -> (u8, u8, u8) {
        (
            scale_channel(color.red(), self.brightness),
            scale_channel(color.green(), self.brightness),
            scale_channel(color.blue(), self.brightness),
        )
    }
}
