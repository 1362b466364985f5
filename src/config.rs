//! Board configuration.

use crate::types::{ChannelOrder, MAX_PIXELS, MIN_PIXELS};

/// Pixel count a board starts with.
pub const DEFAULT_PIXEL_COUNT: usize = 15;

/// Brightness a board starts with (full).
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// Per-board settings. Every field is independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    /// Channel order used for every write and read.
    pub channel_order: ChannelOrder,

    /// Brightness applied to colors as they are written, 255 = full.
    pub brightness: u8,

    /// Number of pixels on the board. Clamped to 2-64.
    pub pixel_count: usize,

    /// Index of the first active pixel.
    pub start_offset: usize,

    /// Advisory flag for the transport; never applied by this crate.
    pub gamma_enabled: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::Rgb,
            brightness: DEFAULT_BRIGHTNESS,
            pixel_count: DEFAULT_PIXEL_COUNT,
            start_offset: 0,
            gamma_enabled: true,
        }
    }
}

impl BoardConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_pixel_count(mut self, pixel_count: usize) -> Self {
        self.pixel_count = pixel_count;
        self
    }

    pub fn with_start_offset(mut self, start_offset: usize) -> Self {
        self.start_offset = start_offset;
        self
    }

    pub fn with_gamma(mut self, enabled: bool) -> Self {
        self.gamma_enabled = enabled;
        self
    }

    /// Returns a copy with the pixel count and start offset pulled into range.
    pub(crate) fn clamped(self) -> Self {
        let pixel_count = clamp_pixel_count(self.pixel_count);
        Self {
            pixel_count,
            start_offset: self.start_offset.min(pixel_count - 1),
            ..self
        }
    }
}

/// Pulls a requested pixel count into the supported 2-64 range.
#[inline]
pub(crate) fn clamp_pixel_count(requested: usize) -> usize {
    requested.clamp(MIN_PIXELS, MAX_PIXELS)
}
