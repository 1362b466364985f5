//! Core types shared by the buffer, pattern and animation modules.

/// Number of bytes each pixel occupies in the frame buffer.
pub const STRIDE: usize = 3;

/// Largest number of pixels a board can be configured with.
pub const MAX_PIXELS: usize = 64;

/// Smallest number of pixels a board can be configured with.
pub const MIN_PIXELS: usize = 2;

/// Capacity of a full frame buffer in bytes.
pub const MAX_BUFFER_LEN: usize = MAX_PIXELS * STRIDE;

/// Raw frame bytes, as stored in the buffer and handed to the transport.
pub type PixelBytes = heapless::Vec<u8, MAX_BUFFER_LEN>;

/// Byte order in which a pixel's channels are written to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,

    /// Green, red, blue.
    Grb,
}

impl ChannelOrder {
    /// Byte position of the red, green and blue channel within one pixel slot.
    ///
    /// The same table drives writes and reads, so the two directions cannot drift.
    #[inline]
    pub const fn layout(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Grb => [1, 0, 2],
        }
    }

    /// Writes three channels into a pixel slot.
    #[inline]
    pub(crate) fn write(self, slot: &mut [u8], red: u8, green: u8, blue: u8) {
        let [r, g, b] = self.layout();
        slot[r] = red;
        slot[g] = green;
        slot[b] = blue;
    }

    /// Reads three channels back out of a pixel slot as `(red, green, blue)`.
    #[inline]
    pub(crate) fn read(self, slot: &[u8]) -> (u8, u8, u8) {
        let [r, g, b] = self.layout();
        (slot[r], slot[g], slot[b])
    }
}

impl TryFrom<u8> for ChannelOrder {
    type Error = u8;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(ChannelOrder::Rgb),
            1 => Ok(ChannelOrder::Grb),
            other => Err(other),
        }
    }
}

/// Pattern validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// No colors provided.
    Empty,

    /// More colors than a pattern can hold.
    CapacityExceeded,
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::Empty => write!(f, "pattern must have at least one color"),
            PatternError::CapacityExceeded => {
                write!(f, "pattern capacity of {} colors exceeded", MAX_PIXELS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}

/// Misuse reported by the strict (`try_*`) frame buffer methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// Pixel index outside the active window.
    PixelOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pixels in the active window.
        len: usize,
    },

    /// Pixel count outside the supported range.
    InvalidPixelCount {
        /// Requested pixel count.
        requested: usize,
    },

    /// Start offset does not leave at least one active pixel.
    StartOffsetOutOfRange {
        /// Requested offset.
        offset: usize,
        /// Current pixel count.
        pixel_count: usize,
    },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::PixelOutOfRange { index, len } => {
                write!(f, "pixel {} is outside the active window of {} pixels", index, len)
            }
            BoardError::InvalidPixelCount { requested } => {
                write!(
                    f,
                    "pixel count {} must be between {} and {}",
                    requested, MIN_PIXELS, MAX_PIXELS
                )
            }
            BoardError::StartOffsetOutOfRange { offset, pixel_count } => {
                write!(
                    f,
                    "start offset {} leaves no active pixels on a board of {}",
                    offset, pixel_count
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
