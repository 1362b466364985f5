//! Repeating color patterns.
//!
//! A [`Pattern`] is painted into a run of pixel slots by [`Pattern::fill_buffer`],
//! which also applies brightness and channel order. Fades use
//! [`Pattern::extended_to`] to stretch a short pattern over the whole window first.

use crate::color::{Color, scale_channel};
use crate::types::{ChannelOrder, MAX_PIXELS, PatternError, STRIDE};
use heapless::Vec;

/// An ordered, repeating list of colors used to paint a run of pixels.
///
/// A pattern always holds at least one color. When it is shorter than the region it
/// paints, it repeats from the start; when it is longer, the extra colors are unused.
///
/// Patterns copy the colors they are built from and never alias caller data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    colors: Vec<Color, MAX_PIXELS>,
}

impl Pattern {
    /// Creates a new pattern builder.
    pub fn builder() -> PatternBuilder {
        PatternBuilder::new()
    }

    /// Creates a pattern from a list of colors.
    ///
    /// # Errors
    /// * `Empty` - No colors were given
    /// * `CapacityExceeded` - More than 64 colors were given
    pub fn new(colors: &[Color]) -> Result<Self, PatternError> {
        if colors.is_empty() {
            return Err(PatternError::Empty);
        }

        let colors = Vec::from_slice(colors).map_err(|_| PatternError::CapacityExceeded)?;
        Ok(Self { colors })
    }

    /// Creates a pattern from packed `0x00RRGGBB` values.
    pub fn from_packed(values: &[u32]) -> Result<Self, PatternError> {
        let mut builder = PatternBuilder::new();
        for &value in values {
            builder = builder.color(Color::from_packed(value))?;
        }
        builder.build()
    }

    /// Creates a single-color pattern.
    pub fn solid(color: Color) -> Self {
        Self {
            colors: Vec::from_array([color]),
        }
    }

    /// Returns the number of colors in the pattern.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a pattern holds at least one color.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the color painted at `index`, repeating the pattern cyclically.
    #[inline]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Returns a copy grown to `len` colors by repeating the pattern.
    ///
    /// Never shortens: a pattern already `len` colors or longer is returned as is.
    /// Growth stops at the 64-color capacity.
    pub fn extended_to(&self, len: usize) -> Pattern {
        let mut extended = self.clone();
        let target = len.min(MAX_PIXELS);
        let mut index = 0;
        while extended.colors.len() < target {
            if extended.colors.push(self.colors[index]).is_err() {
                break;
            }
            index = (index + 1) % self.colors.len();
        }
        extended
    }

    /// Paints every pixel slot of `buf` with this pattern.
    ///
    /// Slot `i` receives `color_at(i)`, dimmed by `brightness` when it is below 255,
    /// with its channels laid out by `order`. Trailing bytes that do not make up a
    /// whole pixel are left untouched.
    pub fn fill_buffer(&self, buf: &mut [u8], order: ChannelOrder, brightness: u8) {
        for (i, slot) in buf.chunks_exact_mut(STRIDE).enumerate() {
            let color = self.color_at(i);
            order.write(
                slot,
                scale_channel(color.red(), brightness),
                scale_channel(color.green(), brightness),
                scale_channel(color.blue(), brightness),
            );
        }
    }
}

/// Builder for constructing validated patterns.
#[derive(Debug, Default)]
pub struct PatternBuilder {
    colors: Vec<Color, MAX_PIXELS>,
}

impl PatternBuilder {
    /// Creates a new empty pattern builder.
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Appends a color.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the pattern already holds 64 colors.
    pub fn color(mut self, color: Color) -> Result<Self, PatternError> {
        self.colors
            .push(color)
            .map_err(|_| PatternError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the pattern.
    ///
    /// # Errors
    /// Returns `Empty` if no colors were added.
    pub fn build(self) -> Result<Pattern, PatternError> {
        if self.colors.is_empty() {
            return Err(PatternError::Empty);
        }

        Ok(Pattern {
            colors: self.colors,
        })
    }
}
