//! Hand-off point between the frame buffer and the physical LEDs.

/// Trait for abstracting the LED transport (SPI, bit-banging, simulator, ...).
///
/// Implement this for whatever moves bytes to your pixels. The board calls it with
/// the finished buffer; there is no acknowledgment channel.
pub trait Transport {
    /// Transmits `buffer` for `pixel_count` pixels.
    ///
    /// `buffer` holds three bytes per pixel in the board's channel order, already
    /// brightness-scaled. `gamma` asks the transport to apply perceptual correction;
    /// the board never applies it itself. Handle hardware errors internally - this
    /// method cannot fail.
    fn transmit(&mut self, buffer: &[u8], pixel_count: usize, gamma: bool);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transmit(&mut self, buffer: &[u8], pixel_count: usize, gamma: bool) {
        (**self).transmit(buffer, pixel_count, gamma);
    }
}
