//! 24-bit color codec.
//!
//! Colors travel through the crate as packed `0x00RRGGBB` integers wrapped in
//! [`Color`]. This module packs and unpacks channels, converts HSL to RGB, blends two
//! colors, and applies or undoes the board's brightness scaling.
//!
//! Conversions to and from `palette::Srgb` are provided for interop with code that
//! works in the `palette` color types.

use palette::Srgb;
use rand_core::RngCore;

/// A 24-bit RGB color packed as `0x00RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u32);

impl Color {
    /// Creates a color from three 8-bit channels.
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Creates a color from a packed integer. Bits above 23 are discarded.
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        Color(value & 0x00FF_FFFF)
    }

    /// Returns the packed `0x00RRGGBB` value.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns this color dimmed by `brightness` (255 leaves it unchanged).
    #[inline]
    pub fn scaled(self, brightness: u8) -> Self {
        Color::rgb(
            scale_channel(self.red(), brightness),
            scale_channel(self.green(), brightness),
            scale_channel(self.blue(), brightness),
        )
    }

    /// Converts a floating point `palette` color, rounding each channel to 8 bits.
    pub fn from_srgb(color: Srgb<f32>) -> Self {
        Color::from(color.into_format::<u8>())
    }

    /// Converts to a floating point `palette` color (0.0-1.0 per channel).
    pub fn into_srgb(self) -> Srgb<f32> {
        Srgb::<u8>::from(self).into_format::<f32>()
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::from_packed(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.packed()
    }
}

impl From<Srgb<u8>> for Color {
    fn from(color: Srgb<u8>) -> Self {
        Color::rgb(color.red, color.green, color.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.red(), color.green(), color.blue())
    }
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const CYAN: Color = Color::rgb(0, 255, 255);
pub const MAGENTA: Color = Color::rgb(255, 0, 255);

/// Packs three channel values into a color.
///
/// Each input is masked to its low 8 bits rather than clamped, so `256` packs as `0`
/// and `-1` packs as `255`.
#[inline]
pub const fn pack(red: i32, green: i32, blue: i32) -> Color {
    Color((((red & 0xFF) << 16) | ((green & 0xFF) << 8) | (blue & 0xFF)) as u32)
}

#[inline]
pub const fn unpack_red(color: Color) -> u8 {
    color.red()
}

#[inline]
pub const fn unpack_green(color: Color) -> u8 {
    color.green()
}

#[inline]
pub const fn unpack_blue(color: Color) -> u8 {
    color.blue()
}

/// Scales one channel by a brightness factor: `(channel * brightness) >> 8`.
///
/// Full brightness (255) returns the channel untouched.
#[inline]
pub const fn scale_channel(channel: u8, brightness: u8) -> u8 {
    if brightness == u8::MAX {
        channel
    } else {
        ((channel as u16 * brightness as u16) >> 8) as u8
    }
}

/// Interpolates one channel: `(a * (255 - alpha) + b * alpha) >> 8`.
///
/// The endpoints are exact: alpha 0 yields `a` and alpha 255 yields `b`.
#[inline]
pub const fn blend_channel(a: u8, alpha: u8, b: u8) -> u8 {
    match alpha {
        0 => a,
        255 => b,
        _ => {
            let inverse = 255 - alpha as u16;
            ((a as u16 * inverse + b as u16 * alpha as u16) >> 8) as u8
        }
    }
}

/// Blends `color` towards `other` by `alpha` (clamped to 0-255).
pub fn blend(color: Color, alpha: i32, other: Color) -> Color {
    let alpha = alpha.clamp(0, 255) as u8;
    Color::rgb(
        blend_channel(color.red(), alpha, other.red()),
        blend_channel(color.green(), alpha, other.green()),
        blend_channel(color.blue(), alpha, other.blue()),
    )
}

/// Dims a color by `brightness` (clamped to 0-255).
pub fn scale(color: Color, brightness: i32) -> Color {
    color.scaled(brightness.clamp(0, 255) as u8)
}

/// Undoes brightness scaling on a color read back from the buffer.
///
/// Each channel is multiplied by `256 / applied` and clamped to 255. Scaling with a
/// zero brightness erased every channel, so nonzero channels saturate and zero
/// channels stay zero.
pub fn restore_full_brightness(color: Color, applied: u8) -> Color {
    if applied == u8::MAX {
        return color;
    }

    let restore = |channel: u8| -> u8 {
        if channel == 0 {
            return 0;
        }
        match (u32::from(channel) << 8).checked_div(u32::from(applied)) {
            Some(value) => value.min(255) as u8,
            None => 255,
        }
    };

    Color::rgb(
        restore(color.red()),
        restore(color.green()),
        restore(color.blue()),
    )
}

/// Converts hue / saturation / luminosity to RGB.
///
/// * `hue` - 0 to 255; every 42 steps is one sector of the color hexagon, so 0 is
///   red, 42 yellow, 84 green, 126 cyan, 168 blue, 210 magenta and 252 red again.
///   Negative hues wrap.
/// * `saturation` - 0 to 99, where 99 is fully saturated.
/// * `luminosity` - 0 to 99, where 50 is the pure hue.
pub fn hsl_to_rgb(hue: i32, saturation: i32, luminosity: i32) -> Color {
    let mut h = f64::from(hue) / 42.0;
    if h < 0.0 {
        h = 6.0 - (-h % 6.0);
    }
    h %= 6.0;

    let s = (f64::from(saturation) / 99.0).clamp(0.0, 1.0);
    let l = (f64::from(luminosity) / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - libm::fabs(2.0 * l - 1.0)) * s;
    let x = c * (1.0 - libm::fabs(h % 2.0 - 1.0));

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = l - c / 2.0;
    let channel = |v: f64| libm::round((v + m) * 255.0) as i32;
    pack(channel(r), channel(g), channel(b))
}

/// Picks a random fully saturated color at mid luminosity.
///
/// The hue is drawn from `0..360` and goes through [`hsl_to_rgb`] like any other hue,
/// so values past 252 wrap back around the color hexagon.
pub fn random_color<R: RngCore + ?Sized>(rng: &mut R) -> Color {
    let hue = (rng.next_u32() % 360) as i32;
    hsl_to_rgb(hue, 99, 50)
}
