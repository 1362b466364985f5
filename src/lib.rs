#![cfg_attr(not(feature = "std"), no_std)]

//! Pixel buffer and color compositing engine for addressable RGB LED boards.
//!
//! # Core Concepts
//!
//! - **`Color`**: A 24-bit `0x00RRGGBB` value with packing, HSL conversion and blending
//! - **`Pattern`**: An ordered list of colors that repeats to fill any number of pixels
//! - **`FrameBuffer`**: One board's pixel bytes plus its channel order, brightness,
//!   pixel count, start offset and gamma flag
//! - **`gradient` / `fade_all`**: Stateless painting operations on a frame buffer
//! - **`rotate` / `shift`**: Move the active window's pixels with or without wrap-around
//! - **`FadeAnimation`**: Step-by-step fade from the current buffer to a pattern
//! - **`Transport`**: Trait to implement for whatever sends the buffer to the LEDs
//! - **`SharedFrameBuffer`**: A frame buffer behind a mutex for multiple callers
//!
//! Colors are brightness-scaled and laid out in channel order as they are written, so
//! the buffer can be handed to the transport without further processing.

#[macro_use]
mod fmt;

pub mod board;
pub mod color;
pub mod command;
pub mod compositor;
pub mod config;
pub mod fade;
pub mod pattern;
pub mod shared;
pub mod time;
pub mod transform;
pub mod transport;
pub mod types;

pub use board::FrameBuffer;
pub use color::{
    BLACK, BLUE, CYAN, Color, GREEN, MAGENTA, RED, WHITE, YELLOW, blend, hsl_to_rgb, pack,
    random_color, restore_full_brightness, scale, unpack_blue, unpack_green, unpack_red,
};
pub use command::BoardAction;
pub use compositor::{fade_all, fill, gradient};
pub use config::{BoardConfig, DEFAULT_BRIGHTNESS, DEFAULT_PIXEL_COUNT};
pub use fade::{
    AnimationError, AnimationState, CancelToken, FADE_STEPS, FadeAnimation, FadeOutcome,
    FadeProgress, MAX_SPEED, NeverCancel, ServiceTiming, fade_to, fade_to_cancellable,
    fade_to_pattern, step_delay_for_speed,
};
pub use pattern::{Pattern, PatternBuilder};
pub use shared::SharedFrameBuffer;
pub use time::{Delay, TimeDuration};
pub use transform::{rotate, shift};
pub use transport::Transport;
pub use types::{
    BoardError, ChannelOrder, MAX_BUFFER_LEN, MAX_PIXELS, MIN_PIXELS, PatternError,
    PixelBytes, STRIDE,
};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;
