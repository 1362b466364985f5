//! Shared test infrastructure for brightboard integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use brightboard::{BoardConfig, Color, Delay, FrameBuffer, TimeDuration, Transport};
use rand_core::RngCore;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock delay that records every pause instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    pub pauses: Vec<TestDuration>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_millis(&self) -> u64 {
        self.pauses.iter().map(|d| d.0).sum()
    }
}

impl Delay<TestDuration> for MockDelay {
    fn delay(&mut self, duration: TestDuration) {
        self.pauses.push(duration);
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

/// A single call to `Transport::transmit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub bytes: Vec<u8>,
    pub pixel_count: usize,
    pub gamma: bool,
}

/// Mock transport that records every frame it is handed
#[derive(Default)]
pub struct MockTransport {
    frames: Vec<Transmission>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Transmission] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Transmission> {
        self.frames.last()
    }
}

impl Transport for MockTransport {
    fn transmit(&mut self, buffer: &[u8], pixel_count: usize, gamma: bool) {
        self.frames.push(Transmission {
            bytes: buffer.to_vec(),
            pixel_count,
            gamma,
        });
    }
}

// ============================================================================
// Mock Random Source
// ============================================================================

/// Deterministic xorshift generator seeded by the test
pub struct SeededRng(pub u32);

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next_u32() as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Board with the given number of pixels and otherwise default settings
pub fn board(pixels: usize) -> FrameBuffer {
    FrameBuffer::new(BoardConfig::new().with_pixel_count(pixels))
}

/// Reads every active pixel of a board
pub fn pixels(board: &FrameBuffer) -> Vec<Color> {
    (0..board.len()).map(|i| board.pixel(i)).collect()
}
