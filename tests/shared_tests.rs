//! Integration tests for SharedFrameBuffer

mod common;
use common::*;

use brightboard::{
    AnimationError, BLACK, Color, Delay, FadeAnimation, FadeOutcome, NeverCancel, Pattern, RED,
    ServiceTiming, SharedFrameBuffer, WHITE,
};
use core::sync::atomic::{AtomicBool, Ordering};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex, RawMutex};

/// Delay that resizes the shared board on its first pause
struct ResizingDelay<'a, M: RawMutex> {
    shared: &'a SharedFrameBuffer<M>,
    pauses: usize,
}

impl<M: RawMutex> Delay<TestDuration> for ResizingDelay<'_, M> {
    fn delay(&mut self, _duration: TestDuration) {
        self.pauses += 1;
        if self.pauses == 1 {
            self.shared.lock(|board| board.resize(10));
        }
    }
}

/// Delay that moves the start offset on its first pause
struct OffsetDelay<'a, M: RawMutex> {
    shared: &'a SharedFrameBuffer<M>,
}

impl<M: RawMutex> Delay<TestDuration> for OffsetDelay<'_, M> {
    fn delay(&mut self, _duration: TestDuration) {
        self.shared.lock(|board| {
            if board.start_offset() == 0 {
                board.set_start_offset(1);
                board.set_all(RED);
            }
        });
    }
}

/// Delay that paints a pixel through the shared handle between steps
struct PaintingDelay<'a, M: RawMutex> {
    shared: &'a SharedFrameBuffer<M>,
    flag: &'a AtomicBool,
}

impl<M: RawMutex> Delay<TestDuration> for PaintingDelay<'_, M> {
    fn delay(&mut self, _duration: TestDuration) {
        self.shared.lock(|board| board.set_pixel(0, RED));
        self.flag.store(true, Ordering::Relaxed);
    }
}

#[test]
fn lock_reads_and_writes_board() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(4));
    shared.lock(|board| board.set_pixel(2, RED));

    assert_eq!(shared.pixel(2), RED);
    assert_eq!(shared.pixel(9), BLACK);
    assert_eq!(shared.config().pixel_count, 4);

    let board = shared.into_inner();
    assert_eq!(board.pixel(2), RED);
}

#[test]
fn show_transmits_current_buffer() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(2));
    shared.lock(|board| board.set_all(WHITE));

    let mut transport = MockTransport::new();
    shared.show(&mut transport);

    assert_eq!(transport.last().unwrap().bytes, vec![255; 6]);
    assert_eq!(transport.last().unwrap().pixel_count, 2);
}

#[test]
fn concurrent_writers_all_land() {
    let shared = SharedFrameBuffer::<CriticalSectionRawMutex>::new(board(8));

    std::thread::scope(|scope| {
        for i in 0..8usize {
            let shared = &shared;
            scope.spawn(move || {
                for round in 0..50u8 {
                    shared.lock(|board| board.set_pixel(i, Color::rgb(i as u8, round, 1)));
                }
            });
        }
    });

    for i in 0..8usize {
        assert_eq!(shared.pixel(i), Color::rgb(i as u8, 49, 1));
    }
}

#[test]
fn reader_sees_consistent_fills() {
    let shared = SharedFrameBuffer::<CriticalSectionRawMutex>::new(board(6));

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..200u32 {
                let color = if round % 2 == 0 { RED } else { WHITE };
                shared.lock(|board| board.set_all(color));
            }
        });
        scope.spawn(|| {
            for _ in 0..200 {
                let colors = shared.lock(|board| pixels(board));
                assert!(colors.iter().all(|&c| c == colors[0]));
            }
        });
    });
}

#[test]
fn shared_fade_completes() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(3));
    let mut transport = MockTransport::new();
    let mut delay = MockDelay::new();

    let outcome = shared.fade_to(
        &mut transport,
        &mut delay,
        &Pattern::solid(WHITE),
        12,
        TestDuration(2),
        &NeverCancel,
    );

    assert_eq!(outcome, FadeOutcome::Completed);
    assert_eq!(transport.frames().len(), 12);
    assert_eq!(delay.total_millis(), 24);
    assert_eq!(shared.into_inner().bytes(), &[255; 9]);
}

#[test]
fn shared_fade_aborts_when_board_is_resized() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(3));
    let mut transport = MockTransport::new();
    let mut delay = ResizingDelay {
        shared: &shared,
        pauses: 0,
    };

    let outcome = shared.fade_to(
        &mut transport,
        &mut delay,
        &Pattern::solid(WHITE),
        12,
        TestDuration(2),
        &NeverCancel,
    );

    assert_eq!(outcome, FadeOutcome::Aborted(AnimationError::BufferResized));
    assert_eq!(transport.frames().len(), 1);
    assert_eq!(shared.config().pixel_count, 10);
}

#[test]
fn shared_fade_aborts_when_window_moves() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(3));
    let mut transport = MockTransport::new();
    let mut delay = OffsetDelay { shared: &shared };

    let outcome = shared.fade_to(
        &mut transport,
        &mut delay,
        &Pattern::solid(WHITE),
        12,
        TestDuration(2),
        &NeverCancel,
    );

    assert_eq!(outcome, FadeOutcome::Aborted(AnimationError::WindowMoved));
    assert_eq!(transport.frames().len(), 1);
    assert_eq!(shared.pixel(0), RED);
    assert_eq!(shared.pixel(1), RED);
}

#[test]
fn other_callers_write_between_fade_steps() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(3));
    let flag = AtomicBool::new(false);
    let mut transport = MockTransport::new();
    let mut delay = PaintingDelay {
        shared: &shared,
        flag: &flag,
    };

    let outcome = shared.fade_to(
        &mut transport,
        &mut delay,
        &Pattern::solid(WHITE),
        12,
        TestDuration(2),
        &flag,
    );

    assert_eq!(outcome, FadeOutcome::Cancelled { steps_applied: 1 });
    assert_eq!(shared.pixel(0), RED);
}

#[test]
fn advance_fade_under_lock() {
    let shared = SharedFrameBuffer::<NoopRawMutex>::new(board(2));
    let mut fade = FadeAnimation::new();
    shared.lock(|board| fade.start(board, &Pattern::solid(WHITE), 2, TestDuration(4)));

    assert_eq!(
        shared.advance_fade(&mut fade),
        Ok(ServiceTiming::Delay(TestDuration(4)))
    );
    assert_eq!(shared.advance_fade(&mut fade), Ok(ServiceTiming::Complete));
    assert_eq!(shared.pixel(1), WHITE);
    assert_eq!(
        shared.advance_fade(&mut fade),
        Err(AnimationError::NotRunning)
    );
}
