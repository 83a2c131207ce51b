//! Cross-thread run flags
//!
//! The only mutable state shared between the listener thread and a stroke
//! thread: whether a stroke is in flight, and whether the process should
//! keep running. Each flag is an independent atomic; the stroke slot is
//! handed out as an RAII guard so it is released on every exit path,
//! including a panic on the stroke thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct RunState {
    stroke_in_flight: AtomicBool,
    keep_running: AtomicBool,
}

impl RunState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            stroke_in_flight: AtomicBool::new(false),
            keep_running: AtomicBool::new(true),
        })
    }

    /// Try to claim the single stroke slot. Returns None while a stroke is
    /// already in flight; the returned guard frees the slot when dropped.
    pub fn try_begin_stroke(self: &Arc<Self>) -> Option<StrokeSlot> {
        if self.stroke_in_flight.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(StrokeSlot(Arc::clone(self)))
        }
    }

    pub fn stroke_in_flight(&self) -> bool {
        self.stroke_in_flight.load(Ordering::SeqCst)
    }

    pub fn keep_running(&self) -> bool {
        self.keep_running.load(Ordering::SeqCst)
    }

    /// Stop future strokes and let an in-flight stroke wind down at its
    /// next step boundary.
    pub fn request_shutdown(&self) {
        self.keep_running.store(false, Ordering::SeqCst);
    }
}

/// Exclusive claim on the stroke slot, released on drop
#[derive(Debug)]
pub struct StrokeSlot(Arc<RunState>);

impl Drop for StrokeSlot {
    fn drop(&mut self) {
        self.0.stroke_in_flight.store(false, Ordering::SeqCst);
    }
}
