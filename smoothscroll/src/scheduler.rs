//! The display-refresh scheduler seam.
//!
//! Animation runs never loop or sleep. Each processed frame schedules at most one follow-up
//! callback through a [`FrameScheduler`], which a host maps onto its refresh signal
//! (`requestAnimationFrame`, a vsync callback, a TUI tick). Tests and headless hosts use
//! [`ManualScheduler`] to drive frames deterministically.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// A frame callback. The argument is the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(u64)>;

/// Identifies a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Schedules `callback` for the next frame.
    fn schedule_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Withdraws a pending callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// A deterministic scheduler: frames run only when [`ManualScheduler::run_frame`] is called.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Runs every callback that was pending when the call started.
    ///
    /// Callbacks scheduled while the frame runs are queued for the next frame. Returns how
    /// many callbacks ran.
    pub fn run_frame(&self, now_ms: u64) -> usize {
        let batch = core::mem::take(&mut *self.pending.borrow_mut());
        let ran = batch.len();
        for (_, callback) in batch {
            callback(now_ms);
        }
        ran
    }

    /// Runs frames every `step_ms` starting at `start_ms` until no callback is pending or
    /// `max_frames` frames ran. Returns the timestamp of the last frame that ran.
    pub fn run_until_idle(&self, start_ms: u64, step_ms: u64, max_frames: usize) -> u64 {
        let mut now_ms = start_ms;
        let mut last = start_ms;
        for _ in 0..max_frames {
            if self.is_idle() {
                break;
            }
            self.run_frame(now_ms);
            last = now_ms;
            now_ms = now_ms.saturating_add(step_ms);
        }
        last
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl core::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("next_id", &self.next_id.get())
            .field("pending", &self.pending())
            .finish()
    }
}
