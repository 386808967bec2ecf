use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::{Easing, FrameHandle, FrameScheduler, Tween};

/// Invoked once when a run reaches its final value. Never invoked for a cancelled run.
pub type OnComplete = Box<dyn FnOnce()>;

/// Timing of one animation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

// Pending frames own the run, so the run only borrows its scheduler.
struct RunState {
    scheduler: Weak<dyn FrameScheduler>,
    cancelled: Cell<bool>,
    finished: Cell<bool>,
    frame: Cell<Option<FrameHandle>>,
}

/// A handle to an in-flight (or ended) animation run.
///
/// Clones refer to the same run.
#[derive(Clone)]
pub struct RunHandle {
    state: Rc<RunState>,
}

impl RunHandle {
    /// Cancels the run.
    ///
    /// The pending frame is withdrawn from the scheduler; if the scheduler still delivers it,
    /// the frame exits before writing anything. Cancelling an ended run is a no-op.
    pub fn cancel(&self) {
        if self.state.finished.get() || self.state.cancelled.replace(true) {
            return;
        }
        if let (Some(handle), Some(scheduler)) =
            (self.state.frame.take(), self.state.scheduler.upgrade())
        {
            scheduler.cancel_frame(handle);
        }
        sdebug!("RunHandle::cancel");
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished.get()
    }

    pub fn is_active(&self) -> bool {
        !self.is_cancelled() && !self.is_finished()
    }
}

impl fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHandle")
            .field("cancelled", &self.state.cancelled.get())
            .field("finished", &self.state.finished.get())
            .field("frame", &self.state.frame.get())
            .finish()
    }
}

struct Driver<B, A> {
    state: Rc<RunState>,
    spec: AnimationSpec,
    begin: Option<B>,
    tween: Option<Tween>,
    last_ms: u64,
    apply: A,
    on_complete: Option<OnComplete>,
}

impl<B, A> Driver<B, A>
where
    B: FnOnce() -> (f64, f64) + 'static,
    A: FnMut(f64) + 'static,
{
    fn schedule(self) {
        let Some(scheduler) = self.state.scheduler.upgrade() else {
            sdebug!("run dropped: scheduler is gone");
            return;
        };
        let state = Rc::clone(&self.state);
        let handle = scheduler.schedule_frame(Box::new(move |now_ms| self.frame(now_ms)));
        state.frame.set(Some(handle));
    }

    fn frame(mut self, now_ms: u64) {
        self.state.frame.set(None);
        if self.state.cancelled.get() {
            strace!(now_ms, "run frame skipped: cancelled");
            return;
        }

        // Never rewind: a stale timestamp is treated as the latest one seen.
        let now_ms = now_ms.max(self.last_ms);
        self.last_ms = now_ms;

        let tween = match (self.tween, self.begin.take()) {
            (Some(tween), _) => tween,
            (None, Some(begin)) => {
                let (from, distance) = begin();
                let tween = Tween::new(
                    from,
                    from + distance,
                    now_ms,
                    self.spec.duration_ms,
                    self.spec.easing,
                );
                strace!(from, distance, start_ms = now_ms, "run started");
                self.tween = Some(tween);
                tween
            }
            (None, None) => return,
        };

        let done = tween.is_done(now_ms);
        (self.apply)(tween.sample(now_ms));

        // `apply` may re-enter and cancel this run.
        if self.state.cancelled.get() {
            return;
        }
        if done {
            self.state.finished.set(true);
            strace!(now_ms, to = tween.to, "run finished");
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
            return;
        }
        self.schedule();
    }
}

/// Starts an eased animation driven by `scheduler`.
///
/// On the first processed frame `begin` is called and returns `(start, distance)`; the run
/// then applies `start + distance * eased` once per frame and lands exactly on
/// `start + distance` on the first frame at or after `spec.duration_ms`. A zero duration
/// jumps to the final value on the first frame.
///
/// The run does not keep `scheduler` alive; once the caller drops it, the run stops.
pub fn animate<B, A>(
    scheduler: Rc<dyn FrameScheduler>,
    spec: AnimationSpec,
    begin: B,
    apply: A,
    on_complete: Option<OnComplete>,
) -> RunHandle
where
    B: FnOnce() -> (f64, f64) + 'static,
    A: FnMut(f64) + 'static,
{
    let state = Rc::new(RunState {
        scheduler: Rc::downgrade(&scheduler),
        cancelled: Cell::new(false),
        finished: Cell::new(false),
        frame: Cell::new(None),
    });
    let handle = RunHandle {
        state: Rc::clone(&state),
    };
    Driver {
        state,
        spec,
        begin: Some(begin),
        tween: None,
        last_ms: 0,
        apply,
        on_complete,
    }
    .schedule();
    handle
}

/// Owns at most one run. Storing a new run cancels the previous one.
#[derive(Debug, Default)]
pub struct RunSlot {
    run: RefCell<Option<RunHandle>>,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, run: RunHandle) {
        let prev = self.run.borrow_mut().take();
        if let Some(prev) = prev {
            prev.cancel();
        }
        *self.run.borrow_mut() = Some(run);
    }

    /// Cancels and forgets the current run. Returns `true` if it was still active.
    pub fn cancel(&self) -> bool {
        let Some(run) = self.run.borrow_mut().take() else {
            return false;
        };
        let was_active = run.is_active();
        run.cancel();
        was_active
    }

    pub fn current(&self) -> Option<RunHandle> {
        self.run.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.run.borrow().as_ref().is_some_and(RunHandle::is_active)
    }
}
