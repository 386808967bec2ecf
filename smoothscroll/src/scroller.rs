use alloc::rc::Rc;

use crate::{AnimationSpec, FrameScheduler, RunHandle, ScrollHost, ScrollOptions, animate};

/// Animates a host's scroll offset toward an element or a position.
///
/// Runs are fire-and-forget: each call schedules its first frame and returns. Ownership of
/// "one active run" belongs to the caller (see [`crate::RunSlot`]).
#[derive(Clone)]
pub struct SmoothScroller {
    host: Rc<dyn ScrollHost>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl SmoothScroller {
    pub fn new(host: Rc<dyn ScrollHost>, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { host, scheduler }
    }

    pub fn host(&self) -> &Rc<dyn ScrollHost> {
        &self.host
    }

    pub fn scheduler(&self) -> &Rc<dyn FrameScheduler> {
        &self.scheduler
    }

    /// Scrolls to the element identified by `target_id`.
    ///
    /// Returns `None` without scheduling anything when the element does not exist: a link may
    /// point at an anchor that is not rendered yet.
    pub fn smooth_scroll_to(&self, target_id: &str, options: ScrollOptions) -> Option<RunHandle> {
        let Some(bounds) = self.host.element_bounds(target_id) else {
            sdebug!(target_id, "smooth_scroll_to: target not found");
            return None;
        };
        Some(self.scroll_to_offset(bounds.start, options))
    }

    /// Scrolls to `position + options.offset`.
    ///
    /// The start offset is read on the first frame, not at call time.
    pub fn scroll_to_offset(&self, position: f64, options: ScrollOptions) -> RunHandle {
        let ScrollOptions {
            duration_ms,
            easing,
            offset,
            on_complete,
        } = options;
        sdebug!(position, offset, duration_ms, easing = easing.name(), "scroll_to_offset");

        let read = Rc::clone(&self.host);
        let write = Rc::clone(&self.host);
        animate(
            Rc::clone(&self.scheduler),
            AnimationSpec::new(duration_ms, easing),
            move || {
                let start = read.scroll_offset();
                (start, position - start + offset)
            },
            move |value| write.set_scroll_offset(value),
            on_complete,
        )
    }
}

impl core::fmt::Debug for SmoothScroller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SmoothScroller")
            .field("scroll_offset", &self.host.scroll_offset())
            .finish_non_exhaustive()
    }
}
