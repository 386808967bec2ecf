use alloc::rc::Rc;

use smoothscroll::{Easing, RunHandle, RunSlot, ScrollOptions, SmoothScroller};

use crate::{ClickEvent, EventBus, Outcome, Subscription, anchor_target};

/// Offset applied to every anchor scroll, leaving room for a fixed header.
pub const HEADER_OFFSET: f64 = -80.0;

/// Curve used for every anchor scroll.
pub const ANCHOR_EASING: Easing = Easing::EaseInOutCubic;

/// Intercepts in-page anchor clicks and turns them into smooth scrolls.
///
/// Settings are fixed ([`HEADER_OFFSET`], [`ANCHOR_EASING`], default duration). At most one
/// scroll is in flight: a newer click cancels the previous run.
#[derive(Debug)]
pub struct ClickTrigger {
    subscription: Subscription,
    active: Rc<RunSlot>,
}

/// Installs the anchor-click interceptor on `clicks`.
///
/// The returned trigger keeps the interceptor alive; call [`ClickTrigger::teardown`] or drop
/// it to remove it.
pub fn init_smooth_scrolling(
    clicks: &EventBus<ClickEvent>,
    scroller: SmoothScroller,
) -> ClickTrigger {
    let active = Rc::new(RunSlot::new());
    let slot = Rc::clone(&active);
    let subscription = clicks.subscribe(move |event: &ClickEvent| {
        let Some(id) = event.href.as_deref().and_then(anchor_target) else {
            return Outcome::Ignored;
        };
        let options = ScrollOptions::new()
            .with_offset(HEADER_OFFSET)
            .with_easing(ANCHOR_EASING);
        match scroller.smooth_scroll_to(id, options) {
            Some(run) => slot.replace(run),
            None => {
                tdebug!(id, "anchor click: no such element");
            }
        }
        Outcome::PreventDefault
    });
    tdebug!("init_smooth_scrolling");
    ClickTrigger {
        subscription,
        active,
    }
}

impl ClickTrigger {
    /// Removes the interceptor and cancels the in-flight scroll, if any.
    ///
    /// Idempotent.
    pub fn teardown(&mut self) {
        self.subscription.unsubscribe();
        self.active.cancel();
    }

    pub fn is_installed(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn active_run(&self) -> Option<RunHandle> {
        self.active.current().filter(RunHandle::is_active)
    }
}

impl Drop for ClickTrigger {
    fn drop(&mut self) {
        self.teardown();
    }
}
