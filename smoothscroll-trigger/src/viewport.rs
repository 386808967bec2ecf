//! Viewport triggers: react when an element crosses boundaries relative to the viewport.
//!
//! A trigger tracks two scroll offsets computed from its element's geometry, `start` and
//! `end`. Moving the scroll offset across them produces four edge events:
//!
//! | event       | crossing                    |
//! |-------------|-----------------------------|
//! | `Enter`     | `start`, scrolling forward  |
//! | `Leave`     | `end`, scrolling forward    |
//! | `EnterBack` | `end`, scrolling backward   |
//! | `LeaveBack` | `start`, scrolling backward |
//!
//! The trigger is active between `start` (inclusive) and `end` (exclusive).

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smoothscroll::{
    AnimationSpec, Bounds, Easing, FrameScheduler, RunHandle, RunSlot, ScrollHost, Timeline,
    animate,
};

use crate::{
    EventBus, Outcome, ScrollEvent, Subscription, ToggleAction, ToggleActions, TriggerPosition,
};

/// Edge callback.
pub type TriggerCallback = Rc<dyn Fn()>;

/// Builds the timeline a trigger controls. Called once, when the trigger binds.
pub type TimelineBuilder = Box<dyn FnOnce() -> Timeline>;

/// Curve used while a smoothed scrub catches up with the scroll position.
pub const SCRUB_EASING: Easing = Easing::EaseOutCubic;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEdge {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// How scroll progress maps onto the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scrub {
    /// Edge events drive the timeline through [`ToggleActions`].
    #[default]
    Off,
    /// Timeline progress equals scroll progress.
    Instant,
    /// Timeline progress follows scroll progress, catching up over the given milliseconds.
    Smooth(u64),
}

/// The scroll offsets at which a trigger starts and ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundaries {
    pub start: f64,
    pub end: f64,
}

impl Boundaries {
    /// Linear progress of `offset` between start and end, clamped to `[0, 1]`.
    pub fn progress(&self, offset: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Edge events produced by moving from `prev` to `cur`, in the order they happen.
    ///
    /// `prev = None` is the first observation: it behaves like a forward move from far
    /// before the trigger.
    pub fn crossings(&self, prev: Option<f64>, cur: f64) -> Vec<TriggerEdge> {
        let mut edges = Vec::new();
        let prev = prev.unwrap_or(f64::NEG_INFINITY);
        if prev < cur {
            if prev < self.start && self.start <= cur {
                edges.push(TriggerEdge::Enter);
            }
            if prev < self.end && self.end <= cur {
                edges.push(TriggerEdge::Leave);
            }
        } else if cur < prev {
            if cur < self.end && self.end <= prev {
                edges.push(TriggerEdge::EnterBack);
            }
            if cur < self.start && self.start <= prev {
                edges.push(TriggerEdge::LeaveBack);
            }
        }
        // Inverted boundaries: the end is passed first in either direction.
        if self.end < self.start {
            edges.reverse();
        }
        edges
    }
}

/// Options for [`use_scroll_animation`].
pub struct ScrollAnimationOptions {
    /// Identifier of the element whose geometry defines the boundaries.
    pub trigger: Option<String>,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    pub scrub: Scrub,
    /// Reports the element as pinned while the trigger is active.
    pub pin: bool,
    /// Logs the computed boundaries (with `feature = "tracing"`).
    pub markers: bool,
    pub toggle_actions: ToggleActions,
    pub animation: Option<TimelineBuilder>,
    pub on_enter: Option<TriggerCallback>,
    pub on_leave: Option<TriggerCallback>,
    pub on_enter_back: Option<TriggerCallback>,
    pub on_leave_back: Option<TriggerCallback>,
}

impl Default for ScrollAnimationOptions {
    fn default() -> Self {
        Self {
            trigger: None,
            start: TriggerPosition::default_start(),
            end: TriggerPosition::default_end(),
            scrub: Scrub::default(),
            pin: false,
            markers: false,
            toggle_actions: ToggleActions::default(),
            animation: None,
            on_enter: None,
            on_leave: None,
            on_enter_back: None,
            on_leave_back: None,
        }
    }
}

impl ScrollAnimationOptions {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: Some(trigger.into()),
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: TriggerPosition) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: TriggerPosition) -> Self {
        self.end = end;
        self
    }

    pub fn with_scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn with_pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_toggle_actions(mut self, toggle_actions: ToggleActions) -> Self {
        self.toggle_actions = toggle_actions;
        self
    }

    pub fn with_animation(mut self, build: impl FnOnce() -> Timeline + 'static) -> Self {
        self.animation = Some(Box::new(build));
        self
    }

    pub fn with_on_enter(mut self, f: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Rc::new(f));
        self
    }

    pub fn with_on_leave(mut self, f: impl Fn() + 'static) -> Self {
        self.on_leave = Some(Rc::new(f));
        self
    }

    pub fn with_on_enter_back(mut self, f: impl Fn() + 'static) -> Self {
        self.on_enter_back = Some(Rc::new(f));
        self
    }

    pub fn with_on_leave_back(mut self, f: impl Fn() + 'static) -> Self {
        self.on_leave_back = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for ScrollAnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnimationOptions")
            .field("trigger", &self.trigger)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("scrub", &self.scrub)
            .field("pin", &self.pin)
            .field("markers", &self.markers)
            .field("toggle_actions", &self.toggle_actions)
            .field("animation", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

struct Callbacks {
    on_enter: Option<TriggerCallback>,
    on_leave: Option<TriggerCallback>,
    on_enter_back: Option<TriggerCallback>,
    on_leave_back: Option<TriggerCallback>,
}

impl Callbacks {
    fn get(&self, edge: TriggerEdge) -> Option<TriggerCallback> {
        match edge {
            TriggerEdge::Enter => self.on_enter.clone(),
            TriggerEdge::Leave => self.on_leave.clone(),
            TriggerEdge::EnterBack => self.on_enter_back.clone(),
            TriggerEdge::LeaveBack => self.on_leave_back.clone(),
        }
    }
}

struct TriggerState {
    id: String,
    host: Rc<dyn ScrollHost>,
    scheduler: Rc<dyn FrameScheduler>,
    start: TriggerPosition,
    end: TriggerPosition,
    scrub: Scrub,
    pin: bool,
    markers: bool,
    toggle_actions: ToggleActions,
    callbacks: Callbacks,
    timeline: Option<Rc<RefCell<Timeline>>>,
    playback: RunSlot,
    direction: Cell<Direction>,
    element: Cell<Bounds>,
    viewport: Cell<f64>,
    last_offset: Cell<Option<f64>>,
    active: Cell<bool>,
    progress: Cell<f64>,
    torn_down: Cell<bool>,
}

impl TriggerState {
    fn boundaries(&self) -> Boundaries {
        let element = self.element.get();
        let viewport = self.viewport.get();
        Boundaries {
            start: self.start.scroll_offset(element, viewport),
            end: self.end.scroll_offset(element, viewport),
        }
    }

    fn log_markers(&self) {
        if !self.markers {
            return;
        }
        let b = self.boundaries();
        if b.end < b.start {
            twarn!(id = %self.id, start = b.start, end = b.end, "trigger ends before it starts");
        }
        tdebug!(id = %self.id, start = b.start, end = b.end, "trigger markers");
    }

    fn on_scroll(&self, offset: f64, viewport: f64) {
        if self.torn_down.get() {
            return;
        }
        if viewport != self.viewport.get() {
            self.viewport.set(viewport);
            self.log_markers();
        }

        let b = self.boundaries();
        let prev = self.last_offset.replace(Some(offset));
        let edges = b.crossings(prev, offset);
        let progress = b.progress(offset);
        self.active.set(b.contains(offset));
        self.progress.set(progress);
        ttrace!(id = %self.id, offset, progress, edges = edges.len(), "trigger update");

        self.drive_scrub(progress);
        for edge in edges {
            if self.torn_down.get() {
                return;
            }
            if self.scrub == Scrub::Off {
                self.toggle(self.action_for(edge));
            }
            // Cloned out so the callback may freely call back into the trigger.
            if let Some(callback) = self.callbacks.get(edge) {
                callback();
            }
        }
    }

    fn action_for(&self, edge: TriggerEdge) -> ToggleAction {
        let a = self.toggle_actions;
        match edge {
            TriggerEdge::Enter => a.on_enter,
            TriggerEdge::Leave => a.on_leave,
            TriggerEdge::EnterBack => a.on_enter_back,
            TriggerEdge::LeaveBack => a.on_leave_back,
        }
    }

    fn drive_scrub(&self, progress: f64) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        match self.scrub {
            Scrub::Off => {}
            Scrub::Instant => timeline.borrow_mut().set_progress(progress),
            Scrub::Smooth(catch_up_ms) => {
                let target = progress * timeline.borrow().duration_ms() as f64;
                self.seek_over(timeline, target, AnimationSpec::new(catch_up_ms, SCRUB_EASING));
            }
        }
    }

    fn toggle(&self, action: ToggleAction) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => self.play(timeline, Direction::Forward),
            ToggleAction::Reverse => self.play(timeline, Direction::Backward),
            ToggleAction::Resume => self.play(timeline, self.direction.get()),
            ToggleAction::Pause => {
                self.playback.cancel();
            }
            ToggleAction::Restart => {
                self.playback.cancel();
                timeline.borrow_mut().seek(0.0);
                self.play(timeline, Direction::Forward);
            }
            ToggleAction::Reset => {
                self.playback.cancel();
                timeline.borrow_mut().seek(0.0);
            }
            ToggleAction::Complete => {
                self.playback.cancel();
                timeline.borrow_mut().set_progress(1.0);
            }
        }
    }

    /// Plays the timeline at real-time speed toward its end or its start.
    fn play(&self, timeline: &Rc<RefCell<Timeline>>, direction: Direction) {
        self.direction.set(direction);
        if timeline.borrow().duration_ms() == 0 {
            self.playback.cancel();
            let end = match direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            };
            timeline.borrow_mut().set_progress(end);
            return;
        }
        let (current, target) = {
            let tl = timeline.borrow();
            let end = tl.duration_ms() as f64;
            let target = match direction {
                Direction::Forward => end,
                Direction::Backward => 0.0,
            };
            (tl.time_ms(), target)
        };
        let remaining = if target > current {
            target - current
        } else {
            current - target
        };
        self.seek_over(
            timeline,
            target,
            AnimationSpec::new(remaining as u64, Easing::Linear),
        );
    }

    /// Moves the timeline's clock to `target` with an animation run owned by this trigger.
    fn seek_over(&self, timeline: &Rc<RefCell<Timeline>>, target: f64, spec: AnimationSpec) {
        let read = Rc::clone(timeline);
        let write = Rc::clone(timeline);
        let run = animate(
            Rc::clone(&self.scheduler),
            spec,
            move || {
                let from = read.borrow().time_ms();
                (from, target - from)
            },
            move |time_ms| write.borrow_mut().seek(time_ms),
            None,
        );
        self.playback.replace(run);
    }

    fn refresh(&self) {
        if self.torn_down.get() {
            return;
        }
        if let Some(bounds) = self.host.element_bounds(&self.id) {
            self.element.set(bounds);
        }
        self.viewport.set(self.host.viewport_size());
        self.log_markers();

        let b = self.boundaries();
        if let Some(offset) = self.last_offset.get() {
            self.active.set(b.contains(offset));
            self.progress.set(b.progress(offset));
        }
    }

    fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        self.playback.cancel();
        tdebug!(id = %self.id, "ScrollAnimation::teardown");
    }
}

/// A bound viewport trigger. Dropping it tears it down.
pub struct ScrollAnimation {
    state: Option<Rc<TriggerState>>,
    subscription: Option<Subscription>,
}

/// Binds a viewport trigger to scroll updates published on `scrolls`.
///
/// When `options.trigger` is missing or does not resolve to an element, the returned value is
/// inert: nothing is observed, the timeline builder is not called, and no callback ever fires.
///
/// Otherwise the timeline (if any) is built and rendered at time 0, and the host's current
/// scroll offset is evaluated right away, so a trigger that binds below its start fires
/// `on_enter` immediately.
pub fn use_scroll_animation(
    scrolls: &EventBus<ScrollEvent>,
    host: Rc<dyn ScrollHost>,
    scheduler: Rc<dyn FrameScheduler>,
    options: ScrollAnimationOptions,
) -> ScrollAnimation {
    let ScrollAnimationOptions {
        trigger,
        start,
        end,
        scrub,
        pin,
        markers,
        toggle_actions,
        animation,
        on_enter,
        on_leave,
        on_enter_back,
        on_leave_back,
    } = options;

    let Some(id) = trigger else {
        return ScrollAnimation::inert();
    };
    let Some(element) = host.element_bounds(&id) else {
        return ScrollAnimation::inert();
    };

    let timeline = animation.map(|build| {
        let mut timeline = build();
        timeline.seek(0.0);
        Rc::new(RefCell::new(timeline))
    });
    let viewport = host.viewport_size();
    let offset = host.scroll_offset();

    let state = Rc::new(TriggerState {
        id,
        host,
        scheduler,
        start,
        end,
        scrub,
        pin,
        markers,
        toggle_actions,
        callbacks: Callbacks {
            on_enter,
            on_leave,
            on_enter_back,
            on_leave_back,
        },
        timeline,
        playback: RunSlot::new(),
        direction: Cell::new(Direction::Forward),
        element: Cell::new(element),
        viewport: Cell::new(viewport),
        last_offset: Cell::new(None),
        active: Cell::new(false),
        progress: Cell::new(0.0),
        torn_down: Cell::new(false),
    });
    tdebug!(id = %state.id, "use_scroll_animation");
    state.log_markers();

    let observer = Rc::clone(&state);
    let subscription = scrolls.subscribe(move |event: &ScrollEvent| {
        observer.on_scroll(event.offset, event.viewport);
        Outcome::Ignored
    });
    state.on_scroll(offset, viewport);

    ScrollAnimation {
        state: Some(state),
        subscription: Some(subscription),
    }
}

impl ScrollAnimation {
    fn inert() -> Self {
        Self {
            state: None,
            subscription: None,
        }
    }

    /// `false` when the trigger element was missing at bind time.
    pub fn is_bound(&self) -> bool {
        self.state.is_some()
    }

    pub fn trigger_id(&self) -> Option<&str> {
        self.state.as_deref().map(|s| s.id.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.live().is_some_and(|s| s.active.get())
    }

    pub fn is_pinned(&self) -> bool {
        self.live().is_some_and(|s| s.pin && s.active.get())
    }

    /// Scroll progress between start and end, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.state.as_deref().map_or(0.0, |s| s.progress.get())
    }

    pub fn boundaries(&self) -> Option<Boundaries> {
        self.state.as_deref().map(TriggerState::boundaries)
    }

    pub fn timeline(&self) -> Option<Rc<RefCell<Timeline>>> {
        self.state.as_deref().and_then(|s| s.timeline.clone())
    }

    /// The in-flight timeline playback (toggle action or smoothed scrub), if any.
    pub fn playback(&self) -> Option<RunHandle> {
        self.live()
            .and_then(|s| s.playback.current())
            .filter(RunHandle::is_active)
    }

    /// Re-measures the trigger element and the viewport (after a layout change).
    pub fn refresh(&self) {
        if let Some(state) = self.live() {
            state.refresh();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.as_deref().is_none_or(|s| s.torn_down.get())
    }

    /// Stops observing and cancels any in-flight playback before returning.
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(state) = &self.state {
            state.teardown();
        }
    }

    fn live(&self) -> Option<&TriggerState> {
        self.state.as_deref().filter(|s| !s.torn_down.get())
    }
}

impl Drop for ScrollAnimation {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for ScrollAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnimation")
            .field("trigger", &self.trigger_id())
            .field("active", &self.is_active())
            .field("progress", &self.progress())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
