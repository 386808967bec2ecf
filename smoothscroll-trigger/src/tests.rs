use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use smoothscroll::{
    Bounds, Easing, ManualScheduler, MemoryHost, ScrollHost, SmoothScroller, Timeline, Tween,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn push(log: &Log, entry: &'static str) -> impl Fn() + 'static {
    let log = Rc::clone(log);
    move || log.borrow_mut().push(entry)
}

fn fixture() -> (Rc<MemoryHost>, Rc<ManualScheduler>, EventBus<ScrollEvent>) {
    let host = Rc::new(MemoryHost::new(800.0).with_element("hero", Bounds::new(1000.0, 400.0)));
    (host, Rc::new(ManualScheduler::new()), EventBus::new())
}

fn fade_in(value: &Rc<Cell<f64>>) -> impl FnOnce() -> Timeline + 'static {
    let value = Rc::clone(value);
    move || {
        Timeline::new().add(Tween::new(0.0, 1.0, 0, 400, Easing::Linear), move |v| {
            value.set(v)
        })
    }
}

fn scroll(bus: &EventBus<ScrollEvent>, offset: f64) {
    bus.dispatch(&ScrollEvent::new(offset, 800.0));
}

#[test]
fn anchor_target_accepts_only_fragment_links() {
    assert_eq!(anchor_target("#about"), Some("about"));
    assert_eq!(anchor_target("#section-2"), Some("section-2"));
    assert_eq!(anchor_target("#"), None);
    assert_eq!(anchor_target(""), None);
    assert_eq!(anchor_target("/blog#top"), None);
    assert_eq!(anchor_target("https://example.com"), None);
}

#[test]
fn bus_delivers_in_order_and_reports_prevent_default() {
    let bus = EventBus::<u32>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let a = Rc::clone(&seen);
    let _first = bus.subscribe(move |e| {
        a.borrow_mut().push(("first", *e));
        Outcome::Ignored
    });
    let b = Rc::clone(&seen);
    let _second = bus.subscribe(move |e| {
        b.borrow_mut().push(("second", *e));
        if *e > 1 {
            Outcome::PreventDefault
        } else {
            Outcome::Ignored
        }
    });

    assert_eq!(bus.len(), 2);
    assert!(!bus.dispatch(&1));
    assert!(bus.dispatch(&2));
    assert_eq!(
        *seen.borrow(),
        [("first", 1), ("second", 1), ("first", 2), ("second", 2)]
    );
}

#[test]
fn unsubscribe_is_idempotent_and_drop_unsubscribes() {
    let bus = EventBus::<()>::new();
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let mut sub = bus.subscribe(move |_| {
        c.set(c.get() + 1);
        Outcome::Ignored
    });
    bus.dispatch(&());
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    bus.dispatch(&());
    assert_eq!(calls.get(), 1);

    {
        let _scoped = bus.subscribe(|_| Outcome::Ignored);
        assert_eq!(bus.len(), 1);
    }
    assert!(bus.is_empty());
}

#[test]
fn handler_removed_mid_dispatch_is_not_called() {
    let bus = EventBus::<()>::new();
    let seen = log();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let v = Rc::clone(&victim);
    let first_log = Rc::clone(&seen);
    let _first = bus.subscribe(move |_| {
        v.borrow_mut().take();
        first_log.borrow_mut().push("first");
        Outcome::Ignored
    });
    let second = push(&seen, "second");
    *victim.borrow_mut() = Some(bus.subscribe(move |_| {
        second();
        Outcome::Ignored
    }));

    bus.dispatch(&());
    assert_eq!(*seen.borrow(), ["first"]);
    assert_eq!(bus.len(), 1);
}

#[test]
fn subscription_outliving_its_bus_is_inert() {
    let bus = EventBus::<()>::new();
    let mut sub = bus.subscribe(|_| Outcome::Ignored);
    assert!(sub.is_active());
    drop(bus);
    assert!(!sub.is_active());
    sub.unsubscribe();
}

fn click_fixture() -> (Rc<MemoryHost>, Rc<ManualScheduler>, EventBus<ClickEvent>, ClickTrigger) {
    let host = Rc::new(
        MemoryHost::new(800.0)
            .with_element("section-2", Bounds::new(2000.0, 600.0))
            .with_element("contact", Bounds::new(3000.0, 600.0)),
    );
    let scheduler = Rc::new(ManualScheduler::new());
    let clicks = EventBus::new();
    let trigger = init_smooth_scrolling(
        &clicks,
        SmoothScroller::new(host.clone(), scheduler.clone()),
    );
    (host, scheduler, clicks, trigger)
}

#[test]
fn anchor_click_scrolls_below_the_header() {
    let (host, scheduler, clicks, trigger) = click_fixture();
    assert!(trigger.is_installed());

    assert!(clicks.dispatch(&ClickEvent::on_link("#section-2")));
    let run = trigger.active_run().expect("scroll started");

    let end = scheduler.run_until_idle(0, 16, 1000);
    assert!(end >= smoothscroll::DEFAULT_DURATION_MS);
    assert_eq!(host.scroll_offset(), 2000.0 + HEADER_OFFSET);
    assert!(run.is_finished());
    assert!(trigger.active_run().is_none());
}

#[test]
fn non_anchor_clicks_keep_their_default_action() {
    let (host, scheduler, clicks, _trigger) = click_fixture();
    assert!(!clicks.dispatch(&ClickEvent::outside_link()));
    assert!(!clicks.dispatch(&ClickEvent::on_link("/blog")));
    assert!(!clicks.dispatch(&ClickEvent::on_link("#")));
    assert!(scheduler.is_idle());
    assert_eq!(host.write_count(), 0);
}

#[test]
fn anchor_to_missing_element_prevents_the_jump_without_scrolling() {
    let (host, scheduler, clicks, trigger) = click_fixture();
    assert!(clicks.dispatch(&ClickEvent::on_link("#missing-id")));
    assert!(trigger.active_run().is_none());
    assert!(scheduler.is_idle());
    assert_eq!(host.write_count(), 0);
}

#[test]
fn newer_click_cancels_the_running_scroll() {
    let (host, scheduler, clicks, trigger) = click_fixture();
    clicks.dispatch(&ClickEvent::on_link("#section-2"));
    let first = trigger.active_run().unwrap();
    scheduler.run_frame(0);
    scheduler.run_frame(100);

    clicks.dispatch(&ClickEvent::on_link("#contact"));
    assert!(first.is_cancelled());

    scheduler.run_until_idle(116, 16, 1000);
    assert_eq!(host.scroll_offset(), 3000.0 + HEADER_OFFSET);
}

#[test]
fn click_trigger_teardown_stops_everything() {
    let (host, scheduler, clicks, mut trigger) = click_fixture();
    clicks.dispatch(&ClickEvent::on_link("#section-2"));
    let run = trigger.active_run().unwrap();
    scheduler.run_frame(0);
    let writes = host.write_count();

    trigger.teardown();
    assert!(run.is_cancelled());
    assert!(scheduler.is_idle());
    assert!(clicks.is_empty());
    assert!(!trigger.is_installed());

    assert!(!clicks.dispatch(&ClickEvent::on_link("#section-2")));
    scheduler.run_until_idle(16, 16, 100);
    assert_eq!(host.write_count(), writes);

    trigger.teardown();
}

#[test]
fn dropping_the_click_trigger_uninstalls_it() {
    let (_host, _scheduler, clicks, trigger) = click_fixture();
    assert_eq!(clicks.len(), 1);
    drop(trigger);
    assert!(clicks.is_empty());
}

#[test]
fn trigger_positions_parse_and_resolve() {
    let el = Bounds::new(1000.0, 400.0);
    let at = |s: &str| s.parse::<TriggerPosition>().unwrap().scroll_offset(el, 800.0);

    assert_eq!(at("top 80%"), 360.0);
    assert_eq!(at("top bottom"), 200.0);
    assert_eq!(at("bottom top"), 1400.0);
    assert_eq!(at("center center"), 800.0);
    assert_eq!(at("bottom top+=20"), 1380.0);
    assert_eq!(at("100px 50%-=10"), 710.0);
    assert_eq!(at("start end"), 200.0);
    assert_eq!(at("25% 0"), 1100.0);

    assert_eq!(
        TriggerPosition::default_start(),
        "top bottom".parse::<TriggerPosition>().unwrap()
    );
    assert_eq!(
        TriggerPosition::default_end(),
        "bottom top".parse::<TriggerPosition>().unwrap()
    );
}

#[test]
fn malformed_trigger_positions_are_rejected() {
    for input in [
        "",
        "top",
        "top 80% extra",
        "middle top",
        "top +=5",
        "top 80%+=x",
        "inf top",
        "NaN% bottom",
        "top -infpx",
        "top+=inf bottom",
    ] {
        assert_eq!(
            input.parse::<TriggerPosition>(),
            Err(Error::InvalidPosition {
                input: String::from(input)
            }),
            "{input:?}"
        );
    }
}

#[test]
fn toggle_actions_parse_four_names() {
    let actions: ToggleActions = "play pause resume reverse".parse().unwrap();
    assert_eq!(
        actions,
        ToggleActions {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::Pause,
            on_enter_back: ToggleAction::Resume,
            on_leave_back: ToggleAction::Reverse,
        }
    );
    assert_eq!(
        ToggleActions::default(),
        "play none none none".parse::<ToggleActions>().unwrap()
    );
    assert!("play none".parse::<ToggleActions>().is_err());
    assert!("play none none jump".parse::<ToggleActions>().is_err());
    assert!("play none none none none".parse::<ToggleActions>().is_err());
}

#[test]
fn core_errors_convert() {
    let err: Error = "wobble"
        .parse::<Easing>()
        .map_err(Error::from)
        .unwrap_err();
    assert!(matches!(err, Error::Core(smoothscroll::Error::UnknownEasing { .. })));
    assert_eq!(std::format!("{err}"), "unknown easing curve `wobble`");
}

#[test]
fn boundaries_report_crossings_in_order() {
    let b = Boundaries {
        start: 200.0,
        end: 1400.0,
    };
    use TriggerEdge::*;
    assert!(b.crossings(None, 0.0).is_empty());
    assert_eq!(b.crossings(None, 500.0), [Enter]);
    assert_eq!(b.crossings(None, 1400.0), [Enter, Leave]);
    assert_eq!(b.crossings(Some(0.0), 200.0), [Enter]);
    assert!(b.crossings(Some(200.0), 300.0).is_empty());
    assert_eq!(b.crossings(Some(1500.0), 100.0), [EnterBack, LeaveBack]);
    assert_eq!(b.crossings(Some(1400.0), 1399.0), [EnterBack]);
    assert!(b.crossings(Some(300.0), 300.0).is_empty());

    assert!(b.contains(200.0));
    assert!(!b.contains(1400.0));
    assert_eq!(b.progress(800.0), 0.5);
    assert_eq!(b.progress(-5.0), 0.0);
    assert_eq!(b.progress(9000.0), 1.0);
}

#[test]
fn inverted_boundaries_report_the_end_first() {
    let b = Boundaries {
        start: 900.0,
        end: 300.0,
    };
    use TriggerEdge::*;
    assert_eq!(b.crossings(Some(0.0), 1000.0), [Leave, Enter]);
    assert_eq!(b.crossings(Some(1000.0), 0.0), [LeaveBack, EnterBack]);
    assert_eq!(b.crossings(Some(0.0), 500.0), [Leave]);
}

#[test]
fn missing_trigger_element_is_inert() {
    let (host, scheduler, scrolls) = fixture();
    let built = Rc::new(Cell::new(false));
    let b = Rc::clone(&built);
    let entered = log();

    let mut anim = use_scroll_animation(
        &scrolls,
        host.clone(),
        scheduler.clone(),
        ScrollAnimationOptions::new("not-rendered-yet")
            .with_animation(move || {
                b.set(true);
                Timeline::new()
            })
            .with_on_enter(push(&entered, "enter")),
    );

    assert!(!anim.is_bound());
    assert!(!built.get());
    assert!(scrolls.is_empty());
    scroll(&scrolls, 5000.0);
    assert!(entered.borrow().is_empty());
    assert!(anim.boundaries().is_none());
    anim.teardown();
    anim.teardown();

    let no_trigger = use_scroll_animation(
        &scrolls,
        host,
        scheduler,
        ScrollAnimationOptions::default(),
    );
    assert!(!no_trigger.is_bound());
}

#[test]
fn edge_callbacks_fire_for_each_crossing() {
    let (host, scheduler, scrolls) = fixture();
    let events = log();
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler,
        ScrollAnimationOptions::new("hero")
            .with_on_enter(push(&events, "enter"))
            .with_on_leave(push(&events, "leave"))
            .with_on_enter_back(push(&events, "enter_back"))
            .with_on_leave_back(push(&events, "leave_back")),
    );
    assert_eq!(anim.trigger_id(), Some("hero"));
    assert_eq!(
        anim.boundaries(),
        Some(Boundaries {
            start: 200.0,
            end: 1400.0
        })
    );
    assert!(events.borrow().is_empty());

    scroll(&scrolls, 300.0);
    assert!(anim.is_active());
    scroll(&scrolls, 800.0);
    assert_eq!(anim.progress(), 0.5);
    scroll(&scrolls, 1500.0);
    assert!(!anim.is_active());
    scroll(&scrolls, 1000.0);
    scroll(&scrolls, 100.0);
    scroll(&scrolls, 1600.0);

    assert_eq!(
        *events.borrow(),
        ["enter", "leave", "enter_back", "leave_back", "enter", "leave"]
    );
}

#[test]
fn binding_below_the_start_fires_enter_immediately() {
    let (host, scheduler, scrolls) = fixture();
    host.jump_to(500.0);
    let events = log();
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler,
        ScrollAnimationOptions::new("hero").with_on_enter(push(&events, "enter")),
    );
    assert_eq!(*events.borrow(), ["enter"]);
    assert!(anim.is_active());
    assert_eq!(anim.progress(), 0.25);
}

#[test]
fn toggle_actions_play_and_reverse_the_timeline() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_toggle_actions("play none none reverse".parse().unwrap())
            .with_animation(fade_in(&value)),
    );
    assert_eq!(value.get(), 0.0);

    scroll(&scrolls, 300.0);
    assert!(anim.playback().is_some());
    scheduler.run_frame(0);
    scheduler.run_frame(200);
    assert_eq!(value.get(), 0.5);
    scheduler.run_frame(400);
    assert_eq!(value.get(), 1.0);
    assert!(scheduler.is_idle());
    assert!(anim.playback().is_none());

    scroll(&scrolls, 100.0);
    scheduler.run_frame(1000);
    scheduler.run_frame(1200);
    assert_eq!(value.get(), 0.5);
    scheduler.run_frame(1400);
    assert_eq!(value.get(), 0.0);
    assert!(scheduler.is_idle());
}

#[test]
fn reverse_mid_play_cancels_the_forward_run() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_toggle_actions("play none none reverse".parse().unwrap())
            .with_animation(fade_in(&value)),
    );

    scroll(&scrolls, 300.0);
    let forward = anim.playback().unwrap();
    scheduler.run_frame(0);
    scheduler.run_frame(100);
    assert_eq!(value.get(), 0.25);

    scroll(&scrolls, 0.0);
    assert!(forward.is_cancelled());
    scheduler.run_frame(150);
    scheduler.run_frame(200);
    assert_eq!(value.get(), 0.125);
    scheduler.run_until_idle(250, 50, 10);
    assert_eq!(value.get(), 0.0);
}

#[test]
fn restart_reset_and_complete_actions() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let _anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_toggle_actions("restart complete none reset".parse().unwrap())
            .with_animation(fade_in(&value)),
    );

    scroll(&scrolls, 300.0);
    scheduler.run_frame(0);
    scheduler.run_frame(100);
    assert_eq!(value.get(), 0.25);

    scroll(&scrolls, 1500.0);
    assert_eq!(value.get(), 1.0);
    assert!(scheduler.is_idle());

    scroll(&scrolls, 1000.0);
    scroll(&scrolls, 0.0);
    assert_eq!(value.get(), 0.0);
    assert!(scheduler.is_idle());
}

#[test]
fn instant_scrub_maps_scroll_progress_onto_the_timeline() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_scrub(Scrub::Instant)
            .with_animation(fade_in(&value)),
    );

    scroll(&scrolls, 800.0);
    assert_eq!(value.get(), 0.5);
    scroll(&scrolls, 500.0);
    assert_eq!(value.get(), 0.25);
    scroll(&scrolls, 5000.0);
    assert_eq!(value.get(), 1.0);
    assert!(scheduler.is_idle());
    assert_eq!(anim.timeline().unwrap().borrow().time_ms(), 400.0);
}

#[test]
fn smooth_scrub_catches_up_over_time() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let _anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_scrub(Scrub::Smooth(100))
            .with_animation(fade_in(&value)),
    );

    scroll(&scrolls, 800.0);
    assert_eq!(value.get(), 0.0);
    scheduler.run_frame(0);
    scheduler.run_frame(50);
    assert!(value.get() > 0.25 && value.get() < 0.5);
    scheduler.run_frame(100);
    assert_eq!(value.get(), 0.5);

    scroll(&scrolls, 1400.0);
    scheduler.run_until_idle(116, 16, 100);
    assert_eq!(value.get(), 1.0);
}

#[test]
fn teardown_mid_flight_stops_writes_and_callbacks() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let events = log();
    let mut anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero")
            .with_animation(fade_in(&value))
            .with_on_leave(push(&events, "leave")),
    );

    scroll(&scrolls, 300.0);
    let run = anim.playback().unwrap();
    scheduler.run_frame(0);
    scheduler.run_frame(100);
    assert_eq!(value.get(), 0.25);

    anim.teardown();
    assert!(run.is_cancelled());
    assert!(scheduler.is_idle());
    assert!(scrolls.is_empty());
    assert!(anim.is_torn_down());
    assert!(!anim.is_active());

    scheduler.run_until_idle(200, 100, 10);
    scroll(&scrolls, 5000.0);
    assert_eq!(value.get(), 0.25);
    assert!(events.borrow().is_empty());

    anim.teardown();
}

#[test]
fn dropping_the_scroll_animation_tears_it_down() {
    let (host, scheduler, scrolls) = fixture();
    let value = Rc::new(Cell::new(f64::NAN));
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler.clone(),
        ScrollAnimationOptions::new("hero").with_animation(fade_in(&value)),
    );
    scroll(&scrolls, 300.0);
    scheduler.run_frame(0);
    drop(anim);
    assert!(scrolls.is_empty());
    assert!(scheduler.is_idle());
}

#[test]
fn pin_follows_the_active_range() {
    let (host, scheduler, scrolls) = fixture();
    let anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler,
        ScrollAnimationOptions::new("hero")
            .with_start("top top".parse().unwrap())
            .with_end("bottom top".parse().unwrap())
            .with_pin(true)
            .with_markers(true),
    );
    assert_eq!(
        anim.boundaries(),
        Some(Boundaries {
            start: 1000.0,
            end: 1400.0
        })
    );
    scroll(&scrolls, 900.0);
    assert!(!anim.is_pinned());
    scroll(&scrolls, 1200.0);
    assert!(anim.is_pinned());
    scroll(&scrolls, 1400.0);
    assert!(!anim.is_pinned());
}

#[test]
fn refresh_remeasures_the_trigger_element() {
    let (host, scheduler, scrolls) = fixture();
    let events = log();
    let anim = use_scroll_animation(
        &scrolls,
        host.clone(),
        scheduler,
        ScrollAnimationOptions::new("hero").with_on_enter(push(&events, "enter")),
    );
    scroll(&scrolls, 300.0);
    assert!(anim.is_active());

    host.insert_element("hero", Bounds::new(2000.0, 400.0));
    anim.refresh();
    assert_eq!(anim.boundaries().unwrap().start, 1200.0);
    assert!(!anim.is_active());
    assert_eq!(anim.progress(), 0.0);

    scroll(&scrolls, 1300.0);
    assert!(anim.is_active());
    assert_eq!(*events.borrow(), ["enter", "enter"]);
}

#[test]
fn callbacks_may_reenter_the_bus() {
    let (host, scheduler, scrolls) = fixture();
    let events = log();
    let bus = scrolls.clone();
    let on_leave = push(&events, "leave");
    let _anim = use_scroll_animation(
        &scrolls,
        host,
        scheduler,
        ScrollAnimationOptions::new("hero")
            .with_on_enter(move || {
                bus.dispatch(&ScrollEvent::new(1500.0, 800.0));
            })
            .with_on_leave(on_leave),
    );
    scroll(&scrolls, 300.0);
    assert_eq!(*events.borrow(), ["leave"]);
}
