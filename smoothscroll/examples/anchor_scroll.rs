use std::rc::Rc;

use smoothscroll::{
    Bounds, Easing, ManualScheduler, MemoryHost, ScrollHost, ScrollOptions, SmoothScroller,
};

fn main() {
    // Example: a headless host with a few sections, driven by a simulated 60fps frame clock.
    //
    // A real adapter would:
    // - implement `ScrollHost` over its scroll container
    // - implement `FrameScheduler` over its refresh callback
    // - call `smooth_scroll_to` from navigation code
    let host = Rc::new(
        MemoryHost::new(900.0)
            .with_element("intro", Bounds::new(0.0, 900.0))
            .with_element("work", Bounds::new(900.0, 1400.0))
            .with_element("contact", Bounds::new(2300.0, 700.0)),
    );
    let scheduler = Rc::new(ManualScheduler::new());
    let scroller = SmoothScroller::new(host.clone(), scheduler.clone());

    let run = scroller.smooth_scroll_to(
        "contact",
        ScrollOptions::new()
            .with_duration_ms(600)
            .with_easing(Easing::EaseOutCubic)
            .with_offset(-80.0)
            .with_on_complete(|| println!("arrived")),
    );
    println!("started: {}", run.is_some());

    let mut now_ms = 0u64;
    while !scheduler.is_idle() {
        scheduler.run_frame(now_ms);
        if now_ms % 96 == 0 {
            println!("t={now_ms} off={:.1}", host.scroll_offset());
        }
        now_ms += 16;
    }
    println!("done: off={}", host.scroll_offset());

    // Missing anchors are ignored.
    assert!(scroller.smooth_scroll_to("blog", ScrollOptions::new()).is_none());
}
