use std::cell::RefCell;
use std::rc::Rc;

use smoothscroll::{
    Bounds, Easing, ManualScheduler, MemoryHost, ScrollHost, SmoothScroller, Timeline, Tween,
};
use smoothscroll_trigger::{
    ClickEvent, EventBus, ScrollAnimationOptions, ScrollEvent, init_smooth_scrolling,
    use_scroll_animation,
};

fn main() {
    // Example: an app shell owning two buses, one anchor interceptor and one viewport trigger
    // revealing three skill cards with a stagger.
    let host = Rc::new(
        MemoryHost::new(800.0)
            .with_element("hero", Bounds::new(0.0, 800.0))
            .with_element("skills", Bounds::new(1200.0, 600.0)),
    );
    let scheduler = Rc::new(ManualScheduler::new());
    let clicks = EventBus::<ClickEvent>::new();
    let scrolls = EventBus::<ScrollEvent>::new();

    let opacity = Rc::new(RefCell::new([0.0f64; 3]));
    let cards = Rc::clone(&opacity);
    let mut skills = use_scroll_animation(
        &scrolls,
        host.clone(),
        scheduler.clone(),
        ScrollAnimationOptions::new("skills")
            .with_start("top 80%".parse().expect("valid position"))
            .with_toggle_actions("play none none reverse".parse().expect("valid actions"))
            .with_animation(move || {
                let setters = (0..3).map(|i| {
                    let cards = Rc::clone(&cards);
                    move |v: f64| cards.borrow_mut()[i] = v
                });
                let reveal = Tween::new(0.0, 1.0, 0, 300, Easing::EaseOutQuad);
                Timeline::new().stagger(reveal, 100, setters)
            })
            .with_on_enter(|| println!("skills: enter")),
    );

    let mut anchors = init_smooth_scrolling(
        &clicks,
        SmoothScroller::new(host.clone(), scheduler.clone()),
    );
    let prevented = clicks.dispatch(&ClickEvent::on_link("#skills"));
    println!("click prevented default: {prevented}");

    // The shell forwards scroll writes to the scroll bus each frame.
    let mut now_ms = 0u64;
    for _ in 0..120 {
        scheduler.run_frame(now_ms);
        scrolls.dispatch(&ScrollEvent::new(host.scroll_offset(), 800.0));
        if now_ms % 160 == 0 {
            println!(
                "t={now_ms} off={:.1} cards={:.2?} active={}",
                host.scroll_offset(),
                opacity.borrow(),
                skills.is_active()
            );
        }
        if scheduler.is_idle() {
            break;
        }
        now_ms += 16;
    }

    anchors.teardown();
    skills.teardown();
    println!("done: cards={:.2?}", opacity.borrow());
}
