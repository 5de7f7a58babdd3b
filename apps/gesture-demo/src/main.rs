mod console;

use anyhow::{ensure, Context, Result};
use console::ConsoleElement;
use std::rc::Rc;
use std::thread;
use std::time::Duration;
use tactile_core::{MonotonicClock, Runtime};
use tactile_foundation::prelude::*;
use tactile_foundation::{GestureRecognizer, ON_POINTER_DOWN, ON_POINTER_UP};
use tactile_testing::{FakeHaptics, FakePointerEvents, RawGesture, ScriptedRecognizer};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Tactile Gesture Demo ===");
    println!("A card is flung to the right, coasts, and snaps to 200px.");
    println!("Then it is held until the long press completes.");
    println!();

    let runtime = Runtime::default();
    let clock = MonotonicClock::new();
    let card = Rc::new(ConsoleElement::new("card"));
    let recognizer = Rc::new(ScriptedRecognizer::new());
    let haptics = Rc::new(FakeHaptics::default());

    let environment = GestureEnvironment::new(runtime.handle())
        .with_haptics(haptics.clone())
        .with_pointer_events(Rc::new(FakePointerEvents::new()));

    let config = GestureConfig::new()
        .with_drag(DragConfig::default())
        .with_bounds(Bounds::movement([0.0, 0.0], [300.0, 0.0]).with_rubberband(0.2))
        .with_snap(SnapConfig::new(SnapPoints::unified([0.0, 200.0])))
        .with_physics(PhysicsConfig::decay(0.92, 0.5))
        .with_long_press(
            LongPressConfig::default()
                .with_threshold_ms(400)
                .with_haptic_ms(30)
                .on_activate(|pointer| log::info!("long press activated by {pointer:?}")),
        )
        .with_css_vars(CssVarConfig::new().with_prefix("card"))
        .on_swipe(|direction| log::info!("swiped {}", direction.as_str()))
        .on_gesture(|event, phase| log::debug!("{} {}", event.kind(), phase.as_str()));

    let recognizer_seam: Rc<dyn GestureRecognizer> = recognizer.clone();
    let gestures = Gestures::new(
        config,
        ElementRef::attached(card.clone()),
        environment,
        recognizer_seam,
    );
    let props = gestures.props();
    log::info!("bound handlers: {:?}", props.handler_names().collect::<Vec<_>>());

    recognizer.dispatch(GestureKind::Drag, RawGesture::start().build());
    for step in 1..=4 {
        let x = step as f32 * 30.0;
        recognizer.dispatch(
            GestureKind::Drag,
            RawGesture::new()
                .offset(x, 0.0)
                .delta(30.0, 0.0)
                .velocity(2.0, 0.0)
                .build(),
        );
    }
    recognizer.dispatch(
        GestureKind::Drag,
        RawGesture::end()
            .offset(120.0, 0.0)
            .velocity(8.0, 0.0)
            .swipe(1.0, 0.0)
            .build(),
    );

    let handle = runtime.handle();
    let mut frames = 0;
    while handle.has_frame_callbacks() && frames < 240 {
        thread::sleep(FRAME);
        handle.drain_frame_callbacks(clock.now_nanos());
        frames += 1;
    }
    log::info!("inertia settled after {frames} frames");

    let settled = card
        .style("--card-drag-x")
        .context("drag position was never written")?;
    ensure!(settled == "200px", "expected the card to snap to 200px, got {settled}");

    props.invoke(ON_POINTER_DOWN, &InputEvent::pointer([10.0, 10.0], PointerType::Touch));
    let machine = gestures.long_press().context("long press is configured")?;
    let mut waited = 0;
    while machine.progress() < 1.0 && waited < 120 {
        thread::sleep(FRAME);
        waited += 1;
        handle.drain_frame_callbacks(clock.now_nanos());
    }
    ensure!(machine.progress() >= 1.0, "long press never completed");
    props.invoke(ON_POINTER_UP, &InputEvent::pointer([10.0, 10.0], PointerType::Touch));

    println!();
    println!("final inline style: {}", card.style_text());
    println!("haptic pulses: {:?}", haptics.vibrations());
    Ok(())
}
