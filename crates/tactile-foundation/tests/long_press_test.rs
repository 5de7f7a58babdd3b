use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_foundation::prelude::*;
use tactile_foundation::{
    LongPressStatus, ResolvedLongPress, LONG_PRESS_PROGRESS_ATTRIBUTE, ON_KEY_DOWN, ON_KEY_UP,
    ON_POINTER_DOWN, ON_POINTER_UP,
};
use tactile_testing::prelude::*;

type PhaseLog = Rc<RefCell<Vec<(GesturePhase, f32)>>>;

fn recording(config: GestureConfig) -> (GestureConfig, PhaseLog) {
    let log: PhaseLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let config = config.on_long_press(move |event, phase| {
        sink.borrow_mut()
            .push((phase, event.progress().unwrap_or(f32::NAN)));
    });
    (config, log)
}

fn press(props: &BoundProps, x: f32, y: f32) {
    props.invoke(ON_POINTER_DOWN, &InputEvent::pointer([x, y], PointerType::Touch));
}

fn release(props: &BoundProps) {
    props.invoke(ON_POINTER_UP, &InputEvent::pointer([0.0, 0.0], PointerType::Touch));
}

#[test]
fn progress_samples_follow_threshold() {
    let rule = GestureTestRule::new();
    let (config, log) = recording(
        GestureConfig::new().with_long_press(LongPressConfig::default().with_threshold_ms(500)),
    );
    let gestures = rule.mount(config);
    let machine = gestures.long_press().expect("long press configured");

    press(&gestures.props(), 0.0, 0.0);
    assert_eq!(machine.progress(), 0.0);

    rule.advance_frame_to(250);
    assert!((machine.progress() - 0.5).abs() < 1e-6);
    assert_eq!(
        rule.element().style("--longpress-progress").as_deref(),
        Some("0.5")
    );

    rule.advance_frame_to(500);
    assert_eq!(machine.progress(), 1.0);
    assert_eq!(machine.status(), LongPressStatus::Completed);

    rule.advance_frame_to(750);
    assert_eq!(machine.progress(), 1.0);

    release(&gestures.props());
    assert_eq!(
        *log.borrow(),
        vec![
            (GesturePhase::Start, 0.0),
            (GesturePhase::Move, 1.0),
            (GesturePhase::End, 1.0),
        ]
    );
    assert_eq!(rule.element().style("--longpress-progress"), None);
    assert_eq!(rule.element().attribute(LONG_PRESS_PROGRESS_ATTRIBUTE), None);
}

#[test]
fn moving_past_cancel_distance_freezes_progress() {
    let rule = GestureTestRule::new();
    let activations = Rc::new(Cell::new(0));
    let counter = Rc::clone(&activations);
    let (config, log) = recording(
        GestureConfig::new().with_long_press(
            LongPressConfig::default()
                .with_threshold_ms(500)
                .with_cancel_distance(10.0)
                .on_activate(move |_| counter.set(counter.get() + 1)),
        ),
    );
    let gestures = rule.mount(config);
    let machine = gestures.long_press().expect("long press configured");

    press(&gestures.props(), 100.0, 100.0);
    assert_eq!(rule.pointer_events().listener_count(), 1);

    rule.advance_frame_to(100);
    rule.pointer_events().dispatch_move([105.0, 100.0]);
    assert_eq!(machine.status(), LongPressStatus::Pressing);

    rule.advance_frame_to(200);
    rule.pointer_events().dispatch_move([115.0, 100.0]);
    assert_eq!(machine.status(), LongPressStatus::Canceled);
    let frozen = machine.progress();
    assert!((frozen - 0.4).abs() < 1e-6);
    assert_eq!(rule.pointer_events().listener_count(), 0);
    assert_eq!(rule.element().style("--longpress-progress"), None);

    rule.advance_frame_to(400);
    rule.advance_frame_to(700);
    assert_eq!(machine.progress(), frozen);
    assert_eq!(activations.get(), 0);

    release(&gestures.props());
    assert_eq!(
        *log.borrow(),
        vec![
            (GesturePhase::Start, 0.0),
            (GesturePhase::Cancel, frozen),
            (GesturePhase::End, frozen),
        ]
    );
}

#[test]
fn completion_vibrates_and_repeats_until_release() {
    let rule = GestureTestRule::new();
    let activations = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&activations);
    let (config, log) = recording(
        GestureConfig::new().with_long_press(
            LongPressConfig::default()
                .with_threshold_ms(300)
                .with_haptic_ms(40)
                .with_repeat_interval_ms(100)
                .on_activate(move |pointer_type| sink.borrow_mut().push(pointer_type)),
        ),
    );
    let gestures = rule.mount(config);

    press(&gestures.props(), 0.0, 0.0);
    rule.advance_frame_to(300);
    assert_eq!(rule.haptics().vibrations(), vec![40]);
    assert_eq!(*activations.borrow(), vec![PointerType::Touch]);

    rule.advance_frame_to(400);
    rule.advance_frame_to(500);
    assert_eq!(rule.haptics().vibrations(), vec![40, 40, 40]);
    assert_eq!(activations.borrow().len(), 3);

    let repeats = log
        .borrow()
        .iter()
        .filter(|(phase, progress)| *phase == GesturePhase::Move && *progress == 1.0)
        .count();
    assert_eq!(repeats, 3);

    release(&gestures.props());
    rule.advance_frame_to(900);
    assert_eq!(activations.borrow().len(), 3);
    assert_eq!(log.borrow().last(), Some(&(GesturePhase::End, 1.0)));
    assert!(!rule.has_pending_work());
}

#[test]
fn keyboard_press_ignores_pointer_moves() {
    let rule = GestureTestRule::new();
    let gestures = rule.mount(
        GestureConfig::new().with_long_press(
            LongPressConfig::default()
                .with_threshold_ms(500)
                .with_cancel_distance(10.0),
        ),
    );
    let machine = gestures.long_press().expect("long press configured");

    gestures.props().invoke(ON_KEY_DOWN, &InputEvent::key("Enter"));
    assert_eq!(machine.status(), LongPressStatus::Pressing);
    assert_eq!(rule.pointer_events().listener_count(), 0);

    rule.pointer_events().dispatch_move([400.0, 300.0]);
    rule.pointer_events().dispatch_move([401.0, 300.0]);
    assert_eq!(machine.status(), LongPressStatus::Pressing);

    rule.advance_frame_to(500);
    assert_eq!(machine.status(), LongPressStatus::Completed);

    gestures.props().invoke(ON_KEY_UP, &InputEvent::key("Enter"));
    assert_eq!(machine.status(), LongPressStatus::Idle);
}

#[test]
fn unsupported_haptics_are_skipped() {
    let rule = GestureTestRule::new();
    rule.haptics().set_supported(false);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let gestures = rule.mount(
        GestureConfig::new().with_long_press(
            LongPressConfig::default()
                .with_threshold_ms(100)
                .with_haptic_ms(25)
                .on_activate(move |_| flag.set(true)),
        ),
    );

    press(&gestures.props(), 0.0, 0.0);
    rule.advance_frame_to(100);

    assert!(fired.get());
    assert!(rule.haptics().vibrations().is_empty());
}

#[test]
fn omitted_settings_come_from_custom_properties() {
    let rule = GestureTestRule::new();
    rule.css().set("--tactile-long-press-threshold", "0.3s");
    rule.css().set("--tactile-long-press-cancel-distance", "8px");
    rule.css().set("--tactile-long-press-haptic", "not-a-duration");
    let gestures = rule.mount(
        GestureConfig::new().with_long_press(LongPressConfig::default().with_repeat_interval_ms(50)),
    );

    assert_eq!(
        gestures.long_press().map(|m| m.settings()),
        Some(ResolvedLongPress {
            threshold_ms: 300,
            cancel_distance: Some(8.0),
            haptic_ms: None,
            repeat_interval_ms: 50,
        })
    );
}

#[test]
fn progress_property_uses_css_var_config() {
    let rule = GestureTestRule::new();
    let gestures = rule.mount(
        GestureConfig::new()
            .with_long_press(LongPressConfig::default().with_threshold_ms(200))
            .with_css_vars(CssVarConfig::new().with_name(CssField::Progress, "--hold")),
    );

    press(&gestures.props(), 0.0, 0.0);
    rule.advance_frame_to(50);

    assert_eq!(rule.element().style("--hold").as_deref(), Some("0.25"));
    assert_eq!(
        rule.element().attribute(LONG_PRESS_PROGRESS_ATTRIBUTE).as_deref(),
        Some("0.25")
    );
    assert!(!rule.element().has_style("--longpress-progress"));
}
