use std::cell::RefCell;
use std::rc::Rc;
use tactile_foundation::prelude::*;
use tactile_foundation::{touch_action_for, Axis, HoverConfig, MoveConfig};
use tactile_testing::prelude::*;

#[test]
fn drag_offset_is_clamped_and_state_attribute_follows_activity() {
    let rule = GestureTestRule::new();
    let gestures = rule.mount(
        GestureConfig::new()
            .with_drag(DragConfig::default())
            .with_bounds(Bounds::movement([0.0, 0.0], [100.0, 100.0])),
    );
    let state = gestures.state();

    assert!(rule.dispatch(GestureKind::Drag, RawGesture::start()));
    assert_eq!(
        rule.element().attribute("data-drag-state").as_deref(),
        Some("active")
    );

    rule.dispatch(GestureKind::Drag, RawGesture::new().offset(150.0, 40.0));
    let drag = state.drag().expect("drag snapshot");
    assert_eq!(drag.offset(), Some(Vec2::new(100.0, 40.0)));
    assert!(drag.is_active());
    assert_eq!(
        rule.element().attribute("data-drag-state").as_deref(),
        Some("active")
    );

    rule.dispatch(GestureKind::Drag, RawGesture::end().offset(150.0, 40.0));
    assert_eq!(state.drag().and_then(|e| e.offset()), Some(Vec2::new(100.0, 40.0)));
    assert_eq!(
        rule.element().attribute("data-drag-state").as_deref(),
        Some("idle")
    );
}

#[test]
fn move_offset_is_written_to_named_custom_property() {
    let rule = GestureTestRule::new();
    let _gestures = rule.mount(
        GestureConfig::new()
            .with_move(MoveConfig)
            .with_css_vars(CssVarConfig::new().with_name(CssField::X, "--foo-x")),
    );

    rule.dispatch(GestureKind::Move, RawGesture::new().offset(42.0, 7.0));

    assert_eq!(rule.element().style("--foo-x").as_deref(), Some("42px"));
    assert!(rule.element().style_text().contains("--foo-x: 42px"));
    assert!(!rule.element().style_text().contains("7px"));
}

#[test]
fn drag_writes_every_channel_under_a_prefix() {
    let rule = GestureTestRule::new();
    let _gestures = rule.mount(
        GestureConfig::new()
            .with_drag(DragConfig::default())
            .with_css_vars(CssVarConfig::new().with_prefix("card")),
    );

    rule.dispatch(
        GestureKind::Drag,
        RawGesture::new()
            .offset(12.0, -4.0)
            .velocity(3.0, 4.0)
            .delta(2.0, 0.5),
    );

    let el = rule.element();
    assert_eq!(el.style("--card-drag-x").as_deref(), Some("12px"));
    assert_eq!(el.style("--card-drag-y").as_deref(), Some("-4px"));
    assert_eq!(el.style("--card-drag-velocity-x").as_deref(), Some("3"));
    assert_eq!(el.style("--card-drag-velocity-y").as_deref(), Some("4"));
    assert_eq!(el.style("--card-drag-delta-x").as_deref(), Some("2px"));
    assert_eq!(el.style("--card-drag-delta-y").as_deref(), Some("0.5px"));
    assert_eq!(el.style("--card-drag-momentum").as_deref(), Some("5"));
}

#[test]
fn pinch_is_clamped_to_scale_and_angle_ranges() {
    let rule = GestureTestRule::new();
    let _gestures = rule.mount(
        GestureConfig::new()
            .with_pinch(PinchConfig)
            .with_bounds(Bounds::default().with_scale(0.5, 2.0).with_angle(-45.0, 45.0))
            .with_css_vars(CssVarConfig::new().with_prefix("zoom")),
    );

    rule.dispatch(GestureKind::Pinch, RawGesture::new().offset(3.0, 30.0));

    assert_eq!(rule.element().style("--zoom-pinch-scale").as_deref(), Some("2"));
    assert_eq!(rule.element().style("--zoom-pinch-angle").as_deref(), Some("30deg"));
}

#[test]
fn hover_sets_state_attribute_but_no_custom_properties() {
    let rule = GestureTestRule::new();
    let _gestures = rule.mount(
        GestureConfig::new()
            .with_hover(HoverConfig)
            .with_css_vars(CssVarConfig::new().with_prefix("h")),
    );

    rule.dispatch(GestureKind::Hover, RawGesture::start().offset(5.0, 5.0));

    assert_eq!(
        rule.element().attribute("data-hover-state").as_deref(),
        Some("active")
    );
    assert_eq!(rule.element().style_text(), "");
}

#[test]
fn callbacks_run_typed_first_and_see_current_state() {
    let rule = GestureTestRule::new();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let seen_state: Rc<RefCell<Option<tactile_foundation::GestureStateMap>>> =
        Rc::new(RefCell::new(None));

    let drag_log = Rc::clone(&log);
    let drag_state = Rc::clone(&seen_state);
    let generic_log = Rc::clone(&log);
    let gestures = rule.mount(
        GestureConfig::new()
            .with_drag(DragConfig::default())
            .on_drag(move |event, phase| {
                let stored = drag_state
                    .borrow()
                    .as_ref()
                    .and_then(|state| state.drag());
                assert_eq!(stored.as_ref(), Some(event));
                drag_log
                    .borrow_mut()
                    .push(format!("drag:{}", phase.as_str()));
            })
            .on_gesture(move |event, phase| {
                generic_log
                    .borrow_mut()
                    .push(format!("gesture:{}:{}", event.kind(), phase.as_str()));
            }),
    );
    *seen_state.borrow_mut() = Some(gestures.state());

    rule.dispatch(GestureKind::Drag, RawGesture::start());
    rule.dispatch(GestureKind::Drag, RawGesture::new().offset(4.0, 0.0));
    rule.dispatch(GestureKind::Drag, RawGesture::end().offset(8.0, 0.0));

    assert_eq!(
        *log.borrow(),
        vec![
            "drag:start",
            "gesture:drag:start",
            "drag:move",
            "gesture:drag:move",
            "drag:end",
            "gesture:drag:end",
        ]
    );
}

#[test]
fn swipe_fires_once_on_release() {
    let rule = GestureTestRule::new();
    let swipes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&swipes);
    let _gestures = rule.mount(
        GestureConfig::new()
            .with_drag(DragConfig::default())
            .on_swipe(move |direction| sink.borrow_mut().push(direction)),
    );

    rule.dispatch(GestureKind::Drag, RawGesture::start().swipe(-1.0, 0.0));
    rule.dispatch(GestureKind::Drag, RawGesture::new().swipe(-1.0, 0.0));
    assert!(swipes.borrow().is_empty());

    rule.dispatch(GestureKind::Drag, RawGesture::end().swipe(-1.0, 0.0));
    assert_eq!(*swipes.borrow(), vec![SwipeDirection::Left]);

    rule.dispatch(GestureKind::Drag, RawGesture::start());
    rule.dispatch(GestureKind::Drag, RawGesture::end().swipe(0.7, 0.7));
    assert_eq!(swipes.borrow().len(), 1);
}

#[test]
fn transform_maps_pointer_position() {
    let rule = GestureTestRule::new();
    let gestures = rule.mount(
        GestureConfig::new()
            .with_drag(DragConfig::default())
            .with_transform(|v| v * 0.5),
    );

    rule.dispatch(GestureKind::Drag, RawGesture::start().xy(100.0, 40.0));

    assert_eq!(
        gestures.state().drag().and_then(|e| e.xy()),
        Some(Vec2::new(50.0, 20.0))
    );
}

#[test]
fn unconfigured_kinds_are_not_registered() {
    let rule = GestureTestRule::new();
    let _gestures = rule.mount(GestureConfig::new().with_drag(DragConfig::default()));

    assert_eq!(rule.recognizer().bound_kinds(), vec![GestureKind::Drag]);
    assert!(!rule.dispatch(GestureKind::Pinch, RawGesture::start()));
}

#[test]
fn touch_action_follows_configuration() {
    let none = GestureConfig::new().with_hover(HoverConfig);
    assert_eq!(touch_action_for(&none), "auto");

    let free = GestureConfig::new().with_drag(DragConfig::default());
    assert_eq!(touch_action_for(&free), "none");

    let horizontal = GestureConfig::new().with_drag(DragConfig::default().with_axis(Axis::X));
    assert_eq!(touch_action_for(&horizontal), "pan-y");

    let vertical = GestureConfig::new().with_drag(DragConfig::default().with_axis(Axis::Y));
    assert_eq!(touch_action_for(&vertical), "pan-x");

    let pinch = GestureConfig::new().with_pinch(PinchConfig);
    assert_eq!(touch_action_for(&pinch), "none");

    let rule = GestureTestRule::new();
    let gestures = rule.mount(horizontal);
    assert_eq!(gestures.props().style("touch-action"), Some("pan-y"));
}
