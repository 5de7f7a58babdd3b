use super::*;

use std::cell::RefCell;
use tactile_core::{Runtime, NANOS_PER_MILLI};
use tactile_ui_graphics::SnapPoints;

const FRAME_NANOS: u64 = 16 * NANOS_PER_MILLI;

fn pump(runtime: &Runtime, frames: u32) {
    let handle = runtime.handle();
    for _ in 0..frames {
        let next = handle.now_nanos() + FRAME_NANOS;
        handle.drain_frame_callbacks(next);
    }
}

#[test]
fn runs_until_rest_and_reports_end() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let positions = Rc::new(RefCell::new(Vec::new()));
    let ended = Rc::new(RefCell::new(None));

    let sink = Rc::clone(&positions);
    let end_slot = Rc::clone(&ended);
    inertia.start(
        Vec2::ZERO,
        Vec2::new(10.0, 0.0),
        DecaySpec::new(0.9, 0.5),
        None,
        move |position| sink.borrow_mut().push(position),
        move |position| *end_slot.borrow_mut() = Some(position),
    );
    assert!(inertia.is_running());

    pump(&runtime, 40);

    assert!(!inertia.is_running());
    assert!(!runtime.handle().has_frame_callbacks());
    let positions = positions.borrow();
    assert_eq!(positions.len(), 29);
    assert!(positions.windows(2).all(|w| w[1].x >= w[0].x));
    assert_eq!(*ended.borrow(), positions.last().copied());
}

#[test]
fn cancel_stops_pending_frame() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let frames = Rc::new(Cell::new(0));
    let ended = Rc::new(Cell::new(false));

    let counter = Rc::clone(&frames);
    let end_flag = Rc::clone(&ended);
    inertia.start(
        Vec2::ZERO,
        Vec2::new(50.0, 50.0),
        DecaySpec::default(),
        None,
        move |_| counter.set(counter.get() + 1),
        move |_| end_flag.set(true),
    );

    pump(&runtime, 3);
    assert_eq!(frames.get(), 3);

    inertia.cancel();
    assert!(!inertia.is_running());
    assert!(!runtime.handle().has_frame_callbacks());

    pump(&runtime, 10);
    assert_eq!(frames.get(), 3);
    assert!(!ended.get(), "cancelled runs never report an end");
}

#[test]
fn restart_replaces_previous_run() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let first_frames = Rc::new(Cell::new(0));
    let second_frames = Rc::new(Cell::new(0));

    let first = Rc::clone(&first_frames);
    inertia.start(
        Vec2::ZERO,
        Vec2::new(20.0, 0.0),
        DecaySpec::default(),
        None,
        move |_| first.set(first.get() + 1),
        |_| {},
    );
    pump(&runtime, 2);

    let second = Rc::clone(&second_frames);
    inertia.start(
        Vec2::new(100.0, 0.0),
        Vec2::new(-20.0, 0.0),
        DecaySpec::default(),
        None,
        move |_| second.set(second.get() + 1),
        |_| {},
    );
    pump(&runtime, 2);

    assert_eq!(first_frames.get(), 2);
    assert_eq!(second_frames.get(), 2);
}

#[test]
fn tiny_velocity_ends_immediately() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let ended = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&ended);

    inertia.start(
        Vec2::new(4.0, 2.0),
        Vec2::ZERO,
        DecaySpec::default(),
        None,
        |_| panic!("no frame expected"),
        move |position| *slot.borrow_mut() = Some(position),
    );

    assert!(!inertia.is_running());
    assert_eq!(*ended.borrow(), Some(Vec2::new(4.0, 2.0)));
}

#[test]
fn settles_on_snap_point() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let ended = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&ended);

    inertia.start(
        Vec2::ZERO,
        Vec2::new(5.0, 0.0),
        DecaySpec::new(0.8, 0.5),
        Some((SnapConfig::new(SnapPoints::unified([0.0, 25.0])), 10.0)),
        |_| {},
        move |position| *slot.borrow_mut() = Some(position),
    );
    pump(&runtime, 30);

    assert_eq!(*ended.borrow(), Some(Vec2::new(25.0, 0.0)));
}

#[test]
fn on_frame_may_cancel_its_own_animation() {
    let runtime = Runtime::default();
    let inertia = InertiaAnimation::new(runtime.handle());
    let frames = Rc::new(Cell::new(0));

    let handle = inertia.clone();
    let counter = Rc::clone(&frames);
    inertia.start(
        Vec2::ZERO,
        Vec2::new(30.0, 0.0),
        DecaySpec::default(),
        None,
        move |_| {
            counter.set(counter.get() + 1);
            handle.cancel();
        },
        |_| {},
    );
    pump(&runtime, 5);

    assert_eq!(frames.get(), 1);
    assert!(!inertia.is_running());
}
