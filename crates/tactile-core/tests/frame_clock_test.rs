//! Frame clock behaviour as seen from outside the crate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_core::{Runtime, NANOS_PER_MILLI};

#[test]
fn dropping_registration_cancels_frame() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);

    let registration = clock.with_frame_nanos(move |_| flag.set(true));
    assert!(registration.is_active());
    drop(registration);

    runtime.handle().drain_frame_callbacks(16 * NANOS_PER_MILLI);
    assert!(!fired.get());
}

#[test]
fn with_frame_millis_reports_millis() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let seen = Rc::new(Cell::new(0));
    let slot = Rc::clone(&seen);

    let _registration = clock.with_frame_millis(move |millis| slot.set(millis));
    runtime.handle().drain_frame_callbacks(48 * NANOS_PER_MILLI);
    assert_eq!(seen.get(), 48);
}

#[test]
fn timers_due_before_a_frame_fire_before_its_callbacks() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    let timer_log = Rc::clone(&order);
    let _timer = handle.set_timeout(10, move || timer_log.borrow_mut().push("timer"));
    let frame_log = Rc::clone(&order);
    let _frame = runtime
        .frame_clock()
        .with_frame_nanos(move |_| frame_log.borrow_mut().push("frame"));

    handle.drain_frame_callbacks(16 * NANOS_PER_MILLI);
    assert_eq!(order.borrow().as_slice(), &["timer", "frame"]);
}
