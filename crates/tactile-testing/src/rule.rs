use crate::fakes::{FakeCssReader, FakeElement, FakeHaptics, FakePointerEvents};
use crate::recognizer::ScriptedRecognizer;
use std::rc::Rc;
use tactile_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use tactile_foundation::{
    ElementRef, GestureConfig, GestureEnvironment, GestureKind, GestureRecognizer, Gestures,
    RawGestureState,
};

/// Frame period used by [`GestureTestRule::run_frames`].
pub const TEST_FRAME_MILLIS: u64 = 16;

/// Headless harness for exercising gesture bindings in tests.
///
/// Owns a runtime and one instance of every host fake. Time only moves when
/// the test advances it.
pub struct GestureTestRule {
    runtime: Runtime,
    element: Rc<FakeElement>,
    element_ref: ElementRef,
    haptics: Rc<FakeHaptics>,
    pointer_events: Rc<FakePointerEvents>,
    css: Rc<FakeCssReader>,
    recognizer: Rc<ScriptedRecognizer>,
}

impl GestureTestRule {
    pub fn new() -> Self {
        let element = Rc::new(FakeElement::new());
        Self {
            runtime: Runtime::default(),
            element_ref: ElementRef::attached(element.clone()),
            element,
            haptics: Rc::new(FakeHaptics::default()),
            pointer_events: Rc::new(FakePointerEvents::new()),
            css: Rc::new(FakeCssReader::new()),
            recognizer: Rc::new(ScriptedRecognizer::new()),
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn element(&self) -> &FakeElement {
        &self.element
    }

    pub fn element_ref(&self) -> ElementRef {
        self.element_ref.clone()
    }

    pub fn haptics(&self) -> &FakeHaptics {
        &self.haptics
    }

    pub fn pointer_events(&self) -> &FakePointerEvents {
        &self.pointer_events
    }

    pub fn css(&self) -> &FakeCssReader {
        &self.css
    }

    pub fn recognizer(&self) -> &ScriptedRecognizer {
        &self.recognizer
    }

    /// Environment wired to this rule's fakes.
    pub fn environment(&self) -> GestureEnvironment {
        GestureEnvironment::new(self.runtime.handle())
            .with_haptics(self.haptics.clone())
            .with_pointer_events(self.pointer_events.clone())
            .with_css_reader(self.css.clone())
    }

    /// Binds `config` to the fake element through the scripted recognizer.
    pub fn mount(&self, config: GestureConfig) -> Gestures {
        let recognizer: Rc<dyn GestureRecognizer> = self.recognizer.clone();
        Gestures::new(config, self.element_ref(), self.environment(), recognizer)
    }

    pub fn dispatch(&self, kind: GestureKind, raw: impl Into<RawGestureState>) -> bool {
        self.recognizer.dispatch(kind, raw.into())
    }

    pub fn now_millis(&self) -> u64 {
        self.runtime.handle().now_millis()
    }

    /// Fires due timers, then runs one frame at `millis`.
    pub fn advance_frame_to(&self, millis: u64) {
        self.runtime
            .handle()
            .drain_frame_callbacks(millis * NANOS_PER_MILLI);
    }

    /// Moves time to `millis` without running a frame.
    pub fn advance_time_to(&self, millis: u64) {
        self.runtime.handle().advance_time(millis * NANOS_PER_MILLI);
    }

    /// Runs frames every [`TEST_FRAME_MILLIS`] while frame callbacks are
    /// pending, at most `max_frames` times. Returns the frames run.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while frames < max_frames && handle.has_frame_callbacks() {
            let next = handle.now_millis() + TEST_FRAME_MILLIS;
            self.advance_frame_to(next);
            frames += 1;
        }
        frames
    }

    /// True while frames or timers are still scheduled.
    pub fn has_pending_work(&self) -> bool {
        let handle = self.runtime.handle();
        handle.has_frame_callbacks() || handle.has_pending_timers()
    }
}

impl Default for GestureTestRule {
    fn default() -> Self {
        Self::new()
    }
}
