//! Presentation side channel: gesture fields as inline custom properties.
//!
//! Writing custom properties lets stylesheets follow a gesture without the
//! owning component re-rendering. Every write is best effort: a detached
//! element, a missing config or an unnamed field is silently skipped.

use crate::event::{GestureEvent, GestureKind};
use crate::host::ElementRef;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tactile_ui_graphics::{magnitude, Vec2};

/// Fallback name of the long-press progress property.
pub const LONG_PRESS_PROGRESS_VAR: &str = "--longpress-progress";

/// Semantic channel a custom property can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssField {
    X,
    Y,
    VelocityX,
    VelocityY,
    DeltaX,
    DeltaY,
    Momentum,
    Scale,
    Angle,
    Progress,
}

impl CssField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssField::X => "x",
            CssField::Y => "y",
            CssField::VelocityX => "velocity-x",
            CssField::VelocityY => "velocity-y",
            CssField::DeltaX => "delta-x",
            CssField::DeltaY => "delta-y",
            CssField::Momentum => "momentum",
            CssField::Scale => "scale",
            CssField::Angle => "angle",
            CssField::Progress => "progress",
        }
    }

    /// Formats `value` in this channel's unit.
    pub fn format(&self, value: f32) -> String {
        match self {
            CssField::X | CssField::Y | CssField::DeltaX | CssField::DeltaY => {
                format!("{value}px")
            }
            CssField::Angle => format!("{value}deg"),
            CssField::VelocityX
            | CssField::VelocityY
            | CssField::Momentum
            | CssField::Scale
            | CssField::Progress => format!("{value}"),
        }
    }
}

/// Which custom properties the engine owns on an element.
///
/// A field is written to its explicit name when one is set, otherwise to
/// `--{prefix}-{kind}-{field}` when a prefix is set, otherwise not at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssVarConfig {
    pub prefix: Option<String>,
    pub names: FxHashMap<CssField, String>,
}

impl CssVarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_name(mut self, field: CssField, name: impl Into<String>) -> Self {
        self.names.insert(field, name.into());
        self
    }

    pub fn property_name(&self, kind: GestureKind, field: CssField) -> Option<String> {
        if let Some(name) = self.names.get(&field) {
            return Some(name.clone());
        }
        self.prefix
            .as_ref()
            .map(|prefix| format!("--{}-{}-{}", prefix, kind.as_str(), field.as_str()))
    }
}

/// Channel values an event contributes, in write order.
pub fn css_values(event: &GestureEvent) -> SmallVec<[(CssField, f32); 7]> {
    let mut values = SmallVec::new();
    match event {
        GestureEvent::Drag(drag) => {
            let s = &drag.state;
            values.push((CssField::X, s.offset.x));
            values.push((CssField::Y, s.offset.y));
            values.push((CssField::VelocityX, s.velocity.x));
            values.push((CssField::VelocityY, s.velocity.y));
            values.push((CssField::DeltaX, s.delta.x));
            values.push((CssField::DeltaY, s.delta.y));
            values.push((CssField::Momentum, magnitude(s.velocity)));
        }
        GestureEvent::Move(p) => {
            values.push((CssField::X, p.state.offset.x));
            values.push((CssField::Y, p.state.offset.y));
        }
        GestureEvent::Scroll(a) | GestureEvent::Wheel(a) => {
            values.push((CssField::X, a.state.offset.x));
            values.push((CssField::Y, a.state.offset.y));
        }
        GestureEvent::Pinch(p) => {
            values.push((CssField::Scale, p.state.offset.x));
            values.push((CssField::Angle, p.state.offset.y));
        }
        // Hover has no channels; long-press progress belongs to its machine.
        GestureEvent::Hover(_) | GestureEvent::LongPress(_) => {}
    }
    values
}

fn write_values(
    element: &ElementRef,
    kind: GestureKind,
    values: &[(CssField, f32)],
    config: &CssVarConfig,
) {
    element.with(|el| {
        for (field, value) in values {
            if let Some(name) = config.property_name(kind, *field) {
                el.set_style_property(&name, &field.format(*value));
            }
        }
    });
}

/// Mirrors `event` onto the element's inline custom properties.
pub fn sync_css_vars(element: &ElementRef, event: &GestureEvent, config: Option<&CssVarConfig>) {
    let Some(config) = config else {
        return;
    };
    let values = css_values(event);
    if values.is_empty() {
        return;
    }
    write_values(element, event.kind(), &values, config);
}

/// Writes a simulated position through the `x`/`y` channels of `kind`.
pub fn write_position(
    element: &ElementRef,
    kind: GestureKind,
    position: Vec2,
    config: Option<&CssVarConfig>,
) {
    if let Some(config) = config {
        write_values(
            element,
            kind,
            &[(CssField::X, position.x), (CssField::Y, position.y)],
            config,
        );
    }
}

/// Name of the long-press progress property.
pub fn progress_property(config: Option<&CssVarConfig>) -> String {
    config
        .and_then(|c| c.property_name(GestureKind::LongPress, CssField::Progress))
        .unwrap_or_else(|| LONG_PRESS_PROGRESS_VAR.to_string())
}
