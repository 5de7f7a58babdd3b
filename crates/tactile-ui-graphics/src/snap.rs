//! Snap point configuration.

use smallvec::SmallVec;

/// Inline storage for a handful of snap candidates per axis.
pub type SnapPointList = SmallVec<[f32; 4]>;

/// Candidate points an offset may snap to.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum SnapPoints {
    /// Snapping disabled.
    #[default]
    None,
    /// The same candidates apply to both axes.
    Unified(SnapPointList),
    /// Independent candidates per axis.
    PerAxis { x: SnapPointList, y: SnapPointList },
}

impl SnapPoints {
    pub fn unified(points: impl IntoIterator<Item = f32>) -> Self {
        SnapPoints::Unified(points.into_iter().collect())
    }

    pub fn per_axis(
        x: impl IntoIterator<Item = f32>,
        y: impl IntoIterator<Item = f32>,
    ) -> Self {
        SnapPoints::PerAxis {
            x: x.into_iter().collect(),
            y: y.into_iter().collect(),
        }
    }

    pub fn x(&self) -> &[f32] {
        match self {
            SnapPoints::None => &[],
            SnapPoints::Unified(points) => points,
            SnapPoints::PerAxis { x, .. } => x,
        }
    }

    pub fn y(&self) -> &[f32] {
        match self {
            SnapPoints::None => &[],
            SnapPoints::Unified(points) => points,
            SnapPoints::PerAxis { y, .. } => y,
        }
    }

    /// True when no axis has a single candidate.
    pub fn is_empty(&self) -> bool {
        self.x().is_empty() && self.y().is_empty()
    }
}

/// Snap points plus the capture threshold.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SnapConfig {
    pub points: SnapPoints,
    /// Maximum distance at which a value is captured. Falls back to the
    /// caller's default when unset.
    pub threshold: Option<f32>,
}

impl SnapConfig {
    pub fn new(points: SnapPoints) -> Self {
        Self {
            points,
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn threshold_or(&self, default_threshold: f32) -> f32 {
        self.threshold.unwrap_or(default_threshold)
    }
}
