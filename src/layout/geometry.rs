use chrono::NaiveDateTime;

use crate::model::window::span_days;
use crate::model::DisplayWindow;

/// Horizontal placement of a bar, in whole days relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub left_days: i64,
    pub width_days: i64,
}

impl BarGeometry {
    /// Project `[start, end)` onto the window.
    ///
    /// The result always lies fully inside the window: bars that start before
    /// or run past the edges are clipped, never hidden, and are at least one
    /// day wide.
    pub fn project(start: NaiveDateTime, end: NaiveDateTime, window: &DisplayWindow) -> Self {
        let length = i64::from(window.length.max(1));
        let left_days = window.day_index(start).clamp(0, length - 1);
        let width_days = span_days(start, end).min(length - left_days).max(1);
        Self {
            left_days,
            width_days,
        }
    }

    /// Left edge as a percentage of the window width.
    pub fn left_percent(&self, window: &DisplayWindow) -> f32 {
        self.left_days as f32 / window.length as f32 * 100.0
    }

    /// Width as a percentage of the window width.
    pub fn width_percent(&self, window: &DisplayWindow) -> f32 {
        self.width_days as f32 / window.length as f32 * 100.0
    }

    pub fn right_days(&self) -> i64 {
        self.left_days + self.width_days
    }
}

/// Fractional placement used while a gesture preview is live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewGeometry {
    pub left_days: f32,
    pub width_days: f32,
}

impl PreviewGeometry {
    /// Apply the projector's clamp rules to fractional values.
    pub fn clamped(left_days: f32, width_days: f32, window: &DisplayWindow) -> Self {
        let length = window.length.max(1) as f32;
        let left_days = if left_days.is_finite() {
            left_days.clamp(0.0, length - 1.0)
        } else {
            0.0
        };
        let width_days = if width_days.is_finite() {
            width_days.min(length - left_days).max(1.0)
        } else {
            1.0
        };
        Self {
            left_days,
            width_days,
        }
    }
}

impl From<BarGeometry> for PreviewGeometry {
    fn from(geometry: BarGeometry) -> Self {
        Self {
            left_days: geometry.left_days as f32,
            width_days: geometry.width_days as f32,
        }
    }
}
