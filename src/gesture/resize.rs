use chrono::{Duration, NaiveDateTime};

use super::{usable_day_width, TimelineMetrics};
use crate::layout::{BarGeometry, PreviewGeometry};
use crate::model::window::to_local;
use crate::model::{DisplayWindow, Task, TaskChange, TaskId};

/// State of one in-flight end-date resize on a bar's trailing handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    task_id: TaskId,
    origin_x: f32,
    last_x: f32,
    /// Frozen at capture so the mapping stays linear for the whole gesture.
    day_width_px: f32,
    baseline_start: NaiveDateTime,
    baseline_end: NaiveDateTime,
    baseline_geometry: BarGeometry,
}

impl ResizeSession {
    /// Capture a resize at `pointer_x`.
    ///
    /// Returns `None` when the day width is not a positive finite number.
    pub fn begin(
        task: &Task,
        window: &DisplayWindow,
        pointer_x: f32,
        metrics: &impl TimelineMetrics,
    ) -> Option<Self> {
        let day_width_px = usable_day_width(metrics.day_width_px())?;
        if !pointer_x.is_finite() {
            return None;
        }
        Some(Self {
            task_id: task.id,
            origin_x: pointer_x,
            last_x: pointer_x,
            day_width_px,
            baseline_start: task.start_local(),
            baseline_end: task.end_local(),
            baseline_geometry: BarGeometry::project(task.start_local(), task.end_local(), window),
        })
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Record a pointer position and return the fractional day delta.
    pub fn update(&mut self, pointer_x: f32) -> f32 {
        if pointer_x.is_finite() {
            self.last_x = pointer_x;
        }
        self.delta()
    }

    pub fn delta(&self) -> f32 {
        (self.last_x - self.origin_x) / self.day_width_px
    }

    pub fn delta_days(&self) -> i64 {
        self.delta().round() as i64
    }

    /// Bar placement with its width stretched by a preview delta.
    pub fn preview(&self, delta: f32, window: &DisplayWindow) -> PreviewGeometry {
        let left = self.baseline_geometry.left_days as f32;
        let max_width = window.length as f32 - left;
        let width = (self.baseline_geometry.width_days as f32 + delta).clamp(1.0, max_width.max(1.0));
        PreviewGeometry::clamped(left, width, window)
    }

    /// End the gesture at the last recorded position. Only `end_at` is ever
    /// proposed.
    pub fn finish(self, window: &DisplayWindow) -> Option<TaskChange> {
        let delta_days = self.delta_days();
        if delta_days == 0 {
            return None;
        }
        let end = resize_end(self.baseline_start, self.baseline_end, delta_days, window);
        Some(TaskChange {
            start_at: None,
            end_at: Some(to_local(end)),
        })
    }
}

/// Move `end` by whole days, bounded by the window's far edge and by a one
/// day minimum after `start`.
///
/// The minimum wins if the two bounds cross. Deltas too large to represent
/// as a date saturate at the window edge or the minimum.
pub fn resize_end(
    start: NaiveDateTime,
    end: NaiveDateTime,
    delta_days: i64,
    window: &DisplayWindow,
) -> NaiveDateTime {
    let moved = Duration::try_days(delta_days)
        .and_then(|delta| end.checked_add_signed(delta))
        .unwrap_or(if delta_days > 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        });
    let floor = start.checked_add_signed(Duration::days(1)).unwrap_or(start);
    moved.min(window.end()).max(floor)
}
