use chrono::{Duration, NaiveDateTime};

use super::{usable_day_width, TimelineMetrics};
use crate::layout::{BarGeometry, PreviewGeometry};
use crate::model::window::to_local;
use crate::model::{DisplayWindow, Task, TaskChange, TaskId};

/// State of one in-flight move gesture on a bar body.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    task_id: TaskId,
    origin_offset: f32,
    last_offset: f32,
    baseline_start: NaiveDateTime,
    baseline_end: NaiveDateTime,
    baseline_geometry: BarGeometry,
}

impl DragSession {
    /// Capture a drag at `pointer_x`.
    ///
    /// Returns `None` when the view cannot yet answer geometry queries.
    pub fn begin(
        task: &Task,
        window: &DisplayWindow,
        pointer_x: f32,
        metrics: &impl TimelineMetrics,
    ) -> Option<Self> {
        usable_day_width(metrics.day_width_px())?;
        let origin_offset = metrics.day_offset_at(pointer_x);
        if !origin_offset.is_finite() {
            return None;
        }
        Some(Self {
            task_id: task.id,
            origin_offset,
            last_offset: origin_offset,
            baseline_start: task.start_local(),
            baseline_end: task.end_local(),
            baseline_geometry: BarGeometry::project(task.start_local(), task.end_local(), window),
        })
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Record a pointer position and return the fractional day delta.
    pub fn update(&mut self, pointer_x: f32, metrics: &impl TimelineMetrics) -> f32 {
        let offset = metrics.day_offset_at(pointer_x);
        if offset.is_finite() && usable_day_width(metrics.day_width_px()).is_some() {
            self.last_offset = offset;
        }
        self.delta()
    }

    /// Fractional day delta at the last recorded position.
    pub fn delta(&self) -> f32 {
        self.last_offset - self.origin_offset
    }

    /// Whole days the interval moves if released now.
    pub fn delta_days(&self) -> i64 {
        self.delta().round() as i64
    }

    /// Bar placement shifted by a preview delta, kept inside the window.
    pub fn preview(&self, delta: f32, window: &DisplayWindow) -> PreviewGeometry {
        PreviewGeometry::clamped(
            self.baseline_geometry.left_days as f32 + delta,
            self.baseline_geometry.width_days as f32,
            window,
        )
    }

    /// End the gesture at the last recorded position.
    ///
    /// A zero whole-day delta yields no change.
    pub fn finish(self, window: &DisplayWindow) -> Option<TaskChange> {
        let delta_days = self.delta_days();
        if delta_days == 0 {
            return None;
        }
        let (start, end) = shift_interval(self.baseline_start, self.baseline_end, delta_days, window);
        Some(TaskChange {
            start_at: Some(to_local(start)),
            end_at: Some(to_local(end)),
        })
    }
}

/// Move `[start, end)` by whole days, keeping each instant's time of day.
///
/// The new start day is clamped into the window and the new end day into
/// `[start day + 1, length]`; a collapsed result is widened to one day.
pub fn shift_interval(
    start: NaiveDateTime,
    end: NaiveDateTime,
    delta_days: i64,
    window: &DisplayWindow,
) -> (NaiveDateTime, NaiveDateTime) {
    let length = i64::from(window.length.max(1));

    let start_day = window.day_index(start).saturating_add(delta_days).clamp(0, length - 1);
    let end_day = window
        .day_index(end)
        .saturating_add(delta_days)
        .clamp(start_day + 1, length);

    let new_start = window.day_start(start_day).date().and_time(start.time());
    let mut new_end = window.day_start(end_day).date().and_time(end.time());
    if new_end <= new_start {
        new_end = new_start + Duration::days(1);
    }
    (new_start, new_end)
}
