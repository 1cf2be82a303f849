use log::debug;

use super::{BarZone, DragSession, FrameCoalescer, PointerButton, ResizeSession, TimelineMetrics};
use crate::layout::PreviewGeometry;
use crate::model::{DisplayWindow, Task, TaskChange, TaskId};

/// The single gesture currently holding the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Gesture {
    pub fn task_id(&self) -> TaskId {
        match self {
            Gesture::Drag(session) => session.task_id(),
            Gesture::Resize(session) => session.task_id(),
        }
    }

    fn preview(&self, delta: f32, window: &DisplayWindow) -> PreviewGeometry {
        match self {
            Gesture::Drag(session) => session.preview(delta, window),
            Gesture::Resize(session) => session.preview(delta, window),
        }
    }

    fn finish(self, window: &DisplayWindow) -> Option<TaskChange> {
        match self {
            Gesture::Drag(session) => session.finish(window),
            Gesture::Resize(session) => session.finish(window),
        }
    }
}

/// Routes pointer events for the whole chart to at most one captured
/// gesture.
///
/// Preview deltas go through a [`FrameCoalescer`]: moves between frames
/// overwrite each other and [`on_frame`](Self::on_frame) applies the latest.
/// Every completed gesture calls the commit callback at most once.
#[derive(Debug, Default)]
pub struct GestureController {
    active: Option<Gesture>,
    frames: FrameCoalescer<f32>,
    preview_delta: f32,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Try to capture the pointer for `task`.
    ///
    /// Only primary presses start a gesture, and never while another one is
    /// live. The zone picks drag or resize, never both. Returns whether a
    /// gesture was captured.
    pub fn pointer_down(
        &mut self,
        task: &Task,
        zone: BarZone,
        button: PointerButton,
        pointer_x: f32,
        window: &DisplayWindow,
        metrics: &impl TimelineMetrics,
    ) -> bool {
        if button != PointerButton::Primary || self.active.is_some() {
            return false;
        }

        let gesture = match zone {
            BarZone::Body => DragSession::begin(task, window, pointer_x, metrics).map(Gesture::Drag),
            BarZone::ResizeHandle => {
                ResizeSession::begin(task, window, pointer_x, metrics).map(Gesture::Resize)
            }
        };

        match gesture {
            Some(gesture) => {
                debug!("{zone:?} gesture captured for task {}", task.id);
                self.frames.cancel();
                self.preview_delta = 0.0;
                self.active = Some(gesture);
                true
            }
            None => {
                debug!("timeline not laid out, ignoring press on task {}", task.id);
                false
            }
        }
    }

    /// Feed a pointer move to the live gesture.
    ///
    /// Returns `true` when the caller should schedule a frame.
    pub fn pointer_move(&mut self, pointer_x: f32, metrics: &impl TimelineMetrics) -> bool {
        let delta = match self.active.as_mut() {
            Some(Gesture::Drag(session)) => session.update(pointer_x, metrics),
            Some(Gesture::Resize(session)) => session.update(pointer_x),
            None => return false,
        };
        self.frames.schedule(delta)
    }

    /// Apply the most recent coalesced preview. Call once per frame.
    pub fn on_frame(&mut self) {
        if let Some(delta) = self.frames.take() {
            self.preview_delta = delta;
        }
    }

    /// Transient placement for `task_id`, if it is the one being edited.
    pub fn preview(&self, task_id: TaskId, window: &DisplayWindow) -> Option<PreviewGeometry> {
        self.active
            .as_ref()
            .filter(|gesture| gesture.task_id() == task_id)
            .map(|gesture| gesture.preview(self.preview_delta, window))
    }

    /// Release at `pointer_x` and commit if the interval changed by at least
    /// one whole day.
    pub fn pointer_up(
        &mut self,
        pointer_x: Option<f32>,
        window: &DisplayWindow,
        metrics: &impl TimelineMetrics,
        on_change: impl FnOnce(TaskId, TaskChange),
    ) {
        if let Some(x) = pointer_x {
            self.pointer_move(x, metrics);
        }
        self.release(window, on_change);
    }

    /// Platform cancel: finish from the last position the gesture saw.
    pub fn pointer_cancel(
        &mut self,
        window: &DisplayWindow,
        on_change: impl FnOnce(TaskId, TaskChange),
    ) {
        if self.active.is_some() {
            debug!("pointer cancelled, finishing from last known position");
        }
        self.release(window, on_change);
    }

    fn release(&mut self, window: &DisplayWindow, on_change: impl FnOnce(TaskId, TaskChange)) {
        self.frames.cancel();
        self.preview_delta = 0.0;
        let Some(gesture) = self.active.take() else {
            return;
        };
        let task_id = gesture.task_id();
        match gesture.finish(window) {
            Some(change) => {
                debug!("committing {change:?} for task {task_id}");
                on_change(task_id, change);
            }
            None => debug!("gesture on task {task_id} ended without a whole-day change"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::StripMetrics;
    use crate::model::window::to_local;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::{fixture, rstest};

    const DAY_PX: f32 = 100.0;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    #[fixture]
    fn week() -> DisplayWindow {
        DisplayWindow::new(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"), 7)
    }

    #[fixture]
    fn metrics() -> StripMetrics {
        StripMetrics {
            content_origin_x: 0.0,
            day_width_px: DAY_PX,
        }
    }

    #[fixture]
    fn task() -> Task {
        Task::new("Deploy staging", "DevOps", to_local(dt(2, 9)), to_local(dt(3, 17)))
    }

    fn commits(
        controller: &mut GestureController,
        pointer_x: Option<f32>,
        window: &DisplayWindow,
        metrics: &StripMetrics,
    ) -> Vec<(TaskId, TaskChange)> {
        let mut calls = Vec::new();
        controller.pointer_up(pointer_x, window, metrics, |id, change| calls.push((id, change)));
        calls
    }

    #[rstest]
    fn drag_commits_once_with_both_fields(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        assert!(controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics));
        controller.pointer_move(120.0, &metrics);
        controller.pointer_move(50.0, &metrics);

        let calls = commits(&mut controller, Some(50.0), &week, &metrics);

        assert_eq!(calls.len(), 1);
        let (id, change) = calls[0];
        assert_eq!(id, task.id);
        assert_eq!(change.start_at.map(|t| t.naive_local()), Some(dt(1, 9)));
        assert_eq!(change.end_at.map(|t| t.naive_local()), Some(dt(2, 17)));
        assert!(!controller.is_active());
    }

    #[rstest]
    fn resize_commits_only_end(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::ResizeHandle, PointerButton::Primary, 300.0, &week, &metrics);
        let calls = commits(&mut controller, Some(400.0), &week, &metrics);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.start_at, None);
        assert_eq!(calls[0].1.end_at.map(|t| t.naive_local()), Some(dt(4, 17)));
    }

    #[rstest]
    fn resize_release_with_tiny_day_width_commits_the_floor(task: Task, week: DisplayWindow) {
        let metrics = StripMetrics {
            content_origin_x: 0.0,
            day_width_px: 1e-12,
        };
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::ResizeHandle, PointerButton::Primary, 100.0, &week, &metrics);
        let calls = commits(&mut controller, Some(90.0), &week, &metrics);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.end_at.map(|t| t.naive_local()), Some(dt(3, 9)));
    }

    #[rstest]
    fn zero_delta_release_does_not_commit(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics);
        controller.pointer_move(190.0, &metrics);
        assert!(commits(&mut controller, Some(160.0), &week, &metrics).is_empty());
        assert!(!controller.is_active());
    }

    #[rstest]
    #[case(PointerButton::Secondary)]
    #[case(PointerButton::Middle)]
    fn non_primary_presses_are_ignored(
        task: Task,
        week: DisplayWindow,
        metrics: StripMetrics,
        #[case] button: PointerButton,
    ) {
        let mut controller = GestureController::new();
        assert!(!controller.pointer_down(&task, BarZone::Body, button, 150.0, &week, &metrics));
        assert!(!controller.pointer_move(400.0, &metrics));
        assert!(commits(&mut controller, Some(400.0), &week, &metrics).is_empty());
    }

    #[rstest]
    fn second_press_cannot_steal_capture(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let other = Task::new("Security audit", "DevOps", to_local(dt(4, 9)), to_local(dt(5, 9)));
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics);
        assert!(!controller.pointer_down(&other, BarZone::ResizeHandle, PointerButton::Primary, 400.0, &week, &metrics));
        assert_eq!(controller.active().map(Gesture::task_id), Some(task.id));
        assert!(matches!(controller.active(), Some(Gesture::Drag(_))));
    }

    #[rstest]
    fn previews_are_coalesced_per_frame(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics);

        assert!(controller.pointer_move(175.0, &metrics));
        assert!(!controller.pointer_move(200.0, &metrics));
        assert!(!controller.pointer_move(225.0, &metrics));

        // Nothing is applied until the frame fires.
        let before = controller.preview(task.id, &week).expect("preview");
        assert_eq!(before.left_days, 1.0);

        controller.on_frame();
        let after = controller.preview(task.id, &week).expect("preview");
        assert!((after.left_days - 1.75).abs() < 1e-5);

        assert!(controller.pointer_move(250.0, &metrics));
    }

    #[rstest]
    fn preview_only_applies_to_captured_task(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics);
        assert!(controller.preview(uuid::Uuid::new_v4(), &week).is_none());
    }

    #[rstest]
    fn cancel_commits_last_known_position(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics);
        controller.pointer_move(360.0, &metrics);

        let mut calls = Vec::new();
        controller.pointer_cancel(&week, |id, change| calls.push((id, change)));

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.start_at.map(|t| t.naive_local()), Some(dt(4, 9)));
        assert!(!controller.is_active());
        assert!(controller.preview(task.id, &week).is_none());
        assert!(!controller.pointer_move(500.0, &metrics));
    }

    #[rstest]
    fn cancel_without_movement_reverts(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::ResizeHandle, PointerButton::Primary, 150.0, &week, &metrics);
        let mut calls = Vec::new();
        controller.pointer_cancel(&week, |id, change| calls.push((id, change)));
        assert!(calls.is_empty());
        assert!(!controller.is_active());
    }

    #[rstest]
    fn release_without_coordinates_uses_last_move(task: Task, week: DisplayWindow, metrics: StripMetrics) {
        let mut controller = GestureController::new();
        controller.pointer_down(&task, BarZone::ResizeHandle, PointerButton::Primary, 150.0, &week, &metrics);
        controller.pointer_move(350.0, &metrics);
        let calls = commits(&mut controller, None, &week, &metrics);
        assert_eq!(calls[0].1.end_at.map(|t| t.naive_local()), Some(dt(5, 17)));
    }

    #[rstest]
    fn unready_view_captures_nothing(task: Task, week: DisplayWindow) {
        let metrics = StripMetrics {
            content_origin_x: 0.0,
            day_width_px: f32::NAN,
        };
        let mut controller = GestureController::new();
        assert!(!controller.pointer_down(&task, BarZone::Body, PointerButton::Primary, 150.0, &week, &metrics));
        assert!(!controller.is_active());
    }
}
