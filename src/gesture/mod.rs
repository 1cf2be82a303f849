//! Pointer gestures that turn continuous pointer movement into whole-day
//! interval edits.
//!
//! A gesture is captured on pointer down, previews a fractional day delta
//! while the pointer moves and commits a single [`TaskChange`] on release.
//! Only one gesture is live at a time; see [`GestureController`].
//!
//! [`TaskChange`]: crate::model::TaskChange

pub mod controller;
pub mod drag;
pub mod frame;
pub mod resize;

pub use controller::GestureController;
pub use drag::DragSession;
pub use frame::FrameCoalescer;
pub use resize::ResizeSession;

/// Geometry queries the gestures need from the view layer.
pub trait TimelineMetrics {
    /// Current width of one day column, in pixels.
    fn day_width_px(&self) -> f32;

    /// Continuous day offset under a horizontal pointer coordinate.
    ///
    /// Must not depend on the timeline's horizontal scroll position.
    fn day_offset_at(&self, pointer_x: f32) -> f32;
}

/// Metrics for a day strip whose content origin is known in the same
/// coordinate space as the pointer.
///
/// The content origin moves with scrolling, so offsets measured from it are
/// scroll invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub content_origin_x: f32,
    pub day_width_px: f32,
}

impl TimelineMetrics for StripMetrics {
    fn day_width_px(&self) -> f32 {
        self.day_width_px
    }

    fn day_offset_at(&self, pointer_x: f32) -> f32 {
        (pointer_x - self.content_origin_x) / self.day_width_px
    }
}

/// Mouse button that pressed the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Which part of a bar a pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarZone {
    Body,
    /// The trailing-edge resize affordance.
    ResizeHandle,
}

impl BarZone {
    /// Classify a press at `pointer_x` on a bar ending at `bar_right_x`.
    ///
    /// The handle covers the last `handle_width` pixels of the bar, so each
    /// press resolves to exactly one gesture.
    pub fn hit(pointer_x: f32, bar_right_x: f32, handle_width: f32) -> Self {
        if pointer_x >= bar_right_x - handle_width {
            BarZone::ResizeHandle
        } else {
            BarZone::Body
        }
    }
}

/// Day width usable for gesture math; anything else means the view is not
/// laid out yet.
pub(crate) fn usable_day_width(width: f32) -> Option<f32> {
    (width.is_finite() && width > 0.0).then_some(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 0.0, 0.0)]
    #[case(100.0, 250.0, 2.5)]
    #[case(-140.0, 60.0, 2.0)]
    fn strip_offsets_measure_from_content_origin(
        #[case] origin: f32,
        #[case] pointer: f32,
        #[case] expected: f32,
    ) {
        let metrics = StripMetrics {
            content_origin_x: origin,
            day_width_px: 100.0,
        };
        assert!((metrics.day_offset_at(pointer) - expected).abs() < 1e-5);
    }

    #[test]
    fn scrolling_shifts_origin_and_pointer_together() {
        let unscrolled = StripMetrics {
            content_origin_x: 40.0,
            day_width_px: 96.0,
        };
        let scrolled = StripMetrics {
            content_origin_x: 40.0 - 300.0,
            day_width_px: 96.0,
        };
        let a = unscrolled.day_offset_at(400.0);
        let b = scrolled.day_offset_at(400.0 - 300.0);
        assert!((a - b).abs() < 1e-5);
    }

    #[rstest]
    #[case(95.0, BarZone::ResizeHandle)]
    #[case(100.0, BarZone::ResizeHandle)]
    #[case(91.0, BarZone::ResizeHandle)]
    #[case(89.0, BarZone::Body)]
    #[case(10.0, BarZone::Body)]
    fn presses_resolve_to_one_zone(#[case] pointer: f32, #[case] expected: BarZone) {
        assert_eq!(BarZone::hit(pointer, 100.0, 10.0), expected);
    }

    #[rstest]
    #[case(24.0, Some(24.0))]
    #[case(0.0, None)]
    #[case(-3.0, None)]
    #[case(f32::NAN, None)]
    #[case(f32::INFINITY, None)]
    fn unusable_day_widths_are_rejected(#[case] width: f32, #[case] expected: Option<f32>) {
        assert_eq!(usable_day_width(width), expected);
    }
}
