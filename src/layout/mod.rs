//! Timeline layout: viewport filtering, lane packing, row building and bar
//! geometry.

pub mod filter;
pub mod geometry;
pub mod lanes;
pub mod rows;

pub use filter::{is_visible, visible_tasks};
pub use geometry::{BarGeometry, PreviewGeometry};
pub use lanes::assign_lanes;
pub use rows::{build_rows, CategoryOrder, GanttRow};

use crate::model::{DisplayWindow, Task};

/// Full render pipeline: drop tasks outside the window, then group, order,
/// pack and project what remains.
pub fn layout_chart<'a>(
    tasks: &'a [Task],
    window: &DisplayWindow,
    order: &CategoryOrder,
) -> Vec<GanttRow<'a>> {
    let visible = visible_tasks(tasks, window);
    build_rows(&visible, window, order)
}
