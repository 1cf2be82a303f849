//! Week-granularity Gantt timeline: layout engine and pointer gestures.
//!
//! Tasks flow through [`layout::layout_chart`] to become ordered
//! [`layout::GanttRow`]s with bar geometry. Pointer input flows through a
//! [`gesture::GestureController`], which previews edits and hands finished
//! ones to a commit callback. The task list itself is owned by the caller.

pub mod config;
pub mod error;
pub mod gesture;
pub mod io;
pub mod layout;
pub mod model;

pub use config::GanttSettings;
pub use error::{SettingsError, StoreError};
pub use gesture::{BarZone, GestureController, PointerButton, StripMetrics, TimelineMetrics};
pub use layout::{layout_chart, BarGeometry, CategoryOrder, GanttRow};
pub use model::{DisplayWindow, Task, TaskChange, TaskId, TaskStatus};
