pub mod task;
pub mod window;

pub use task::{Task, TaskChange, TaskId, TaskStatus};
pub use window::DisplayWindow;
