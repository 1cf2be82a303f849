pub mod seed;
pub mod store;

pub use seed::sample_tasks;
pub use store::{load_tasks, normalize_rows, save_tasks};
