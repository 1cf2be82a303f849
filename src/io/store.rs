//! JSON task store: the external owner of the task list persists through
//! these helpers.

use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::error::StoreError;
use crate::model::Task;

/// Load tasks from `path`.
///
/// A missing file is an empty list. Records that do not describe a valid
/// task are skipped one by one, blank categories are filled with
/// `default_category` and rows are renumbered `0..n-1`.
pub fn load_tasks(path: &Path, default_category: &str) -> Result<Vec<Task>, StoreError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let records: Vec<Value> = serde_json::from_str(&json).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tasks: Vec<Task> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(err) => {
                warn!("skipping task record {i} in {}: {err}", path.display());
                None
            }
        })
        .collect();

    for task in &mut tasks {
        let trimmed = task.category.trim();
        task.category = if trimmed.is_empty() {
            default_category.to_string()
        } else {
            trimmed.to_string()
        };
    }

    tasks.sort_by_key(|task| task.row);
    normalize_rows(&mut tasks);
    info!("loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Write tasks ordered by `row`, with rows renumbered.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut ordered = tasks.to_vec();
    ordered.sort_by_key(|task| task.row);
    normalize_rows(&mut ordered);

    let json = serde_json::to_string_pretty(&ordered).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)?;
    info!("saved {} tasks to {}", ordered.len(), path.display());
    Ok(())
}

/// Renumber `row` to match list position.
pub fn normalize_rows(tasks: &mut [Task]) {
    for (i, task) in tasks.iter_mut().enumerate() {
        task.row = i;
    }
}
