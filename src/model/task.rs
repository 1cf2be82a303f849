use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier.
pub type TaskId = Uuid;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        }
    }
}

/// A single scheduled task on the timeline.
///
/// The task list is owned outside the layout core; the core only reads tasks
/// and proposes new intervals through a [`TaskChange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Grouping key. Blank means "use the default category".
    #[serde(default)]
    pub category: String,
    pub start_at: DateTime<Local>,
    pub end_at: DateTime<Local>,
    pub status: TaskStatus,
    /// Display-order tiebreak, dense `0..n-1` across the whole list.
    pub row: usize,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        start_at: DateTime<Local>,
        end_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            start_at,
            end_at,
            status: TaskStatus::Todo,
            row: 0,
        }
    }

    /// Wall-clock start, the basis for all layout arithmetic.
    pub fn start_local(&self) -> NaiveDateTime {
        self.start_at.naive_local()
    }

    /// Wall-clock end.
    pub fn end_local(&self) -> NaiveDateTime {
        self.end_at.naive_local()
    }

    /// Apply a committed change. Fields absent from the change are left as-is.
    pub fn apply(&mut self, change: &TaskChange) {
        if let Some(start_at) = change.start_at {
            self.start_at = start_at;
        }
        if let Some(end_at) = change.end_at {
            self.end_at = end_at;
        }
    }
}

/// Proposed edit produced by a completed gesture.
///
/// Only the fields the gesture mutates are set; `None` means unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Local>>,
}
