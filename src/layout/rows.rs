use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::geometry::BarGeometry;
use super::lanes::{assign_lanes, lane_count};
use crate::model::{DisplayWindow, Task};

/// Category sort key: declared categories first in declared order, then any
/// other category alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder {
    declared: Vec<String>,
    default_category: String,
}

impl CategoryOrder {
    pub fn new(declared: Vec<String>, default_category: impl Into<String>) -> Self {
        Self {
            declared,
            default_category: default_category.into(),
        }
    }

    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Grouping key for a task, with blank categories mapped to the default.
    pub fn resolve<'a>(&'a self, category: &'a str) -> &'a str {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            &self.default_category
        } else {
            trimmed
        }
    }

    fn rank(&self, category: &str) -> Option<usize> {
        self.declared.iter().position(|c| c == category)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl Default for CategoryOrder {
    fn default() -> Self {
        let declared = ["Frontend", "Backend", "DevOps", "Design", "Other"]
            .into_iter()
            .map(String::from)
            .collect();
        Self::new(declared, "Frontend")
    }
}

/// One entry of the render contract between the layout core and the view.
#[derive(Debug, Clone, PartialEq)]
pub enum GanttRow<'a> {
    CategoryHeader {
        category: String,
        /// Lanes used by the block that follows.
        lanes: usize,
    },
    TaskBar {
        task: &'a Task,
        lane: usize,
        geometry: BarGeometry,
    },
}

/// Group tasks by category, order them, pack lanes and project geometry.
///
/// Emits a header per category followed by one bar per task. Within a
/// category bars follow `row` then start time, so date-only edits never
/// reorder them.
pub fn build_rows<'a>(
    tasks: &[&'a Task],
    window: &DisplayWindow,
    order: &CategoryOrder,
) -> Vec<GanttRow<'a>> {
    let mut groups: BTreeMap<String, Vec<&'a Task>> = BTreeMap::new();
    for &task in tasks {
        groups
            .entry(order.resolve(&task.category).to_string())
            .or_default()
            .push(task);
    }

    let mut groups: Vec<(String, Vec<&'a Task>)> = groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| order.compare(a, b));

    let mut rows = Vec::with_capacity(groups.len() + tasks.len());
    for (category, mut members) in groups {
        members.sort_by(|a, b| {
            a.row
                .cmp(&b.row)
                .then_with(|| a.start_local().cmp(&b.start_local()))
        });

        let intervals: Vec<_> = members
            .iter()
            .map(|t| (t.start_local(), t.end_local()))
            .collect();
        let lanes = assign_lanes(&intervals);

        rows.push(GanttRow::CategoryHeader {
            category,
            lanes: lane_count(&lanes),
        });
        rows.extend(members.into_iter().zip(lanes).map(|(task, lane)| {
            GanttRow::TaskBar {
                task,
                lane,
                geometry: BarGeometry::project(task.start_local(), task.end_local(), window),
            }
        }));
    }

    rows
}
