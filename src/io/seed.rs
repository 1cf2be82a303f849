//! Demo data for an empty store.

use chrono::{Duration, NaiveTime};

use crate::model::window::to_local;
use crate::model::{DisplayWindow, Task, TaskStatus};

const NAMES: &[&str] = &[
    "Research competitors",
    "Design wireframes",
    "Setup CI/CD",
    "Implement auth",
    "Write API docs",
    "Database migration",
    "Frontend dashboard",
    "Backend services",
    "Code review",
    "Bug fixes",
    "Performance tuning",
    "User testing",
    "Deploy staging",
    "Security audit",
    "Sprint planning",
    "Refactor module",
    "Add logging",
    "Fix accessibility",
    "Integration tests",
    "Monitoring setup",
    "Caching layer",
    "Dark mode",
    "Admin panel",
    "Offline support",
];

const MAX_DURATION_DAYS: i64 = 5;

/// Build `count` tasks spread over `window`.
///
/// Each task starts on one of the first `length - 1` days, lasts between one
/// and five days without running past the window, and starts and ends at a
/// time between 06:00 and 16:59. A one-day window has no room for that, so
/// its tasks end a few hours after they start on the same day. Categories
/// are taken round-robin from `categories`; rows are `0..count`.
pub fn sample_tasks(window: &DisplayWindow, categories: &[String], count: usize) -> Vec<Task> {
    let length = i64::from(window.length);
    let start_days = (length - 1).max(1);

    (0..count)
        .map(|i| {
            let n = i as i64;
            // Spread starts with a stride coprime to most small window lengths.
            let start_day = (n * 3 + n / start_days) % start_days;
            let max_duration = MAX_DURATION_DAYS.min(length - start_day - 1);

            let start = window.day_start(start_day).date().and_time(time_of_day(n * 37));
            let end = if max_duration < 1 {
                start + Duration::hours(1 + n % 6)
            } else {
                let duration = 1 + (n * 7 + 2) % max_duration;
                (window.day_start(start_day) + Duration::days(duration))
                    .date()
                    .and_time(time_of_day(n * 53 + 11))
            };

            let name = match NAMES.get(i) {
                Some(name) => (*name).to_string(),
                None => format!("{} {}", NAMES[i % NAMES.len()], i / NAMES.len() + 1),
            };
            let category = if categories.is_empty() {
                String::new()
            } else {
                categories[i % categories.len()].clone()
            };

            let mut task = Task::new(name, category, to_local(start), to_local(end));
            task.status = TaskStatus::ALL[i % TaskStatus::ALL.len()];
            task.row = i;
            task
        })
        .collect()
}

/// A time between 06:00 and 16:59, derived from `seed`.
fn time_of_day(seed: i64) -> NaiveTime {
    let minutes = seed.rem_euclid(11 * 60);
    NaiveTime::from_hms_opt(6 + (minutes / 60) as u32, (minutes % 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}
