use crate::model::{DisplayWindow, Task};

/// Half-open intersection of the task interval with the window.
pub fn is_visible(task: &Task, window: &DisplayWindow) -> bool {
    task.start_local() < window.end() && task.end_local() > window.anchor
}

/// Tasks whose interval intersects the window, in input order.
pub fn visible_tasks<'a>(tasks: &'a [Task], window: &DisplayWindow) -> Vec<&'a Task> {
    tasks.iter().filter(|task| is_visible(task, window)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::window::to_local;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    fn task(start: NaiveDateTime, end: NaiveDateTime) -> Task {
        Task::new("Code review", "Backend", to_local(start), to_local(end))
    }

    #[rstest]
    #[case::inside(dt(2, 9), dt(3, 17), true)]
    #[case::straddles_start(dt(1, 0) - chrono::Duration::days(2), dt(1, 1), true)]
    #[case::straddles_end(dt(7, 9), dt(9, 9), true)]
    #[case::ends_at_anchor(dt(1, 0) - chrono::Duration::days(1), dt(1, 0), false)]
    #[case::starts_at_window_end(dt(8, 0), dt(9, 0), false)]
    #[case::long_before(dt(1, 0) - chrono::Duration::days(20), dt(1, 0) - chrono::Duration::days(19), false)]
    fn visibility_is_half_open(
        #[case] start: NaiveDateTime,
        #[case] end: NaiveDateTime,
        #[case] expected: bool,
    ) {
        let window = DisplayWindow::new(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"), 7);
        assert_eq!(is_visible(&task(start, end), &window), expected);
    }

    #[test]
    fn filter_keeps_input_order() {
        let window = DisplayWindow::new(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"), 7);
        let tasks = vec![
            task(dt(5, 9), dt(6, 9)),
            task(dt(20, 9), dt(21, 9)),
            task(dt(2, 9), dt(3, 9)),
        ];
        let visible = visible_tasks(&tasks, &window);
        let ids: Vec<_> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![tasks[0].id, tasks[2].id]);
    }
}
