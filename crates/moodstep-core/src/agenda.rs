//! Today's view of the task list.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::clock::is_same_local_day;
use crate::subject::AdHocTask;

/// Open tasks split by schedule, plus what was finished today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agenda<'a> {
    pub overdue: Vec<&'a AdHocTask>,
    /// Sorted by scheduled time, soonest first.
    pub upcoming: Vec<&'a AdHocTask>,
    pub completed_today: Vec<&'a AdHocTask>,
}

pub fn agenda<'a>(tasks: &'a [AdHocTask], now: &DateTime<FixedOffset>) -> Agenda<'a> {
    let mut overdue = Vec::new();
    let mut upcoming = Vec::new();
    let mut completed_today = Vec::new();

    for task in tasks {
        if task.completed {
            if task.completed_at.is_some_and(|at| is_same_local_day(at, now)) {
                completed_today.push(task);
            }
        } else if task.is_overdue(now) {
            overdue.push(task);
        } else {
            upcoming.push(task);
        }
    }

    overdue.sort_by_key(|t| t.scheduled_time);
    upcoming.sort_by_key(|t| t.scheduled_time);

    Agenda {
        overdue,
        upcoming,
        completed_today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::EmotionalState;
    use crate::subject::Priority;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 14, 0, 0)
            .unwrap()
    }

    fn task(title: &str, minutes_from_now: i64) -> AdHocTask {
        let at = now().with_timezone(&Utc);
        AdHocTask::new(title, "Work", Priority::Medium, at + Duration::minutes(minutes_from_now), at)
            .unwrap()
    }

    #[test]
    fn partitions_tasks_by_schedule_and_completion() {
        let (finished, _) = task("Call mom", -30).complete(EmotionalState::Good, &now()).unwrap();
        let (old, _) = task("Clean kitchen", -60)
            .complete(EmotionalState::Good, &(now() - Duration::days(1)))
            .unwrap();

        let tasks = vec![
            task("Clean garage", 240),
            task("Write project report", 30),
            task("Pay rent", -5),
            finished,
            old,
        ];
        let view = agenda(&tasks, &now());

        let titles = |list: &[&AdHocTask]| list.iter().map(|t| t.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&view.overdue), vec!["Pay rent"]);
        assert_eq!(titles(&view.upcoming), vec!["Write project report", "Clean garage"]);
        assert_eq!(titles(&view.completed_today), vec!["Call mom"]);
    }
}
