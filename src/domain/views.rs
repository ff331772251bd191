use super::enums::ViewMode;
use super::task::{format_time, Task};
use chrono::{Datelike, Duration, NaiveDate};

/// ISO calendar date used for due dates
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The Sunday that starts the week containing `today`
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_sunday() as i64)
}

/// The seven dates Sunday through Saturday of the week containing `today`
pub fn week_dates(today: NaiveDate) -> [NaiveDate; 7] {
    let sunday = start_of_week(today);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}

/// Tasks visible in `view`, in store order
pub fn filter_tasks(tasks: &[Task], view: ViewMode, today: NaiveDate) -> Vec<&Task> {
    match view {
        ViewMode::Daily => {
            let today = iso_date(today);
            tasks.iter().filter(|t| t.due_date == today).collect()
        }
        ViewMode::Weekly => {
            let week: Vec<String> = week_dates(today).iter().map(|d| iso_date(*d)).collect();
            tasks.iter().filter(|t| week.contains(&t.due_date)).collect()
        }
        ViewMode::Monthly => {
            let month = today.format("%Y-%m").to_string();
            tasks
                .iter()
                .filter(|t| !t.due_date.is_empty() && t.due_date.starts_with(&month))
                .collect()
        }
        ViewMode::All => tasks.iter().collect(),
    }
}

/// One day of the weekly dashboard
#[derive(Debug, Clone)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub tasks: Vec<&'a Task>,
    /// Sum of banked time for the day's tasks (running timers excluded)
    pub total: u64,
}

impl DayColumn<'_> {
    /// Short weekday name, e.g. "Sun"
    pub fn day_name(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn total_formatted(&self) -> String {
        format_time(self.total)
    }
}

/// Time spent per due date across the current week
pub fn weekly_dashboard(tasks: &[Task], today: NaiveDate) -> Vec<DayColumn<'_>> {
    week_dates(today)
        .into_iter()
        .map(|date| {
            let key = iso_date(date);
            let day_tasks: Vec<&Task> = tasks.iter().filter(|t| t.due_date == key).collect();
            let total = day_tasks.iter().map(|t| t.time_spent).sum();
            DayColumn {
                date,
                is_today: date == today,
                tasks: day_tasks,
                total,
            }
        })
        .collect()
}

/// Marker shown next to a task in the list
pub fn timer_badge(task: &Task) -> &'static str {
    if task.is_running() {
        "⏱"
    } else {
        " "
    }
}

/// Label of the timer action for a task
pub fn timer_action_label(task: &Task) -> &'static str {
    if task.is_running() {
        "Stop Timer"
    } else {
        "Start Timer"
    }
}
