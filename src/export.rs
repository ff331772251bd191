use crate::domain::{format_time, Task};
use crate::persistence::{atomic_write, StoreError};
use log::info;
use std::path::Path;

pub const CSV_HEADER: [&str; 6] = ["Title", "Due Date", "Priority", "Category", "Status", "Time Spent"];

/// Render every task as CSV. Fields are joined with plain commas and are not
/// quoted, so a comma inside a title or category shifts that row's columns.
pub fn tasks_to_csv(tasks: &[Task]) -> String {
    let mut rows = Vec::with_capacity(tasks.len() + 1);
    rows.push(CSV_HEADER.join(","));

    for task in tasks {
        let time_spent = format_time(task.time_spent);
        let fields = [
            task.title.as_str(),
            task.due_date.as_str(),
            task.priority.label(),
            task.category.as_str(),
            task.status.label(),
            time_spent.as_str(),
        ];
        rows.push(fields.join(","));
    }

    rows.join("\n")
}

/// Write the CSV for the full task list to `path`
pub fn export_csv<P: AsRef<Path>>(tasks: &[Task], path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    atomic_write(path, &tasks_to_csv(tasks))?;
    info!("Exported {} tasks to {}", tasks.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Status, TaskDraft};
    use pretty_assertions::assert_eq;

    fn task(id: i64, title: &str, due: &str, priority: Priority, category: &str, time_spent: u64) -> Task {
        Task::from_draft(
            id,
            &TaskDraft {
                title: title.to_string(),
                due_date: due.to_string(),
                priority,
                category: category.to_string(),
                time_spent,
            },
        )
    }

    #[test]
    fn test_csv_rows() {
        let mut b = task(2, "B", "", Priority::High, "", 0);
        b.status = Status::Completed;
        let tasks = vec![task(1, "A", "2024-01-01", Priority::Low, "X", 125), b];

        let csv = tasks_to_csv(&tasks);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Title,Due Date,Priority,Category,Status,Time Spent",
                "A,2024-01-01,Low,X,Not Started,2m 5s",
                "B,,High,,Completed,0m 0s",
            ]
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_empty_list_is_header_only() {
        assert_eq!(tasks_to_csv(&[]), "Title,Due Date,Priority,Category,Status,Time Spent");
    }

    #[test]
    fn test_csv_does_not_escape_commas() {
        let tasks = vec![task(1, "Buy milk, eggs", "", Priority::Medium, "Home", 0)];
        let csv = tasks_to_csv(&tasks);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Buy milk, eggs,,Medium,Home,Not Started,0m 0s");
        assert_eq!(row.split(',').count(), 7);
    }

    #[test]
    fn test_export_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tasks.csv");
        let tasks = vec![task(1, "A", "2024-01-01", Priority::Low, "X", 125)];

        export_csv(&tasks, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, tasks_to_csv(&tasks));
    }
}
