use time::Date;

use tasq_domain::{Intent, Task};

/// Narrows the candidate set with the intent's structured filters before any
/// scoring happens. Every present filter must hold; keywords play no part
/// here.
pub fn filter_tasks(tasks: &[Task], intent: &Intent, today: Date) -> Vec<Task> {
	tasks.iter().filter(|task| matches(task, intent, today)).cloned().collect()
}

fn matches(task: &Task, intent: &Intent, today: Date) -> bool {
	if let Some(priority) = intent.priority
		&& task.priority != Some(priority)
	{
		return false;
	}
	if let Some(due) = intent.due
		&& !due.matches(task.due_date, today)
	{
		return false;
	}
	if !intent.status.is_empty()
		&& !intent.status.iter().any(|status| status == &task.status_category)
	{
		return false;
	}
	if let Some(folder) = &intent.folder {
		let wanted = folder.to_lowercase();
		let actual = task.folder().to_lowercase();

		if actual != wanted && !actual.starts_with(&format!("{wanted}/")) {
			return false;
		}
	}
	if !intent.tags.is_empty() {
		let has = |tag: &String| task.tags.iter().any(|own| own.eq_ignore_ascii_case(tag));

		if !intent.tags.iter().all(has) {
			return false;
		}
	}

	true
}
