use time::Date;

/// One to-do record, materialized by the indexing collaborator. The engine
/// only reads tasks; it never mutates or persists them.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Task {
	pub id: String,
	pub text: String,
	pub file_path: String,
	pub line_number: u32,
	/// Priority level 1-4 where 1 is the highest.
	pub priority: Option<u8>,
	#[serde(default, with = "crate::date_serde::option")]
	pub due_date: Option<Date>,
	#[serde(default, with = "crate::date_serde::option")]
	pub created_date: Option<Date>,
	/// Key into the status category configuration. Never a hardcoded enum.
	pub status_category: String,
	#[serde(default)]
	pub tags: Vec<String>,
}
impl Task {
	/// Folder portion of the file path, without the trailing file name.
	pub fn folder(&self) -> &str {
		self.file_path.rsplit_once('/').map(|(folder, _)| folder).unwrap_or("")
	}
}

#[cfg(test)]
mod tests {
	use super::Task;

	fn task(file_path: &str) -> Task {
		Task {
			id: "t1".to_string(),
			text: "Buy coffee".to_string(),
			file_path: file_path.to_string(),
			line_number: 3,
			priority: None,
			due_date: None,
			created_date: None,
			status_category: "open".to_string(),
			tags: Vec::new(),
		}
	}

	#[test]
	fn folder_is_derived_from_file_path() {
		assert_eq!(task("projects/home/todo.md").folder(), "projects/home");
		assert_eq!(task("todo.md").folder(), "");
	}

	#[test]
	fn dates_round_trip_as_iso_strings() {
		let mut task = task("todo.md");

		task.due_date = Some(time::macros::date!(2026 - 01 - 15));

		let json = serde_json::to_value(&task).expect("serialize failed");

		assert_eq!(json["due_date"], serde_json::json!("2026-01-15"));
	}
}
