use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::Task;
use crate::task_list::TaskList;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize task: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Line-oriented persistence: one JSON record per task, insertion order.
/// The whole file is rewritten after every mutating command.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty list. Lines that no longer parse are
    /// skipped rather than aborting the load.
    pub fn load(&self) -> Result<TaskList, StorageError> {
        if !self.path.exists() {
            return Ok(TaskList::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut tasks = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Task>(&line) {
                Ok(task) => tasks.push(task),
                Err(_) => continue,
            }
        }
        Ok(TaskList::from_tasks(tasks))
    }

    pub fn save(&self, tasks: &TaskList) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path)?;
        for task in tasks.iter() {
            let line = serde_json::to_string(task)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn save_then_load_round_trips_every_variant() {
        let temp = TempDir::new().expect("tempdir");
        let storage = Storage::new(temp.path().join("tasks.jsonl"));

        let mut tasks = TaskList::new();
        tasks.add(Task::todo("buy milk"));
        let mut deadline = Task::deadline("return book", "2026-03-04");
        deadline.set_done(true);
        tasks.add(deadline);
        tasks.add(Task::event("book fair", "Mon 2pm", "Mon 4pm"));

        storage.save(&tasks).expect("save");
        let loaded = storage.load().expect("load");
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let temp = TempDir::new().expect("tempdir");
        let storage = Storage::new(temp.path().join("absent.jsonl"));
        let loaded = storage.load().expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn unparsable_and_blank_lines_are_skipped() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("tasks.jsonl");
        let content = concat!(
            "{\"kind\":\"todo\",\"description\":\"buy milk\",\"done\":false}\n",
            "\n",
            "not json at all\n",
            "{\"kind\":\"todo\",\"description\":\"call mom\",\"done\":true}\n",
        );
        fs::write(&path, content).expect("write");

        let loaded = Storage::new(&path).load().expect("load");
        assert_eq!(loaded.task_count(), 2);
        assert_eq!(loaded.get(0).map(Task::description), Some("buy milk"));
        assert!(loaded.get(1).map(Task::is_done).unwrap_or(false));
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let temp = TempDir::new().expect("tempdir");
        let storage = Storage::new(temp.path().join("data").join("tasks.jsonl"));
        storage.save(&TaskList::new()).expect("save");
        assert!(storage.path().exists());
    }
}
