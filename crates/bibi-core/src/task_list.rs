use crate::task::Task;

/// The ordered in-memory collection of all tasks for the current session.
///
/// User-facing indices are 1-based and only stable until the next `remove`,
/// which shifts everything after the removed slot down by one. There is no
/// persistent task identifier; "task 3" means the third task right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 0-based access; the 1-based adjustment happens at the command layer.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove by 1-based index. Anything outside `[1, count]` returns `None`
    /// and leaves the list untouched.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        if index == 0 || index > self.tasks.len() {
            return None;
        }
        Some(self.tasks.remove(index - 1))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}
