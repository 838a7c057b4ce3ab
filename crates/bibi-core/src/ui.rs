use std::fmt::Display;
use std::io::{self, Write};

use crate::task::Task;
use crate::task_list::TaskList;

const HORIZONTAL_LINE: &str = "____________________________________________________________";

/// Fixed-format console messages over any output sink. The binary writes to
/// stdout; tests hand in a byte buffer and inspect it afterwards.
#[derive(Debug)]
pub struct Ui<W: Write> {
    out: W,
}

impl Ui<io::Stdout> {
    pub fn stdout() -> Self {
        Ui { out: io::stdout() }
    }
}

impl<W: Write> Ui<W> {
    pub fn new(out: W) -> Self {
        Ui { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // A failed console write has nowhere to be reported; drop it.
    fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn print_horizontal_line(&mut self) {
        self.line(HORIZONTAL_LINE);
    }

    pub fn print_greeting(&mut self) {
        self.print_horizontal_line();
        self.line("Hello! I'm bibi");
        self.line("What can I do for you?");
        self.print_horizontal_line();
    }

    pub fn print_exit_message(&mut self) {
        self.print_horizontal_line();
        self.line("Bye. Hope to see you again soon!");
        self.print_horizontal_line();
    }

    pub fn print_list_message(&mut self, tasks: &TaskList) {
        self.print_horizontal_line();
        if tasks.is_empty() {
            self.line("There are no tasks in your list.");
        } else {
            self.line("Here are the tasks in your list:");
            for (position, task) in tasks.iter().enumerate() {
                self.line(format_args!("{}: {}", position + 1, task));
            }
        }
        self.print_horizontal_line();
    }

    pub fn print_task_added(&mut self, task: &Task, count: usize) {
        self.line("Got it. I've added this task:");
        self.line(format_args!("  {}", task));
        self.line(format_args!("Now you have {} tasks in the list.", count));
    }

    pub fn print_task_removed(&mut self, task: &Task, count: usize) {
        self.line("Noted. I've removed this task:");
        self.line(format_args!("  {}", task));
        self.line(format_args!("Now you have {} tasks in the list.", count));
    }

    pub fn print_task_marked(&mut self, task: &Task) {
        self.line("Nice! I've marked this task as done:");
        self.line(format_args!("  {}", task));
    }

    pub fn print_task_unmarked(&mut self, task: &Task) {
        self.line("OK, I've marked this task as not done yet:");
        self.line(format_args!("  {}", task));
    }

    pub fn print_invalid_syntax(&mut self, usage: &str) {
        self.line(usage);
    }

    pub fn print_invalid_index(&mut self) {
        self.line("Invalid task index");
    }

    pub fn print_unknown_command(&mut self, keyword: &str) {
        self.print_horizontal_line();
        self.line(format_args!("Unknown command: \"{}\"", keyword));
        self.print_horizontal_line();
    }

    pub fn print_find_header(&mut self) {
        self.line("Here are the matching tasks I found:");
    }

    pub fn print_find_match(&mut self, position: usize, task: &Task) {
        self.line(format_args!("{}: {}", position, task));
    }

    pub fn print_no_matches(&mut self) {
        self.line("No matching tasks found. Paranoid?");
    }

    pub fn print_error(&mut self, message: &str) {
        self.line(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(render: impl FnOnce(&mut Ui<Vec<u8>>)) -> String {
        let mut ui = Ui::new(Vec::new());
        render(&mut ui);
        String::from_utf8(ui.into_inner()).expect("utf8")
    }

    #[test]
    fn list_message_numbers_tasks_from_one() {
        let mut tasks = TaskList::new();
        tasks.add(Task::todo("buy milk"));
        tasks.add(Task::todo("call mom"));
        let out = rendered(|ui| ui.print_list_message(&tasks));
        assert!(out.contains("Here are the tasks in your list:"));
        assert!(out.contains("1: [T][ ] buy milk"));
        assert!(out.contains("2: [T][ ] call mom"));
    }

    #[test]
    fn empty_list_gets_its_own_message() {
        let out = rendered(|ui| ui.print_list_message(&TaskList::new()));
        assert!(out.contains("There are no tasks in your list."));
    }

    #[test]
    fn added_message_reports_new_count() {
        let task = Task::todo("buy milk");
        let out = rendered(|ui| ui.print_task_added(&task, 3));
        assert!(out.contains("Got it. I've added this task:"));
        assert!(out.contains("  [T][ ] buy milk"));
        assert!(out.contains("Now you have 3 tasks in the list."));
    }

    #[test]
    fn unknown_command_echoes_the_keyword() {
        let out = rendered(|ui| ui.print_unknown_command("blargh"));
        assert!(out.contains("Unknown command: \"blargh\""));
    }
}
