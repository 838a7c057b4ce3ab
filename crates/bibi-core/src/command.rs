use std::io::Write;

use regex::Regex;

use crate::storage::Storage;
use crate::task::Task;
use crate::task_list::TaskList;
use crate::ui::Ui;

/// One console command: the first whitespace-delimited token of the line
/// plus the remainder, with the separating whitespace already trimmed.
#[derive(Debug, Clone)]
pub struct Command {
    keyword: String,
    args: String,
}

/// A validated command, ready to apply to the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Exit,
    List,
    Mark(usize),
    Unmark(usize),
    Remove(usize),
    AddTodo(String),
    AddDeadline { description: String, by: String },
    AddEvent { description: String, from: String, to: String },
    Find(String),
}

/// Per-keyword behavior: how to validate the argument string, whether the
/// outcome is wrapped in horizontal rules, and whether the command rewrites
/// the task file afterwards.
struct Handler {
    validate: fn(&str) -> Result<Action, &'static str>,
    framed: bool,
    persists: bool,
}

fn handler_for(keyword: &str) -> Option<Handler> {
    let handler = match keyword {
        "bye" => Handler {
            validate: |_| Ok(Action::Exit),
            framed: false,
            persists: true,
        },
        "list" => Handler {
            validate: |_| Ok(Action::List),
            framed: false,
            persists: false,
        },
        "mark" => Handler {
            validate: |args| parse_index(args, "Please use \"mark <int>\"").map(Action::Mark),
            framed: true,
            persists: true,
        },
        "unmark" => Handler {
            validate: |args| parse_index(args, "Please use \"unmark <int>\"").map(Action::Unmark),
            framed: true,
            persists: true,
        },
        "remove" => Handler {
            validate: |args| parse_index(args, "Please use \"remove <index>\"").map(Action::Remove),
            framed: true,
            persists: true,
        },
        "todo" => Handler {
            validate: validate_todo,
            framed: true,
            persists: true,
        },
        "deadline" => Handler {
            validate: validate_deadline,
            framed: true,
            persists: true,
        },
        "event" => Handler {
            validate: validate_event,
            framed: true,
            persists: true,
        },
        "find" => Handler {
            validate: validate_find,
            framed: true,
            persists: false,
        },
        _ => return None,
    };
    Some(handler)
}

/// Index arguments must be all digits; anything else is a syntax error, not
/// an index error. Digit strings too large for usize still have to fail the
/// bounds check later, so they saturate instead of erroring here.
fn parse_index(args: &str, usage: &'static str) -> Result<usize, &'static str> {
    let digits = Regex::new(r"^\d+$").expect("regex");
    if !digits.is_match(args) {
        return Err(usage);
    }
    Ok(args.parse::<usize>().unwrap_or(usize::MAX))
}

fn validate_todo(args: &str) -> Result<Action, &'static str> {
    let description = args.trim();
    if description.is_empty() {
        return Err("Please use \"todo <description>\"");
    }
    Ok(Action::AddTodo(description.to_string()))
}

fn validate_deadline(args: &str) -> Result<Action, &'static str> {
    const USAGE: &str = "Please use \"deadline <description> /by <deadline>\"";
    let shape = Regex::new(r"^.+ /by .+$").expect("regex");
    if !shape.is_match(args) {
        return Err(USAGE);
    }
    let Some((description, by)) = args.split_once(" /by ") else {
        return Err(USAGE);
    };
    Ok(Action::AddDeadline {
        description: description.trim().to_string(),
        by: by.to_string(),
    })
}

fn validate_event(args: &str) -> Result<Action, &'static str> {
    const USAGE: &str = "Please use \"event <description> /from <time> /to <time>\"";
    let shape = Regex::new(r"^.+ /from .+ /to .+$").expect("regex");
    if !shape.is_match(args) {
        return Err(USAGE);
    }
    let Some((description, window)) = args.split_once(" /from ") else {
        return Err(USAGE);
    };
    let Some((from, to)) = window.split_once(" /to ") else {
        return Err(USAGE);
    };
    Ok(Action::AddEvent {
        description: description.trim().to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn validate_find(args: &str) -> Result<Action, &'static str> {
    if args.is_empty() {
        return Err("Please use \"find <pattern>\"");
    }
    Ok(Action::Find(args.to_string()))
}

impl Command {
    pub fn new(keyword: impl Into<String>, args: impl Into<String>) -> Self {
        Command {
            keyword: keyword.into(),
            args: args.into(),
        }
    }

    /// Split a console line into its keyword and argument string.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => Command::new(keyword, rest.trim_start()),
            None => Command::new(line, ""),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    /// True exactly for the `bye` keyword, independent of whether the
    /// persistence write succeeded.
    pub fn is_exit(&self) -> bool {
        self.keyword == "bye"
    }

    pub fn execute<W: Write>(&self, tasks: &mut TaskList, ui: &mut Ui<W>, storage: &Storage) {
        let Some(handler) = handler_for(&self.keyword) else {
            ui.print_unknown_command(&self.keyword);
            return;
        };

        if handler.framed {
            ui.print_horizontal_line();
        }
        match (handler.validate)(&self.args) {
            Ok(action) => apply(action, tasks, ui),
            Err(usage) => ui.print_invalid_syntax(usage),
        }
        if handler.framed {
            ui.print_horizontal_line();
        }

        // Mutating keywords rewrite the file even when validation rejected
        // the input: a rejected command persists the unchanged list.
        if handler.persists {
            if let Err(err) = storage.save(tasks) {
                ui.print_error(&err.to_string());
            }
        }
    }
}

fn apply<W: Write>(action: Action, tasks: &mut TaskList, ui: &mut Ui<W>) {
    match action {
        Action::Exit => ui.print_exit_message(),
        Action::List => ui.print_list_message(tasks),
        Action::Mark(index) => set_done(tasks, ui, index, true),
        Action::Unmark(index) => set_done(tasks, ui, index, false),
        Action::Remove(index) => match tasks.remove(index) {
            Some(task) => ui.print_task_removed(&task, tasks.task_count()),
            None => ui.print_invalid_index(),
        },
        Action::AddTodo(description) => add(tasks, ui, Task::todo(description)),
        Action::AddDeadline { description, by } => {
            add(tasks, ui, Task::deadline(description, by))
        }
        Action::AddEvent {
            description,
            from,
            to,
        } => add(tasks, ui, Task::event(description, from, to)),
        Action::Find(pattern) => find(tasks, ui, &pattern),
    }
}

fn set_done<W: Write>(tasks: &mut TaskList, ui: &mut Ui<W>, index: usize, done: bool) {
    let task = match index.checked_sub(1).and_then(|slot| tasks.get_mut(slot)) {
        Some(task) => task,
        None => {
            ui.print_invalid_index();
            return;
        }
    };
    task.set_done(done);
    if done {
        ui.print_task_marked(task);
    } else {
        ui.print_task_unmarked(task);
    }
}

fn add<W: Write>(tasks: &mut TaskList, ui: &mut Ui<W>, task: Task) {
    ui.print_task_added(&task, tasks.task_count() + 1);
    tasks.add(task);
}

/// Case-sensitive substring scan of descriptions, in list order.
fn find<W: Write>(tasks: &TaskList, ui: &mut Ui<W>, pattern: &str) {
    let mut matched = 0;
    for (position, task) in tasks.iter().enumerate() {
        if !task.description().contains(pattern) {
            continue;
        }
        if matched == 0 {
            ui.print_find_header();
        }
        ui.print_find_match(position + 1, task);
        matched += 1;
    }
    if matched == 0 {
        ui.print_no_matches();
    }
}
