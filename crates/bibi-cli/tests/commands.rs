use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bibi"))
}

fn run_script(data_file: &Path, script: &str) -> Output {
    let mut child = bin()
        .arg("--file")
        .arg(data_file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn bibi");
    child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("wait for bibi")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn greets_and_says_goodbye() {
    let temp = TempDir::new().expect("tempdir");
    let output = run_script(&temp.path().join("tasks.jsonl"), "bye\n");
    assert!(output.status.success());
    let out = stdout_of(&output);
    assert!(out.contains("Hello! I'm bibi"));
    assert!(out.contains("Bye. Hope to see you again soon!"));
}

#[test]
fn add_list_and_find_render_fixed_messages() {
    let temp = TempDir::new().expect("tempdir");
    let script = "todo buy milk\n\
                  deadline return book /by 2026-03-04\n\
                  event book fair /from Mon 2pm /to Mon 4pm\n\
                  list\n\
                  find milk\n\
                  bye\n";
    let output = run_script(&temp.path().join("tasks.jsonl"), script);
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains("Got it. I've added this task:"));
    assert!(out.contains("  [T][ ] buy milk"));
    assert!(out.contains("Now you have 3 tasks in the list."));
    assert!(out.contains("Here are the tasks in your list:"));
    assert!(out.contains("2: [D][ ] return book (by: Mar 4 2026)"));
    assert!(out.contains("3: [E][ ] book fair (from: Mon 2pm to: Mon 4pm)"));
    assert!(out.contains("Here are the matching tasks I found:"));
    assert!(out.contains("1: [T][ ] buy milk"));
}

#[test]
fn bad_input_reports_and_keeps_the_session_running() {
    let temp = TempDir::new().expect("tempdir");
    let script = "mark abc\n\
                  mark 5\n\
                  blargh whatever\n\
                  todo still alive\n\
                  bye\n";
    let output = run_script(&temp.path().join("tasks.jsonl"), script);
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains("Please use \"mark <int>\""));
    assert!(out.contains("Invalid task index"));
    assert!(out.contains("Unknown command: \"blargh\""));
    assert!(out.contains("  [T][ ] still alive"));
}

#[test]
fn blank_lines_are_ignored() {
    let temp = TempDir::new().expect("tempdir");
    let script = "\n   \ntodo buy milk\n\nbye\n";
    let output = run_script(&temp.path().join("tasks.jsonl"), script);
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(!out.contains("Unknown command"));
    assert!(out.contains("Got it. I've added this task:"));
}
