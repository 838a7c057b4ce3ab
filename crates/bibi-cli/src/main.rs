use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use bibi_core::command::Command;
use bibi_core::config::resolve_data_file_with_source;
use bibi_core::storage::Storage;
use bibi_core::task_list::TaskList;
use bibi_core::ui::Ui;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bibi", version, about = "bibi: a text-command task manager")]
struct Cli {
    /// Task data file; overrides project and global config.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the command
    // protocol on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bibi=info")),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let (data_file, source) = resolve_data_file_with_source(&cwd, cli.file.as_deref());
    info!(path = %data_file.display(), source, "using task file");

    let storage = Storage::new(data_file);
    let mut ui = Ui::stdout();
    let mut tasks = match storage.load() {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(error = %err, "could not load task file; starting empty");
            ui.print_error(&err.to_string());
            TaskList::new()
        }
    };
    info!(count = tasks.task_count(), "session ready");

    ui.print_greeting();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = Command::parse(&line);
        command.execute(&mut tasks, &mut ui, &storage);
        if command.is_exit() {
            break;
        }
    }
    Ok(())
}
