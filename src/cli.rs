//! CLI module
//!
//! This module provides the command-line interface for the taskdeck tool:
//! argument parsing, logging setup and the entry point into the menu loop.

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing::Level;

use crate::{
    context::Context,
    models::{Priority, Task},
    repl::{Repl, ReplConfig},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Do not clear the screen between commands
    #[arg(long)]
    no_clear: bool,

    /// Do not wait for Enter after each command
    #[arg(long)]
    no_pause: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Populate with example tasks before showing the menu
    #[arg(long)]
    example: bool,

    /// Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Menu loop options selected by the flags
    pub fn repl_config(&self) -> ReplConfig {
        ReplConfig {
            clear_screen: !self.no_clear,
            pause: !self.no_pause,
            color: !self.no_color,
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Run the CLI application
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(());
    }

    // Logs go to stderr so they never interleave with the menu
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    let mut context = Context::new();
    if cli.example {
        tracing::info!("populating with example tasks");
        create_example_tasks(&mut context);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(context, stdin.lock(), stdout.lock(), cli.repl_config());
    repl.run()?;

    Ok(())
}

/// Creates a small example data set touching every structure
fn create_example_tasks(context: &mut Context) {
    context.add_active(Task::new("Buy milk", Priority::High));
    context.add_active(Task::new("Write report", Priority::Medium));
    context.add_active(Task::new("Call mom", Priority::Low));
    context.add_active(Task::new("Water plants", Priority::Medium));

    // "Water plants" is at the head; finish it, then delete "Call mom" so
    // there is something to undo
    let _ = context.mark_done_at(1);
    let _ = context.delete_at(2);

    context.add_pending(Task::new("Book flights", Priority::Medium));
    context.add_pending(Task::new("Renew passport", Priority::High));
}
