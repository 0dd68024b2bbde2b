//! REPL module
//!
//! The interactive menu loop. It reads a choice, runs the matching operation
//! on the [`Context`] to completion, then pauses and clears the screen before
//! showing the menu again. Input and output are generic so the loop can be
//! driven by a script in tests.

use std::io::{self, BufRead, Write};

use colored::{Color, Colorize};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::{
    context::Context,
    models::{Priority, Task, TaskError},
};

/// Runtime options for the menu loop
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Clear the terminal before redrawing the menu
    pub clear_screen: bool,
    /// Wait for Enter after each command
    pub pause: bool,
    /// Colour status markers
    pub color: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause: true,
            color: true,
        }
    }
}

/// Errors that end the menu loop
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input closed")]
    InputClosed,
}

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddActive = 1,
    ShowActive = 2,
    Delete = 3,
    MarkDone = 4,
    AddPending = 5,
    ShowPending = 6,
    MovePending = 7,
    Undo = 8,
    Search = 9,
    ShowByPriority = 10,
    Exit = 11,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 11] = [
        MenuChoice::AddActive,
        MenuChoice::ShowActive,
        MenuChoice::Delete,
        MenuChoice::MarkDone,
        MenuChoice::AddPending,
        MenuChoice::ShowPending,
        MenuChoice::MovePending,
        MenuChoice::Undo,
        MenuChoice::Search,
        MenuChoice::ShowByPriority,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddActive => "Add Active Task",
            MenuChoice::ShowActive => "Show Active Tasks",
            MenuChoice::Delete => "Delete Task",
            MenuChoice::MarkDone => "Mark Task as Done",
            MenuChoice::AddPending => "Add Pending Task",
            MenuChoice::ShowPending => "Show Pending Tasks",
            MenuChoice::MovePending => "Move Pending to Active",
            MenuChoice::Undo => "Undo Last Delete",
            MenuChoice::Search => "Search Task by Name",
            MenuChoice::ShowByPriority => "Show Tasks by Priority (breadth-first)",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parses a line typed at the menu prompt. Non-numeric or out-of-range
    /// input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number = input.trim().parse::<u8>().ok()?;
        Self::ALL
            .into_iter()
            .find(|choice| choice.number() == number)
    }
}

enum State {
    Menu,
    Executing(MenuChoice),
    Exit,
}

/// The interactive dispatcher. Owns the session state for its lifetime.
pub struct Repl<R, W> {
    context: Context,
    input: R,
    output: W,
    config: ReplConfig,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(context: Context, input: R, output: W, config: ReplConfig) -> Self {
        Self {
            context,
            input,
            output,
            config,
        }
    }

    /// Runs the menu loop until the user exits or input runs out
    pub fn run(&mut self) -> Result<(), ReplError> {
        tracing::info!("session started");
        let result = match self.run_loop() {
            Err(ReplError::InputClosed) => {
                tracing::info!("input closed, leaving menu loop");
                Ok(())
            }
            other => other,
        };
        tracing::info!(
            active = self.context.active().len(),
            pending = self.context.pending().len(),
            "session ended"
        );
        result
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Consumes the dispatcher, returning the session state and the output sink
    pub fn into_inner(self) -> (Context, W) {
        (self.context, self.output)
    }

    fn run_loop(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n=== Welcome to To-Do List Manager ===")?;

        let mut state = State::Menu;
        loop {
            state = match state {
                State::Menu => {
                    self.print_menu()?;
                    let line = self.prompt("Enter your choice: ")?;
                    match MenuChoice::parse(&line) {
                        Some(MenuChoice::Exit) => State::Exit,
                        Some(choice) => State::Executing(choice),
                        None => {
                            tracing::debug!(input = line.trim(), "invalid menu choice");
                            let message =
                                self.paint("Invalid choice! Please enter 1-11.", Color::Red);
                            writeln!(self.output, "{message}")?;
                            self.finish_command()?;
                            State::Menu
                        }
                    }
                }
                State::Executing(choice) => {
                    tracing::debug!(?choice, "dispatching");
                    self.execute(choice)?;
                    self.finish_command()?;
                    State::Menu
                }
                State::Exit => {
                    writeln!(self.output, "\nThank you for using the To-Do Manager!")?;
                    writeln!(self.output, "Goodbye!")?;
                    self.output.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn execute(&mut self, choice: MenuChoice) -> Result<(), ReplError> {
        match choice {
            MenuChoice::AddActive => self.add_active(),
            MenuChoice::ShowActive => self.show_active(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::MarkDone => self.mark_done(),
            MenuChoice::AddPending => self.add_pending(),
            MenuChoice::ShowPending => self.show_pending(),
            MenuChoice::MovePending => self.move_pending(),
            MenuChoice::Undo => self.undo_delete(),
            MenuChoice::Search => self.search(),
            MenuChoice::ShowByPriority => self.show_by_priority(),
            // Handled by the state machine before dispatch
            MenuChoice::Exit => Ok(()),
        }
    }

    // --- Commands --- //

    fn add_active(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Adding New Task ---")?;
        let task = self.read_task("Enter task name: ")?;
        self.context.add_active(task);
        self.success("Task added successfully!")
    }

    fn show_active(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Active Tasks ---")?;

        if self.context.active().is_empty() {
            writeln!(self.output, "No active tasks found.")?;
            writeln!(self.output, "Add some tasks to get started!")?;
            return Ok(());
        }

        let mut rows = Vec::with_capacity(self.context.active().len());
        for (i, task) in self.context.active().iter().enumerate() {
            let mut row = format!("{}. {} [Priority: {}]", i + 1, task.name(), task.priority());
            if task.is_done() {
                row.push(' ');
                row.push_str(&self.paint("[DONE]", Color::Green));
            }
            rows.push(row);
        }
        for row in rows {
            writeln!(self.output, "{row}")?;
        }

        let progress = self.context.active().progress();
        writeln!(
            self.output,
            "\nProgress: {}/{} tasks completed ({}%)",
            progress.completed,
            progress.total,
            progress.percentage()
        )?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Delete Task ---")?;
        if self.context.active().is_empty() {
            writeln!(self.output, "No tasks to delete.")?;
            return Ok(());
        }

        self.show_active()?;
        let position = self.prompt_position("Enter task number to delete: ")?;
        match self.context.delete_at(position) {
            Ok(task) => {
                let line = format!("Deleting: {}", task.name());
                writeln!(self.output, "{line}")?;
                self.success("Task deleted! (You can undo with option 8)")
            }
            Err(e) => self.report(&e),
        }
    }

    fn mark_done(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Mark Task as Done ---")?;
        if self.context.active().is_empty() {
            writeln!(self.output, "No tasks to mark as done.")?;
            return Ok(());
        }

        self.show_active()?;
        let position = self.prompt_position("Enter task number to mark as done: ")?;
        match self.context.mark_done_at(position) {
            Ok(task) => {
                let message = format!("Task \"{}\" marked as completed!", task.name());
                self.success(&message)
            }
            Err(e) => self.report(&e),
        }
    }

    fn add_pending(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Add Pending Task ---")?;
        let task = self.read_task("Enter pending task name: ")?;
        self.context.add_pending(task);
        self.success("Task added to pending queue!")
    }

    fn show_pending(&mut self) -> Result<(), ReplError> {
        if self.context.pending().is_empty() {
            writeln!(self.output, "\n--- Pending Tasks ---")?;
            writeln!(self.output, "No pending tasks in queue.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- Pending Tasks (Queue) ---")?;
        let marker = self.paint("<- Next to be moved", Color::Cyan);
        let mut rows = Vec::with_capacity(self.context.pending().len());
        for (i, task) in self.context.pending().iter().enumerate() {
            let mut row = format!("{}. {} [Priority: {}]", i + 1, task.name(), task.priority());
            // The front is what "Move Pending to Active" takes next
            if i == 0 {
                row.push(' ');
                row.push_str(&marker);
            }
            rows.push(row);
        }
        for row in rows {
            writeln!(self.output, "{row}")?;
        }

        writeln!(
            self.output,
            "Total pending: {} tasks",
            self.context.pending().len()
        )?;
        Ok(())
    }

    fn move_pending(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Move Pending to Active ---")?;
        match self.context.move_pending_to_active() {
            Ok(task) => {
                let message = format!("Task \"{}\" moved to active list!", task.name());
                self.success(&message)
            }
            Err(e) => self.report(&e),
        }
    }

    fn undo_delete(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Undo Delete ---")?;
        match self.context.undo_delete() {
            Ok(task) => {
                let message = format!("Task \"{}\" restored!", task.name());
                self.success(&message)
            }
            Err(e) => self.report(&e),
        }
    }

    fn search(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- Search Task by Name ---")?;
        let name = self.prompt("Enter task name to search: ")?;
        writeln!(self.output, "Searching...")?;

        let found = self
            .context
            .search(&name)
            .map(|(position, task)| (position, task.clone()));

        match found {
            Ok((position, task)) => {
                let status = if task.is_done() { "DONE" } else { "PENDING" };
                let found = self.paint("Task found!", Color::Green);
                writeln!(self.output, "{found}")?;
                writeln!(self.output, "Position: {position}")?;
                writeln!(self.output, "Task: {}", task.name())?;
                writeln!(self.output, "Priority: {}", task.priority())?;
                writeln!(self.output, "Status: {status}")?;
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn show_by_priority(&mut self) -> Result<(), ReplError> {
        if self.context.tree().is_empty() {
            writeln!(self.output, "\n--- Tasks by Priority (BST) ---")?;
            writeln!(self.output, "No tasks in priority tree.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- Tasks by Priority (BFS Traversal) ---")?;
        writeln!(self.output, "Binary Search Tree - Level Order:")?;

        let lines: Vec<String> = self
            .context
            .tree()
            .levels()
            .iter()
            .enumerate()
            .map(|(depth, level)| format!("Level {}: {}", depth + 1, render_level(level)))
            .collect();
        for line in lines {
            writeln!(self.output, "{line}")?;
        }

        let legend = [Priority::High, Priority::Medium, Priority::Low]
            .iter()
            .map(|p| format!("{}={}", p.value(), p.label()))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.output, "\nPriority: {legend}")?;
        Ok(())
    }

    // --- Input helpers --- //

    fn read_line(&mut self) -> Result<String, ReplError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReplError::InputClosed);
        }
        Ok(line)
    }

    fn prompt(&mut self, message: &str) -> Result<String, ReplError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Reads a name and a priority, telling the user when the priority was
    /// clamped
    fn read_task(&mut self, name_prompt: &str) -> Result<Task, ReplError> {
        let name = self.prompt(name_prompt)?;
        let raw = self.prompt("Enter priority (1=High, 2=Medium, 3=Low): ")?;

        let (priority, notice) = Priority::clamped(&raw);
        if let Some(e) = notice {
            tracing::debug!(input = raw.trim(), "priority clamped to medium");
            self.report(&e)?;
        }

        Ok(Task::new(&name, priority))
    }

    fn prompt_position(&mut self, message: &str) -> Result<usize, ReplError> {
        let line = self.prompt(message)?;
        // 0 is never a valid position, so unparseable input is rejected downstream
        Ok(line.trim().parse::<usize>().unwrap_or(0))
    }

    // --- Output helpers --- //

    fn print_menu(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "\n--- TO-DO LIST MENU ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.config.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&mut self, message: &str) -> Result<(), ReplError> {
        let message = self.paint(message, Color::Green);
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn report(&mut self, error: &TaskError) -> Result<(), ReplError> {
        let color = match error {
            TaskError::InvalidPriority(_) | TaskError::AlreadyDone(_) => Color::Yellow,
            _ => Color::Red,
        };
        let message = self.paint(&error.to_string(), color);
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Pause and clear between commands, as configured
    fn finish_command(&mut self) -> Result<(), ReplError> {
        if self.config.pause {
            write!(self.output, "\nPress Enter to continue...")?;
            self.output.flush()?;
            self.read_line()?;
        }
        if self.config.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

/// Renders one tree level as `name(P:priority)` tokens
fn render_level(level: &[&Task]) -> String {
    level
        .iter()
        .map(|task| format!("{}(P:{}) ", task.name(), task.priority()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_menu_numbering_is_stable() {
        let numbers: Vec<u8> = MenuChoice::ALL.iter().map(|c| c.number()).collect();
        assert_eq!(numbers, (1..=11).collect::<Vec<u8>>());
        assert_eq!(MenuChoice::ShowByPriority.number(), 10);
        assert_eq!(MenuChoice::Exit.label(), "Exit");
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::AddActive));
        assert_eq!(MenuChoice::parse(" 10 "), Some(MenuChoice::ShowByPriority));
        assert_eq!(MenuChoice::parse("11"), Some(MenuChoice::Exit));

        for input in ["0", "12", "-3", "abc", "", "300", "1.0"] {
            assert_eq!(MenuChoice::parse(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_render_level() {
        let a = Task::new("a", Priority::High);
        let b = Task::new("b", Priority::Low);
        assert_eq!(render_level(&[&a, &b]), "a(P:1) b(P:3) ");
        assert_eq!(render_level(&[]), "");
    }

    #[test]
    fn test_paint_respects_color_flag() {
        let config = ReplConfig {
            color: false,
            ..ReplConfig::default()
        };
        let repl = Repl::new(Context::new(), io::empty(), Vec::<u8>::new(), config);
        assert_eq!(repl.paint("plain", Color::Red), "plain");
    }
}
