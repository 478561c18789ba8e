//! Command exercise
//!
//! Operations on a text object are captured as command objects and kept in
//! an undo list. Undo resets the text and replays every command except the
//! last one.

use std::fmt;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

const STARTING_TEXT: &str = "This is a line of text on which to experiment.";

/// Text that remembers how it started
#[derive(Debug, Clone)]
pub struct TextObject {
    starting_text: String,
    text: String,
}

impl TextObject {
    pub fn new(text: &str) -> Self {
        Self {
            starting_text: text.to_string(),
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Go back to the starting text
    pub fn reset(&mut self) {
        self.text = self.starting_text.clone();
    }
}

/// An operation that can be applied to a `TextObject`
pub trait Command: fmt::Display {
    fn execute(&self, text: &mut TextObject);
}

/// Replace every occurrence of a pattern
pub struct ReplaceCommand {
    search: String,
    replace: String,
}

impl ReplaceCommand {
    pub fn new(search: &str, replace: &str) -> Self {
        Self {
            search: search.to_string(),
            replace: replace.to_string(),
        }
    }
}

impl Command for ReplaceCommand {
    fn execute(&self, text: &mut TextObject) {
        let replaced = text.text().replace(&self.search, &self.replace);
        text.set_text(replaced);
    }
}

impl fmt::Display for ReplaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("Replace \"{}\" with \"{}\"", self.search, self.replace);
        f.pad(&name)
    }
}

/// Reverse the characters of the text
pub struct ReverseCommand;

impl Command for ReverseCommand {
    fn execute(&self, text: &mut TextObject) {
        let reversed = text.text().chars().rev().collect();
        text.set_text(reversed);
    }
}

impl fmt::Display for ReverseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("Reverse")
    }
}

/// Applies commands and keeps them for undo
pub struct CommandProcessor {
    text: TextObject,
    undo_list: Vec<Box<dyn Command>>,
}

impl CommandProcessor {
    pub fn new(text: TextObject) -> Self {
        Self {
            text,
            undo_list: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub fn apply(&mut self, command: Box<dyn Command>) {
        command.execute(&mut self.text);
        self.undo_list.push(command);
    }

    /// Undo the most recent command. Returns the undone command, or `None`
    /// when there is nothing left to undo.
    pub fn undo(&mut self) -> Option<Box<dyn Command>> {
        let last = self.undo_list.pop()?;
        self.text.reset();
        for command in &self.undo_list {
            command.execute(&mut self.text);
        }
        Some(last)
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut processor = CommandProcessor::new(TextObject::new(STARTING_TEXT));
    out.line(format!("  Starting text: \"{}\"", processor.text()));

    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(ReplaceCommand::new("text", "painting")),
        Box::new(ReplaceCommand::new("on", "off")),
        Box::new(ReverseCommand),
        Box::new(ReplaceCommand::new("i", "!")),
    ];
    for command in commands {
        let name = command.to_string();
        processor.apply(command);
        out.line(format!("    command {:<31}==> \"{}\"", name, processor.text()));
    }

    out.line("  Now perform undo until back to original");
    while let Some(command) = processor.undo() {
        out.line(format!(
            "    undoing command {:<31}==> \"{}\"",
            command,
            processor.text()
        ));
    }

    out.line(format!("  Final text   : \"{}\"", processor.text()));
    Ok(())
}
