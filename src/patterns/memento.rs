//! Memento exercise
//!
//! Before each operation the text object hands out an opaque snapshot of
//! itself. Undo restores the most recent snapshot.

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

const STARTING_TEXT: &str = "This is a line of text on which to experiment.";

/// Saved state of a `TextObject`, named after the operation it precedes
#[derive(Debug, Clone)]
pub struct Memento {
    name: String,
    text: String,
}

impl Memento {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct TextObject {
    text: String,
}

impl TextObject {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn memento(&self, name: impl Into<String>) -> Memento {
        Memento {
            name: name.into(),
            text: self.text.clone(),
        }
    }

    pub fn restore(&mut self, memento: &Memento) {
        self.text = memento.text.clone();
    }
}

/// Text object with its undo list
pub struct Editor {
    text: TextObject,
    undo_list: Vec<Memento>,
}

impl Editor {
    pub fn new(text: &str) -> Self {
        Self {
            text: TextObject::new(text),
            undo_list: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    fn save_for_undo(&mut self, operation: &str) {
        self.undo_list.push(self.text.memento(operation));
    }

    /// Replace every occurrence of `search`, returning the operation name
    pub fn replace(&mut self, search: &str, replace: &str) -> String {
        let operation = format!("Replace '{}' with '{}'", search, replace);
        self.save_for_undo(&operation);
        let replaced = self.text.text().replace(search, replace);
        self.text.set_text(replaced);
        operation
    }

    pub fn reverse(&mut self) -> String {
        let operation = "Reverse".to_string();
        self.save_for_undo(&operation);
        let reversed = self.text.text().chars().rev().collect();
        self.text.set_text(reversed);
        operation
    }

    /// Restore the latest snapshot; returns it, or `None` when the undo
    /// list is empty
    pub fn undo(&mut self) -> Option<Memento> {
        let memento = self.undo_list.pop()?;
        self.text.restore(&memento);
        Some(memento)
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut editor = Editor::new(STARTING_TEXT);
    out.line(format!("  Starting text: \"{}\"", editor.text()));

    let operations: [fn(&mut Editor) -> String; 4] = [
        |e| e.replace("text", "painting"),
        |e| e.replace("on", "off"),
        |e| e.reverse(),
        |e| e.replace("i", "!"),
    ];
    for operation in operations {
        let name = operation(&mut editor);
        out.line(format!("    operation {:<31}: \"{}\"", name, editor.text()));
    }

    out.line("  Now perform undo until back to original");
    while let Some(memento) = editor.undo() {
        out.line(format!(
            "    undoing operation {:<31}: \"{}\"",
            memento.name(),
            editor.text()
        ));
    }

    out.line(format!("  Final text   : \"{}\"", editor.text()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_restores_snapshots_in_reverse() {
        let mut editor = Editor::new("abc");
        assert_eq!(editor.replace("b", "B"), "Replace 'b' with 'B'");
        editor.reverse();
        assert_eq!(editor.text(), "cBa");

        assert_eq!(editor.undo().unwrap().name(), "Reverse");
        assert_eq!(editor.text(), "aBc");
        editor.undo().unwrap();
        assert_eq!(editor.text(), "abc");
        assert!(editor.undo().is_none());
    }

    #[test]
    fn test_exercise_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();
        assert_eq!(lines.len(), 11);
        assert_eq!(
            lines[4],
            "    operation Replace 'i' with '!'           : \".tnem!repxe ot hc!hw ffo gn!tn!ap fo en!l a s! s!hT\""
        );
        assert_eq!(
            lines[9],
            "    undoing operation Replace 'text' with 'painting' : \"This is a line of text on which to experiment.\""
        );
    }
}
