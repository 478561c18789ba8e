//! Null Object exercise
//!
//! Move strings are parsed one character at a time. Characters that are not
//! moves still produce a command, one whose `execute` does nothing, so the
//! processor never has to check for a missing command.

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

pub trait MoveCommand {
    /// Character the command was parsed from (uppercased)
    fn command(&self) -> char;

    fn name(&self) -> &'static str;

    fn execute(&self, out: &mut Transcript);

    fn show(&self, out: &mut Transcript) {
        out.line(format!("    '{}' -> {}", self.command(), self.name()));
    }
}

macro_rules! move_command {
    ($ty:ident, $name:literal, $action:literal) => {
        pub struct $ty(char);

        impl MoveCommand for $ty {
            fn command(&self) -> char {
                self.0
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn execute(&self, out: &mut Transcript) {
                out.text($action);
            }
        }
    };
}

move_command!(MoveUp, "Up", "move up");
move_command!(MoveDown, "Down", "move down");
move_command!(MoveLeft, "Left", "move left");
move_command!(MoveRight, "Right", "move right");

/// The do-nothing command
pub struct MoveNone(char);

impl MoveCommand for MoveNone {
    fn command(&self) -> char {
        self.0
    }

    fn name(&self) -> &'static str {
        "None"
    }

    fn execute(&self, _out: &mut Transcript) {}
}

/// Parse a move string; case is ignored
pub fn parse_moves(moves: &str) -> Vec<Box<dyn MoveCommand>> {
    moves
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| -> Box<dyn MoveCommand> {
            match c {
                'U' => Box::new(MoveUp(c)),
                'D' => Box::new(MoveDown(c)),
                'L' => Box::new(MoveLeft(c)),
                'R' => Box::new(MoveRight(c)),
                _ => Box::new(MoveNone(c)),
            }
        })
        .collect()
}

pub struct MoveProcessor;

impl MoveProcessor {
    pub fn show_move_list(&self, moves: &str, out: &mut Transcript) {
        for command in parse_moves(moves) {
            command.show(out);
        }
    }

    /// Execute every command, each wrapped in `<...>`, on the current line
    pub fn execute_move_list(&self, moves: &str, out: &mut Transcript) {
        for command in parse_moves(moves) {
            out.text("<");
            command.execute(out);
            out.text("> ");
        }
        out.line("");
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let processor = MoveProcessor;
    let moves = "ur#ld!lr";

    out.line("  Showing the move commands:");
    processor.show_move_list(moves, out);

    out.line("  Executing the move commands:");
    out.text(&format!("    {} -> ", moves));
    processor.execute_move_list(moves, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_characters_become_none() {
        let names: Vec<&str> = parse_moves("u#x").iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Up", "None", "None"]);
    }

    #[test]
    fn test_none_executes_nothing() {
        let mut out = Transcript::new();
        MoveProcessor.execute_move_list("l?r", &mut out);
        assert_eq!(out.into_lines(), vec!["<move left> <> <move right> "]);
    }

    #[test]
    fn test_run_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "    'U' -> Up");
        assert_eq!(lines[3], "    '#' -> None");
        assert_eq!(
            lines[10],
            "    ur#ld!lr -> <move up> <move right> <> <move left> <move down> <> <move left> <move right> "
        );
    }
}
