//! State exercise
//!
//! A finite state machine that filters C/C++ comments out of source text
//! while respecting quoted literals.

pub mod machine;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

pub use machine::remove_comments;

const TEXT_TO_FILTER: &str = concat!(
    "//########################################################################\n",
    "//########################################################################\n",
    "// A comment.  /* A nested comment */\n",
    "\n",
    "void State_Exercise() // An exercise in state machines\n",
    "{\n",
    "    char character = '\\\"';\n",
    "    std::cout << std::endl;\n",
    "    std::cout << \"\\\"State\\\" /*Exercise*/\" << std::endl;\n",
    "\n",
    "    StateContext_Class filterContext;\n",
    "\n",
    "    std::cout << \"\\t\\tDone. //(No, really)//\" << std::endl;\n",
    "}",
);

/// Show text with line numbers
fn display_text(text: &str, out: &mut Transcript) {
    for (index, line) in text.split('\n').enumerate() {
        out.line(format!("    {:2}) {}", index + 1, line));
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    out.line("  Text to filter:");
    display_text(TEXT_TO_FILTER, out);

    out.line("  Filtering text...");
    let filtered = remove_comments(TEXT_TO_FILTER)?;

    out.line("  Filtered text:");
    display_text(&filtered, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines[0], "  Text to filter:");
        assert_eq!(lines[15], "  Filtering text...");
        assert_eq!(lines[16], "  Filtered text:");
        assert_eq!(lines[17], "     1) ");
        assert_eq!(lines[21], "     5) void State_Exercise() ");
        assert_eq!(lines[23], "     7)     char character = '\\\"';");
        assert_eq!(
            lines[25],
            "     9)     std::cout << \"\\\"State\\\" /*Exercise*/\" << std::endl;"
        );
        assert_eq!(
            lines[29],
            "    13)     std::cout << \"\\t\\tDone. //(No, really)//\" << std::endl;"
        );
        assert_eq!(lines.len(), 31);
    }
}
