//! Interpreter exercise
//!
//! Sentences are encoded as lists of integer tokens. The interpreter turns
//! them back into text following a few grammar rules: look up each token,
//! capitalize the first word, separate words by a single space, and put no
//! space before the closing punctuation.

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;
use crate::core::util::{format_number_list, titlecase};

/// Token for "."
pub const PERIOD: i32 = 100;
/// Token for "?"
pub const QUESTION: i32 = 101;

/// The 40 most common English words; a word's token is its index
const COMMON_WORDS: [&str; 40] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
];

const SENTENCE_TOKEN_LISTS: [&[i32]; 6] = [
    &[39, 18, 17, 27, 2, 7, 101],
    &[32, 17, 1, 0, 34, 2, 1, 37, 101],
    &[36, 17, 8, 5, 32, 2, 18, 7, 101],
    &[11, 12, 17, 9, 36, 12, 1, 6, 20, 100],
    &[26, 27, 7, 21, 36, 17, 27, 10, 101],
    &[23, 28, 32, 26, 32, 18, 10, 100],
];

fn interpret_token(token: i32) -> String {
    match usize::try_from(token).ok().and_then(|i| COMMON_WORDS.get(i)) {
        Some(word) => word.to_string(),
        None => match token {
            PERIOD => ".".to_string(),
            QUESTION => "?".to_string(),
            _ => format!("<UNKNOWN TOKEN {}>", token),
        },
    }
}

/// Convert a token list to a sentence
pub fn interpret(tokens: &[i32]) -> String {
    let mut output = String::new();
    for (index, &token) in tokens.iter().enumerate() {
        let word = interpret_token(token);
        if index == 0 {
            output.push_str(&titlecase(&word));
        } else {
            output.push_str(&word);
        }
        if index + 2 < tokens.len() {
            output.push(' ');
        }
    }
    output
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    for tokens in SENTENCE_TOKEN_LISTS {
        let tokens_as_string = format_number_list(tokens, 3);
        out.line(format!("  {:<50} ==> \"{}\"", tokens_as_string, interpret(tokens)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences() {
        assert_eq!(interpret(SENTENCE_TOKEN_LISTS[0]), "What do you say to that?");
        assert_eq!(interpret(SENTENCE_TOKEN_LISTS[1]), "Will you be the one to be there?");
        assert_eq!(
            interpret(SENTENCE_TOKEN_LISTS[3]),
            "For not you I would not be in this."
        );
        assert_eq!(interpret(SENTENCE_TOKEN_LISTS[5]), "By her will we will do it.");
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(interpret(&[0, 77, 100]), "The <UNKNOWN TOKEN 77>.");
        assert_eq!(interpret(&[-1]), "<UNKNOWN TOKEN -1>");
    }

    #[test]
    fn test_short_inputs() {
        assert_eq!(interpret(&[]), "");
        assert_eq!(interpret(&[9]), "I");
        assert_eq!(interpret(&[9, 12]), "Inot");
    }

    #[test]
    fn test_exercise_line_format() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        assert_eq!(
            out.lines()[0],
            "  [ 39,  18,  17,  27,   2,   7, 101]                ==> \"What do you say to that?\""
        );
        assert_eq!(out.lines().len(), 6);
    }
}
