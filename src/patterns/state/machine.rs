//! Comment stripping state machine
//!
//! Removes C/C++ line (`//`) and block (`/* */`) comments from text while
//! leaving comment-like sequences inside single or double quoted literals
//! untouched. One character is read per step and the cursor never moves
//! back; the only buffered input is the `/` held while deciding whether a
//! comment starts.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Errors from comment stripping
#[derive(Debug, Error)]
pub enum StripError {
    /// The output buffer could not be reserved
    #[error("Unable to allocate the output buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentState {
    /// Before the first read
    Initial,
    NormalText,
    DoubleQuotedText,
    SingleQuotedText,
    EscapedDoubleQuoteText,
    EscapedSingleQuoteText,
    /// A `/` was seen and is held back
    StartComment,
    LineComment,
    BlockComment,
    /// A `*` was seen inside a block comment
    EndBlockComment,
    Done,
}

impl fmt::Display for CommentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommentState::Initial => "Initial",
            CommentState::NormalText => "NormalText",
            CommentState::DoubleQuotedText => "DoubleQuotedText",
            CommentState::SingleQuotedText => "SingleQuotedText",
            CommentState::EscapedDoubleQuoteText => "EscapedDoubleQuoteText",
            CommentState::EscapedSingleQuoteText => "EscapedSingleQuoteText",
            CommentState::StartComment => "StartComment",
            CommentState::LineComment => "LineComment",
            CommentState::BlockComment => "BlockComment",
            CommentState::EndBlockComment => "EndBlockComment",
            CommentState::Done => "Done",
        };
        f.write_str(name)
    }
}

impl CommentState {
    /// Consume one input character (`None` at end of input), pushing any
    /// kept characters to `out`, and return the next state.
    pub fn advance(self, input: Option<char>, out: &mut String) -> CommentState {
        use CommentState::*;

        let Some(ch) = input else {
            // Unterminated literals and comments are truncated; a held `/`
            // is dropped.
            return Done;
        };

        match self {
            Initial => NormalText.advance(Some(ch), out),
            NormalText => match ch {
                '"' => {
                    out.push(ch);
                    DoubleQuotedText
                }
                '\'' => {
                    out.push(ch);
                    SingleQuotedText
                }
                '/' => StartComment,
                _ => {
                    out.push(ch);
                    NormalText
                }
            },
            DoubleQuotedText => {
                out.push(ch);
                match ch {
                    '"' => NormalText,
                    '\\' => EscapedDoubleQuoteText,
                    _ => DoubleQuotedText,
                }
            }
            SingleQuotedText => {
                out.push(ch);
                match ch {
                    '\'' => NormalText,
                    '\\' => EscapedSingleQuoteText,
                    _ => SingleQuotedText,
                }
            }
            EscapedDoubleQuoteText => {
                out.push(ch);
                DoubleQuotedText
            }
            EscapedSingleQuoteText => {
                out.push(ch);
                SingleQuotedText
            }
            StartComment => match ch {
                '/' => LineComment,
                '*' => BlockComment,
                _ => {
                    out.push('/');
                    out.push(ch);
                    NormalText
                }
            },
            LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    NormalText
                } else {
                    LineComment
                }
            }
            BlockComment => {
                if ch == '*' {
                    EndBlockComment
                } else {
                    BlockComment
                }
            }
            EndBlockComment => {
                if ch == '/' {
                    NormalText
                } else {
                    BlockComment
                }
            }
            Done => Done,
        }
    }
}

/// Remove C/C++ style comments from `text`.
///
/// The result holds code and literal contents only. Never fails on input
/// content; the only error is failing to reserve the output buffer.
pub fn remove_comments(text: &str) -> Result<String, StripError> {
    let mut out = String::new();
    out.try_reserve(text.len())?;

    let mut chars = text.chars();
    let mut state = CommentState::Initial;
    while state != CommentState::Done {
        let next = state.advance(chars.next(), &mut out);
        if next != state {
            log::trace!("comment filter: {} -> {}", state, next);
        }
        state = next;
    }

    Ok(out)
}
