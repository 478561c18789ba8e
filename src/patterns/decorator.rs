//! Decorator exercise
//!
//! Render elements are wrapped in decorators that add ANSI styling around
//! whatever the wrapped element renders. Decorators nest in any order.

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

/// Something that renders to a string
pub trait RenderElement {
    fn render(&self) -> String;
}

/// Undecorated text
pub struct TextElement {
    text: String,
}

impl TextElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RenderElement for TextElement {
    fn render(&self) -> String {
        self.text.clone()
    }
}

/// Wraps an element between an SGR "set" sequence and its matching "reset"
pub struct SgrDecorator {
    inner: Box<dyn RenderElement>,
    set: u8,
    reset: u8,
}

impl RenderElement for SgrDecorator {
    fn render(&self) -> String {
        format!("\x1b[{}m{}\x1b[{}m", self.set, self.inner.render(), self.reset)
    }
}

/// Red foreground (SGR 31, reset 39)
pub fn red_foreground(inner: impl RenderElement + 'static) -> SgrDecorator {
    SgrDecorator {
        inner: Box::new(inner),
        set: 31,
        reset: 39,
    }
}

/// Underline (SGR 4, reset 24)
pub fn underline(inner: impl RenderElement + 'static) -> SgrDecorator {
    SgrDecorator {
        inner: Box::new(inner),
        set: 4,
        reset: 24,
    }
}

/// White background (SGR 47, reset 49)
pub fn white_background(inner: impl RenderElement + 'static) -> SgrDecorator {
    SgrDecorator {
        inner: Box::new(inner),
        set: 47,
        reset: 49,
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let base = TextElement::new("This is raw text");
    let base_text = base.render();
    let wrapped = white_background(underline(red_foreground(base)));

    out.line(format!("  base Text element: \"{}\"", base_text));
    out.line(format!("  Decorated element: \"{}\"", wrapped.render()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorators_nest_outside_in() {
        let wrapped = white_background(underline(red_foreground(TextElement::new("x"))));
        assert_eq!(
            wrapped.render(),
            "\x1b[47m\x1b[4m\x1b[31mx\x1b[39m\x1b[24m\x1b[49m"
        );
    }

    #[test]
    fn test_exercise_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        assert_eq!(out.lines()[0], "  base Text element: \"This is raw text\"");
        assert!(out.lines()[1].contains("\x1b[31mThis is raw text\x1b[39m"));
    }
}
