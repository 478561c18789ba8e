//! Line-oriented output sink for exercises
//!
//! Exercises never print directly. Everything they would show on the console
//! goes into a `Transcript`, which the runner packs into a `Report`.

/// Collected output lines of one exercise
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
    pending: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a complete line (embedded newlines split into several lines)
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.text(text.as_ref());
        self.end_line();
    }

    /// Append text to the current line without ending it
    pub fn text(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.pending.push_str(first);
        }
        for part in parts {
            self.end_line();
            self.pending.push_str(part);
        }
    }

    /// Append an empty line
    pub fn blank(&mut self) {
        self.line("");
    }

    fn end_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.pending));
    }

    /// Lines written so far (excluding an unfinished one)
    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the transcript, keeping any unfinished line
    pub fn into_lines(mut self) -> Vec<String> {
        if !self.pending.is_empty() {
            self.end_line();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_text_joins_into_one_line() {
        let mut out = Transcript::new();
        out.text("    ur -> ");
        out.text("<move up> ");
        out.line("<move right>");
        assert_eq!(out.lines(), ["    ur -> <move up> <move right>"]);
    }

    #[test]
    fn test_embedded_newlines_split() {
        let mut out = Transcript::new();
        out.line("a\nb");
        out.blank();
        assert_eq!(out.into_lines(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_unfinished_line_kept_on_finish() {
        let mut out = Transcript::new();
        out.text("tail");
        assert!(out.lines().is_empty());
        assert_eq!(out.into_lines(), vec!["tail"]);
    }
}
