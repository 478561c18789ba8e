//! Bridge exercise
//!
//! `Logger` is the abstraction callers see; where its lines end up is decided
//! by the `LogSink` implementation it was built over. Both sides can vary
//! independently.

use std::fmt;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

const TIMESTAMP_FORMAT: &str = "%m/%d/%Y  %I:%M:%S %p";

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        };
        f.pad(name)
    }
}

/// Destination of formatted log lines
pub trait LogSink {
    fn write_line(&mut self, line: &str) -> std::io::Result<()>;
}

/// Appends lines to a file, truncating it when opened
pub struct FileSink {
    writer: LineWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            writer: LineWriter::new(File::create(path)?),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", line)
    }
}

/// Shows lines on the console
pub struct ConsoleSink<'a> {
    out: &'a mut Transcript,
}

impl<'a> ConsoleSink<'a> {
    pub fn new(out: &'a mut Transcript) -> Self {
        Self { out }
    }
}

impl LogSink for ConsoleSink<'_> {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.out.line(line);
        Ok(())
    }
}

/// Discards everything
pub struct NullSink;

impl LogSink for NullSink {
    fn write_line(&mut self, _line: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Front end used by callers, independent of where lines go
pub struct Logger<'a> {
    sink: Box<dyn LogSink + 'a>,
}

impl<'a> Logger<'a> {
    pub fn new(sink: impl LogSink + 'a) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn to_file(path: &Path) -> Result<Self, ExerciseError> {
        let sink = FileSink::create(path)
            .map_err(|e| ExerciseError::io(format!("Opening log file {}", path.display()), e))?;
        Ok(Self::new(sink))
    }

    pub fn to_console(out: &'a mut Transcript) -> Self {
        Self::new(ConsoleSink::new(out))
    }

    pub fn to_null() -> Self {
        Self::new(NullSink)
    }

    pub fn log(&mut self, level: LogLevel, message: &str) -> Result<(), ExerciseError> {
        let line = format_log_line(level, message);
        self.sink
            .write_line(&line)
            .map_err(|e| ExerciseError::io("Writing log line", e))
    }

    pub fn log_trace(&mut self, message: &str) -> Result<(), ExerciseError> {
        self.log(LogLevel::Trace, message)
    }

    pub fn log_info(&mut self, message: &str) -> Result<(), ExerciseError> {
        self.log(LogLevel::Info, message)
    }

    pub fn log_error(&mut self, message: &str) -> Result<(), ExerciseError> {
        self.log(LogLevel::Error, message)
    }
}

/// "<timestamp> [LEVEL] message"
pub fn format_log_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    format!("{} [{:<5}] {}", timestamp, level, message)
}

fn demonstrate_logging(logger: &mut Logger<'_>, logger_type: &str) -> Result<(), ExerciseError> {
    logger.log_trace(&format!("Starting \"log to {}\" example", logger_type))?;
    logger.log_info("An example of an informational line")?;
    logger.log_error("An example of an error log entry")?;
    logger.log_trace(&format!("Done with \"log to {}\" example", logger_type))
}

pub fn run(config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    {
        let mut logger = Logger::to_file(&config.log_file)?;
        out.line("  Example of writing to a log file...");
        demonstrate_logging(&mut logger, "file")?;
    }

    out.line("  Example of writing to the console...");
    {
        let mut logger = Logger::to_console(out);
        demonstrate_logging(&mut logger, "console")?;
    }

    out.line("  Example of writing to a Null object (no output)...");
    let mut logger = Logger::to_null();
    demonstrate_logging(&mut logger, "null")
}
