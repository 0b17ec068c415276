//! Console output formatting with ANSI color support.
//!
//! Provides styled terminal output with automatic TTY detection
//! and respect for the NO_COLOR environment variable.

use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// Message severity, mapped to a label and color.
#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Ok,
    Warn,
    Error,
    Step,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Step => "STEP",
        }
    }

    /// ANSI color code for the label.
    fn color(self) -> &'static str {
        match self {
            Level::Info => "34",
            Level::Ok => "32",
            Level::Warn => "33",
            Level::Error => "31",
            Level::Step => "36",
        }
    }
}

/// Console output handler with color support detection.
#[derive(Debug, Clone)]
pub struct Console {
    colors_enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates a new Console instance, detecting color support.
    ///
    /// Colors are disabled if:
    /// - The `NO_COLOR` environment variable is set
    /// - stdout is not a terminal (TTY)
    pub fn new() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();

        Self { colors_enabled }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
        }
    }

    /// Wraps text in ANSI codes if colors are enabled.
    fn paint(&self, codes: &str, text: &str) -> String {
        if self.colors_enabled {
            format!("\x1b[{codes}m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, level: Level, message: &str) {
        let codes = format!("{};1", level.color());
        let label = format!("[{}]", self.paint(&codes, level.label()));
        if matches!(level, Level::Error) {
            eprintln!("{} {}", label, message);
        } else {
            println!("{} {}", label, message);
        }
    }

    /// Prints an info message with blue `[INFO]` label.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Prints a success message with green `[OK]` label.
    pub fn success(&self, message: &str) {
        self.emit(Level::Ok, message);
    }

    /// Prints a warning message with yellow `[WARN]` label.
    pub fn warning(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    /// Prints an error message with red `[ERROR]` label to stderr.
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Prints a step message with cyan `[STEP]` label.
    pub fn step(&self, message: &str) {
        self.emit(Level::Step, message);
    }

    /// Prints a section header in magenta bold.
    pub fn section(&self, message: &str) {
        println!();
        println!("{}", self.paint("35;1", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_disabled() {
        let console = Console::with_colors(false);
        assert_eq!(console.paint("31", "hello"), "hello");
    }

    #[test]
    fn test_paint_enabled() {
        let console = Console::with_colors(true);
        let painted = console.paint("31", "hello");
        assert!(painted.contains("\x1b[31m"));
        assert!(painted.contains("hello"));
        assert!(painted.contains(RESET));
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Warn.label(), "WARN");
        assert_eq!(Level::Step.color(), "36");
    }
}
