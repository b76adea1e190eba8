//! Coloured, icon-prefixed terminal messages.

use std::fmt;
use std::io::{self, BufRead, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn colour(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }

    /// Errors go to stderr, everything else to stdout.
    pub fn emit<T: fmt::Display>(self, msg: T) {
        let line = format!("{}{}{} {}{}", self.colour(), BOLD, self.icon(), RESET, msg);
        match self {
            Level::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    Level::Info.emit(msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    Level::Success.emit(msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    Level::Warning.emit(msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    Level::Error.emit(msg);
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
