//! I/O boundary traits for testability
//!
//! The play loop talks to the terminal only through [`Console`], so games
//! can be driven by scripted input in tests.

use std::io::{self, BufRead, Write};

/// Line-oriented terminal abstraction.
pub trait Console {
    /// Read one line of input without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write text as-is.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Clear the screen.
    fn clear(&mut self) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Console over the process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        // ANSI: erase display, cursor home
        self.write("\x1b[2J\x1b[H")
    }
}
