//! Result printing.
//!
//! Every command hands its result to [`Output::emit`] together with a text
//! renderer. With `--json` the value is serialized instead and the renderer
//! is skipped.

use std::io::{self, Write};

use serde::Serialize;

pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value`, either as pretty JSON or through `render`.
    pub fn emit<T, F>(&self, value: &T, render: F) -> io::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.json {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)
        } else {
            render(&mut out)
        }
    }

    /// Print a progress line. Suppressed in JSON mode so stdout stays parseable.
    pub fn note(&self, line: &str) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{line}")
    }
}
