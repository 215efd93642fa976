use std::io::{self, StdoutLock, Write as _};

use anyhow::Context as _;

/// Locked standard output for command results.
#[derive(Debug)]
pub struct Output {
    writer: StdoutLock<'static>,
}

impl Output {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout().lock(),
        }
    }

    pub fn display_path(&self) -> &'static str {
        "stdout"
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
