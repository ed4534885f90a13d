//! Appender over any `io::Write`

use crate::core::{Appender, Result};
use std::io::Write;

/// Writes each line to the wrapped writer
///
/// ```
/// use logfmtr::{Appender, WriterAppender};
///
/// let mut appender = WriterAppender::new(Vec::new());
/// appender.append("level=info evt=ok\n").unwrap();
/// assert_eq!(appender.into_inner(), b"level=info evt=ok\n");
/// ```
pub struct WriterAppender<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
