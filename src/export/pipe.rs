//! Stdout writer that tolerates a closed pipe.

use std::io::{self, ErrorKind, Write};

/// Swallows `BrokenPipe` so `mail_spoof ... | head` exits cleanly.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

fn ignore_broken_pipe<T>(result: io::Result<T>, closed: T) -> io::Result<T> {
    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(closed),
        other => other,
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ignore_broken_pipe(self.inner.write(buf), buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ignore_broken_pipe(self.inner.flush(), ())
    }
}
