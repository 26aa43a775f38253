//! `-log <path>` support: duplicate everything written to one sink into a
//! second sink as well.
use std::io::{self, Write};

/// Forwards every `write`/`flush` call to both `a` and `b`.
///
/// A direct generalization of "write to two places"; no buffering or
/// batching beyond what the underlying writers already do.
pub struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.a.write(buf)?;
        self.b.write_all(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}
