//! Output filter that swallows lone terminal bells.

use std::io::{self, Write};

use log::trace;

use crate::tui::style::BELL;

/// Passes writes through to `inner`, except a write consisting of exactly
/// one bell byte, which is dropped and reported as zero bytes written.
///
/// Bells inside larger buffers are left alone; the engine always rings on
/// its own, so that is the only shape worth catching.
pub struct BellSuppressor<W> {
    inner: W,
}

impl<W: Write> BellSuppressor<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for BellSuppressor<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf == [BELL] {
            trace!("bell suppressed");
            return Ok(0);
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_bell_is_dropped() {
        let mut filter = BellSuppressor::new(Vec::<u8>::new());

        assert_eq!(filter.write(&[BELL]).unwrap(), 0);
        assert!(filter.into_inner().is_empty());
    }

    #[test]
    fn test_other_single_bytes_pass() {
        let mut filter = BellSuppressor::new(Vec::<u8>::new());

        assert_eq!(filter.write(b"x").unwrap(), 1);
        assert_eq!(filter.into_inner(), b"x");
    }

    #[test]
    fn test_embedded_bell_passes_unchanged() {
        let mut filter = BellSuppressor::new(Vec::<u8>::new());
        let buf = [b'a', BELL, b'b'];

        assert_eq!(filter.write(&buf).unwrap(), 3);
        assert_eq!(filter.into_inner(), buf);
    }

    #[test]
    fn test_double_bell_passes() {
        let mut filter = BellSuppressor::new(Vec::<u8>::new());

        filter.write_all(&[BELL, BELL]).unwrap();
        assert_eq!(filter.into_inner(), vec![BELL, BELL]);
    }

    #[test]
    fn test_empty_write_is_forwarded() {
        let mut filter = BellSuppressor::new(Vec::<u8>::new());

        assert_eq!(filter.write(&[]).unwrap(), 0);
        filter.flush().unwrap();
        assert!(filter.into_inner().is_empty());
    }
}
