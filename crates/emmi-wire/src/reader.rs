use emmi_common::{IndexError, IndexResult};

/// Byte-slice cursor with one-byte lookahead.
///
/// The peek exists for a single purpose: spotting the `0x00` length prefix
/// that terminates a collection without consuming it.
#[derive(Debug)]
pub struct PeekReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PeekReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        PeekReader { buf, pos: 0 }
    }

    /// Next byte without consuming it, `None` at end of input.
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> IndexResult<u8> {
        let byte = self.peek().ok_or(IndexError::TruncatedInput {
            expected: 1,
            actual: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> IndexResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(IndexError::TruncatedInput {
                expected: len,
                actual: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut reader = PeekReader::new(&[1, 2]);
        assert_eq!(reader.peek(), Some(1));
        assert_eq!(reader.peek(), Some(1));
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.peek(), Some(2));
        assert_eq!(reader.read_u8().unwrap(), 2);
        assert_eq!(reader.peek(), None);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn read_exact_reports_shortfall() {
        let mut reader = PeekReader::new(&[1, 2, 3]);
        assert_eq!(reader.read_exact(2).unwrap(), &[1, 2]);
        let err = reader.read_exact(2).unwrap_err();
        assert!(matches!(
            err,
            IndexError::TruncatedInput {
                expected: 2,
                actual: 1
            }
        ));
    }
}
