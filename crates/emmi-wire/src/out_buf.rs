use emmi_common::{IndexError, IndexResult};

/// Caller-owned, capacity-bounded response buffer.
///
/// The serialized response is staged in full before any byte lands here:
/// a response either fits or fails with the size it would have needed,
/// never a silent truncation.
#[derive(Debug)]
pub struct OutBuf<'a> {
    buf: &'a mut [u8],
}

impl<'a> OutBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        OutBuf { buf }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Copy `bytes` to the start of the buffer, returning the written
    /// length, or `BufferTooSmall { needed, .. }` without writing anything.
    pub fn copy_from(&mut self, bytes: &[u8]) -> IndexResult<usize> {
        if bytes.len() > self.buf.len() {
            return Err(IndexError::BufferTooSmall {
                needed: bytes.len(),
                capacity: self.buf.len(),
            });
        }
        self.buf[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_needed_size() {
        let mut storage = [0u8; 4];
        let mut out = OutBuf::new(&mut storage);
        let err = out.copy_from(&[1, 2, 3, 4, 5]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::BufferTooSmall {
                needed: 5,
                capacity: 4
            }
        ));
        // nothing was written
        assert_eq!(storage, [0u8; 4]);
    }

    #[test]
    fn copies_and_reports_length() {
        let mut storage = [0u8; 4];
        let mut out = OutBuf::new(&mut storage);
        assert_eq!(out.copy_from(&[7, 8]).unwrap(), 2);
        assert_eq!(&storage[..2], &[7, 8]);
    }
}
