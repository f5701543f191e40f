use emmi_common::{IndexError, IndexResult};

use crate::{varint, WireRecord};

/// Serializer for records and sentinel-terminated collections.
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    pub fn new() -> Self {
        RecordWriter::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// `varint(len) || bytes`. This is also how a fixed-size record is
    /// framed when it stands alone as a top-level record.
    pub fn write_array(&mut self, bytes: &[u8]) {
        varint::write_u64(&mut self.buf, bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_record<T: WireRecord>(&mut self, record: &T) -> IndexResult<()> {
        let bytes = record.to_wire();
        match T::FIXED_SIZE {
            Some(size) => {
                if bytes.len() != size {
                    return Err(IndexError::InvalidRecordSize {
                        expected: size,
                        actual: bytes.len(),
                    });
                }
                self.buf.extend_from_slice(&bytes);
            }
            None => self.write_array(&bytes),
        }
        Ok(())
    }

    /// Left then right, back to back, with no wrapping boundary.
    pub fn write_pair<L: WireRecord, R: WireRecord>(
        &mut self,
        left: &L,
        right: &R,
    ) -> IndexResult<()> {
        self.write_record(left)?;
        self.write_record(right)
    }

    pub fn write_list<'a, T, I>(&mut self, items: I) -> IndexResult<()>
    where
        T: WireRecord + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for item in items {
            self.write_record(item)?;
        }
        self.write_terminator();
        Ok(())
    }

    /// Interleaved `key value ... 0x00`. A variable-size key serializing to
    /// zero bytes would be indistinguishable from the terminator, so it is
    /// rejected.
    pub fn write_entries<'a, K, V, I>(&mut self, entries: I) -> IndexResult<()>
    where
        K: WireRecord + 'a,
        V: WireRecord + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        for (key, value) in entries {
            if K::FIXED_SIZE.is_none() && key.to_wire().is_empty() {
                return Err(IndexError::InvalidRecordSize {
                    expected: 1,
                    actual: 0,
                });
            }
            self.write_pair(key, value)?;
        }
        self.write_terminator();
        Ok(())
    }

    fn write_terminator(&mut self) {
        self.buf.push(0);
    }
}

#[cfg(test)]
mod tests {
    use emmi_common::Keyword;

    use super::*;

    #[test]
    fn empty_collections_are_one_terminator_byte() {
        let mut writer = RecordWriter::new();
        writer.write_list(std::iter::empty::<&Keyword>()).unwrap();
        assert_eq!(writer.into_bytes(), vec![0]);

        let mut writer = RecordWriter::new();
        writer
            .write_entries(std::iter::empty::<(&Keyword, &Keyword)>())
            .unwrap();
        assert_eq!(writer.into_bytes(), vec![0]);
    }

    #[test]
    fn empty_variable_size_map_key_is_rejected() {
        let empty = Keyword::from("");
        let value = Keyword::from("v");
        let mut writer = RecordWriter::new();
        let err = writer.write_entries([(&empty, &value)]).unwrap_err();
        assert!(matches!(err, IndexError::InvalidRecordSize { .. }));
    }
}
