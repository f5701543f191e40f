use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use emmi_common::IndexResult;

use crate::{varint, PeekReader, WireRecord};

/// Deserializer over a request buffer.
#[derive(Debug)]
pub struct RecordReader<'a> {
    input: PeekReader<'a>,
}

impl<'a> RecordReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        RecordReader {
            input: PeekReader::new(bytes),
        }
    }

    pub fn read_array(&mut self) -> IndexResult<&'a [u8]> {
        let len = varint::read_u64(&mut self.input)? as usize;
        self.input.read_exact(len)
    }

    pub fn read_record<T: WireRecord>(&mut self) -> IndexResult<T> {
        let bytes = match T::FIXED_SIZE {
            Some(size) => self.input.read_exact(size)?,
            None => self.read_array()?,
        };
        T::from_wire(bytes)
    }

    pub fn read_pair<L: WireRecord, R: WireRecord>(&mut self) -> IndexResult<(L, R)> {
        let left = self.read_record()?;
        let right = self.read_record()?;
        Ok((left, right))
    }

    /// True when the next record of type `T` is the collection terminator:
    /// a zero-length record, or end of input (an empty buffer is an empty
    /// collection). A raw fixed-size record may legitimately begin with
    /// `0x00`, so for those the peeked zero only marks the end when fewer
    /// bytes remain than one full record.
    pub fn at_collection_end<T: WireRecord>(&self) -> bool {
        match self.input.peek() {
            None => true,
            Some(0) => match T::FIXED_SIZE {
                Some(size) => self.input.remaining() < size,
                None => true,
            },
            Some(_) => false,
        }
    }

    /// Lazy decoding of a collection; items can only be replayed by
    /// re-reading from the start of the buffer.
    pub fn iter_records<T: WireRecord>(&mut self) -> RecordIter<'_, 'a, T> {
        RecordIter {
            reader: self,
            done: false,
            _marker: PhantomData,
        }
    }

    pub fn read_list<T: WireRecord>(&mut self) -> IndexResult<Vec<T>> {
        self.iter_records().collect()
    }

    /// Keys are unique; on a duplicate the last decoded value wins.
    pub fn read_map<K, V>(&mut self) -> IndexResult<FxHashMap<K, V>>
    where
        K: WireRecord + Eq + Hash,
        V: WireRecord,
    {
        let mut map = FxHashMap::default();
        while !self.at_collection_end::<K>() {
            let (key, value) = self.read_pair()?;
            map.insert(key, value);
        }
        self.consume_terminator();
        Ok(map)
    }

    fn consume_terminator(&mut self) {
        if self.input.peek() == Some(0) {
            let _ = self.input.read_u8();
        }
    }
}

/// See [`RecordReader::iter_records`].
#[derive(Debug)]
pub struct RecordIter<'r, 'a, T> {
    reader: &'r mut RecordReader<'a>,
    done: bool,
    _marker: PhantomData<T>,
}

impl<T: WireRecord> Iterator for RecordIter<'_, '_, T> {
    type Item = IndexResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.reader.at_collection_end::<T>() {
            self.reader.consume_terminator();
            self.done = true;
            return None;
        }
        match self.reader.read_record() {
            Ok(item) => Some(Ok(item)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

pub fn deserialize_list<T: WireRecord>(bytes: &[u8]) -> IndexResult<Vec<T>> {
    RecordReader::new(bytes).read_list()
}

pub fn deserialize_map<K, V>(bytes: &[u8]) -> IndexResult<FxHashMap<K, V>>
where
    K: WireRecord + Eq + Hash,
    V: WireRecord,
{
    RecordReader::new(bytes).read_map()
}
