//! Byte-slice entry points over the binrw implementations.

use binrw::{Endian, prelude::*};
use std::io::Cursor;

/// Unmarshal from, and marshal to, plain byte buffers.
///
/// Implemented for every type that reads and writes itself with binrw without
/// arguments. All wire structures in this crate are little-endian.
pub trait Marshal: Sized {
    /// Reads a value from the front of `data`.
    ///
    /// Returns the value and the number of bytes it consumed. Reads never go past the end of `data`.
    fn unmarshal(data: &[u8]) -> crate::Result<(Self, usize)>;

    /// Serializes the value into a new buffer.
    fn marshal(&self) -> crate::Result<Vec<u8>>;
}

impl<T> Marshal for T
where
    T: for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()>,
{
    fn unmarshal(data: &[u8]) -> crate::Result<(Self, usize)> {
        let mut cursor = Cursor::new(data);
        let value = T::read_options(&mut cursor, Endian::Little, ())?;
        Ok((value, cursor.position() as usize))
    }

    fn marshal(&self) -> crate::Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_options(&mut cursor, Endian::Little, ())?;
        Ok(cursor.into_inner())
    }
}
