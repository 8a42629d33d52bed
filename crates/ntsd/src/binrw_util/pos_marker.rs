//! Placeholders for size and offset fields that are only known after
//! the data they describe has been written.

use binrw::{Endian, prelude::*};
use std::io::{Seek, SeekFrom, Write};
use std::marker::PhantomData;

use crate::Error;

use super::fields::custom_error;

/// Remembers where a `T` placeholder was written, so it can be patched later.
#[derive(Debug)]
pub struct PosMarker<T> {
    pos: u64,
    _phantom: PhantomData<T>,
}

impl<T> PosMarker<T>
where
    T: Default + TryFrom<u64> + for<'a> BinWrite<Args<'a> = ()>,
{
    /// Writes a zero placeholder at the current position.
    pub fn reserve<W: Write + Seek>(writer: &mut W, endian: Endian) -> BinResult<Self> {
        let pos = writer.stream_position()?;
        T::default().write_options(writer, endian, ())?;
        Ok(Self {
            pos,
            _phantom: PhantomData,
        })
    }

    /// The stream position of the placeholder.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Overwrites the placeholder with `value`, then returns to the current position.
    pub fn write_back<W: Write + Seek>(
        &self,
        value: u64,
        writer: &mut W,
        endian: Endian,
        field: &'static str,
    ) -> BinResult<()> {
        let value = T::try_from(value).map_err(|_| {
            custom_error(
                writer,
                Error::InvalidValue {
                    field,
                    reason: format!(
                        "{value} does not fit in {} bytes",
                        std::mem::size_of::<T>()
                    ),
                },
            )
        })?;
        let return_to = writer.stream_position()?;
        writer.seek(SeekFrom::Start(self.pos))?;
        value.write_options(writer, endian, ())?;
        writer.seek(SeekFrom::Start(return_to))?;
        Ok(())
    }

    /// Writes back the number of bytes between `begin` and the current position.
    pub fn write_size_from<W: Write + Seek>(
        &self,
        begin: u64,
        writer: &mut W,
        endian: Endian,
        field: &'static str,
    ) -> BinResult<()> {
        let end = writer.stream_position()?;
        self.write_back(end - begin, writer, endian, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reserve_and_write_back() {
        let mut cursor = Cursor::new(Vec::new());
        0xaau8.write_le(&mut cursor).unwrap();
        let size = PosMarker::<u16>::reserve(&mut cursor, Endian::Little).unwrap();
        [1u8, 2, 3].write_le(&mut cursor).unwrap();
        size.write_size_from(0, &mut cursor, Endian::Little, "size")
            .unwrap();
        assert_eq!(size.pos(), 1);
        assert_eq!(cursor.into_inner(), vec![0xaa, 0x06, 0x00, 1, 2, 3]);
    }

    #[test]
    fn test_write_back_overflow() {
        let mut cursor = Cursor::new(Vec::new());
        let size = PosMarker::<u8>::reserve(&mut cursor, Endian::Little).unwrap();
        let err = size
            .write_back(0x100, &mut cursor, Endian::Little, "size")
            .unwrap_err();
        assert!(matches!(
            Error::from(err),
            Error::InvalidValue { field: "size", .. }
        ));
    }
}
