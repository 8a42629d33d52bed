//! Bounds checks and per-field error context for hand-written readers and writers.

use binrw::{Endian, prelude::*};
use std::io::{Read, Seek, SeekFrom, Write};

use crate::Error;

/// Returns the number of bytes between the current position and the end of the stream.
pub fn remaining<S: Seek>(stream: &mut S) -> BinResult<u64> {
    let pos = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(pos))?;
    Ok(end.saturating_sub(pos))
}

/// Fails with [`Error::TruncatedInput`] unless at least `needed` bytes are left.
pub fn ensure_remaining<S: Seek>(stream: &mut S, needed: u64) -> BinResult<()> {
    let available = remaining(stream)?;
    if available < needed {
        return Err(custom_error(
            stream,
            Error::TruncatedInput {
                needed: needed as usize,
                available: available as usize,
            },
        ));
    }
    Ok(())
}

/// Carries a crate [`Error`] through binrw, tagged with the current position.
pub fn custom_error<S: Seek>(stream: &mut S, err: Error) -> binrw::Error {
    binrw::Error::Custom {
        pos: stream.stream_position().unwrap_or_default(),
        err: Box::new(err),
    }
}

/// Wraps `err` as the failure of `field`, keeping the innermost cause.
pub fn field_error(err: binrw::Error, field: impl Into<String>, pos: u64) -> binrw::Error {
    binrw::Error::Custom {
        pos,
        err: Box::new(Error::from(err).in_field(field)),
    }
}

/// Reads a `T`, attributing any failure to `field`.
pub fn read_field<T, R>(reader: &mut R, endian: Endian, field: &str) -> BinResult<T>
where
    T: for<'a> BinRead<Args<'a> = ()>,
    R: Read + Seek,
{
    let pos = reader.stream_position()?;
    T::read_options(reader, endian, ()).map_err(|err| field_error(err, field, pos))
}

/// Writes `value`, attributing any failure to `field`.
pub fn write_field<T, W>(value: &T, writer: &mut W, endian: Endian, field: &str) -> BinResult<()>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
    W: Write + Seek,
{
    let pos = writer.stream_position()?;
    value
        .write_options(writer, endian, ())
        .map_err(|err| field_error(err, field, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_remaining_keeps_position() {
        let mut cursor = Cursor::new([0u8; 10]);
        cursor.set_position(3);
        assert_eq!(remaining(&mut cursor).unwrap(), 7);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_ensure_remaining_reports_counts() {
        let mut cursor = Cursor::new([0u8; 5]);
        cursor.set_position(1);
        let err = Error::from(ensure_remaining(&mut cursor, 8).unwrap_err());
        assert!(matches!(
            err,
            Error::TruncatedInput {
                needed: 8,
                available: 4
            }
        ));
    }
}
