//! MS-DTYP 2.3.4: GUID

use binrw::{Endian, prelude::*};
use std::fmt;
use std::io::{Read, Seek};
use std::str::FromStr;

use crate::Error;
use crate::binrw_util::prelude::*;

/// A GUID, in the mixed-endian layout of [MS-DTYP 2.3.4.2](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/001eec5a-7f8b-4293-9e21-ca349392db40>):
/// the first three groups are little-endian, the last 8 bytes are kept as-is.
#[derive(BinWrite, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[bw(little)]
pub struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

impl Guid {
    pub const SIZE: usize = 16;
    pub const ZERO: Guid = Guid::from_fields(0, 0, 0, [0; 8]);

    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl BinRead for Guid {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, Self::SIZE as u64)?;
        Ok(Self {
            data1: u32::read_options(reader, Endian::Little, ())?,
            data2: u16::read_options(reader, Endian::Little, ())?,
            data3: u16::read_options(reader, Endian::Little, ())?,
            data4: <[u8; 8]>::read_options(reader, Endian::Little, ())?,
        })
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl FromStr for Guid {
    type Err = Error;

    /// Parses the `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form, optionally wrapped in braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFormat(format!("invalid GUID: {s:?}"));

        let trimmed = s
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(s);
        let groups = trimmed.split('-').collect::<Vec<_>>();
        if !trimmed.is_ascii()
            || groups.len() != 5
            || [8, 4, 4, 4, 12]
                .iter()
                .zip(&groups)
                .any(|(len, group)| group.len() != *len)
            || !groups
                .iter()
                .all(|group| group.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| invalid())?;
        let tail = format!("{}{}", groups[3], groups[4]);
        let mut data4 = [0u8; 8];
        for (i, byte) in data4.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&tail[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }

        Ok(Self::from_fields(data1, data2, data3, data4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntsd_tests::*;

    const REPLICATION_GET_CHANGES: Guid = Guid::from_fields(
        0x1131f6aa,
        0x9c07,
        0x11d1,
        [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2],
    );

    test_binrw! {
        Guid => replication_get_changes: REPLICATION_GET_CHANGES => "aaf63111079cd111f79f00c04fc2dcd2"
    }

    #[test]
    fn test_guid_string_forms() {
        assert_eq!(
            REPLICATION_GET_CHANGES.to_string(),
            "1131f6aa-9c07-11d1-f79f-00c04fc2dcd2"
        );
        assert_eq!(
            Guid::from_str("{1131F6AA-9C07-11D1-F79F-00C04FC2DCD2}").unwrap(),
            REPLICATION_GET_CHANGES
        );
        assert!(Guid::from_str("1131f6aa-9c07-11d1-f79f").is_err());
        assert!(Guid::from_str("1131f6aa-9c07-11d1-f79f-00c04fc2dczz").is_err());
        for signed in [
            "+131f6aa-9c07-11d1-f79f-00c04fc2dcd2",
            "1131f6aa-+c07-11d1-f79f-00c04fc2dcd2",
            "1131f6aa-9c07-11d1-+79f-00c04fc2dcd2",
        ] {
            assert!(
                matches!(Guid::from_str(signed), Err(Error::InvalidFormat(_))),
                "{signed:?} should not parse"
            );
        }
    }

    #[test]
    fn test_guid_truncated() {
        let err = Guid::unmarshal(&[0xaa; 10]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                needed: 16,
                available: 10
            }
        ));
    }
}
