//! MS-DTYP 2.4.2: SID

use binrw::{Endian, prelude::*};
use std::fmt;
use std::io::{Read, Seek, Write};
use std::str::FromStr;

use crate::Error;
use crate::binrw_util::prelude::*;

/// Security identifier - [MS-DTYP 2.4.2.2](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/f992ad60-0fe4-4b87-9fed-beb478836861>)
///
/// The sub-authority count is not stored; it is the length of `sub_authority`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SID {
    pub revision: u8,
    /// 48-bit big-endian identifier authority.
    pub identifier_authority: [u8; 6],
    pub sub_authority: Vec<u32>,
}

impl SID {
    /// Revision, count and authority.
    pub const MIN_SIZE: usize = 8;
    pub const MAX_SUB_AUTHORITIES: usize = u8::MAX as usize;

    pub const S_NULL: &'static str = "S-1-0-0";
    pub const S_EVERYONE: &'static str = "S-1-1-0";
    pub const S_CREATOR_OWNER: &'static str = "S-1-3-0";
    pub const S_CREATOR_GROUP: &'static str = "S-1-3-1";
    pub const S_PRINCIPAL_SELF: &'static str = "S-1-5-10";
    pub const S_AUTHENTICATED_USERS: &'static str = "S-1-5-11";
    pub const S_LOCAL_SYSTEM: &'static str = "S-1-5-18";
    pub const S_ADMINISTRATORS: &'static str = "S-1-5-32-544";
    pub const S_USERS: &'static str = "S-1-5-32-545";

    pub fn new(revision: u8, authority: u64, sub_authority: Vec<u32>) -> Self {
        let bytes = authority.to_be_bytes();
        let mut identifier_authority = [0u8; 6];
        identifier_authority.copy_from_slice(&bytes[2..]);
        Self {
            revision,
            identifier_authority,
            sub_authority,
        }
    }

    /// The identifier authority as an integer.
    pub fn authority(&self) -> u64 {
        self.identifier_authority
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    }

    /// The last sub-authority, which is the RID for domain accounts.
    pub fn rid(&self) -> Option<u32> {
        self.sub_authority.last().copied()
    }

    /// The serialized length: `8 + 4 * sub-authority count`.
    pub fn size(&self) -> usize {
        Self::MIN_SIZE + 4 * self.sub_authority.len()
    }

    /// The name of this SID in the well-known SID table, if any.
    pub fn well_known_name(&self) -> Option<&'static str> {
        super::well_known::lookup(&self.to_string())
    }
}

impl BinRead for SID {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, Self::MIN_SIZE as u64)?;
        let revision = u8::read_options(reader, Endian::Little, ())?;
        let count = u8::read_options(reader, Endian::Little, ())?;
        let identifier_authority = <[u8; 6]>::read_options(reader, Endian::Little, ())?;

        // The count was already consumed; check for the rest against the full size.
        let available = remaining(reader)? + Self::MIN_SIZE as u64;
        let needed = (Self::MIN_SIZE + 4 * count as usize) as u64;
        if available < needed {
            return Err(custom_error(
                reader,
                Error::TruncatedInput {
                    needed: needed as usize,
                    available: available as usize,
                },
            ));
        }

        let mut sub_authority = Vec::with_capacity(count as usize);
        for _ in 0..count {
            sub_authority.push(u32::read_options(reader, Endian::Little, ())?);
        }

        Ok(Self {
            revision,
            identifier_authority,
            sub_authority,
        })
    }
}

impl BinWrite for SID {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        let count = u8::try_from(self.sub_authority.len()).map_err(|_| {
            custom_error(
                writer,
                Error::InvalidValue {
                    field: "sub_authority",
                    reason: format!(
                        "{} sub-authorities, at most {} are allowed",
                        self.sub_authority.len(),
                        Self::MAX_SUB_AUTHORITIES
                    ),
                },
            )
        })?;
        self.revision.write_options(writer, Endian::Little, ())?;
        count.write_options(writer, Endian::Little, ())?;
        self.identifier_authority
            .write_options(writer, Endian::Little, ())?;
        self.sub_authority.write_options(writer, Endian::Little, ())
    }
}

impl fmt::Display for SID {
    /// Formats as `S-<revision>-<authority>-<sub1>-...`.
    ///
    /// Authorities that do not fit in 32 bits are printed as 12 hex digits, as Windows does.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authority = self.authority();
        write!(f, "S-{}-", self.revision)?;
        if authority > u64::from(u32::MAX) {
            write!(f, "0x{authority:012X}")?;
        } else {
            write!(f, "{authority}")?;
        }
        for sub in &self.sub_authority {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SID({self})")
    }
}

impl FromStr for SID {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidFormat(format!("invalid SID {s:?}: {reason}"));

        let mut parts = s.split('-');
        if !parts
            .next()
            .map(|head| head.eq_ignore_ascii_case("s"))
            .unwrap_or(false)
        {
            return Err(invalid("missing S- prefix"));
        }

        let revision = parts
            .next()
            .ok_or_else(|| invalid("missing revision"))?;
        let revision = digits(revision, 10)
            .and_then(|d| d.parse::<u8>().ok())
            .ok_or_else(|| invalid("revision is not a number"))?;

        let authority = parts.next().ok_or_else(|| invalid("missing authority"))?;
        let authority = match authority
            .strip_prefix("0x")
            .or_else(|| authority.strip_prefix("0X"))
        {
            Some(hex) => digits(hex, 16).and_then(|d| u64::from_str_radix(d, 16).ok()),
            None => digits(authority, 10).and_then(|d| d.parse::<u64>().ok()),
        }
        .ok_or_else(|| invalid("authority is not a number"))?;
        if authority >= 1 << 48 {
            return Err(invalid("authority does not fit in 48 bits"));
        }

        let sub_authority = parts
            .map(|part| digits(part, 10).and_then(|d| d.parse::<u32>().ok()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("sub-authority is not a number"))?;
        if sub_authority.len() > Self::MAX_SUB_AUTHORITIES {
            return Err(invalid("too many sub-authorities"));
        }

        Ok(SID::new(revision, authority, sub_authority))
    }
}

/// `part`, if it is a non-empty run of `radix` digits. Signs are rejected.
fn digits(part: &str, radix: u32) -> Option<&str> {
    (!part.is_empty() && part.chars().all(|c| c.is_digit(radix))).then_some(part)
}
