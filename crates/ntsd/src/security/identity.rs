//! A SID, annotated with its well-known name.

use binrw::{Endian, prelude::*};
use std::fmt;
use std::io::{Read, Seek, Write};
use std::str::FromStr;

use crate::Error;

use super::SID;

/// A [`SID`] together with a display name.
///
/// Only the SID is part of the wire format. The name is filled in from the
/// well-known SID table when the identity is created or read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: Option<String>,
    pub sid: SID,
}

impl Identity {
    pub fn new(sid: SID) -> Self {
        let name = sid.well_known_name().map(str::to_string);
        Self { name, sid }
    }

    /// The name if known, otherwise the SID string.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.sid.to_string(),
        }
    }
}

impl From<SID> for Identity {
    fn from(sid: SID) -> Self {
        Self::new(sid)
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SID::from_str(s).map(Self::new)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.sid, name),
            None => write!(f, "{}", self.sid),
        }
    }
}

impl BinRead for Identity {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        SID::read_options(reader, endian, ()).map(Self::new)
    }
}

impl BinWrite for Identity {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        self.sid.write_options(writer, endian, ())
    }
}
