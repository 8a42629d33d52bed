//! MS-DTYP 2.4.5: ACL

use binrw::{Endian, prelude::*};
use std::io::{Read, Seek, Write};

use crate::Error;
use crate::binrw_util::prelude::*;

use super::ACE;

/// ACL revision. Any value is accepted on read and kept as-is.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum AclRevision {
    /// `ACL_REVISION`: Windows NT 4.0
    Nt4,
    /// `ACL_REVISION_DS`: Active directory, required for object ACEs
    DS,
    Other(u8),
}

impl From<u8> for AclRevision {
    fn from(value: u8) -> Self {
        match value {
            2 => AclRevision::Nt4,
            4 => AclRevision::DS,
            other => AclRevision::Other(other),
        }
    }
}

impl From<AclRevision> for u8 {
    fn from(revision: AclRevision) -> Self {
        match revision {
            AclRevision::Nt4 => 2,
            AclRevision::DS => 4,
            AclRevision::Other(other) => other,
        }
    }
}

impl std::fmt::Display for AclRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AclRevision::Nt4 => f.write_str("ACL_REVISION"),
            AclRevision::DS => f.write_str("ACL_REVISION_DS"),
            AclRevision::Other(value) => write!(f, "{value:#04x}"),
        }
    }
}

/// The 8 bytes that start every ACL.
#[binrw::binrw]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[brw(little)]
pub struct AclHeader {
    #[br(map = |x: u8| AclRevision::from(x))]
    #[bw(map = |r: &AclRevision| u8::from(*r))]
    pub acl_revision: AclRevision,
    pub sbz1: u8,
    /// Total size of the ACL, header included.
    pub acl_size: u16,
    pub ace_count: u16,
    pub sbz2: u16,
}

impl AclHeader {
    pub const SIZE: usize = 8;
}

/// An access control list. DACLs and SACLs share this layout.
///
/// The size and count of the header are derived from the entries; see
/// [`ACL::header`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ACL {
    pub acl_revision: AclRevision,
    pub sbz1: u8,
    pub sbz2: u16,
    entries: Vec<ACE>,
}

impl ACL {
    pub fn new(acl_revision: AclRevision) -> Self {
        Self {
            acl_revision,
            sbz1: 0,
            sbz2: 0,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ACE] {
        &self.entries
    }

    pub fn ace_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The size of the ACL as it will be written.
    pub fn acl_size(&self) -> usize {
        AclHeader::SIZE
            + self
                .entries
                .iter()
                .map(ACE::marshaled_size)
                .sum::<usize>()
    }

    /// The header as it will be written.
    pub fn header(&self) -> crate::Result<AclHeader> {
        let acl_size = u16::try_from(self.acl_size()).map_err(|_| Error::InvalidValue {
            field: "acl_size",
            reason: format!("ACL size {} does not fit in 16 bits", self.acl_size()),
        })?;
        let ace_count = u16::try_from(self.ace_count()).map_err(|_| Error::InvalidValue {
            field: "ace_count",
            reason: format!("{} entries do not fit in 16 bits", self.ace_count()),
        })?;
        Ok(AclHeader {
            acl_revision: self.acl_revision,
            sbz1: self.sbz1,
            acl_size,
            ace_count,
            sbz2: self.sbz2,
        })
    }

    /// Appends `ace`, giving it the next 1-based index.
    ///
    /// Indexes stop at `u16::MAX`; such an ACL cannot be marshaled anyway.
    pub fn add_entry(&mut self, mut ace: ACE) {
        ace.index = display_index(self.entries.len());
        self.entries.push(ace);
    }

    /// Removes the first entry equal to `ace`.
    ///
    /// Returns whether an entry was removed. The entries after it are re-indexed.
    pub fn remove_entry(&mut self, ace: &ACE) -> bool {
        let Some(position) = self.entries.iter().position(|e| e == ace) else {
            return false;
        };
        self.entries.remove(position);
        self.reindex();
        true
    }

    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn reindex(&mut self) {
        for (i, ace) in self.entries.iter_mut().enumerate() {
            ace.index = display_index(i);
        }
    }
}

/// The 1-based index of the entry at `position`, saturated to `u16::MAX`.
fn display_index(position: usize) -> u16 {
    u16::try_from(position + 1).unwrap_or(u16::MAX)
}

impl<'a> IntoIterator for &'a ACL {
    type Item = &'a ACE;
    type IntoIter = std::slice::Iter<'a, ACE>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl BinRead for ACL {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, AclHeader::SIZE as u64)?;
        let header = AclHeader::read_options(reader, endian, ())?;
        log::trace!(
            "ACL {} with {} entries, {} bytes",
            header.acl_revision,
            header.ace_count,
            header.acl_size
        );

        let mut entries = Vec::with_capacity(header.ace_count as usize);
        for i in 0..header.ace_count {
            let mut ace: ACE = read_field(reader, endian, &format!("ace[{i}]"))?;
            ace.index = i + 1;
            entries.push(ace);
        }

        let acl = Self {
            acl_revision: header.acl_revision,
            sbz1: header.sbz1,
            sbz2: header.sbz2,
            entries,
        };
        if acl.acl_size() != header.acl_size as usize {
            log::debug!(
                "ACL declares {} bytes but its entries take {}",
                header.acl_size,
                acl.acl_size()
            );
        }
        Ok(acl)
    }
}

impl BinWrite for ACL {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        let header = self.header().map_err(|err| custom_error(writer, err))?;
        let begin = writer.stream_position()?;

        u8::from(header.acl_revision).write_options(writer, endian, ())?;
        header.sbz1.write_options(writer, endian, ())?;
        let acl_size = PosMarker::<u16>::reserve(writer, endian)?;
        header.ace_count.write_options(writer, endian, ())?;
        header.sbz2.write_options(writer, endian, ())?;

        for (i, ace) in self.entries.iter().enumerate() {
            write_field(ace, writer, endian, &format!("ace[{i}]"))?;
        }
        acl_size.write_size_from(begin, writer, endian, "acl_size")
    }
}
