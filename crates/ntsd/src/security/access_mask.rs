//! MS-DTYP 2.4.3: ACCESS_MASK

use binrw::{Endian, prelude::*};
use std::fmt;
use std::io::{Read, Seek};

use crate::binrw_util::prelude::*;

named_values! {
    /// Named access rights.
    ///
    /// Directory service (`DS_*`) rights share their bits with the object-specific rights of other
    /// object types, so the names describe Active Directory semantics.
    pub enum AccessRight: u32 {
        DsCreateChild = 0x00000001: "DS_CREATE_CHILD",
        DsDeleteChild = 0x00000002: "DS_DELETE_CHILD",
        DsListContents = 0x00000004: "DS_LIST_CONTENTS",
        DsWritePropertyExtended = 0x00000008: "DS_WRITE_PROPERTY_EXTENDED",
        DsReadProperty = 0x00000010: "DS_READ_PROPERTY",
        DsWriteProperty = 0x00000020: "DS_WRITE_PROPERTY",
        DsDeleteTree = 0x00000040: "DS_DELETE_TREE",
        DsListObject = 0x00000080: "DS_LIST_OBJECT",
        DsControlAccess = 0x00000100: "DS_CONTROL_ACCESS",
        Delete = 0x00010000: "DELETE",
        ReadControl = 0x00020000: "READ_CONTROL",
        WriteDac = 0x00040000: "WRITE_DAC",
        WriteOwner = 0x00080000: "WRITE_OWNER",
        Synchronize = 0x00100000: "SYNCHRONIZE",
        AccessSystemSecurity = 0x01000000: "ACCESS_SYSTEM_SECURITY",
        MaximumAllowed = 0x02000000: "MAXIMUM_ALLOWED",
        GenericAll = 0x10000000: "GENERIC_ALL",
        GenericExecute = 0x20000000: "GENERIC_EXECUTE",
        GenericWrite = 0x40000000: "GENERIC_WRITE",
        GenericRead = 0x80000000: "GENERIC_READ",
    }
}

/// A 32-bit access mask.
///
/// The raw value is authoritative: bits that match no [`AccessRight`] are kept as-is
/// and survive a round-trip, but are not reported by [`AccessMask::rights`].
#[derive(BinWrite, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[bw(little)]
pub struct AccessMask(u32);

impl AccessMask {
    pub const SIZE: usize = 4;

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub fn from_rights(rights: &[AccessRight]) -> Self {
        let mut mask = Self::new();
        mask.set_rights(rights);
        mask
    }

    /// Whether all the bits of `right` are set.
    pub fn has_right(&self, right: AccessRight) -> bool {
        self.0 & right.value() == right.value()
    }

    /// Sets `right`. A no-op if it is already present.
    pub fn add_right(&mut self, right: AccessRight) {
        self.0 |= right.value();
    }

    /// Clears `right`. A no-op if it is absent.
    pub fn remove_right(&mut self, right: AccessRight) {
        self.0 &= !right.value();
    }

    /// Replaces the whole mask with exactly `rights`.
    pub fn set_rights(&mut self, rights: &[AccessRight]) {
        self.0 = rights.iter().fold(0, |acc, r| acc | r.value());
    }

    pub fn clear_rights(&mut self) {
        self.0 = 0;
    }

    pub fn with_right(mut self, right: AccessRight) -> Self {
        self.add_right(right);
        self
    }

    /// The named rights present in the mask, sorted by name.
    pub fn rights(&self) -> Vec<AccessRight> {
        let mut rights = AccessRight::ALL
            .iter()
            .copied()
            .filter(|r| self.has_right(*r))
            .collect::<Vec<_>>();
        rights.sort_by_key(|r| r.name());
        rights
    }

    /// The names of [`AccessMask::rights`].
    pub fn names(&self) -> Vec<&'static str> {
        self.rights().into_iter().map(AccessRight::name).collect()
    }

    /// Bits that do not belong to any named right.
    pub fn unknown_bits(&self) -> u32 {
        let known = AccessRight::ALL.iter().fold(0, |acc, r| acc | r.value());
        self.0 & !known
    }
}

impl From<u32> for AccessMask {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<AccessMask> for u32 {
    fn from(mask: AccessMask) -> Self {
        mask.0
    }
}

impl BinRead for AccessMask {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, Self::SIZE as u64)?;
        let mask = Self(u32::read_options(reader, Endian::Little, ())?);
        if mask.unknown_bits() != 0 {
            log::debug!("Access mask {:#010x} has unnamed bits {:#010x}", mask.0, mask.unknown_bits());
        }
        Ok(mask)
    }
}

impl fmt::Display for AccessMask {
    /// Formats as `NAME|NAME|...`, or the hex value when no right is named.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "{:#010x}", self.0)
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

impl fmt::Debug for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessMask({:#010x}: {})", self.0, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntsd_tests::*;

    test_binrw! {
        AccessMask => full_control: AccessMask::from_raw(0x000f01ff) => "ff010f00"
    }

    #[test]
    fn test_mask_from_rights() {
        let rights = [
            AccessRight::Delete,
            AccessRight::DsControlAccess,
            AccessRight::ReadControl,
            AccessRight::WriteDac,
            AccessRight::WriteOwner,
        ];
        let mask = AccessMask::from_rights(&rights);
        assert_eq!(mask.raw(), 0x10000 | 0x100 | 0x20000 | 0x40000 | 0x80000);

        let (decoded, _) = AccessMask::unmarshal(&mask.marshal().unwrap()).unwrap();
        assert_eq!(
            decoded.names(),
            vec![
                "DELETE",
                "DS_CONTROL_ACCESS",
                "READ_CONTROL",
                "WRITE_DAC",
                "WRITE_OWNER"
            ]
        );
    }

    #[test]
    fn test_add_remove_right() {
        let mut mask = AccessMask::from_raw(0x0000_0010);
        let original = mask;

        mask.add_right(AccessRight::WriteDac);
        assert!(mask.has_right(AccessRight::WriteDac));
        mask.add_right(AccessRight::WriteDac);
        assert_eq!(mask.raw(), 0x0004_0010);

        mask.remove_right(AccessRight::WriteDac);
        assert!(!mask.has_right(AccessRight::WriteDac));
        assert_eq!(mask, original);

        mask.remove_right(AccessRight::GenericAll);
        assert_eq!(mask, original);

        mask.clear_rights();
        assert_eq!(mask.raw(), 0);
    }

    #[test]
    fn test_unknown_bits_preserved() {
        let mask = AccessMask::from_raw(0x0000_0200 | 0x0001_0000);
        assert_eq!(mask.names(), vec!["DELETE"]);
        assert_eq!(mask.unknown_bits(), 0x200);
        assert_eq!(mask.marshal().unwrap(), vec![0x00, 0x02, 0x01, 0x00]);
    }

    #[test]
    fn test_rights_sorted_by_name() {
        let mask = AccessMask::from_raw(0x000f01ff);
        let names = mask.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 13);
    }
}
