//! MS-DTYP 2.4.6: Security Descriptor

use binrw::{Endian, prelude::*};
use modular_bitfield::prelude::*;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::Error;
use crate::binrw_util::prelude::*;

use super::{ACL, Identity};

named_values! {
    /// Security descriptor control flags - [MS-DTYP 2.4.6](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/7d4dac05-9cef-4563-a058-f108abecce1d>)
    pub enum ControlFlag: u16 {
        OwnerDefaulted = 0x0001: "SE_OWNER_DEFAULTED",
        GroupDefaulted = 0x0002: "SE_GROUP_DEFAULTED",
        DaclPresent = 0x0004: "SE_DACL_PRESENT",
        DaclDefaulted = 0x0008: "SE_DACL_DEFAULTED",
        SaclPresent = 0x0010: "SE_SACL_PRESENT",
        SaclDefaulted = 0x0020: "SE_SACL_DEFAULTED",
        DaclTrusted = 0x0040: "SE_DACL_TRUSTED",
        ServerSecurity = 0x0080: "SE_SERVER_SECURITY",
        DaclAutoInheritReq = 0x0100: "SE_DACL_AUTO_INHERIT_REQ",
        SaclAutoInheritReq = 0x0200: "SE_SACL_AUTO_INHERIT_REQ",
        DaclAutoInherited = 0x0400: "SE_DACL_AUTO_INHERITED",
        SaclAutoInherited = 0x0800: "SE_SACL_AUTO_INHERITED",
        DaclProtected = 0x1000: "SE_DACL_PROTECTED",
        SaclProtected = 0x2000: "SE_SACL_PROTECTED",
        RmControlValid = 0x4000: "SE_RM_CONTROL_VALID",
        SelfRelative = 0x8000: "SE_SELF_RELATIVE",
    }
}

#[bitfield]
#[derive(BinWrite, BinRead, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[bw(map = |&x| Self::into_bytes(x))]
#[br(map = Self::from_bytes)]
pub struct SecurityDescriptorControl {
    pub owner_defaulted: bool,
    pub group_defaulted: bool,
    pub dacl_present: bool,
    pub dacl_defaulted: bool,

    pub sacl_present: bool,
    pub sacl_defaulted: bool,
    pub dacl_trusted: bool,
    pub server_security: bool,

    pub dacl_auto_inherit_req: bool,
    pub sacl_auto_inherit_req: bool,
    pub dacl_auto_inherited: bool,
    pub sacl_auto_inherited: bool,

    pub dacl_protected: bool,
    pub sacl_protected: bool,
    pub rm_control_valid: bool,
    pub self_relative: bool,
}

bitfield_raw!(SecurityDescriptorControl: u16);

impl SecurityDescriptorControl {
    pub fn has(&self, flag: ControlFlag) -> bool {
        self.raw() & flag.value() != 0
    }

    /// Sets `flag`. Returns false if it was already set.
    pub fn add(&mut self, flag: ControlFlag) -> bool {
        if self.has(flag) {
            return false;
        }
        *self = Self::from_raw(self.raw() | flag.value());
        true
    }

    /// Clears `flag`. Returns false if it was not set.
    pub fn remove(&mut self, flag: ControlFlag) -> bool {
        if !self.has(flag) {
            return false;
        }
        *self = Self::from_raw(self.raw() & !flag.value());
        true
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn flags(&self) -> Vec<ControlFlag> {
        ControlFlag::ALL
            .iter()
            .copied()
            .filter(|f| self.has(*f))
            .collect()
    }

    /// Names of the flags that are set, in bit order.
    pub fn names(&self) -> Vec<&'static str> {
        self.flags().into_iter().map(ControlFlag::name).collect()
    }
}

/// The fixed 20 bytes at the start of a self-relative security descriptor.
///
/// Offsets are relative to the start of the descriptor; `0` means absent.
#[binrw::binrw]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[brw(little)]
pub struct SecurityDescriptorHeader {
    pub revision: u8,
    pub sbz1: u8,
    pub control: SecurityDescriptorControl,
    pub offset_owner: u32,
    pub offset_group: u32,
    pub offset_sacl: u32,
    pub offset_dacl: u32,
}

impl SecurityDescriptorHeader {
    pub const SIZE: usize = 20;
}

/// Security Descriptor - [MS-DTYP 2.4.6](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/7d4dac05-9cef-4563-a058-f108abecce1d>)
///
/// Always written in self-relative form: the header, then the SACL, DACL,
/// owner and group that are present, in that order. Offsets are computed
/// while writing.
#[derive(Debug, Clone)]
pub struct SecurityDescriptor {
    pub revision: u8,
    pub sbz1: u8,
    pub control: SecurityDescriptorControl,
    owner: Option<Identity>,
    group: Option<Identity>,
    sacl: Option<ACL>,
    dacl: Option<ACL>,
}

impl SecurityDescriptor {
    pub const REVISION: u8 = 1;

    /// An empty self-relative descriptor.
    pub fn new() -> Self {
        Self {
            revision: Self::REVISION,
            sbz1: 0,
            control: SecurityDescriptorControl::new().with_self_relative(true),
            owner: None,
            group: None,
            sacl: None,
            dacl: None,
        }
    }

    pub fn owner(&self) -> Option<&Identity> {
        self.owner.as_ref()
    }

    pub fn set_owner(&mut self, owner: Option<Identity>) {
        self.owner = owner;
    }

    pub fn group(&self) -> Option<&Identity> {
        self.group.as_ref()
    }

    pub fn set_group(&mut self, group: Option<Identity>) {
        self.group = group;
    }

    pub fn dacl(&self) -> Option<&ACL> {
        self.dacl.as_ref()
    }

    pub fn dacl_mut(&mut self) -> Option<&mut ACL> {
        self.dacl.as_mut()
    }

    /// Replaces the DACL, updating `SE_DACL_PRESENT`.
    pub fn set_dacl(&mut self, dacl: Option<ACL>) {
        self.control.set_dacl_present(dacl.is_some());
        self.dacl = dacl;
    }

    pub fn sacl(&self) -> Option<&ACL> {
        self.sacl.as_ref()
    }

    pub fn sacl_mut(&mut self) -> Option<&mut ACL> {
        self.sacl.as_mut()
    }

    /// Replaces the SACL, updating `SE_SACL_PRESENT`.
    pub fn set_sacl(&mut self, sacl: Option<ACL>) {
        self.control.set_sacl_present(sacl.is_some());
        self.sacl = sacl;
    }

    pub fn has_control(&self, flag: ControlFlag) -> bool {
        self.control.has(flag)
    }

    /// See [`SecurityDescriptorControl::add`].
    pub fn add_control(&mut self, flag: ControlFlag) -> bool {
        self.control.add(flag)
    }

    /// See [`SecurityDescriptorControl::remove`].
    pub fn remove_control(&mut self, flag: ControlFlag) -> bool {
        self.control.remove(flag)
    }

    pub fn clear_controls(&mut self) {
        self.control.clear();
    }

    /// Offsets of the owner, group, SACL and DACL as they will be written, `0` for absent ones.
    pub fn offsets(&self) -> [usize; 4] {
        let mut offset = SecurityDescriptorHeader::SIZE;
        let mut next = |size: Option<usize>| {
            size.map_or(0, |size| {
                let current = offset;
                offset += size;
                current
            })
        };
        let sacl = next(self.sacl.as_ref().map(ACL::acl_size));
        let dacl = next(self.dacl.as_ref().map(ACL::acl_size));
        let owner = next(self.owner.as_ref().map(|i| i.sid.size()));
        let group = next(self.group.as_ref().map(|i| i.sid.size()));
        [owner, group, sacl, dacl]
    }

    /// The header as it will be written, offsets included.
    pub fn header(&self) -> crate::Result<SecurityDescriptorHeader> {
        let [owner, group, sacl, dacl] = self.offsets();
        let offset = |value: usize, field: &'static str| {
            u32::try_from(value).map_err(|_| Error::InvalidValue {
                field,
                reason: format!("offset {value} does not fit in 32 bits"),
            })
        };
        Ok(SecurityDescriptorHeader {
            revision: self.revision,
            sbz1: self.sbz1,
            control: self.control,
            offset_owner: offset(owner, "offset_owner")?,
            offset_group: offset(group, "offset_group")?,
            offset_sacl: offset(sacl, "offset_sacl")?,
            offset_dacl: offset(dacl, "offset_dacl")?,
        })
    }
}

impl Default for SecurityDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares revision, control, owner and group SIDs, and the entries of both ACLs.
impl PartialEq for SecurityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        fn entries(acl: &Option<ACL>) -> Option<&[super::ACE]> {
            acl.as_ref().map(ACL::entries)
        }

        self.revision == other.revision
            && self.control == other.control
            && self.owner.as_ref().map(|i| &i.sid) == other.owner.as_ref().map(|i| &i.sid)
            && self.group.as_ref().map(|i| &i.sid) == other.group.as_ref().map(|i| &i.sid)
            && entries(&self.sacl) == entries(&other.sacl)
            && entries(&self.dacl) == entries(&other.dacl)
    }
}

impl Eq for SecurityDescriptor {}

/// Reads the structure at `offset` from `begin`, if the offset is set.
fn read_at<T, R>(
    reader: &mut R,
    endian: Endian,
    begin: u64,
    offset: u32,
    len: usize,
    field: &'static str,
) -> BinResult<Option<T>>
where
    T: for<'a> BinRead<Args<'a> = ()>,
    R: Read + Seek,
{
    if offset == 0 {
        return Ok(None);
    }
    if offset as usize >= len {
        return Err(custom_error(
            reader,
            Error::OffsetOutOfBounds { field, offset, len },
        ));
    }
    reader.seek(SeekFrom::Start(begin + offset as u64))?;
    read_field(reader, endian, field).map(Some)
}

impl BinRead for SecurityDescriptor {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        let begin = reader.stream_position()?;
        let len = remaining(reader)? as usize;
        ensure_remaining(reader, SecurityDescriptorHeader::SIZE as u64)?;
        let header = SecurityDescriptorHeader::read_options(reader, endian, ())?;
        log::trace!(
            "Security descriptor control {:#06x}: owner@{:#x} group@{:#x} sacl@{:#x} dacl@{:#x}",
            header.control.raw(),
            header.offset_owner,
            header.offset_group,
            header.offset_sacl,
            header.offset_dacl
        );

        // Each part is read on its own; `end` tracks the furthest byte used.
        let mut end = begin + SecurityDescriptorHeader::SIZE as u64;
        let owner: Option<Identity> = read_at(reader, endian, begin, header.offset_owner, len, "owner")?;
        end = end.max(reader.stream_position()?);
        let group: Option<Identity> = read_at(reader, endian, begin, header.offset_group, len, "group")?;
        end = end.max(reader.stream_position()?);
        let sacl: Option<ACL> = read_at(reader, endian, begin, header.offset_sacl, len, "sacl")?;
        end = end.max(reader.stream_position()?);
        let dacl: Option<ACL> = read_at(reader, endian, begin, header.offset_dacl, len, "dacl")?;
        end = end.max(reader.stream_position()?);
        reader.seek(SeekFrom::Start(end))?;

        if dacl.is_some() != header.control.dacl_present()
            || sacl.is_some() != header.control.sacl_present()
        {
            log::debug!(
                "Security descriptor control {:#06x} does not match the ACLs present",
                header.control.raw()
            );
        }

        Ok(Self {
            revision: header.revision,
            sbz1: header.sbz1,
            control: header.control,
            owner,
            group,
            sacl,
            dacl,
        })
    }
}

/// Writes `value`, if any, and points `offset` at it.
fn write_at<T, W>(
    value: Option<&T>,
    offset: &PosMarker<u32>,
    begin: u64,
    writer: &mut W,
    endian: Endian,
    field: &'static str,
) -> BinResult<()>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
    W: Write + Seek,
{
    let Some(value) = value else {
        return Ok(());
    };
    let pos = writer.stream_position()?;
    offset.write_back(pos - begin, writer, endian, field)?;
    write_field(value, writer, endian, field)
}

impl BinWrite for SecurityDescriptor {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        let begin = writer.stream_position()?;
        self.revision.write_options(writer, endian, ())?;
        self.sbz1.write_options(writer, endian, ())?;
        self.control.write_options(writer, endian, ())?;
        let offset_owner = PosMarker::<u32>::reserve(writer, endian)?;
        let offset_group = PosMarker::<u32>::reserve(writer, endian)?;
        let offset_sacl = PosMarker::<u32>::reserve(writer, endian)?;
        let offset_dacl = PosMarker::<u32>::reserve(writer, endian)?;

        write_at(self.sacl.as_ref(), &offset_sacl, begin, writer, endian, "sacl")?;
        write_at(self.dacl.as_ref(), &offset_dacl, begin, writer, endian, "dacl")?;
        write_at(self.owner.as_ref(), &offset_owner, begin, writer, endian, "owner")?;
        write_at(self.group.as_ref(), &offset_group, begin, writer, endian, "group")?;
        log::trace!(
            "Wrote security descriptor of {} bytes",
            writer.stream_position()? - begin
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::{
        AccessAce, AccessMask, AccessRight, AceFlags, AceType, AceValue, AclRevision, SID, ACE,
    };
    use ntsd_tests::*;
    use std::str::FromStr;

    const DOMAIN_ADMINS: &str = "01050000000000051500000028bb82279261b9fe2474aa5d00020000";

    /// Audit SACL and a Domain Admins DACL from an Active Directory object.
    const DOMAIN_OBJECT: &str = const_format::concatcp!(
        "0100149ccc000000e800000014000000a0000000",
        "04008c00030000000240140020000c00010100000000000100000000",
        "075a38002000000003000000be3b0ef3f09fd111b6030000f80367c1a57a96bfe60dd011a28500aa003049e2010100000000000100000000",
        "075a38002000000003000000bf3b0ef3f09fd111b6030000f80367c1a57a96bfe60dd011a28500aa003049e2010100000000000100000000",
        "02002c000100000000002400ff010f00",
        DOMAIN_ADMINS,
        DOMAIN_ADMINS,
        DOMAIN_ADMINS
    );

    /// `O:BAG:BAD:P(A;CIOI;GRGX;;;BU)(A;CIOI;GA;;;BA)(A;CIOI;GA;;;SY)(A;CIOI;GA;;;CO)S:P(AU;FA;GR;;;WD)`
    const PROTECTED_FOLDER: &str = "010014b090000000a00000001400000030000000\
        02001c00010000000280140000000080010100000000000100000000\
        020060000400000000031800000000a0010200000000000520000000210200000003180000000010\
        0102000000000005200000002002000000031400000000100101000000000005120000000003140000000010\
        010100000000000300000000\
        01020000000000052000000020020000\
        01020000000000052000000020020000";

    fn generic_ace(flags: u8, mask: u32, sid: &str) -> ACE {
        ACE::new(
            AceFlags::from_raw(flags),
            AceValue::AccessAllowed(AccessAce {
                access_mask: AccessMask::from_raw(mask),
                identity: Identity::from_str(sid).unwrap(),
            }),
        )
    }

    test_binrw! {
        struct SecurityDescriptorHeader => empty_header {
            revision: 1,
            sbz1: 0,
            control: SecurityDescriptorControl::from_raw(0x8000),
            offset_owner: 0,
            offset_group: 0,
            offset_sacl: 0,
            offset_dacl: 0,
        } => "0100008000000000000000000000000000000000"
    }

    #[test]
    fn test_domain_object_round_trip() {
        let data = hex_to_u8_array! { DOMAIN_OBJECT };
        let (sd, consumed) = SecurityDescriptor::unmarshal(&data).unwrap();
        assert_eq!(consumed, 260);
        assert_eq!(sd.control.raw(), 0x9c14);
        assert!(sd.control.dacl_protected());
        assert!(sd.control.sacl_auto_inherited());

        let sacl = sd.sacl().unwrap();
        assert_eq!(sacl.acl_revision, AclRevision::DS);
        assert_eq!(sacl.ace_count(), 3);
        assert_eq!(sacl.entries()[1].ace_type(), AceType::SystemAuditObject);

        let dacl = sd.dacl().unwrap();
        assert_eq!(dacl.ace_count(), 1);
        assert_eq!(
            dacl.entries()[0].access_mask().unwrap().raw(),
            0x000f01ff
        );
        assert_eq!(sd.owner().unwrap().name.as_deref(), Some("Domain Admins"));
        assert_eq!(sd.group(), sd.owner());

        let header = sd.header().unwrap();
        assert_eq!(header.offset_sacl, 0x14);
        assert_eq!(header.offset_dacl, 0xa0);
        assert_eq!(header.offset_owner, 0xcc);
        assert_eq!(header.offset_group, 0xe8);

        let marshaled = sd.marshal().unwrap();
        assert_eq!(marshaled, data);

        let (again, _) = SecurityDescriptor::unmarshal(&marshaled).unwrap();
        assert_eq!(again, sd);
        assert_eq!(again.marshal().unwrap(), marshaled);
    }

    #[test]
    fn test_truncated_group_sid() {
        // The group SID claims 5 sub-authorities but the buffer ends after 4.
        let mut data = hex_to_u8_array! { DOMAIN_OBJECT };
        data.truncate(256);
        data[252..].copy_from_slice(&[0x20, 0x00, 0x00, 0x00]);
        let err = SecurityDescriptor::unmarshal(&data).unwrap_err();
        assert_eq!(err.field_path(), vec!["group"]);
        assert!(matches!(
            err.root_cause(),
            Error::TruncatedInput {
                needed: 28,
                available: 24
            }
        ));
        assert!(err.to_string().starts_with("group: input truncated"));
    }

    #[test]
    fn test_protected_folder_round_trip() {
        let data = hex_to_u8_array! { PROTECTED_FOLDER };
        let (sd, consumed) = SecurityDescriptor::unmarshal(&data).unwrap();
        assert_eq!(consumed, 176);
        assert_eq!(
            sd.control.names(),
            vec![
                "SE_DACL_PRESENT",
                "SE_SACL_PRESENT",
                "SE_DACL_PROTECTED",
                "SE_SACL_PROTECTED",
                "SE_SELF_RELATIVE"
            ]
        );
        assert_eq!(sd.owner().unwrap().sid.to_string(), SID::S_ADMINISTRATORS);
        assert_eq!(sd.group().unwrap().sid.to_string(), SID::S_ADMINISTRATORS);

        let dacl = sd.dacl().unwrap();
        assert_eq!(dacl.ace_count(), 4);
        let users = &dacl.entries()[0];
        assert_eq!(users.ace_flags.names(), vec!["OBJECT_INHERIT", "CONTAINER_INHERIT"]);
        assert_eq!(
            users.access_mask().unwrap().rights(),
            vec![AccessRight::GenericExecute, AccessRight::GenericRead]
        );
        assert_eq!(users.identity().unwrap().name.as_deref(), Some("Users"));

        let audit = &sd.sacl().unwrap().entries()[0];
        assert!(audit.ace_flags.failed_access());
        assert_eq!(audit.identity().unwrap().name.as_deref(), Some("Everyone"));

        assert_eq!(sd.marshal().unwrap(), data);
    }

    #[test]
    fn test_build_protected_folder() {
        let mut dacl = ACL::new(AclRevision::Nt4);
        dacl.add_entry(generic_ace(0x03, 0xa0000000, SID::S_USERS));
        dacl.add_entry(generic_ace(0x03, 0x10000000, SID::S_ADMINISTRATORS));
        dacl.add_entry(generic_ace(0x03, 0x10000000, SID::S_LOCAL_SYSTEM));
        dacl.add_entry(generic_ace(0x03, 0x10000000, SID::S_CREATOR_OWNER));

        let mut sacl = ACL::new(AclRevision::Nt4);
        sacl.add_entry(ACE::new(
            AceFlags::new().with_failed_access(true),
            AceValue::SystemAudit(AccessAce {
                access_mask: AccessMask::new().with_right(AccessRight::GenericRead),
                identity: Identity::from_str(SID::S_EVERYONE).unwrap(),
            }),
        ));

        let mut sd = SecurityDescriptor::new();
        sd.set_owner(Some(Identity::from_str(SID::S_ADMINISTRATORS).unwrap()));
        sd.set_group(Some(Identity::from_str(SID::S_ADMINISTRATORS).unwrap()));
        sd.set_dacl(Some(dacl));
        sd.set_sacl(Some(sacl));
        assert!(sd.add_control(ControlFlag::DaclProtected));
        assert!(sd.add_control(ControlFlag::SaclProtected));

        assert_eq!(sd.marshal().unwrap(), hex_to_u8_array! { PROTECTED_FOLDER });
    }

    #[test]
    fn test_new_descriptor_offsets() {
        let sd = SecurityDescriptor::new();
        let data = sd.marshal().unwrap();
        assert_eq!(
            data,
            hex_to_u8_array! { "0100008000000000000000000000000000000000" }
        );
        let (parsed, consumed) = SecurityDescriptor::unmarshal(&data).unwrap();
        assert_eq!(consumed, 20);
        assert_eq!(parsed, sd);
        assert!(parsed.owner().is_none() && parsed.dacl().is_none());
    }

    #[test]
    fn test_owner_only_offsets() {
        let mut sd = SecurityDescriptor::new();
        sd.set_owner(Some(Identity::from_str(SID::S_ADMINISTRATORS).unwrap()));
        let header = sd.header().unwrap();
        assert_eq!(header.offset_owner, 20);
        assert_eq!(
            (header.offset_group, header.offset_sacl, header.offset_dacl),
            (0, 0, 0)
        );

        let data = sd.marshal().unwrap();
        assert_eq!(
            data,
            hex_to_u8_array! { "010000801400000000000000000000000000000001020000000000052000000020020000" }
        );
        let (parsed, _) = SecurityDescriptor::unmarshal(&data).unwrap();
        assert_eq!(parsed, sd);
    }

    #[test]
    fn test_empty_dacl_is_written() {
        let mut sd = SecurityDescriptor::new();
        sd.set_dacl(Some(ACL::new(AclRevision::Nt4)));
        assert!(sd.control.dacl_present());
        let data = sd.marshal().unwrap();
        assert_eq!(data.len(), 28);
        assert_eq!(sd.header().unwrap().offset_dacl, 20);

        sd.set_dacl(None);
        assert!(!sd.has_control(ControlFlag::DaclPresent));
        assert_eq!(sd.marshal().unwrap().len(), 20);
    }

    #[test]
    fn test_control_bits_match_flag_names() {
        let mut control = SecurityDescriptorControl::new()
            .with_dacl_auto_inherit_req(true)
            .with_sacl_auto_inherit_req(true);
        assert_eq!(control.raw(), 0x0300);
        assert_eq!(
            control.names(),
            vec!["SE_DACL_AUTO_INHERIT_REQ", "SE_SACL_AUTO_INHERIT_REQ"]
        );
        assert!(control.remove(ControlFlag::DaclAutoInheritReq));
        assert!(!control.dacl_auto_inherit_req());
        assert!(control.sacl_auto_inherit_req());
    }

    #[test]
    fn test_control_operations() {
        let mut sd = SecurityDescriptor::new();
        assert!(sd.has_control(ControlFlag::SelfRelative));
        assert!(sd.add_control(ControlFlag::OwnerDefaulted));
        assert!(!sd.add_control(ControlFlag::OwnerDefaulted));
        assert_eq!(sd.control.raw(), 0x8001);

        assert!(sd.remove_control(ControlFlag::OwnerDefaulted));
        assert!(!sd.remove_control(ControlFlag::OwnerDefaulted));
        assert_eq!(sd.control.names(), vec!["SE_SELF_RELATIVE"]);

        sd.clear_controls();
        assert_eq!(sd.control.raw(), 0);
        assert!(sd.control.names().is_empty());
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let mut data = hex_to_u8_array! { "010000801400000000000000000000000000000001020000000000052000000020020000" };
        data[4] = 0x40;
        let err = SecurityDescriptor::unmarshal(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::OffsetOutOfBounds {
                field: "owner",
                offset: 0x40,
                len: 36
            }
        ));
    }

    #[test]
    fn test_unknown_ace_type_in_dacl() {
        let mut data = hex_to_u8_array! { PROTECTED_FOLDER };
        // First DACL entry: 0x30 + 8 bytes of ACL header.
        data[0x38] = 0x42;
        let err = SecurityDescriptor::unmarshal(&data).unwrap_err();
        assert_eq!(err.field_path(), vec!["dacl", "ace[0]"]);
        assert!(matches!(err.root_cause(), Error::UnknownAceType(0x42)));
    }

    #[test]
    fn test_truncated_header() {
        let err = SecurityDescriptor::unmarshal(&[0x01, 0x00, 0x04, 0x80]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                needed: 20,
                available: 4
            }
        ));
    }

    #[test]
    fn test_equality() {
        let (a, _) = SecurityDescriptor::unmarshal(&hex_to_u8_array! { PROTECTED_FOLDER }).unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_group(Some(Identity::from_str(SID::S_LOCAL_SYSTEM).unwrap()));
        assert_ne!(a, b);

        let mut c = a.clone();
        c.set_owner(None);
        assert_ne!(a, c);

        let mut d = a.clone();
        d.dacl_mut().unwrap().clear_entries();
        assert_ne!(a, d);
    }
}
