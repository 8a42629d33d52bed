//! MS-DTYP 2.4.4: ACE

use binrw::{Endian, prelude::*};
use modular_bitfield::prelude::*;
use std::io::{Cursor, Read, Seek, Write};

use crate::Error;
use crate::binrw_util::prelude::*;

use super::{AccessMask, Identity, ObjectType};

named_values! {
    /// ACE types - [MS-DTYP 2.4.4.1](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/628ebb1d-c509-4ea0-a10f-77ef97ca4586>)
    pub enum AceType: u8 {
        AccessAllowed = 0x00: "ACCESS_ALLOWED",
        AccessDenied = 0x01: "ACCESS_DENIED",
        SystemAudit = 0x02: "SYSTEM_AUDIT",
        SystemAlarm = 0x03: "SYSTEM_ALARM",
        AccessAllowedCompound = 0x04: "ACCESS_ALLOWED_COMPOUND",
        AccessAllowedObject = 0x05: "ACCESS_ALLOWED_OBJECT",
        AccessDeniedObject = 0x06: "ACCESS_DENIED_OBJECT",
        SystemAuditObject = 0x07: "SYSTEM_AUDIT_OBJECT",
        SystemAlarmObject = 0x08: "SYSTEM_ALARM_OBJECT",
        AccessAllowedCallback = 0x09: "ACCESS_ALLOWED_CALLBACK",
        AccessDeniedCallback = 0x0a: "ACCESS_DENIED_CALLBACK",
        AccessAllowedCallbackObject = 0x0b: "ACCESS_ALLOWED_CALLBACK_OBJECT",
        AccessDeniedCallbackObject = 0x0c: "ACCESS_DENIED_CALLBACK_OBJECT",
        SystemAuditCallback = 0x0d: "SYSTEM_AUDIT_CALLBACK",
        SystemAlarmCallback = 0x0e: "SYSTEM_ALARM_CALLBACK",
        SystemAuditCallbackObject = 0x0f: "SYSTEM_AUDIT_CALLBACK_OBJECT",
        SystemAlarmCallbackObject = 0x10: "SYSTEM_ALARM_CALLBACK_OBJECT",
        SystemMandatoryLabel = 0x11: "SYSTEM_MANDATORY_LABEL",
        SystemResourceAttribute = 0x12: "SYSTEM_RESOURCE_ATTRIBUTE",
        SystemScopedPolicyId = 0x13: "SYSTEM_SCOPED_POLICY_ID",
    }
}

impl TryFrom<u8> for AceType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(Error::UnknownAceType(value))
    }
}

named_values! {
    /// ACE header flags - [MS-DTYP 2.4.4.1](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/628ebb1d-c509-4ea0-a10f-77ef97ca4586>)
    pub enum AceFlag: u8 {
        ObjectInherit = 0x01: "OBJECT_INHERIT",
        ContainerInherit = 0x02: "CONTAINER_INHERIT",
        NoPropagateInherit = 0x04: "NO_PROPAGATE_INHERIT",
        InheritOnly = 0x08: "INHERIT_ONLY",
        Inherited = 0x10: "INHERITED",
        SuccessfulAccess = 0x40: "SUCCESSFUL_ACCESS",
        FailedAccess = 0x80: "FAILED_ACCESS",
    }
}

#[bitfield]
#[derive(BinWrite, BinRead, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[bw(map = |&x| Self::into_bytes(x))]
#[br(map = Self::from_bytes)]
pub struct AceFlags {
    pub object_inherit: bool,
    pub container_inherit: bool,
    pub no_propagate_inherit: bool,
    pub inherit_only: bool,
    pub inherited: bool,
    #[skip]
    __: bool,
    pub successful_access: bool,
    pub failed_access: bool,
}

bitfield_raw!(AceFlags: u8);

impl AceFlags {
    pub fn has_flag(&self, flag: AceFlag) -> bool {
        self.raw() & flag.value() != 0
    }

    pub fn set_flag(&mut self, flag: AceFlag, value: bool) {
        let raw = match value {
            true => self.raw() | flag.value(),
            false => self.raw() & !flag.value(),
        };
        *self = Self::from_raw(raw);
    }

    /// Names of the flags that are set, in bit order.
    pub fn names(&self) -> Vec<&'static str> {
        AceFlag::ALL
            .iter()
            .filter(|f| self.has_flag(**f))
            .map(|f| f.name())
            .collect()
    }
}

/// The 4 bytes that start every ACE.
///
/// `ace_type` is kept raw here; [`AceHeader::kind`] validates it.
#[binrw::binrw]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[brw(little)]
pub struct AceHeader {
    pub ace_type: u8,
    pub ace_flags: AceFlags,
    /// Total size of the ACE, header included.
    pub size: u16,
}

impl AceHeader {
    pub const SIZE: usize = 4;

    pub fn kind(&self) -> crate::Result<AceType> {
        AceType::try_from(self.ace_type)
    }
}

/// Body of the ACEs that carry a mask and a SID.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone)]
#[bw(little)]
pub struct AccessAce {
    pub access_mask: AccessMask,
    pub identity: Identity,
}

impl BinRead for AccessAce {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        Ok(Self {
            access_mask: read_field(reader, endian, "access_mask")?,
            identity: read_field(reader, endian, "identity")?,
        })
    }
}

/// Body of the object ACEs: mask, object-type record, then SID.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone)]
#[bw(little)]
pub struct ObjectAce {
    pub access_mask: AccessMask,
    pub object_type: ObjectType,
    pub identity: Identity,
}

impl BinRead for ObjectAce {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        Ok(Self {
            access_mask: read_field(reader, endian, "access_mask")?,
            object_type: read_field(reader, endian, "object_type")?,
            identity: read_field(reader, endian, "identity")?,
        })
    }
}

/// ACE body, by ACE type.
///
/// Alarm and compound ACEs are reserved and have no body; whatever bytes they
/// carry are kept in [`ACE::application_data`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AceValue {
    AccessAllowed(AccessAce),
    AccessDenied(AccessAce),
    SystemAudit(AccessAce),
    SystemAlarm,
    AccessAllowedCompound,
    AccessAllowedObject(ObjectAce),
    AccessDeniedObject(ObjectAce),
    SystemAuditObject(ObjectAce),
    SystemAlarmObject,
    AccessAllowedCallback(AccessAce),
    AccessDeniedCallback(AccessAce),
    AccessAllowedCallbackObject(ObjectAce),
    AccessDeniedCallbackObject(ObjectAce),
    SystemAuditCallback(AccessAce),
    SystemAlarmCallback,
    SystemAuditCallbackObject(ObjectAce),
    SystemAlarmCallbackObject,
    SystemMandatoryLabel(AccessAce),
    SystemResourceAttribute(AccessAce),
    SystemScopedPolicyId(AccessAce),
}

impl AceValue {
    pub fn ace_type(&self) -> AceType {
        match self {
            AceValue::AccessAllowed(_) => AceType::AccessAllowed,
            AceValue::AccessDenied(_) => AceType::AccessDenied,
            AceValue::SystemAudit(_) => AceType::SystemAudit,
            AceValue::SystemAlarm => AceType::SystemAlarm,
            AceValue::AccessAllowedCompound => AceType::AccessAllowedCompound,
            AceValue::AccessAllowedObject(_) => AceType::AccessAllowedObject,
            AceValue::AccessDeniedObject(_) => AceType::AccessDeniedObject,
            AceValue::SystemAuditObject(_) => AceType::SystemAuditObject,
            AceValue::SystemAlarmObject => AceType::SystemAlarmObject,
            AceValue::AccessAllowedCallback(_) => AceType::AccessAllowedCallback,
            AceValue::AccessDeniedCallback(_) => AceType::AccessDeniedCallback,
            AceValue::AccessAllowedCallbackObject(_) => AceType::AccessAllowedCallbackObject,
            AceValue::AccessDeniedCallbackObject(_) => AceType::AccessDeniedCallbackObject,
            AceValue::SystemAuditCallback(_) => AceType::SystemAuditCallback,
            AceValue::SystemAlarmCallback => AceType::SystemAlarmCallback,
            AceValue::SystemAuditCallbackObject(_) => AceType::SystemAuditCallbackObject,
            AceValue::SystemAlarmCallbackObject => AceType::SystemAlarmCallbackObject,
            AceValue::SystemMandatoryLabel(_) => AceType::SystemMandatoryLabel,
            AceValue::SystemResourceAttribute(_) => AceType::SystemResourceAttribute,
            AceValue::SystemScopedPolicyId(_) => AceType::SystemScopedPolicyId,
        }
    }

    fn access_ace(&self) -> Option<&AccessAce> {
        match self {
            AceValue::AccessAllowed(ace)
            | AceValue::AccessDenied(ace)
            | AceValue::SystemAudit(ace)
            | AceValue::AccessAllowedCallback(ace)
            | AceValue::AccessDeniedCallback(ace)
            | AceValue::SystemAuditCallback(ace)
            | AceValue::SystemMandatoryLabel(ace)
            | AceValue::SystemResourceAttribute(ace)
            | AceValue::SystemScopedPolicyId(ace) => Some(ace),
            _ => None,
        }
    }

    fn access_ace_mut(&mut self) -> Option<&mut AccessAce> {
        match self {
            AceValue::AccessAllowed(ace)
            | AceValue::AccessDenied(ace)
            | AceValue::SystemAudit(ace)
            | AceValue::AccessAllowedCallback(ace)
            | AceValue::AccessDeniedCallback(ace)
            | AceValue::SystemAuditCallback(ace)
            | AceValue::SystemMandatoryLabel(ace)
            | AceValue::SystemResourceAttribute(ace)
            | AceValue::SystemScopedPolicyId(ace) => Some(ace),
            _ => None,
        }
    }

    fn object_ace(&self) -> Option<&ObjectAce> {
        match self {
            AceValue::AccessAllowedObject(ace)
            | AceValue::AccessDeniedObject(ace)
            | AceValue::SystemAuditObject(ace)
            | AceValue::AccessAllowedCallbackObject(ace)
            | AceValue::AccessDeniedCallbackObject(ace)
            | AceValue::SystemAuditCallbackObject(ace) => Some(ace),
            _ => None,
        }
    }

    fn object_ace_mut(&mut self) -> Option<&mut ObjectAce> {
        match self {
            AceValue::AccessAllowedObject(ace)
            | AceValue::AccessDeniedObject(ace)
            | AceValue::SystemAuditObject(ace)
            | AceValue::AccessAllowedCallbackObject(ace)
            | AceValue::AccessDeniedCallbackObject(ace)
            | AceValue::SystemAuditCallbackObject(ace) => Some(ace),
            _ => None,
        }
    }

    pub fn access_mask(&self) -> Option<&AccessMask> {
        match (self.access_ace(), self.object_ace()) {
            (Some(ace), _) => Some(&ace.access_mask),
            (_, Some(ace)) => Some(&ace.access_mask),
            _ => None,
        }
    }

    pub fn access_mask_mut(&mut self) -> Option<&mut AccessMask> {
        if self.access_ace().is_some() {
            return self.access_ace_mut().map(|ace| &mut ace.access_mask);
        }
        self.object_ace_mut().map(|ace| &mut ace.access_mask)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match (self.access_ace(), self.object_ace()) {
            (Some(ace), _) => Some(&ace.identity),
            (_, Some(ace)) => Some(&ace.identity),
            _ => None,
        }
    }

    pub fn identity_mut(&mut self) -> Option<&mut Identity> {
        if self.access_ace().is_some() {
            return self.access_ace_mut().map(|ace| &mut ace.identity);
        }
        self.object_ace_mut().map(|ace| &mut ace.identity)
    }

    /// The object-type record, for object ACEs.
    pub fn object_type(&self) -> Option<&ObjectType> {
        self.object_ace().map(|ace| &ace.object_type)
    }

    pub fn is_access_allowed(&self) -> bool {
        matches!(
            self,
            AceValue::AccessAllowed(_)
                | AceValue::AccessAllowedCompound
                | AceValue::AccessAllowedObject(_)
                | AceValue::AccessAllowedCallback(_)
                | AceValue::AccessAllowedCallbackObject(_)
        )
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            AceValue::AccessDenied(_)
                | AceValue::AccessDeniedObject(_)
                | AceValue::AccessDeniedCallback(_)
                | AceValue::AccessDeniedCallbackObject(_)
        )
    }

    /// The serialized length of the body, without application data.
    pub fn body_size(&self) -> usize {
        match (self.access_ace(), self.object_ace()) {
            (Some(ace), _) => AccessMask::SIZE + ace.identity.sid.size(),
            (_, Some(ace)) => {
                AccessMask::SIZE + ace.object_type.size() + ace.identity.sid.size()
            }
            _ => 0,
        }
    }

    fn read_body<R: Read + Seek>(
        ace_type: AceType,
        reader: &mut R,
        endian: Endian,
    ) -> BinResult<Self> {
        fn access<R: Read + Seek>(
            reader: &mut R,
            endian: Endian,
            make: fn(AccessAce) -> AceValue,
        ) -> BinResult<AceValue> {
            AccessAce::read_options(reader, endian, ()).map(make)
        }
        fn object<R: Read + Seek>(
            reader: &mut R,
            endian: Endian,
            make: fn(ObjectAce) -> AceValue,
        ) -> BinResult<AceValue> {
            ObjectAce::read_options(reader, endian, ()).map(make)
        }

        match ace_type {
            AceType::AccessAllowed => access(reader, endian, AceValue::AccessAllowed),
            AceType::AccessDenied => access(reader, endian, AceValue::AccessDenied),
            AceType::SystemAudit => access(reader, endian, AceValue::SystemAudit),
            AceType::SystemAlarm => Ok(AceValue::SystemAlarm),
            AceType::AccessAllowedCompound => Ok(AceValue::AccessAllowedCompound),
            AceType::AccessAllowedObject => object(reader, endian, AceValue::AccessAllowedObject),
            AceType::AccessDeniedObject => object(reader, endian, AceValue::AccessDeniedObject),
            AceType::SystemAuditObject => object(reader, endian, AceValue::SystemAuditObject),
            AceType::SystemAlarmObject => Ok(AceValue::SystemAlarmObject),
            AceType::AccessAllowedCallback => {
                access(reader, endian, AceValue::AccessAllowedCallback)
            }
            AceType::AccessDeniedCallback => access(reader, endian, AceValue::AccessDeniedCallback),
            AceType::AccessAllowedCallbackObject => {
                object(reader, endian, AceValue::AccessAllowedCallbackObject)
            }
            AceType::AccessDeniedCallbackObject => {
                object(reader, endian, AceValue::AccessDeniedCallbackObject)
            }
            AceType::SystemAuditCallback => access(reader, endian, AceValue::SystemAuditCallback),
            AceType::SystemAlarmCallback => Ok(AceValue::SystemAlarmCallback),
            AceType::SystemAuditCallbackObject => {
                object(reader, endian, AceValue::SystemAuditCallbackObject)
            }
            AceType::SystemAlarmCallbackObject => Ok(AceValue::SystemAlarmCallbackObject),
            AceType::SystemMandatoryLabel => access(reader, endian, AceValue::SystemMandatoryLabel),
            AceType::SystemResourceAttribute => {
                access(reader, endian, AceValue::SystemResourceAttribute)
            }
            AceType::SystemScopedPolicyId => access(reader, endian, AceValue::SystemScopedPolicyId),
        }
    }

    fn write_body<W: Write + Seek>(&self, writer: &mut W, endian: Endian) -> BinResult<()> {
        if let Some(ace) = self.access_ace() {
            return ace.write_options(writer, endian, ());
        }
        if let Some(ace) = self.object_ace() {
            return ace.write_options(writer, endian, ());
        }
        Ok(())
    }
}

/// Access control entry - [MS-DTYP 2.4.4](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/d06e5a81-176e-46c6-9cf7-9137aad3cc0d>)
///
/// The type is implied by [`ACE::value`]. The header size is recomputed when
/// writing: it is `size` if that covers the body, otherwise the body length.
/// Bytes between the body and `size` are written as zeros.
#[derive(Debug, Clone)]
pub struct ACE {
    pub ace_flags: AceFlags,
    pub value: AceValue,
    /// Size from the header; `0` lets the body decide.
    pub size: u16,
    /// 1-based position in the owning ACL, for display. Not part of the wire format.
    pub index: u16,
    /// Bytes after the body, within the ACE size: callback conditions,
    /// resource attributes, or unknown trailing data.
    pub application_data: Vec<u8>,
}

impl ACE {
    pub fn new(ace_flags: AceFlags, value: AceValue) -> Self {
        Self {
            ace_flags,
            value,
            size: 0,
            index: 0,
            application_data: Vec::new(),
        }
    }

    pub fn ace_type(&self) -> AceType {
        self.value.ace_type()
    }

    pub fn is_inherited(&self) -> bool {
        self.ace_flags.inherited()
    }

    pub fn has_flag(&self, flag: AceFlag) -> bool {
        self.ace_flags.has_flag(flag)
    }

    pub fn access_mask(&self) -> Option<&AccessMask> {
        self.value.access_mask()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.value.identity()
    }

    pub fn object_type(&self) -> Option<&ObjectType> {
        self.value.object_type()
    }

    /// The number of bytes [`ACE`] writes: the declared `size`, or the
    /// body length when `size` does not cover it.
    pub fn marshaled_size(&self) -> usize {
        let minimal = AceHeader::SIZE + self.value.body_size() + self.application_data.len();
        minimal.max(self.size as usize)
    }

    /// The header as it will be written.
    pub fn header(&self) -> crate::Result<AceHeader> {
        let size = self.marshaled_size();
        let size = u16::try_from(size).map_err(|_| Error::InvalidValue {
            field: "size",
            reason: format!("ACE size {size} does not fit in 16 bits"),
        })?;
        Ok(AceHeader {
            ace_type: self.ace_type().value(),
            ace_flags: self.ace_flags,
            size,
        })
    }
}

/// Compares type, flags, mask, SID and the object-type GUIDs flagged present.
/// `size`, `index`, `application_data` and identity names are ignored.
impl PartialEq for ACE {
    fn eq(&self, other: &Self) -> bool {
        self.ace_type() == other.ace_type()
            && self.ace_flags == other.ace_flags
            && self.access_mask() == other.access_mask()
            && self.identity().map(|i| &i.sid) == other.identity().map(|i| &i.sid)
            && self.object_type() == other.object_type()
    }
}

impl Eq for ACE {}

impl BinRead for ACE {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, AceHeader::SIZE as u64)?;
        let header = AceHeader::read_options(reader, endian, ())?;
        let ace_type = header.kind().map_err(|err| custom_error(reader, err))?;

        let size = header.size as usize;
        if size < AceHeader::SIZE {
            return Err(custom_error(
                reader,
                Error::InvalidValue {
                    field: "size",
                    reason: format!("ACE size {size} is smaller than its header"),
                },
            ));
        }
        let available = remaining(reader)? as usize + AceHeader::SIZE;
        if available < size {
            return Err(custom_error(
                reader,
                Error::TruncatedInput {
                    needed: size,
                    available,
                },
            ));
        }

        // The body may not read past the declared size.
        let mut body = vec![0u8; size - AceHeader::SIZE];
        reader.read_exact(&mut body)?;
        let mut body_reader = Cursor::new(body.as_slice());
        let value = AceValue::read_body(ace_type, &mut body_reader, endian)?;
        let application_data = body[body_reader.position() as usize..].to_vec();
        if !application_data.is_empty() {
            log::debug!(
                "{} ACE carries {} bytes after its body",
                ace_type,
                application_data.len()
            );
        }

        Ok(Self {
            ace_flags: header.ace_flags,
            value,
            size: header.size,
            index: 0,
            application_data,
        })
    }
}

impl BinWrite for ACE {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        let header = self.header().map_err(|err| custom_error(writer, err))?;
        let begin = writer.stream_position()?;
        header.write_options(writer, endian, ())?;
        self.value.write_body(writer, endian)?;
        writer.write_all(&self.application_data)?;

        let written = (writer.stream_position()? - begin) as usize;
        let padding = header.size as usize - written;
        if padding > 0 {
            writer.write_all(&vec![0u8; padding])?;
        }
        Ok(())
    }
}
