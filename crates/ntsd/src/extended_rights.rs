//! Active Directory extended rights.
//!
//! An object ACE with [`AccessRight::DsControlAccess`][crate::AccessRight::DsControlAccess] grants
//! the extended right whose GUID is its object type.
//! See [Control access rights](<https://learn.microsoft.com/en-us/windows/win32/adschema/extended-rights>).

use crate::Guid;

/// A named extended right, by its `rightsGuid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedRight {
    /// The common name of the `controlAccessRight` object.
    pub name: &'static str,
    pub guid: Guid,
}

impl ExtendedRight {
    const fn new(name: &'static str, guid: Guid) -> Self {
        Self { name, guid }
    }
}

#[rustfmt::skip]
pub const EXTENDED_RIGHTS: &[ExtendedRight] = &[
    ExtendedRight::new("Abandon-Replication", Guid::from_fields(0xee914b82, 0x0a98, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Add-GUID", Guid::from_fields(0x440820ad, 0x65b4, 0x11d1, [0xa3, 0xda, 0x00, 0x00, 0xf8, 0x75, 0xae, 0x0d])),
    ExtendedRight::new("Allocate-Rids", Guid::from_fields(0x1abd7cf8, 0x0a99, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Allowed-To-Authenticate", Guid::from_fields(0x68b1d179, 0x0d15, 0x4d4f, [0xab, 0x71, 0x46, 0x15, 0x2e, 0x79, 0xa7, 0xbc])),
    ExtendedRight::new("Apply-Group-Policy", Guid::from_fields(0xedacfd8f, 0xffb3, 0x11d1, [0xb4, 0x1d, 0x00, 0xa0, 0xc9, 0x68, 0xf9, 0x39])),
    ExtendedRight::new("Certificate-Enrollment", Guid::from_fields(0x0e10c968, 0x78fb, 0x11d2, [0x90, 0xd4, 0x00, 0xc0, 0x4f, 0x79, 0xdc, 0x55])),
    ExtendedRight::new("Change-Domain-Master", Guid::from_fields(0x014bf69c, 0x7b3b, 0x11d1, [0x85, 0xf6, 0x08, 0x00, 0x2b, 0xe7, 0x4f, 0xab])),
    ExtendedRight::new("Change-Infrastructure-Master", Guid::from_fields(0xcc17b1fb, 0x33d9, 0x11d2, [0x97, 0xd4, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Change-PDC", Guid::from_fields(0xbae50096, 0x4752, 0x11d1, [0x90, 0x52, 0x00, 0xc0, 0x4f, 0xc2, 0xd4, 0xcf])),
    ExtendedRight::new("Change-Rid-Master", Guid::from_fields(0xd58d5f36, 0x0a98, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Change-Schema-Master", Guid::from_fields(0xe12b56b6, 0x0a95, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Create-Inbound-Forest-Trust", Guid::from_fields(0xe2a36dc9, 0xae17, 0x47c3, [0xb5, 0x8b, 0xbe, 0x34, 0xc5, 0x5b, 0xa6, 0x33])),
    ExtendedRight::new("Do-Garbage-Collection", Guid::from_fields(0xfec364e0, 0x0a98, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Domain-Administer-Server", Guid::from_fields(0xab721a52, 0x1e2f, 0x11d0, [0x98, 0x19, 0x00, 0xaa, 0x00, 0x40, 0x52, 0x9b])),
    ExtendedRight::new("DS-Check-Stale-Phantoms", Guid::from_fields(0x69ae6200, 0x7f46, 0x11d2, [0xb9, 0xad, 0x00, 0xc0, 0x4f, 0x79, 0xf8, 0x05])),
    ExtendedRight::new("DS-Clone-Domain-Controller", Guid::from_fields(0x3e0f7e18, 0x2c7a, 0x4c10, [0xba, 0x82, 0x4d, 0x92, 0x6d, 0xb9, 0x9a, 0x3e])),
    ExtendedRight::new("DS-Execute-Intentions-Script", Guid::from_fields(0x2f16c4a5, 0xb98e, 0x432c, [0x95, 0x2a, 0xcb, 0x38, 0x8b, 0xa3, 0x3f, 0x2e])),
    ExtendedRight::new("DS-Install-Replica", Guid::from_fields(0x9923a32a, 0x3607, 0x11d2, [0xb9, 0xbe, 0x00, 0x00, 0xf8, 0x7a, 0x36, 0xb2])),
    ExtendedRight::new("DS-Query-Self-Quota", Guid::from_fields(0x4ecc03fe, 0xffc0, 0x4947, [0xb6, 0x30, 0xeb, 0x67, 0x2a, 0x8a, 0x9d, 0xbc])),
    ExtendedRight::new("DS-Replication-Get-Changes", Guid::from_fields(0x1131f6aa, 0x9c07, 0x11d1, [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2])),
    ExtendedRight::new("DS-Replication-Get-Changes-All", Guid::from_fields(0x1131f6ad, 0x9c07, 0x11d1, [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2])),
    ExtendedRight::new("DS-Replication-Get-Changes-In-Filtered-Set", Guid::from_fields(0x89e95b76, 0x444d, 0x4c62, [0x99, 0x1a, 0x0f, 0xac, 0xbe, 0xda, 0x64, 0x0c])),
    ExtendedRight::new("DS-Replication-Manage-Topology", Guid::from_fields(0x1131f6ac, 0x9c07, 0x11d1, [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2])),
    ExtendedRight::new("DS-Replication-Monitor-Topology", Guid::from_fields(0xf98340fb, 0x7c5b, 0x4cdb, [0xa0, 0x0b, 0x2e, 0xbd, 0xfa, 0x11, 0x5a, 0x96])),
    ExtendedRight::new("DS-Replication-Synchronize", Guid::from_fields(0x1131f6ab, 0x9c07, 0x11d1, [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2])),
    ExtendedRight::new("Enable-Per-User-Reversibly-Encrypted-Password", Guid::from_fields(0x05c74c5e, 0x4deb, 0x43b4, [0xbd, 0x9f, 0x86, 0x66, 0x4c, 0x2a, 0x7f, 0xd5])),
    ExtendedRight::new("Generate-RSoP-Logging", Guid::from_fields(0xb7b1b3de, 0xab09, 0x4242, [0x9e, 0x30, 0x99, 0x80, 0xe5, 0xd3, 0x22, 0xf7])),
    ExtendedRight::new("Generate-RSoP-Planning", Guid::from_fields(0xb7b1b3dd, 0xab09, 0x4242, [0x9e, 0x30, 0x99, 0x80, 0xe5, 0xd3, 0x22, 0xf7])),
    ExtendedRight::new("Manage-Optional-Features", Guid::from_fields(0x7c0e2a7c, 0xa419, 0x48e4, [0xa9, 0x95, 0x10, 0x18, 0x0a, 0xad, 0x54, 0xdd])),
    ExtendedRight::new("Migrate-SID-History", Guid::from_fields(0xba33815a, 0x4f93, 0x4c76, [0x87, 0xf3, 0x57, 0x57, 0x4b, 0xff, 0x81, 0x09])),
    ExtendedRight::new("msmq-Open-Connector", Guid::from_fields(0xb4e60130, 0xdf3f, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Peek", Guid::from_fields(0x06bd3201, 0xdf3e, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Peek-Computer-Journal", Guid::from_fields(0x4b6e08c3, 0xdf3c, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Peek-Dead-Letter", Guid::from_fields(0x4b6e08c1, 0xdf3c, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Receive", Guid::from_fields(0x06bd3200, 0xdf3e, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Receive-Computer-Journal", Guid::from_fields(0x4b6e08c2, 0xdf3c, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Receive-Dead-Letter", Guid::from_fields(0x4b6e08c0, 0xdf3c, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Receive-Journal", Guid::from_fields(0x06bd3203, 0xdf3e, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("msmq-Send", Guid::from_fields(0x06bd3202, 0xdf3e, 0x11d1, [0x9c, 0x86, 0x00, 0x60, 0x08, 0x76, 0x4d, 0x0e])),
    ExtendedRight::new("Open-Address-Book", Guid::from_fields(0xa1990816, 0x4298, 0x11d1, [0xad, 0xe2, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Read-Only-Replication-Secret-Synchronization", Guid::from_fields(0x1131f6ae, 0x9c07, 0x11d1, [0xf7, 0x9f, 0x00, 0xc0, 0x4f, 0xc2, 0xdc, 0xd2])),
    ExtendedRight::new("Reanimate-Tombstones", Guid::from_fields(0x45ec5156, 0xdb7e, 0x47bb, [0xb5, 0x3f, 0xdb, 0xeb, 0x2d, 0x03, 0xc4, 0x0f])),
    ExtendedRight::new("Recalculate-Hierarchy", Guid::from_fields(0x0bc1554e, 0x0a99, 0x11d1, [0xad, 0xbb, 0x00, 0xc0, 0x4f, 0xd8, 0xd5, 0xcd])),
    ExtendedRight::new("Recalculate-Security-Inheritance", Guid::from_fields(0x62dd28a8, 0x7f46, 0x11d2, [0xb9, 0xad, 0x00, 0xc0, 0x4f, 0x79, 0xf8, 0x05])),
    ExtendedRight::new("Receive-As", Guid::from_fields(0xab721a56, 0x1e2f, 0x11d0, [0x98, 0x19, 0x00, 0xaa, 0x00, 0x40, 0x52, 0x9b])),
    ExtendedRight::new("Refresh-Group-Cache", Guid::from_fields(0x9432c620, 0x033c, 0x4db7, [0x8b, 0x58, 0x14, 0xef, 0x6d, 0x0b, 0xf4, 0x77])),
    ExtendedRight::new("Reload-SSL-Certificate", Guid::from_fields(0x1a60ea8d, 0x58a6, 0x4b20, [0xbc, 0xdc, 0xfb, 0x71, 0xeb, 0x8a, 0x9f, 0xf8])),
    ExtendedRight::new("Run-Protect-Admin-Groups-Task", Guid::from_fields(0x7726b9d5, 0xa4b4, 0x4288, [0xa6, 0xb2, 0xdc, 0xe9, 0x52, 0xe8, 0x0a, 0x7f])),
    ExtendedRight::new("SAM-Enumerate-Entire-Domain", Guid::from_fields(0x91d67418, 0x0135, 0x4acc, [0x8d, 0x79, 0xc0, 0x8e, 0x85, 0x7c, 0xfb, 0xec])),
    ExtendedRight::new("Send-As", Guid::from_fields(0xab721a54, 0x1e2f, 0x11d0, [0x98, 0x19, 0x00, 0xaa, 0x00, 0x40, 0x52, 0x9b])),
    ExtendedRight::new("Send-To", Guid::from_fields(0xab721a55, 0x1e2f, 0x11d0, [0x98, 0x19, 0x00, 0xaa, 0x00, 0x40, 0x52, 0x9b])),
    ExtendedRight::new("Unexpire-Password", Guid::from_fields(0xccc2dc7d, 0xa6ad, 0x4a7a, [0x88, 0x46, 0xc0, 0x4e, 0x3c, 0xc5, 0x35, 0x01])),
    ExtendedRight::new("Update-Password-Not-Required-Bit", Guid::from_fields(0x280f369c, 0x67c7, 0x438e, [0xae, 0x98, 0x1d, 0x46, 0xf3, 0xc6, 0xf5, 0x41])),
    ExtendedRight::new("Update-Schema-Cache", Guid::from_fields(0xbe2bb760, 0x7f46, 0x11d2, [0xb9, 0xad, 0x00, 0xc0, 0x4f, 0x79, 0xf8, 0x05])),
    ExtendedRight::new("User-Change-Password", Guid::from_fields(0xab721a53, 0x1e2f, 0x11d0, [0x98, 0x19, 0x00, 0xaa, 0x00, 0x40, 0x52, 0x9b])),
    ExtendedRight::new("User-Force-Change-Password", Guid::from_fields(0x00299570, 0x246d, 0x11d0, [0xa7, 0x68, 0x00, 0xaa, 0x00, 0x6e, 0x05, 0x29])),
];

/// The name of the extended right with this GUID.
pub fn extended_right_name(guid: &Guid) -> Option<&'static str> {
    EXTENDED_RIGHTS
        .iter()
        .find(|right| right.guid == *guid)
        .map(|right| right.name)
}

/// The GUID of the extended right with this name, compared case-insensitively.
pub fn extended_right_guid(name: &str) -> Option<Guid> {
    EXTENDED_RIGHTS
        .iter()
        .find(|right| right.name.eq_ignore_ascii_case(name))
        .map(|right| right.guid)
}
