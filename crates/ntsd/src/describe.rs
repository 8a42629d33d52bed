//! Tree-like text rendering of security structures.
//!
//! ```text
//! <SecurityDescriptor>
//!  │ <SecurityDescriptorHeader>
//!  │  │ Revision    : 0x01
//!  ...
//!  │  └─
//!  └─
//! ```

use std::fmt::{self, Write};

use crate::extended_right_name;
use crate::security::{ACE, ACL, AccessMask, Identity, ObjectType, SecurityDescriptor};

/// Renders a structure and everything nested in it.
pub trait Describe {
    /// Writes the rendering, indented by `indent` levels.
    ///
    /// Fails only when `out` does. Structures too large to be marshaled are still rendered.
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result;

    fn describe(&self) -> String {
        let mut out = String::new();
        // Rendering only fails when the writer does, and a String never does.
        let _ = self.describe_into(&mut out, 0);
        out
    }
}

fn prefix(indent: usize) -> String {
    " │ ".repeat(indent)
}

fn open(out: &mut dyn Write, indent: usize, name: &str) -> fmt::Result {
    writeln!(out, "{}<{}>", prefix(indent), name)
}

fn close(out: &mut dyn Write, indent: usize) -> fmt::Result {
    writeln!(out, "{} └─", prefix(indent))
}

/// Writes `key : value` lines, with keys padded to the longest one.
fn fields(out: &mut dyn Write, indent: usize, lines: &[(&str, String)]) -> fmt::Result {
    let width = lines.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in lines {
        writeln!(out, "{} │ {:<width$} : {}", prefix(indent), key, value)?;
    }
    Ok(())
}

fn with_names(value: String, names: &[&str]) -> String {
    if names.is_empty() {
        value
    } else {
        format!("{} ({})", value, names.join("|"))
    }
}

impl Describe for SecurityDescriptor {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        let [offset_owner, offset_group, offset_sacl, offset_dacl] = self.offsets();
        open(out, indent, "SecurityDescriptor")?;

        open(out, indent + 1, "SecurityDescriptorHeader")?;
        fields(
            out,
            indent + 1,
            &[
                ("Revision", format!("{:#04x}", self.revision)),
                ("Sbz1", format!("{:#04x}", self.sbz1)),
                (
                    "Control",
                    with_names(format!("{:#06x}", self.control.raw()), &self.control.names()),
                ),
                ("OffsetOwner", format!("{offset_owner:#010x}")),
                ("OffsetGroup", format!("{offset_group:#010x}")),
                ("OffsetSacl", format!("{offset_sacl:#010x}")),
                ("OffsetDacl", format!("{offset_dacl:#010x}")),
            ],
        )?;
        close(out, indent + 1)?;

        for (name, identity) in [("Owner", self.owner()), ("Group", self.group())] {
            if let Some(identity) = identity {
                open(out, indent + 1, name)?;
                identity.describe_into(out, indent + 2)?;
                close(out, indent + 1)?;
            }
        }

        for (name, acl) in [
            ("SystemAccessControlList", self.sacl()),
            ("DiscretionaryAccessControlList", self.dacl()),
        ] {
            match acl {
                Some(acl) => describe_acl(acl, name, out, indent + 1)?,
                None => {
                    open(out, indent + 1, &format!("{name} is not present"))?;
                    close(out, indent + 1)?;
                }
            }
        }

        close(out, indent)
    }
}

fn describe_acl(acl: &ACL, name: &str, out: &mut dyn Write, indent: usize) -> fmt::Result {
    open(out, indent, name)?;

    open(out, indent + 1, "AccessControlListHeader")?;
    fields(
        out,
        indent + 1,
        &[
            (
                "Revision",
                format!("{:#04x} ({})", u8::from(acl.acl_revision), acl.acl_revision),
            ),
            ("Sbz1", format!("{:#04x}", acl.sbz1)),
            ("AclSize", format!("{:#06x}", acl.acl_size())),
            ("AceCount", format!("{:#06x} ({})", acl.ace_count(), acl.ace_count())),
            ("Sbz2", format!("{:#06x}", acl.sbz2)),
        ],
    )?;
    close(out, indent + 1)?;

    for ace in acl {
        ace.describe_into(out, indent + 1)?;
    }
    close(out, indent)
}

impl Describe for ACL {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        describe_acl(self, "AccessControlList", out, indent)
    }
}

impl Describe for ACE {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        open(out, indent, &format!("AccessControlEntry #{}", self.index))?;

        open(out, indent + 1, "AccessControlEntryHeader")?;
        fields(
            out,
            indent + 1,
            &[
                (
                    "Type",
                    format!("{:#04x} ({})", self.ace_type().value(), self.ace_type()),
                ),
                (
                    "Flags",
                    with_names(
                        format!("{:#04x}", self.ace_flags.raw()),
                        &self.ace_flags.names(),
                    ),
                ),
                ("Size", format!("{:#06x}", self.marshaled_size())),
            ],
        )?;
        close(out, indent + 1)?;

        if let Some(mask) = self.access_mask() {
            mask.describe_into(out, indent + 1)?;
        }
        if let Some(object_type) = self.object_type() {
            object_type.describe_into(out, indent + 1)?;
        }
        if let Some(identity) = self.identity() {
            identity.describe_into(out, indent + 1)?;
        }
        if !self.application_data.is_empty() {
            open(out, indent + 1, "ApplicationData")?;
            fields(
                out,
                indent + 1,
                &[("Length", format!("{:#06x}", self.application_data.len()))],
            )?;
            close(out, indent + 1)?;
        }

        close(out, indent)
    }
}

impl Describe for AccessMask {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        open(out, indent, "AccessMask")?;
        fields(
            out,
            indent,
            &[("Mask", with_names(format!("{:#010x}", self.raw()), &self.names()))],
        )?;
        close(out, indent)
    }
}

impl Describe for ObjectType {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        let guid_line = |guid: &crate::Guid| match extended_right_name(guid) {
            Some(name) => format!("{guid} ({name})"),
            None => guid.to_string(),
        };

        let mut lines = vec![("Flags", format!("{:#010x}", self.flags.raw()))];
        if let Some(guid) = self.object_type() {
            lines.push(("ObjectType", guid_line(guid)));
        }
        if let Some(guid) = self.inherited_object_type() {
            lines.push(("InheritedObjectType", guid_line(guid)));
        }

        open(out, indent, "ObjectType")?;
        fields(out, indent, &lines)?;
        close(out, indent)
    }
}

impl Describe for Identity {
    fn describe_into(&self, out: &mut dyn Write, indent: usize) -> fmt::Result {
        open(out, indent, "Identity")?;
        fields(
            out,
            indent,
            &[
                ("SID", self.sid.to_string()),
                ("Name", format!("'{}'", self.name.as_deref().unwrap_or_default())),
            ],
        )?;
        close(out, indent)
    }
}

impl fmt::Display for SecurityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe_into(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::*;
    use crate::{Guid, Marshal, extended_right_guid};
    use std::str::FromStr;

    #[test]
    fn test_describe_identity() {
        let identity = Identity::from_str(SID::S_ADMINISTRATORS).unwrap();
        assert_eq!(
            identity.describe(),
            "<Identity>\n │ SID  : S-1-5-32-544\n │ Name : 'Administrators'\n └─\n"
        );
    }

    #[test]
    fn test_describe_mask() {
        let mask = AccessMask::from_raw(0xa0000000);
        assert_eq!(
            mask.describe(),
            "<AccessMask>\n │ Mask : 0xa0000000 (GENERIC_EXECUTE|GENERIC_READ)\n └─\n"
        );
    }

    #[test]
    fn test_describe_object_type_names_extended_right() {
        let record = ObjectType::new(extended_right_guid("User-Force-Change-Password"), None);
        let text = record.describe();
        assert!(text.contains(
            " │ ObjectType : 00299570-246d-11d0-a768-00aa006e0529 (User-Force-Change-Password)\n"
        ));
        assert!(text.contains(" │ Flags      : 0x00000001\n"));

        let unnamed = ObjectType::new(None, Some(Guid::ZERO));
        assert!(
            unnamed
                .describe()
                .contains("InheritedObjectType : 00000000-0000-0000-0000-000000000000\n")
        );
    }

    #[test]
    fn test_describe_descriptor() {
        let mut dacl = ACL::new(AclRevision::Nt4);
        dacl.add_entry(ACE::new(
            AceFlags::new().with_container_inherit(true),
            AceValue::AccessAllowed(AccessAce {
                access_mask: AccessMask::from_raw(0x10000000),
                identity: Identity::from_str(SID::S_LOCAL_SYSTEM).unwrap(),
            }),
        ));
        let mut sd = SecurityDescriptor::new();
        sd.set_owner(Some(Identity::from_str(SID::S_ADMINISTRATORS).unwrap()));
        sd.set_dacl(Some(dacl));

        let text = sd.to_string();
        assert_eq!(text, sd.describe());
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "<SecurityDescriptor>");
        assert_eq!(lines[1], " │ <SecurityDescriptorHeader>");
        assert_eq!(
            lines[4],
            " │  │ Control     : 0x8004 (SE_DACL_PRESENT|SE_SELF_RELATIVE)"
        );
        assert_eq!(lines[5], " │  │ OffsetOwner : 0x00000030");
        assert_eq!(lines[8], " │  │ OffsetDacl  : 0x00000014");
        assert!(text.contains(" │ <Owner>\n │  │ <Identity>\n"));
        assert!(!text.contains("<Group>"));
        assert!(text.contains(" │ <SystemAccessControlList is not present>\n"));
        assert!(text.contains(" │  │ <AccessControlEntry #1>\n"));
        assert!(text.contains(" │  │  │  │ Flags : 0x02 (CONTAINER_INHERIT)\n"));
        assert!(text.contains(" │  │  │  │ Name : 'Local System'\n"));
        assert_eq!(lines[lines.len() - 1], " └─");
    }

    #[test]
    fn test_describe_unencodable_descriptor() {
        // Too large for the 16-bit ACL size, but still rendered in full.
        let mut dacl = ACL::new(AclRevision::Nt4);
        for _ in 0..4000 {
            dacl.add_entry(ACE::new(
                AceFlags::new(),
                AceValue::AccessAllowed(AccessAce {
                    access_mask: AccessMask::from_raw(0x10000000),
                    identity: Identity::from_str(SID::S_ADMINISTRATORS).unwrap(),
                }),
            ));
        }
        let mut sd = SecurityDescriptor::new();
        sd.set_dacl(Some(dacl));
        assert!(sd.marshal().is_err());

        let text = sd.describe();
        assert!(text.contains(" │  │  │ AclSize  : 0x17708\n"));
        assert!(text.contains("<AccessControlEntry #4000>"));
        assert!(text.ends_with(" │  └─\n └─\n"));
    }
}
