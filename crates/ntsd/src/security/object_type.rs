//! Object-type record of object ACEs (MS-DTYP 2.4.4.3).

use binrw::{Endian, prelude::*};
use modular_bitfield::prelude::*;
use std::io::{Read, Seek, Write};

use crate::binrw_util::prelude::*;
use crate::{Error, Guid};

/// Flags of an object ACE, telling which GUIDs follow.
#[bitfield]
#[derive(BinWrite, BinRead, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[bw(map = |&x| Self::into_bytes(x))]
#[br(map = Self::from_bytes)]
pub struct ObjectAceFlags {
    /// `ACE_OBJECT_TYPE_PRESENT`
    pub object_type_present: bool,
    /// `ACE_INHERITED_OBJECT_TYPE_PRESENT`
    pub inherited_object_type_present: bool,
    #[skip]
    __: B30,
}

bitfield_raw!(ObjectAceFlags: u32);

/// The flags and optional GUIDs between the mask and the SID of an object ACE.
///
/// `flags` decide which GUIDs are on the wire. The setters keep the two in sync;
/// writing a record whose flag is set but whose GUID is missing fails.
#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    pub flags: ObjectAceFlags,
    pub object_type: Option<Guid>,
    pub inherited_object_type: Option<Guid>,
}

impl ObjectType {
    pub fn new(object_type: Option<Guid>, inherited_object_type: Option<Guid>) -> Self {
        let mut record = Self::default();
        record.set_object_type(object_type);
        record.set_inherited_object_type(inherited_object_type);
        record
    }

    /// The object type GUID, if flagged present.
    pub fn object_type(&self) -> Option<&Guid> {
        self.object_type
            .as_ref()
            .filter(|_| self.flags.object_type_present())
    }

    /// The inherited object type GUID, if flagged present.
    pub fn inherited_object_type(&self) -> Option<&Guid> {
        self.inherited_object_type
            .as_ref()
            .filter(|_| self.flags.inherited_object_type_present())
    }

    pub fn set_object_type(&mut self, guid: Option<Guid>) {
        self.flags.set_object_type_present(guid.is_some());
        self.object_type = guid;
    }

    pub fn set_inherited_object_type(&mut self, guid: Option<Guid>) {
        self.flags.set_inherited_object_type_present(guid.is_some());
        self.inherited_object_type = guid;
    }

    /// The serialized length.
    pub fn size(&self) -> usize {
        let mut size = 4;
        if self.flags.object_type_present() {
            size += Guid::SIZE;
        }
        if self.flags.inherited_object_type_present() {
            size += Guid::SIZE;
        }
        size
    }
}

/// Flags must match, and each GUID flagged present must match.
/// GUIDs that are not flagged present are not compared.
impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.object_type() == other.object_type()
            && self.inherited_object_type() == other.inherited_object_type()
    }
}

impl Eq for ObjectType {}

impl BinRead for ObjectType {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        ensure_remaining(reader, 4)?;
        let flags = ObjectAceFlags::read_options(reader, endian, ())?;
        let object_type = match flags.object_type_present() {
            true => Some(read_field(reader, endian, "object_type")?),
            false => None,
        };
        let inherited_object_type = match flags.inherited_object_type_present() {
            true => Some(read_field(reader, endian, "inherited_object_type")?),
            false => None,
        };
        Ok(Self {
            flags,
            object_type,
            inherited_object_type,
        })
    }
}

impl BinWrite for ObjectType {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        self.flags.write_options(writer, endian, ())?;
        for (present, guid, field) in [
            (
                self.flags.object_type_present(),
                &self.object_type,
                "object_type",
            ),
            (
                self.flags.inherited_object_type_present(),
                &self.inherited_object_type,
                "inherited_object_type",
            ),
        ] {
            if !present {
                continue;
            }
            match guid {
                Some(guid) => guid.write_options(writer, endian, ())?,
                None => {
                    return Err(custom_error(
                        writer,
                        Error::InvalidValue {
                            field,
                            reason: "flagged present but no GUID is set".to_string(),
                        },
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntsd_tests::*;
    use std::str::FromStr;

    fn user_class() -> Guid {
        Guid::from_str("bf967aba-0de6-11d0-a285-00aa003049e2").unwrap()
    }

    fn phone_attribute() -> Guid {
        Guid::from_str("f30e3bbe-9ff0-11d1-b603-0000f80367c1").unwrap()
    }

    test_binrw! {
        ObjectType => none: ObjectType::new(None, None) => "00000000"
    }

    test_binrw! {
        ObjectType => object_type_only: ObjectType::new(Some(phone_attribute()), None)
            => "01000000be3b0ef3f09fd111b6030000f80367c1"
    }

    test_binrw! {
        ObjectType => inherited_only: ObjectType::new(None, Some(user_class()))
            => "02000000ba7a96bfe60dd011a28500aa003049e2"
    }

    test_binrw! {
        ObjectType => both: ObjectType::new(Some(phone_attribute()), Some(user_class()))
            => "03000000be3b0ef3f09fd111b6030000f80367c1ba7a96bfe60dd011a28500aa003049e2"
    }

    #[test]
    fn test_flags_gate_guids() {
        let mut record = ObjectType::new(Some(phone_attribute()), None);
        assert_eq!(record.size(), 20);
        record.set_object_type(None);
        assert!(!record.flags.object_type_present());
        assert_eq!(record.size(), 4);
        assert_eq!(record.marshal().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_equality_skips_absent_guids() {
        let a = ObjectType::new(None, Some(user_class()));
        let mut b = a.clone();
        // Not flagged present, so not compared.
        b.object_type = Some(phone_attribute());
        assert_eq!(a, b);

        b.set_object_type(Some(phone_attribute()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_flag_without_guid_fails_to_write() {
        let mut record = ObjectType::default();
        record.flags.set_inherited_object_type_present(true);
        let err = record.marshal().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "inherited_object_type",
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_guid() {
        let data = hex_to_u8_array! { "01000000be3b0ef3f09f" };
        let err = ObjectType::unmarshal(&data).unwrap_err();
        assert_eq!(err.field_path(), vec!["object_type"]);
        assert!(matches!(
            err.root_cause(),
            Error::TruncatedInput {
                needed: 16,
                available: 6
            }
        ));
    }

    #[test]
    fn test_reserved_flag_bits_round_trip() {
        let data = hex_to_u8_array! { "04000000" };
        let (record, _) = ObjectType::unmarshal(&data).unwrap();
        assert_eq!(record.flags.raw(), 4);
        assert_eq!(record.marshal().unwrap(), data);
    }
}
