//! Test helpers for the `ntsd` crates.
//!
//! The macros here generate `#[test]` functions that check binrw types
//! against hex-encoded byte vectors:
//! - [`test_binrw!`] checks both reading and writing.
//! - [`test_binrw_read!`] only checks reading.
//! - [`test_binrw_write!`] only checks writing.

pub use hex;
pub use pastey;

/// Decodes a hex string literal (whitespace is ignored) into a `Vec<u8>`.
#[macro_export]
macro_rules! hex_to_u8_array {
    ($hex:expr) => {{
        let hex_str: String = $hex.chars().filter(|c| !c.is_whitespace()).collect();
        $crate::hex::decode(hex_str).expect("test vector must be valid hex")
    }};
}

/// Generates a read test: `hex` is read as `Type` and compared against `value`.
#[macro_export]
macro_rules! test_binrw_read {
    (struct $type:ident => $name:ident { $($field:ident : $value:expr),* $(,)? } => $hex:expr) => {
        $crate::test_binrw_read! { $type => $name: $type { $($field: $value),* } => $hex }
    };
    (struct $type:ident { $($field:ident : $value:expr),* $(,)? } => $hex:expr) => {
        $crate::test_binrw_read! { $type: $type { $($field: $value),* } => $hex }
    };
    ($type:ty => $name:ident : $value:expr => $hex:expr) => {
        $crate::pastey::paste! {
            #[test]
            fn [<test_ $name:snake _read>]() {
                use ::binrw::{io::Cursor, prelude::*};
                let data = $crate::hex_to_u8_array! { $hex };
                let mut cursor = Cursor::new(data.as_slice());
                let value: $type = cursor.read_le().unwrap();
                assert_eq!(value, $value);
                assert_eq!(cursor.position() as usize, data.len(), "not all bytes were consumed");
            }
        }
    };
    ($type:ident : $value:expr => $hex:expr) => {
        $crate::test_binrw_read! { $type => $type: $value => $hex }
    };
}

/// Generates a write test: `value` is written and compared against `hex`.
#[macro_export]
macro_rules! test_binrw_write {
    (struct $type:ident => $name:ident { $($field:ident : $value:expr),* $(,)? } => $hex:expr) => {
        $crate::test_binrw_write! { $type => $name: $type { $($field: $value),* } => $hex }
    };
    (struct $type:ident { $($field:ident : $value:expr),* $(,)? } => $hex:expr) => {
        $crate::test_binrw_write! { $type: $type { $($field: $value),* } => $hex }
    };
    ($type:ty => $name:ident : $value:expr => $hex:expr) => {
        $crate::pastey::paste! {
            #[test]
            fn [<test_ $name:snake _write>]() {
                use ::binrw::{io::Cursor, prelude::*};
                let value: $type = $value;
                let mut cursor = Cursor::new(Vec::new());
                value.write_le(&mut cursor).unwrap();
                assert_eq!(cursor.into_inner(), $crate::hex_to_u8_array! { $hex });
            }
        }
    };
    ($type:ident : $value:expr => $hex:expr) => {
        $crate::test_binrw_write! { $type => $type: $value => $hex }
    };
}

/// Generates both a read and a write test for the same value and bytes.
#[macro_export]
macro_rules! test_binrw {
    ($($tt:tt)+) => {
        $crate::test_binrw_read! { $($tt)+ }
        $crate::test_binrw_write! { $($tt)+ }
    };
}
