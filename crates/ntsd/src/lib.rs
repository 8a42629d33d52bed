//! Windows NT security descriptors, as described in [MS-DTYP](<https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/cca27429-5689-4a16-b2b4-9325d93e4ba2>).
//!
//! Every wire structure implements [`binrw::BinRead`] and [`binrw::BinWrite`],
//! and through them [`Marshal`] for plain byte buffers:
//!
//! ```
//! use ntsd::{Marshal, SecurityDescriptor, SID};
//! use std::str::FromStr;
//!
//! let mut sd = SecurityDescriptor::new();
//! sd.set_owner(Some(SID::from_str(SID::S_ADMINISTRATORS)?.into()));
//! let bytes = sd.marshal()?;
//! let (parsed, consumed) = SecurityDescriptor::unmarshal(&bytes)?;
//! assert_eq!(consumed, bytes.len());
//! assert_eq!(parsed, sd);
//! # Ok::<(), ntsd::Error>(())
//! ```
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod binrw_util;
pub mod describe;
pub mod error;
pub mod extended_rights;
pub mod guid;
pub mod query;
pub mod security;

pub use binrw_util::marshal::Marshal;
pub use error::Error;
pub use extended_rights::{extended_right_guid, extended_right_name};
pub use guid::Guid;
pub use security::*;

pub type Result<T> = std::result::Result<T, Error>;
