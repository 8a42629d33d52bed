//! MS-DTYP 2.4: security data types.

pub mod access_mask;
pub mod ace;
pub mod acl;
pub mod identity;
pub mod object_type;
pub mod security_descriptor;
pub mod sid;
pub mod well_known;

pub use access_mask::*;
pub use ace::*;
pub use acl::*;
pub use identity::*;
pub use object_type::*;
pub use security_descriptor::*;
pub use sid::*;
