//! binrw helpers shared by the security structures.

pub mod fields;
pub mod marshal;
pub mod pos_marker;

pub mod prelude {
    pub use super::fields::*;
    pub use super::marshal::Marshal;
    pub use super::pos_marker::PosMarker;
}
