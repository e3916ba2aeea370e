/*!
Key material, key formats and serialized key data.
*/

pub mod data;
pub mod format;
pub mod material;

pub use data::KeyData;
pub use format::KeyFormat;
pub use material::{KeyMaterial, MaterialKind};
