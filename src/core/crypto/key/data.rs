/*!
Serialized key material tagged with its key type.
*/

use bytes::Bytes;

use super::material::MaterialKind;

/// Serialized key material together with the type that can parse it
#[derive(Clone, PartialEq, Eq)]
pub struct KeyData {
    /// Type identifier of the manager owning the material
    pub type_id: String,
    /// Encoded key material
    pub value: Bytes,
    /// Kind of the encoded material
    pub material_kind: MaterialKind,
}

impl KeyData {
    /// Create new key data
    pub fn new(type_id: impl Into<String>, value: impl Into<Bytes>, material_kind: MaterialKind) -> Self {
        Self {
            type_id: type_id.into(),
            value: value.into(),
            material_kind,
        }
    }
}

impl std::fmt::Debug for KeyData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyData")
            .field("type_id", &self.type_id)
            .field("value_len", &self.value.len())
            .field("material_kind", &self.material_kind)
            .finish()
    }
}
