/*!
Traits binding a key type to its validation, parsing, generation and
primitive construction logic.
*/

use rand::RngCore;

use crate::core::{
    crypto::{
        key::{KeyData, KeyFormat, KeyMaterial, MaterialKind},
        primitive::Primitive,
    },
    error::Result,
};
use crate::invalid_key_err;

/// Generates new key material for one key type
pub trait KeyFactory: Send + Sync {
    /// Check that a format can be used to generate keys
    fn validate_format(&self, format: &KeyFormat) -> Result<()>;

    /// Decode serialized format parameters
    fn parse_format(&self, bytes: &[u8]) -> Result<KeyFormat>;

    /// Generate key material, drawing all entropy from `rng`
    ///
    /// The output is a function of `format` and the bytes produced by
    /// `rng`, and always passes the owning manager's validation.
    fn create_key(&self, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial>;
}

/// Everything the registry knows about one key type
pub trait KeyManager: Send + Sync {
    /// Type identifier served by this manager
    fn key_type(&self) -> &str;

    /// Current manager version
    fn version(&self) -> u32;

    /// Kind of material this manager handles
    fn material_kind(&self) -> MaterialKind;

    /// Structurally validate key material
    fn validate(&self, key: &KeyMaterial) -> Result<()>;

    /// Decode serialized key material without validating it
    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial>;

    /// Build the primitive for valid key material
    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive>;

    /// Key generation logic of this type
    fn key_factory(&self) -> &dyn KeyFactory;

    /// Whether this manager serves `type_id`
    fn does_support(&self, type_id: &str) -> bool {
        self.key_type() == type_id
    }

    /// Derive the public key data of a private key
    fn public_key_data(&self, _key: &KeyMaterial) -> Result<KeyData> {
        invalid_key_err!("{} is not a private key type", self.key_type())
    }
}
