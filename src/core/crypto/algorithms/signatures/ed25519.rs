/*!
Ed25519 key managers.

Private keys are the 32-byte secret seed; public keys are the 32-byte
compressed point. The private key manager derives public key data for
the verifying key type.
*/

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;

use crate::core::{
    constants::{MANAGER_VERSION, sizes::ed25519, type_ids},
    crypto::{
        key::{KeyData, KeyFormat, KeyMaterial, MaterialKind},
        primitive::Primitive,
        traits::{KeyFactory, KeyManager, PublicKeySign, PublicKeyVerify},
        validators,
    },
    error::{CryptoError, Error, Result},
};
use crate::{crypto_err, invalid_format_err, parse_err};

/// Ed25519 signer
pub struct Ed25519Sign {
    key: SigningKey,
}

impl Ed25519Sign {
    /// Create a signer from a 32-byte secret seed
    pub fn new(seed: &[u8; ed25519::SECRET_KEY_SIZE]) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
        }
    }
}

impl PublicKeySign for Ed25519Sign {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.key.sign(data).to_bytes().to_vec())
    }
}

/// Ed25519 verifier
pub struct Ed25519Verify {
    key: VerifyingKey,
}

impl Ed25519Verify {
    /// Create a verifier from a compressed public key
    ///
    /// Fails with [`Error::InvalidKey`] if the bytes are not a curve point.
    pub fn new(public_key: &[u8; ed25519::PUBLIC_KEY_SIZE]) -> Result<Self> {
        let key = VerifyingKey::from_bytes(public_key)
            .map_err(|_e| Error::InvalidKey("Ed25519PublicKey is not a valid curve point".into()))?;
        Ok(Self { key })
    }
}

impl PublicKeyVerify for Ed25519Verify {
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        let bytes: [u8; ed25519::SIGNATURE_SIZE] = match signature.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return crypto_err!(CryptoError::InvalidLength),
        };
        self.key
            .verify(data, &Signature::from_bytes(&bytes))
            .map_err(|_e| CryptoError::SignatureVerificationFailed.into())
    }
}

// Both Ed25519 factories take an empty format.
fn check_empty_format(format: &KeyFormat) -> Result<()> {
    if !format.is_empty() {
        return invalid_format_err!("Ed25519 key formats carry no parameters");
    }
    Ok(())
}

fn parse_empty_format(bytes: &[u8]) -> Result<KeyFormat> {
    if !bytes.is_empty() {
        return parse_err!("Ed25519 key format must be empty, got {} bytes", bytes.len());
    }
    Ok(KeyFormat::empty())
}

fn draw_seed(rng: &mut dyn RngCore) -> [u8; ed25519::SECRET_KEY_SIZE] {
    let mut seed = [0u8; ed25519::SECRET_KEY_SIZE];
    rng.fill_bytes(&mut seed);
    seed
}

fn public_key_bytes(seed: &[u8; ed25519::SECRET_KEY_SIZE]) -> [u8; ed25519::PUBLIC_KEY_SIZE] {
    SigningKey::from_bytes(seed).verifying_key().to_bytes()
}

/// Generates Ed25519 private keys
#[derive(Debug, Default)]
pub struct Ed25519PrivateKeyFactory;

impl KeyFactory for Ed25519PrivateKeyFactory {
    fn validate_format(&self, format: &KeyFormat) -> Result<()> {
        check_empty_format(format)
    }

    fn parse_format(&self, bytes: &[u8]) -> Result<KeyFormat> {
        parse_empty_format(bytes)
    }

    fn create_key(&self, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial> {
        check_empty_format(format)?;
        let seed = draw_seed(rng);
        Ok(KeyMaterial::new(MANAGER_VERSION, seed.to_vec(), MaterialKind::AsymmetricPrivate))
    }
}

/// Key manager for Ed25519 private keys
#[derive(Debug, Default)]
pub struct Ed25519PrivateKeyManager {
    factory: Ed25519PrivateKeyFactory,
}

impl Ed25519PrivateKeyManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self::default()
    }

    fn seed(&self, key: &KeyMaterial) -> Result<[u8; ed25519::SECRET_KEY_SIZE]> {
        self.validate(key)?;
        let mut seed = [0u8; ed25519::SECRET_KEY_SIZE];
        seed.copy_from_slice(key.payload());
        Ok(seed)
    }
}

impl KeyManager for Ed25519PrivateKeyManager {
    fn key_type(&self) -> &str {
        type_ids::ED25519_PRIVATE
    }

    fn version(&self) -> u32 {
        MANAGER_VERSION
    }

    fn material_kind(&self) -> MaterialKind {
        MaterialKind::AsymmetricPrivate
    }

    fn validate(&self, key: &KeyMaterial) -> Result<()> {
        validators::validate_version(key.version(), self.version())?;
        validators::validate_key_size("Ed25519PrivateKey", key.payload().len(), ed25519::SECRET_KEY_SIZE)
    }

    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        KeyMaterial::from_bytes(bytes, MaterialKind::AsymmetricPrivate)
    }

    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive> {
        let seed = self.seed(key)?;
        Ok(Primitive::PublicKeySign(Box::new(Ed25519Sign::new(&seed))))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.factory
    }

    fn public_key_data(&self, key: &KeyMaterial) -> Result<KeyData> {
        let seed = self.seed(key)?;
        let public = KeyMaterial::new(
            MANAGER_VERSION,
            public_key_bytes(&seed).to_vec(),
            MaterialKind::AsymmetricPublic,
        );
        Ok(KeyData::new(type_ids::ED25519_PUBLIC, public.to_bytes()?, MaterialKind::AsymmetricPublic))
    }
}

/// Generates Ed25519 public keys from a freshly drawn seed
///
/// The private half is discarded, so this is only useful for tests; the
/// built-in configuration forbids new public keys.
#[derive(Debug, Default)]
pub struct Ed25519PublicKeyFactory;

impl KeyFactory for Ed25519PublicKeyFactory {
    fn validate_format(&self, format: &KeyFormat) -> Result<()> {
        check_empty_format(format)
    }

    fn parse_format(&self, bytes: &[u8]) -> Result<KeyFormat> {
        parse_empty_format(bytes)
    }

    fn create_key(&self, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial> {
        check_empty_format(format)?;
        let seed = draw_seed(rng);
        Ok(KeyMaterial::new(
            MANAGER_VERSION,
            public_key_bytes(&seed).to_vec(),
            MaterialKind::AsymmetricPublic,
        ))
    }
}

/// Key manager for Ed25519 public keys
#[derive(Debug, Default)]
pub struct Ed25519PublicKeyManager {
    factory: Ed25519PublicKeyFactory,
}

impl Ed25519PublicKeyManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyManager for Ed25519PublicKeyManager {
    fn key_type(&self) -> &str {
        type_ids::ED25519_PUBLIC
    }

    fn version(&self) -> u32 {
        MANAGER_VERSION
    }

    fn material_kind(&self) -> MaterialKind {
        MaterialKind::AsymmetricPublic
    }

    fn validate(&self, key: &KeyMaterial) -> Result<()> {
        validators::validate_version(key.version(), self.version())?;
        validators::validate_key_size("Ed25519PublicKey", key.payload().len(), ed25519::PUBLIC_KEY_SIZE)
    }

    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        KeyMaterial::from_bytes(bytes, MaterialKind::AsymmetricPublic)
    }

    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive> {
        self.validate(key)?;

        let mut bytes = [0u8; ed25519::PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(key.payload());
        Ok(Primitive::PublicKeyVerify(Box::new(Ed25519Verify::new(&bytes)?)))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.factory
    }
}
