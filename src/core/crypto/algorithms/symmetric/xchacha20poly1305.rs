/*!
XChaCha20-Poly1305 key manager.

Same key layout as ChaCha20-Poly1305, with a 24-byte nonce that is safe
to choose at random for very large numbers of messages.
*/

use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead as AeadCipher, KeyInit, Payload},
};
use rand::RngCore;

use crate::core::{
    constants::{
        MANAGER_VERSION,
        sizes::{SYMMETRIC_FORMAT_SIZE, chacha},
        type_ids,
    },
    crypto::{
        key::{KeyFormat, KeyMaterial, MaterialKind},
        primitive::Primitive,
        traits::{Aead, KeyFactory, KeyManager},
        validators,
    },
    error::{CryptoError, Error, Result},
};
use crate::{crypto_err, invalid_format_err};

/// XChaCha20-Poly1305 AEAD bound to one key
pub struct XChaCha20Poly1305Aead {
    cipher: XChaCha20Poly1305,
}

impl XChaCha20Poly1305Aead {
    /// Create a new XChaCha20-Poly1305 cipher
    pub fn new(key: &[u8; chacha::KEY_SIZE]) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(key)),
        }
    }
}

impl Aead for XChaCha20Poly1305Aead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; chacha::XNONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), Payload { msg: plaintext, aad: associated_data })
            .map_err(|_e| CryptoError::EncryptionFailed)?;

        let mut out = nonce.to_vec();
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < chacha::XNONCE_SIZE + chacha::TAG_SIZE {
            return crypto_err!(CryptoError::InvalidLength);
        }

        let (nonce, body) = ciphertext.split_at(chacha::XNONCE_SIZE);
        self.cipher
            .decrypt(XNonce::from_slice(nonce), Payload { msg: body, aad: associated_data })
            .map_err(|_e| CryptoError::DecryptionFailed.into())
    }
}

/// Generates XChaCha20-Poly1305 keys
#[derive(Debug, Default)]
pub struct XChaCha20Poly1305KeyFactory;

impl KeyFactory for XChaCha20Poly1305KeyFactory {
    fn validate_format(&self, format: &KeyFormat) -> Result<()> {
        let key_size = format.key_size().map_err(|_e| {
            Error::InvalidFormat(format!(
                "XChaCha20Poly1305 format must be a {}-byte key size, got {} bytes",
                SYMMETRIC_FORMAT_SIZE,
                format.params().len()
            ))
        })?;
        if key_size as usize != chacha::KEY_SIZE {
            return invalid_format_err!(
                "XChaCha20Poly1305 keys are {} bytes, format asks for {}",
                chacha::KEY_SIZE,
                key_size
            );
        }
        Ok(())
    }

    fn parse_format(&self, bytes: &[u8]) -> Result<KeyFormat> {
        if bytes.is_empty() {
            return Ok(KeyFormat::symmetric(chacha::KEY_SIZE as u32));
        }
        let format = KeyFormat::new(bytes.to_vec());
        format.key_size()?;
        Ok(format)
    }

    fn create_key(&self, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial> {
        self.validate_format(format)?;

        let mut key = [0u8; chacha::KEY_SIZE];
        rng.fill_bytes(&mut key);
        Ok(KeyMaterial::new(MANAGER_VERSION, key.to_vec(), MaterialKind::Symmetric))
    }
}

/// Key manager for XChaCha20-Poly1305 keys
#[derive(Debug, Default)]
pub struct XChaCha20Poly1305KeyManager {
    factory: XChaCha20Poly1305KeyFactory,
}

impl XChaCha20Poly1305KeyManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyManager for XChaCha20Poly1305KeyManager {
    fn key_type(&self) -> &str {
        type_ids::XCHACHA20_POLY1305
    }

    fn version(&self) -> u32 {
        MANAGER_VERSION
    }

    fn material_kind(&self) -> MaterialKind {
        MaterialKind::Symmetric
    }

    fn validate(&self, key: &KeyMaterial) -> Result<()> {
        validators::validate_version(key.version(), self.version())?;
        validators::validate_key_size("XChaCha20Poly1305Key", key.payload().len(), chacha::KEY_SIZE)
    }

    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        KeyMaterial::from_bytes(bytes, MaterialKind::Symmetric)
    }

    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive> {
        self.validate(key)?;

        let mut bytes = [0u8; chacha::KEY_SIZE];
        bytes.copy_from_slice(key.payload());
        Ok(Primitive::Aead(Box::new(XChaCha20Poly1305Aead::new(&bytes))))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.factory
    }
}
