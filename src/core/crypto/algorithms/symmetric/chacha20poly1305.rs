/*!
ChaCha20-Poly1305 key manager.

Keys are 32 random bytes. The AEAD primitive prefixes every ciphertext
with a fresh 12-byte nonce.
*/

use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
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

/// ChaCha20-Poly1305 AEAD bound to one key
pub struct ChaCha20Poly1305Aead {
    cipher: ChaCha20Poly1305,
}

impl ChaCha20Poly1305Aead {
    /// Create a new ChaCha20-Poly1305 cipher
    pub fn new(key: &[u8; chacha::KEY_SIZE]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(key)),
        }
    }
}

impl Aead for ChaCha20Poly1305Aead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; chacha::NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);

        let payload = Payload { msg: plaintext, aad: associated_data };
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), payload)
            .map_err(|_e| CryptoError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(chacha::NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < chacha::NONCE_SIZE + chacha::TAG_SIZE {
            return crypto_err!(CryptoError::InvalidLength);
        }

        let (nonce, body) = ciphertext.split_at(chacha::NONCE_SIZE);
        let payload = Payload { msg: body, aad: associated_data };
        self.cipher
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_e| CryptoError::DecryptionFailed.into())
    }
}

/// Generates ChaCha20-Poly1305 keys
#[derive(Debug, Default)]
pub struct ChaCha20Poly1305KeyFactory;

impl KeyFactory for ChaCha20Poly1305KeyFactory {
    fn validate_format(&self, format: &KeyFormat) -> Result<()> {
        let key_size = format.key_size().map_err(|_e| {
            Error::InvalidFormat(format!(
                "ChaCha20Poly1305 format must be a {}-byte key size, got {} bytes",
                SYMMETRIC_FORMAT_SIZE,
                format.params().len()
            ))
        })?;
        if key_size as usize != chacha::KEY_SIZE {
            return invalid_format_err!(
                "ChaCha20Poly1305 keys are {} bytes, format asks for {}",
                chacha::KEY_SIZE,
                key_size
            );
        }
        Ok(())
    }

    fn parse_format(&self, bytes: &[u8]) -> Result<KeyFormat> {
        // An empty format selects the only supported key size.
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

/// Key manager for ChaCha20-Poly1305 keys
#[derive(Debug, Default)]
pub struct ChaCha20Poly1305KeyManager {
    factory: ChaCha20Poly1305KeyFactory,
}

impl ChaCha20Poly1305KeyManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyManager for ChaCha20Poly1305KeyManager {
    fn key_type(&self) -> &str {
        type_ids::CHACHA20_POLY1305
    }

    fn version(&self) -> u32 {
        MANAGER_VERSION
    }

    fn material_kind(&self) -> MaterialKind {
        MaterialKind::Symmetric
    }

    fn validate(&self, key: &KeyMaterial) -> Result<()> {
        validators::validate_version(key.version(), self.version())?;
        validators::validate_key_size("ChaCha20Poly1305Key", key.payload().len(), chacha::KEY_SIZE)
    }

    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        KeyMaterial::from_bytes(bytes, MaterialKind::Symmetric)
    }

    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive> {
        self.validate(key)?;

        let mut bytes = [0u8; chacha::KEY_SIZE];
        bytes.copy_from_slice(key.payload());
        Ok(Primitive::Aead(Box::new(ChaCha20Poly1305Aead::new(&bytes))))
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{Error, ErrorKind};
    use rand::{SeedableRng, rngs::StdRng};

    fn new_key(seed: u64) -> KeyMaterial {
        let mut rng = StdRng::seed_from_u64(seed);
        ChaCha20Poly1305KeyFactory
            .create_key(&KeyFormat::symmetric(32), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_validate_key_length() {
        let manager = ChaCha20Poly1305KeyManager::new();
        for len in [0, 16, 31, 33, 64] {
            let key = KeyMaterial::new(0, vec![0u8; len], MaterialKind::Symmetric);
            assert_eq!(manager.validate(&key).unwrap_err().kind(), ErrorKind::InvalidKey);
        }
        let key = KeyMaterial::new(0, vec![0u8; 32], MaterialKind::Symmetric);
        assert!(manager.validate(&key).is_ok());
    }

    #[test]
    fn test_validate_rejects_future_version() {
        let manager = ChaCha20Poly1305KeyManager::new();
        let key = KeyMaterial::new(1, vec![0u8; 32], MaterialKind::Symmetric);
        assert!(manager.validate(&key).is_err());
        assert!(manager.primitive(&key).is_err());
    }

    #[test]
    fn test_create_key_is_deterministic() {
        assert_eq!(new_key(42), new_key(42));
        assert_ne!(new_key(42), new_key(43));
        assert!(ChaCha20Poly1305KeyManager::new().validate(&new_key(1)).is_ok());
    }

    #[test]
    fn test_format_handling() {
        let factory = ChaCha20Poly1305KeyFactory;
        assert_eq!(factory.parse_format(&[]).unwrap(), KeyFormat::symmetric(32));
        assert!(factory.parse_format(&[0, 0, 32]).is_err());

        let err = factory.validate_format(&KeyFormat::symmetric(16)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);

        let mut rng = StdRng::seed_from_u64(0);
        assert!(factory.create_key(&KeyFormat::symmetric(16), &mut rng).is_err());
    }

    #[test]
    fn test_validate_malformed_format() {
        let factory = ChaCha20Poly1305KeyFactory;
        for len in [0, 3, 5] {
            let err = factory.validate_format(&KeyFormat::new(vec![0u8; len])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }

        // Parsing the same bytes is a parse failure.
        assert_eq!(factory.parse_format(&[0u8; 5]).unwrap_err().kind(), ErrorKind::ParseError);

        let mut rng = StdRng::seed_from_u64(0);
        let err = factory.create_key(&KeyFormat::new(vec![0u8; 5]), &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_encrypt_decrypt() {
        let manager = ChaCha20Poly1305KeyManager::new();
        let aead = manager.primitive(&new_key(5)).unwrap().into_aead().unwrap();

        let ciphertext = aead.encrypt(b"This is a test message", b"header").unwrap();
        assert_eq!(ciphertext.len(), chacha::NONCE_SIZE + 22 + chacha::TAG_SIZE);
        assert_eq!(aead.decrypt(&ciphertext, b"header").unwrap(), b"This is a test message");

        // Fresh nonces make repeated encryptions differ
        assert_ne!(ciphertext, aead.encrypt(b"This is a test message", b"header").unwrap());
    }

    #[test]
    fn test_tampered_data() {
        let manager = ChaCha20Poly1305KeyManager::new();
        let aead = manager.primitive(&new_key(5)).unwrap().into_aead().unwrap();

        let mut ciphertext = aead.encrypt(b"payload", b"").unwrap();
        ciphertext[chacha::NONCE_SIZE] ^= 0xFF;
        assert_eq!(
            aead.decrypt(&ciphertext, b"").unwrap_err(),
            Error::Crypto(CryptoError::DecryptionFailed)
        );

        let ciphertext = aead.encrypt(b"payload", b"aad").unwrap();
        assert!(aead.decrypt(&ciphertext, b"other").is_err());
        assert_eq!(
            aead.decrypt(&ciphertext[..10], b"aad").unwrap_err(),
            Error::Crypto(CryptoError::InvalidLength)
        );
    }
}
