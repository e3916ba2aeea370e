/*!
# keyreg

A registry decoupling key type identifiers from the cryptographic
primitives that implement them, so applications can ask for "an AEAD for
this key" without knowing which algorithm backs it.

## Overview

- **Key managers** bind one type identifier to validation, parsing, key
  generation and primitive construction for that type
- **The registry** maps each type identifier to its single authoritative
  manager and refuses downgrades and new-key permission escalation
- **Catalogues** resolve `(type identifier, primitive family, minimum
  version)` requests, matching family names case-insensitively
- Built-in managers for ChaCha20-Poly1305, XChaCha20-Poly1305 and Ed25519

## Example

```
use std::sync::Arc;
use keyreg::{KeyRegistry, register_all, type_ids, families};
use rand::{SeedableRng, rngs::StdRng};

let registry = Arc::new(KeyRegistry::new());
let catalogues = register_all(&registry).unwrap();

let mut rng = StdRng::seed_from_u64(0);
let key = registry.new_key_data(type_ids::CHACHA20_POLY1305, &[], &mut rng).unwrap();

let aead = catalogues.aead
    .primitive(families::AEAD, 0, &key).unwrap()
    .into_aead().unwrap();
let ciphertext = aead.encrypt(b"hello", b"").unwrap();
assert_eq!(aead.decrypt(&ciphertext, b"").unwrap(), b"hello");
```
*/

// Core components
pub mod core;

// Re-export commonly used types for convenience
pub use self::core::error::{CryptoError, Error, ErrorKind, Result};
pub use self::core::constants::{MANAGER_VERSION, families, sizes, type_ids};
pub use self::core::crypto::{
    Aead, Catalogue, CatalogueEntry, CatalogueRecord, Catalogues, FamilyName, KeyData, KeyFactory,
    KeyFormat, KeyManager, KeyMaterial, KeyRegistry, MaterialKind, Primitive, PublicKeySign,
    PublicKeyVerify, RegistryConfig, register_all,
};
pub use self::core::crypto::config::{AEAD_CONFIG_V1, ALL_CONFIG_V1, SIGNATURE_CONFIG_V1};

// Re-export the built-in key managers
pub mod managers {
    pub use crate::core::crypto::algorithms::signatures::{
        Ed25519PrivateKeyManager, Ed25519PublicKeyManager, Ed25519Sign, Ed25519Verify,
    };
    pub use crate::core::crypto::algorithms::symmetric::{
        ChaCha20Poly1305Aead, ChaCha20Poly1305KeyManager, XChaCha20Poly1305Aead,
        XChaCha20Poly1305KeyManager,
    };
}
