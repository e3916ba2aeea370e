use std::sync::Arc;
use std::thread;

use keyreg::{
    ALL_CONFIG_V1, ErrorKind, KeyFactory, KeyFormat, KeyManager, KeyMaterial, KeyRegistry,
    MaterialKind, Primitive, Result, SIGNATURE_CONFIG_V1, type_ids,
    managers::{ChaCha20Poly1305KeyManager, Ed25519PrivateKeyManager, Ed25519PublicKeyManager},
    register_all,
};
use rand::{SeedableRng, rngs::StdRng};

/// A built-in manager reporting a different manager version
struct Versioned<M> {
    inner: M,
    version: u32,
}

impl<M: KeyManager> KeyManager for Versioned<M> {
    fn key_type(&self) -> &str {
        self.inner.key_type()
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn material_kind(&self) -> MaterialKind {
        self.inner.material_kind()
    }

    fn validate(&self, key: &KeyMaterial) -> Result<()> {
        self.inner.validate(key)
    }

    fn parse(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        self.inner.parse(bytes)
    }

    fn primitive(&self, key: &KeyMaterial) -> Result<Primitive> {
        self.inner.primitive(key)
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        self.inner.key_factory()
    }
}

fn versioned(version: u32) -> Versioned<ChaCha20Poly1305KeyManager> {
    Versioned {
        inner: ChaCha20Poly1305KeyManager::new(),
        version,
    }
}

#[test]
fn test_lookup_returns_registered_type() {
    let registry = Arc::new(KeyRegistry::new());
    register_all(&registry).unwrap();

    for type_id in registry.type_ids() {
        assert_eq!(registry.lookup(&type_id).unwrap().key_type(), type_id);
    }
    assert_eq!(registry.len(), ALL_CONFIG_V1.entries.len());
}

#[test]
fn test_no_downgrade() {
    let registry = KeyRegistry::new();
    registry.register(versioned(1), false).unwrap();

    let err = registry.register(versioned(0), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RegistrationConflict);

    let manager = registry.lookup(type_ids::CHACHA20_POLY1305).unwrap();
    assert_eq!(manager.version(), 1);
    assert!(!registry.is_new_key_allowed(type_ids::CHACHA20_POLY1305).unwrap());
}

#[test]
fn test_no_new_key_escalation_even_with_upgrade() {
    let registry = KeyRegistry::new();
    registry.register(versioned(0), false).unwrap();

    assert!(registry.register(versioned(1), true).is_err());
    assert_eq!(registry.lookup(type_ids::CHACHA20_POLY1305).unwrap().version(), 0);

    registry.register(versioned(1), false).unwrap();
    assert_eq!(registry.lookup(type_ids::CHACHA20_POLY1305).unwrap().version(), 1);
}

#[test]
fn test_new_key_forbidden_for_public_keys() {
    let registry = Arc::new(KeyRegistry::new());
    register_all(&registry).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let err = registry
        .new_key(type_ids::ED25519_PUBLIC, &KeyFormat::empty(), &mut rng)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NewKeyNotAllowed);

    // Public keys are obtained from private keys instead.
    let private = registry.new_key_data(type_ids::ED25519_PRIVATE, &[], &mut rng).unwrap();
    let public = registry.public_key_data(&private).unwrap();
    assert_eq!(public.type_id, type_ids::ED25519_PUBLIC);
}

#[test]
fn test_failed_batch_leaves_registry_untouched() {
    let registry = Arc::new(KeyRegistry::new());
    let public_v5 = Versioned {
        inner: Ed25519PublicKeyManager::new(),
        version: 5,
    };
    registry.register(public_v5, false).unwrap();
    let before = registry.type_ids();

    let managers: Vec<Arc<dyn KeyManager>> = vec![
        Arc::new(Ed25519PrivateKeyManager::new()),
        Arc::new(Ed25519PublicKeyManager::new()),
    ];
    let err = SIGNATURE_CONFIG_V1.register(&registry, &managers).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RegistrationConflict);
    assert_eq!(registry.type_ids(), before);

    // The AEAD rows come first in the combined config and must not stick either.
    let err = register_all(&registry).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::RegistrationConflict);
    assert_eq!(registry.type_ids(), before);
    assert_eq!(registry.lookup(type_ids::ED25519_PUBLIC).unwrap().version(), 5);
}

#[test]
fn test_repeated_registration_is_idempotent() {
    let registry = Arc::new(KeyRegistry::new());
    register_all(&registry).unwrap();
    register_all(&registry).unwrap();

    assert_eq!(registry.len(), ALL_CONFIG_V1.entries.len());
    assert!(registry.is_new_key_allowed(type_ids::ED25519_PRIVATE).unwrap());
    assert!(!registry.is_new_key_allowed(type_ids::ED25519_PUBLIC).unwrap());
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let registry = Arc::new(KeyRegistry::new());
    registry.register(Ed25519PrivateKeyManager::new(), true).unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                register_all(&registry).unwrap();
            }
        }));
    }
    for _ in 0..4 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                let manager = registry.lookup(type_ids::ED25519_PRIVATE).unwrap();
                assert_eq!(manager.key_type(), type_ids::ED25519_PRIVATE);
                assert!(registry.is_new_key_allowed(type_ids::ED25519_PRIVATE).unwrap());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), ALL_CONFIG_V1.entries.len());
}

#[test]
fn test_concurrent_upgrades_converge() {
    let registry = Arc::new(KeyRegistry::new());

    let handles: Vec<_> = (0..8u32)
        .map(|version| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                // Older versions may lose the race; that is a conflict, not a panic.
                let _ = registry.register(versioned(version), true);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.lookup(type_ids::CHACHA20_POLY1305).unwrap().version(), 7);
}
