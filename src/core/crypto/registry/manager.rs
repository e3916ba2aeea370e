/*!
Registry manager for key types.

The registry maps every type identifier to the single authoritative key
manager for that type, together with a flag saying whether new keys of
that type may be generated. Registration only ever upgrades a record:
the manager version may not go down, and a type that forbids new keys
may not be re-registered to allow them.
*/

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};
use rand::RngCore;

use crate::core::{
    crypto::{
        key::{KeyData, KeyFormat, KeyMaterial},
        primitive::Primitive,
        traits::KeyManager,
    },
    error::{Error, Result},
};

/// Installed manager and its new-key permission
#[derive(Clone)]
struct RegistryRecord {
    manager: Arc<dyn KeyManager>,
    new_key_allowed: bool,
}

/// Registry of key managers, keyed by type identifier
///
/// A registry is shared between threads behind an `Arc`. Lookups take a
/// read lock only; a registration swaps the whole record in under the
/// write lock, so readers never see a manager paired with a stale flag.
#[derive(Default)]
pub struct KeyRegistry {
    records: RwLock<HashMap<String, RegistryRecord>>,
}

impl KeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // Records are replaced whole, so a poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, RegistryRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, RegistryRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a key manager
    pub fn register<M>(&self, manager: M, new_key_allowed: bool) -> Result<()>
    where
        M: KeyManager + 'static,
    {
        self.register_shared(Arc::new(manager), new_key_allowed)
    }

    /// Register an already shared key manager
    ///
    /// Fails with [`Error::RegistrationConflict`] if the manager is older
    /// than the installed one, or if the installed record forbids new keys
    /// and this call would allow them. A failed call leaves the registry
    /// untouched.
    pub fn register_shared(&self, manager: Arc<dyn KeyManager>, new_key_allowed: bool) -> Result<()> {
        self.register_batch(&[(manager, new_key_allowed)])
    }

    /// Register several managers under one write lock
    ///
    /// Each pair is checked against the installed record and against the
    /// earlier pairs of the batch, with the same rules as
    /// [`register_shared`](Self::register_shared). Nothing is installed
    /// unless every pair passes.
    pub fn register_batch(&self, batch: &[(Arc<dyn KeyManager>, bool)]) -> Result<()> {
        let mut records = self.write();
        let mut staged: HashMap<String, RegistryRecord> = HashMap::new();

        for (manager, new_key_allowed) in batch {
            let type_id = manager.key_type();
            let existing = staged.get(type_id).or_else(|| records.get(type_id));
            check_replacement(existing, &**manager, *new_key_allowed)?;

            staged.insert(
                type_id.to_string(),
                RegistryRecord {
                    manager: Arc::clone(manager),
                    new_key_allowed: *new_key_allowed,
                },
            );
        }

        for (type_id, record) in staged {
            debug!(
                "registered key type {} (version {}, new keys allowed: {})",
                type_id,
                record.manager.version(),
                record.new_key_allowed
            );
            records.insert(type_id, record);
        }
        Ok(())
    }

    /// Get the manager for a type identifier
    pub fn lookup(&self, type_id: &str) -> Result<Arc<dyn KeyManager>> {
        trace!("looking up key type {}", type_id);
        self.read()
            .get(type_id)
            .map(|record| Arc::clone(&record.manager))
            .ok_or_else(|| Error::UnknownKeyType {
                type_id: type_id.to_string(),
            })
    }

    /// Whether new keys of a type may be generated
    pub fn is_new_key_allowed(&self, type_id: &str) -> Result<bool> {
        self.read()
            .get(type_id)
            .map(|record| record.new_key_allowed)
            .ok_or_else(|| Error::UnknownKeyType {
                type_id: type_id.to_string(),
            })
    }

    /// Whether a manager is registered for a type identifier
    pub fn contains(&self, type_id: &str) -> bool {
        self.read().contains_key(type_id)
    }

    /// Registered type identifiers, sorted
    pub fn type_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered key types
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no key type is registered
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Snapshot the record so key generation runs without holding the lock.
    fn record(&self, type_id: &str) -> Result<RegistryRecord> {
        self.read()
            .get(type_id)
            .cloned()
            .ok_or_else(|| Error::UnknownKeyType {
                type_id: type_id.to_string(),
            })
    }

    /// Generate new key material of a registered type
    pub fn new_key(&self, type_id: &str, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial> {
        let record = self.record(type_id)?;
        generate(&record, format, rng)
    }

    /// Generate new serialized key data from serialized format parameters
    ///
    /// The format is parsed and the key created by the same manager, even if
    /// the type is upgraded concurrently.
    pub fn new_key_data(&self, type_id: &str, format: &[u8], rng: &mut dyn RngCore) -> Result<KeyData> {
        let record = self.record(type_id)?;
        let format = record.manager.key_factory().parse_format(format)?;
        let key = generate(&record, &format, rng)?;

        Ok(KeyData::new(type_id, key.to_bytes()?, record.manager.material_kind()))
    }

    /// Parse, validate and build the primitive for serialized key data
    pub fn primitive(&self, key_data: &KeyData) -> Result<Primitive> {
        let manager = self.lookup(&key_data.type_id)?;
        let key = manager.parse(&key_data.value)?;
        manager.validate(&key)?;
        manager.primitive(&key)
    }

    /// Derive public key data from private key data
    pub fn public_key_data(&self, key_data: &KeyData) -> Result<KeyData> {
        let manager = self.lookup(&key_data.type_id)?;
        let key = manager.parse(&key_data.value)?;
        manager.validate(&key)?;
        manager.public_key_data(&key)
    }
}

// Registration rules for replacing `existing` with `manager`.
fn check_replacement(existing: Option<&RegistryRecord>, manager: &dyn KeyManager, new_key_allowed: bool) -> Result<()> {
    let Some(existing) = existing else {
        return Ok(());
    };

    let type_id = manager.key_type();
    let installed = existing.manager.version();
    if manager.version() < installed {
        warn!(
            "rejected downgrade of key type {} from version {} to {}",
            type_id,
            installed,
            manager.version()
        );
        return Err(Error::conflict(
            type_id,
            format!(
                "cannot replace manager version {} with older version {}",
                installed,
                manager.version()
            ),
        ));
    }
    if !existing.new_key_allowed && new_key_allowed {
        warn!("rejected enabling new keys for key type {}", type_id);
        return Err(Error::conflict(
            type_id,
            "new keys are forbidden for this key type and cannot be re-enabled",
        ));
    }
    Ok(())
}

fn generate(record: &RegistryRecord, format: &KeyFormat, rng: &mut dyn RngCore) -> Result<KeyMaterial> {
    let type_id = record.manager.key_type();
    if !record.new_key_allowed {
        warn!("refused to generate a new key of type {}", type_id);
        return Err(Error::NewKeyNotAllowed {
            type_id: type_id.to_string(),
        });
    }

    let factory = record.manager.key_factory();
    factory.validate_format(format)?;
    factory.create_key(format, rng)
}
