/*!
Primitive catalogues.

A catalogue is a directory of key types for one group of primitive
families (for example "signature", serving both signing and verifying).
It resolves a `(type identifier, family, minimum version)` request to the
registry's manager for that type, failing in a fixed order:

1. the type has no catalogue entry ([`Error::UnsupportedKeyType`]),
2. the entry serves a different family ([`Error::UnsupportedFamily`]),
3. the registered manager is too old ([`Error::VersionTooOld`]).

Family names are matched case-insensitively.
*/

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, trace};

use crate::core::{
    crypto::{
        config::{CatalogueEntry, RegistryConfig},
        key::KeyData,
        primitive::Primitive,
        registry::KeyRegistry,
        traits::KeyManager,
    },
    error::{Error, Result},
};

/// Primitive family name in canonical lowercase form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FamilyName(String);

impl FamilyName {
    /// Normalize a family name
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Canonical form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FamilyName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved catalogue row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueRecord {
    /// Type identifier
    pub type_id: String,
    /// Family served by the type
    pub family: FamilyName,
    /// Minimum manager version the row was declared with
    pub manager_version: u32,
}

/// Per-family directory of key managers backed by a registry
pub struct Catalogue {
    name: String,
    registry: Arc<KeyRegistry>,
    entries: RwLock<HashMap<String, CatalogueRecord>>,
}

impl Catalogue {
    /// Create an empty catalogue over `registry`
    pub fn new(name: impl Into<String>, registry: Arc<KeyRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Build a catalogue from the rows of `config` addressed to `name`
    ///
    /// Rows without a catalogue name are taken by every catalogue.
    pub fn from_config(name: impl Into<String>, registry: Arc<KeyRegistry>, config: &RegistryConfig) -> Result<Self> {
        let catalogue = Self::new(name, registry);
        for entry in config.entries_for_catalogue(&catalogue.name) {
            catalogue.add_entry(entry)?;
        }
        debug!(
            "built catalogue {} from config {} ({} key types)",
            catalogue.name,
            config.config_name,
            catalogue.len()
        );
        Ok(catalogue)
    }

    /// Catalogue name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry backing this catalogue
    pub fn registry(&self) -> &Arc<KeyRegistry> {
        &self.registry
    }

    /// Add a row, checking it against the registry
    ///
    /// The type must be registered at a version of at least
    /// `entry.manager_version`. A second row for the same type must name
    /// the same family; the higher declared version is kept.
    pub fn add_entry(&self, entry: &CatalogueEntry) -> Result<()> {
        let manager = self.registry.lookup(&entry.type_id)?;
        if manager.version() < entry.manager_version {
            return Err(Error::VersionTooOld {
                type_id: entry.type_id.clone(),
                min_version: entry.manager_version,
            });
        }

        let family = FamilyName::new(&entry.primitive_family);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let manager_version = match entries.get(&entry.type_id) {
            Some(existing) if existing.family != family => {
                return Err(Error::conflict(
                    &entry.type_id,
                    format!(
                        "catalogue {} already serves this key type as {}, not {}",
                        self.name, existing.family, family
                    ),
                ));
            }
            Some(existing) => existing.manager_version.max(entry.manager_version),
            None => entry.manager_version,
        };

        debug!(
            "catalogue {}: {} serves {} (version {})",
            self.name, entry.type_id, family, manager_version
        );
        entries.insert(
            entry.type_id.clone(),
            CatalogueRecord {
                type_id: entry.type_id.clone(),
                family,
                manager_version,
            },
        );
        Ok(())
    }

    /// Resolve a key manager
    pub fn get_key_manager(&self, type_id: &str, family: &str, min_version: u32) -> Result<Arc<dyn KeyManager>> {
        trace!("catalogue {}: resolving {} as {} (>= {})", self.name, type_id, family, min_version);
        let requested = FamilyName::new(family);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            let record = entries.get(type_id).ok_or_else(|| Error::UnsupportedKeyType {
                type_id: type_id.to_string(),
            })?;

            if record.family != requested {
                return Err(Error::UnsupportedFamily {
                    family: family.to_string(),
                });
            }
        }

        let manager = self.registry.lookup(type_id)?;
        if manager.version() < min_version {
            return Err(Error::VersionTooOld {
                type_id: type_id.to_string(),
                min_version,
            });
        }

        Ok(manager)
    }

    /// Resolve the manager for `key_data` and build its primitive
    pub fn primitive(&self, family: &str, min_version: u32, key_data: &KeyData) -> Result<Primitive> {
        let manager = self.get_key_manager(&key_data.type_id, family, min_version)?;
        let key = manager.parse(&key_data.value)?;
        manager.validate(&key)?;
        manager.primitive(&key)
    }

    /// Whether the catalogue has a row for `type_id`
    pub fn contains(&self, type_id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_id)
    }

    /// Number of key types in the catalogue
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the catalogue has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All rows, sorted by type identifier
    pub fn entries(&self) -> Vec<CatalogueRecord> {
        let mut records: Vec<CatalogueRecord> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        records.sort_by(|a, b| a.type_id.cmp(&b.type_id));
        records
    }
}
