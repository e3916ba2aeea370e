/*!
Registry configurations.

A registry configuration is an ordered list of rows declaring which
primitive family each key type serves, at which manager version, and
whether new keys of that type may be generated. Catalogues are built from
these rows; the family registration functions use the same rows to decide
the new-key permission of each manager they install.

The `*_V1` snapshots describe the built-in key managers.
*/

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use crate::core::{
    constants::{MANAGER_VERSION, catalogues, families, type_ids},
    crypto::{
        catalogue::FamilyName,
        registry::KeyRegistry,
        traits::KeyManager,
    },
    error::{Error, Result},
};

/// One row of a registry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogueEntry {
    /// Type identifier
    pub type_id: String,
    /// Family served by the type
    pub primitive_family: String,
    /// Minimum manager version
    pub manager_version: u32,
    /// Whether new keys of this type may be generated
    pub new_key_allowed: bool,
    /// Catalogue the row belongs to; empty rows belong to every catalogue
    pub catalogue_name: String,
}

impl CatalogueEntry {
    /// Create a row that allows new keys and belongs to every catalogue
    pub fn new(type_id: impl Into<String>, primitive_family: impl Into<String>, manager_version: u32) -> Self {
        Self {
            type_id: type_id.into(),
            primitive_family: primitive_family.into(),
            manager_version,
            new_key_allowed: true,
            catalogue_name: String::new(),
        }
    }

    /// Set the new-key permission
    pub fn with_new_key_allowed(mut self, new_key_allowed: bool) -> Self {
        self.new_key_allowed = new_key_allowed;
        self
    }

    /// Assign the row to a catalogue
    pub fn with_catalogue(mut self, catalogue_name: impl Into<String>) -> Self {
        self.catalogue_name = catalogue_name.into();
        self
    }
}

/// An ordered set of catalogue rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    /// Name of the configuration snapshot
    pub config_name: String,
    /// Rows in registration order
    pub entries: Vec<CatalogueEntry>,
}

impl RegistryConfig {
    /// Create an empty configuration
    pub fn new(config_name: impl Into<String>) -> Self {
        Self {
            config_name: config_name.into(),
            entries: Vec::new(),
        }
    }

    /// Append a row
    pub fn with_entry(mut self, entry: CatalogueEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append all rows of another configuration
    pub fn with_config(mut self, other: &RegistryConfig) -> Self {
        self.entries.extend(other.entries.iter().cloned());
        self
    }

    /// Rows serving `family`, compared case-insensitively
    pub fn entries_for_family<'a>(&'a self, family: &str) -> impl Iterator<Item = &'a CatalogueEntry> + 'a {
        let family = FamilyName::new(family);
        self.entries
            .iter()
            .filter(move |entry| FamilyName::new(&entry.primitive_family) == family)
    }

    /// Rows addressed to `catalogue_name` or to every catalogue
    pub fn entries_for_catalogue<'a>(&'a self, catalogue_name: &'a str) -> impl Iterator<Item = &'a CatalogueEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.catalogue_name.is_empty() || entry.catalogue_name == catalogue_name)
    }

    /// Register `managers` with the new-key permissions declared by this configuration
    ///
    /// Every row must have a matching manager in `managers`; a manager may
    /// appear in several rows. The rows are registered as one batch, so a
    /// failing row leaves the registry untouched.
    pub fn register(&self, registry: &KeyRegistry, managers: &[Arc<dyn KeyManager>]) -> Result<()> {
        let batch = self
            .entries
            .iter()
            .map(|entry| {
                managers
                    .iter()
                    .find(|manager| manager.does_support(&entry.type_id))
                    .map(|manager| (Arc::clone(manager), entry.new_key_allowed))
                    .ok_or_else(|| Error::UnknownKeyType {
                        type_id: entry.type_id.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        registry.register_batch(&batch)?;
        debug!("registered config {} ({} rows)", self.config_name, self.entries.len());
        Ok(())
    }
}

/// AEAD key types
pub static AEAD_CONFIG_V1: Lazy<RegistryConfig> = Lazy::new(|| {
    RegistryConfig::new("AEAD_V1")
        .with_entry(
            CatalogueEntry::new(type_ids::CHACHA20_POLY1305, families::AEAD, MANAGER_VERSION)
                .with_catalogue(catalogues::AEAD),
        )
        .with_entry(
            CatalogueEntry::new(type_ids::XCHACHA20_POLY1305, families::AEAD, MANAGER_VERSION)
                .with_catalogue(catalogues::AEAD),
        )
});

/// Signature key types
///
/// Public keys are derived from private keys, never generated directly.
pub static SIGNATURE_CONFIG_V1: Lazy<RegistryConfig> = Lazy::new(|| {
    RegistryConfig::new("SIGNATURE_V1")
        .with_entry(
            CatalogueEntry::new(type_ids::ED25519_PRIVATE, families::PUBLIC_KEY_SIGN, MANAGER_VERSION)
                .with_catalogue(catalogues::SIGNATURE),
        )
        .with_entry(
            CatalogueEntry::new(type_ids::ED25519_PUBLIC, families::PUBLIC_KEY_VERIFY, MANAGER_VERSION)
                .with_new_key_allowed(false)
                .with_catalogue(catalogues::SIGNATURE),
        )
});

/// Every built-in key type
pub static ALL_CONFIG_V1: Lazy<RegistryConfig> = Lazy::new(|| {
    RegistryConfig::new("ALL_V1")
        .with_config(&AEAD_CONFIG_V1)
        .with_config(&SIGNATURE_CONFIG_V1)
});
