/*!
Key management for cryptographic primitives.

This module provides the key manager interfaces, the registry mapping
type identifiers to managers, the per-family catalogues resolving
requests against the registry, and the built-in key managers.
*/

// Key material and formats
pub mod key;

// Key manager and primitive interfaces
pub mod traits;

// Primitives built by key managers
pub mod primitive;

// Shared structural checks
pub mod validators;

// Registry of key managers
pub mod registry;

// Per-family directories
pub mod catalogue;

// Registry configurations
pub mod config;

// Built-in key managers
pub mod algorithms;

use std::sync::Arc;

use crate::core::error::Result;

pub use catalogue::{Catalogue, CatalogueRecord, FamilyName};
pub use config::{ALL_CONFIG_V1, AEAD_CONFIG_V1, CatalogueEntry, RegistryConfig, SIGNATURE_CONFIG_V1};
pub use key::{KeyData, KeyFormat, KeyMaterial, MaterialKind};
pub use primitive::Primitive;
pub use registry::KeyRegistry;
pub use traits::{Aead, KeyFactory, KeyManager, PublicKeySign, PublicKeyVerify};

/// Catalogues of every built-in primitive family
pub struct Catalogues {
    pub aead: Catalogue,
    pub signature: Catalogue,
}

/// Register every built-in key manager and build their catalogues
///
/// All families are registered as one batch: if any key type conflicts
/// with an installed record, no manager is installed.
pub fn register_all(registry: &Arc<KeyRegistry>) -> Result<Catalogues> {
    let mut managers = algorithms::symmetric::managers();
    managers.extend(algorithms::signatures::managers());
    ALL_CONFIG_V1.register(registry, &managers)?;

    Ok(Catalogues {
        aead: algorithms::symmetric::catalogue(registry)?,
        signature: algorithms::signatures::catalogue(registry)?,
    })
}
