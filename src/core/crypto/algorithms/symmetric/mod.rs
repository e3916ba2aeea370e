/*!
Symmetric AEAD key managers.

This module provides the AEAD key managers and registers them together
with the AEAD catalogue.
*/

mod chacha20poly1305;
mod xchacha20poly1305;

use std::sync::Arc;

use crate::core::{
    constants::catalogues,
    crypto::{
        catalogue::Catalogue,
        config::AEAD_CONFIG_V1,
        registry::KeyRegistry,
        traits::KeyManager,
    },
    error::Result,
};

pub use self::chacha20poly1305::{ChaCha20Poly1305Aead, ChaCha20Poly1305KeyFactory, ChaCha20Poly1305KeyManager};
pub use self::xchacha20poly1305::{XChaCha20Poly1305Aead, XChaCha20Poly1305KeyFactory, XChaCha20Poly1305KeyManager};

/// All built-in AEAD key managers
pub fn managers() -> Vec<Arc<dyn KeyManager>> {
    vec![
        Arc::new(ChaCha20Poly1305KeyManager::new()),
        Arc::new(XChaCha20Poly1305KeyManager::new()),
    ]
}

/// Register the AEAD key managers and build the AEAD catalogue
///
/// Safe to call repeatedly and concurrently: re-registering the same
/// managers with the same permissions is accepted by the registry.
pub fn register(registry: &Arc<KeyRegistry>) -> Result<Catalogue> {
    AEAD_CONFIG_V1.register(registry, &managers())?;
    catalogue(registry)
}

/// Build the AEAD catalogue over managers already in `registry`
pub fn catalogue(registry: &Arc<KeyRegistry>) -> Result<Catalogue> {
    Catalogue::from_config(catalogues::AEAD, Arc::clone(registry), &AEAD_CONFIG_V1)
}
