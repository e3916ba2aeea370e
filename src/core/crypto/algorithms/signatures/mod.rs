/*!
Signature key managers.

This module provides the Ed25519 signing and verifying key managers and
registers them together with the signature catalogue.
*/

mod ed25519;

use std::sync::Arc;

use crate::core::{
    constants::catalogues,
    crypto::{
        catalogue::Catalogue,
        config::SIGNATURE_CONFIG_V1,
        registry::KeyRegistry,
        traits::KeyManager,
    },
    error::Result,
};

pub use self::ed25519::{
    Ed25519PrivateKeyFactory, Ed25519PrivateKeyManager, Ed25519PublicKeyFactory, Ed25519PublicKeyManager,
    Ed25519Sign, Ed25519Verify,
};

/// All built-in signature key managers
pub fn managers() -> Vec<Arc<dyn KeyManager>> {
    vec![
        Arc::new(Ed25519PrivateKeyManager::new()),
        Arc::new(Ed25519PublicKeyManager::new()),
    ]
}

/// Register the signature key managers and build the signature catalogue
pub fn register(registry: &Arc<KeyRegistry>) -> Result<Catalogue> {
    SIGNATURE_CONFIG_V1.register(registry, &managers())?;
    catalogue(registry)
}

/// Build the signature catalogue over managers already in `registry`
pub fn catalogue(registry: &Arc<KeyRegistry>) -> Result<Catalogue> {
    Catalogue::from_config(catalogues::SIGNATURE, Arc::clone(registry), &SIGNATURE_CONFIG_V1)
}
