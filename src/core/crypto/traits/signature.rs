/*!
Traits for signature operations.

This module defines the interfaces of the signing and verifying
primitive families.
*/

use crate::core::error::Result;

/// Creates signatures
pub trait PublicKeySign: Send + Sync {
    /// Sign data
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Verifies signatures
pub trait PublicKeyVerify: Send + Sync {
    /// Verify a signature over data
    fn verify(&self, signature: &[u8], data: &[u8]) -> Result<()>;
}
