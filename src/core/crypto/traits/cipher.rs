/*!
Traits for authenticated encryption.

This module defines the interface of the AEAD primitive family.
*/

use crate::core::error::Result;

/// Authenticated encryption with associated data
///
/// Implementations pick a fresh nonce per call and embed it in the
/// ciphertext, so any instance built from the same key can decrypt the
/// output of any other.
pub trait Aead: Send + Sync {
    /// Encrypt `plaintext`, authenticating `associated_data`
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext`, checking `associated_data`
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;
}
