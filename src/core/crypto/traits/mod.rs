/*!
Core traits for the key registry.

This module defines the key manager interfaces and the interfaces of the
primitive families the built-in managers produce.
*/

pub mod cipher;
pub mod manager;
pub mod signature;

// Re-export core traits for easier access
pub use cipher::Aead;
pub use manager::{KeyFactory, KeyManager};
pub use signature::{PublicKeySign, PublicKeyVerify};
