//! Core components of the key registry.
//!
//! This module contains the key manager abstraction, the registry and
//! catalogues built on it, the built-in key managers, and error handling.

// Key management
pub mod crypto;

// Shared constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{CryptoError, Error, ErrorKind, Result};
