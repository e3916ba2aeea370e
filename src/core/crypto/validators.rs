/*!
Structural checks shared by the built-in key managers.
*/

use crate::core::error::Result;
use crate::invalid_key_err;

/// Reject key material produced by a newer manager
pub fn validate_version(key_version: u32, manager_version: u32) -> Result<()> {
    if key_version > manager_version {
        return invalid_key_err!(
            "key has version {}; only keys with version in range [0..{}] are supported",
            key_version,
            manager_version
        );
    }
    Ok(())
}

/// Reject key bytes of the wrong length
pub fn validate_key_size(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return invalid_key_err!(
            "invalid {}: incorrect key length, expected {} bytes, got {}",
            name,
            expected,
            actual
        );
    }
    Ok(())
}
