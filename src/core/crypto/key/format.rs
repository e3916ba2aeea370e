/*!
Opaque key generation parameters.

A key format is interpreted only by the key factory of its key type. The
symmetric key types share one layout, a big-endian `u32` key size, for
which helpers are provided here.
*/

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::core::{
    constants::sizes::SYMMETRIC_FORMAT_SIZE,
    error::Result,
};
use crate::parse_err;

/// Type-specific parameters for generating new key material
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFormat {
    params: Bytes,
}

impl KeyFormat {
    /// Wrap already-encoded parameters
    pub fn new(params: impl Into<Bytes>) -> Self {
        Self { params: params.into() }
    }

    /// A format without parameters
    pub fn empty() -> Self {
        Self::default()
    }

    /// Format for a symmetric key of `key_size` bytes
    pub fn symmetric(key_size: u32) -> Self {
        let mut params = [0u8; SYMMETRIC_FORMAT_SIZE];
        BigEndian::write_u32(&mut params, key_size);
        Self::new(params.to_vec())
    }

    /// Raw parameters
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Whether the format carries no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Decode the key size of a symmetric format
    pub fn key_size(&self) -> Result<u32> {
        if self.params.len() != SYMMETRIC_FORMAT_SIZE {
            return parse_err!(
                "symmetric key format must be {} bytes, got {}",
                SYMMETRIC_FORMAT_SIZE,
                self.params.len()
            );
        }
        Ok(BigEndian::read_u32(&self.params))
    }

    /// Encoded parameters
    pub fn to_bytes(&self) -> Bytes {
        self.params.clone()
    }
}
