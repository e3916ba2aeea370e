/*!
Versioned key material and its wire encoding.

Key material is encoded as a big-endian frame:
- Version (4 bytes): version of the key manager that produced the key
- Payload Length (4 bytes): length of the payload in bytes
- Payload (variable): type-specific key bytes

The material kind is not encoded; it is supplied by the key manager that
parses the frame.
*/

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use bytes::{Bytes, BytesMut};

use crate::core::{
    constants::sizes::MATERIAL_HEADER_SIZE,
    error::Result,
};
use crate::{invalid_key_err, parse_err};

/// Classification of key material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialKind {
    /// Secret key shared by both parties
    Symmetric,
    /// Private half of an asymmetric key pair
    AsymmetricPrivate,
    /// Public half of an asymmetric key pair
    AsymmetricPublic,
    /// Key held by an external key management service
    Remote,
}

impl MaterialKind {
    /// Whether material of this kind must be kept secret
    pub fn is_secret(&self) -> bool {
        matches!(self, MaterialKind::Symmetric | MaterialKind::AsymmetricPrivate)
    }
}

/// Versioned key material owned by the caller
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    version: u32,
    payload: Bytes,
    kind: MaterialKind,
}

impl KeyMaterial {
    /// Create key material from its parts
    pub fn new(version: u32, payload: impl Into<Bytes>, kind: MaterialKind) -> Self {
        Self {
            version,
            payload: payload.into(),
            kind,
        }
    }

    /// Version of the manager that produced this material
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Type-specific key bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Material kind
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Encode the material into its wire frame
    ///
    /// Fails if the payload does not fit the 32-bit length field.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let payload_len = encode_len(self.payload.len())?;

        let mut header = [0u8; MATERIAL_HEADER_SIZE];
        BigEndian::write_u32(&mut header[0..4], self.version);
        BigEndian::write_u32(&mut header[4..8], payload_len);

        let mut buf = BytesMut::with_capacity(MATERIAL_HEADER_SIZE + self.payload.len());
        buf.extend_from_slice(&header);
        buf.extend_from_slice(&self.payload);
        Ok(buf.freeze())
    }

    /// Decode a wire frame, tagging the result with `kind`
    ///
    /// The frame must be consumed exactly; truncated or trailing bytes are
    /// rejected. The payload itself is not validated.
    pub fn from_bytes(bytes: &[u8], kind: MaterialKind) -> Result<Self> {
        if bytes.len() < MATERIAL_HEADER_SIZE {
            return parse_err!("key material too short for header");
        }

        let version = BigEndian::read_u32(&bytes[0..4]);
        let payload_len = BigEndian::read_u32(&bytes[4..8]) as usize;
        let body = &bytes[MATERIAL_HEADER_SIZE..];

        if body.len() != payload_len {
            return parse_err!(
                "key material payload length mismatch: header says {}, got {}",
                payload_len,
                body.len()
            );
        }

        Ok(Self::new(version, Bytes::copy_from_slice(body), kind))
    }
}

fn encode_len(len: usize) -> Result<u32> {
    match u32::try_from(len) {
        Ok(len) => Ok(len),
        Err(_) => invalid_key_err!("key material payload of {} bytes exceeds the frame limit", len),
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("KeyMaterial");
        s.field("version", &self.version).field("kind", &self.kind);
        if self.kind.is_secret() {
            s.field("payload", &format_args!("<{} bytes redacted>", self.payload.len()));
        } else {
            s.field("payload", &self.payload);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let material = KeyMaterial::new(7, vec![0xAA, 0xBB], MaterialKind::Symmetric);
        let bytes = material.to_bytes().unwrap();

        assert_eq!(&bytes[..], &[0, 0, 0, 7, 0, 0, 0, 2, 0xAA, 0xBB]);
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let material = KeyMaterial::new(0, vec![1u8; 32], MaterialKind::Symmetric);
        let bytes = material.to_bytes().unwrap();

        assert!(KeyMaterial::from_bytes(&bytes[..4], MaterialKind::Symmetric).is_err());
        assert!(KeyMaterial::from_bytes(&bytes[..bytes.len() - 1], MaterialKind::Symmetric).is_err());

        let mut trailing = bytes.to_vec();
        trailing.push(0);
        assert!(KeyMaterial::from_bytes(&trailing, MaterialKind::Symmetric).is_err());
    }

    #[test]
    fn test_decode_tags_kind() {
        let material = KeyMaterial::new(1, vec![9u8; 4], MaterialKind::AsymmetricPublic);
        let parsed = KeyMaterial::from_bytes(&material.to_bytes().unwrap(), MaterialKind::AsymmetricPublic).unwrap();
        assert_eq!(parsed, material);
        assert_eq!(parsed.version(), 1);
    }

    #[test]
    fn test_encode_len_limit() {
        assert_eq!(encode_len(32).unwrap(), 32);
        assert_eq!(encode_len(u32::MAX as usize).unwrap(), u32::MAX);

        #[cfg(target_pointer_width = "64")]
        {
            let err = encode_len(u32::MAX as usize + 1).unwrap_err();
            assert_eq!(err.kind(), crate::core::error::ErrorKind::InvalidKey);
        }
    }

    #[test]
    fn test_debug_redacts_secret_payload() {
        let material = KeyMaterial::new(0, vec![0x42u8; 32], MaterialKind::Symmetric);
        let debug = format!("{:?}", material);
        assert!(debug.contains("redacted"));
        assert!(!debug.contains("66"));

        let public = KeyMaterial::new(0, vec![0x42u8; 2], MaterialKind::AsymmetricPublic);
        assert!(!format!("{:?}", public).contains("redacted"));
    }
}
