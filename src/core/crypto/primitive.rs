/*!
Primitives produced by key managers.
*/

use std::fmt;

use crate::core::{
    constants::families,
    crypto::traits::{Aead, PublicKeySign, PublicKeyVerify},
    error::{Error, Result},
};

/// A working cryptographic object built from validated key material
pub enum Primitive {
    /// Authenticated encryption
    Aead(Box<dyn Aead>),
    /// Signature creation
    PublicKeySign(Box<dyn PublicKeySign>),
    /// Signature verification
    PublicKeyVerify(Box<dyn PublicKeyVerify>),
}

impl Primitive {
    /// Family name of this primitive
    pub fn family(&self) -> &'static str {
        match self {
            Primitive::Aead(_) => families::AEAD,
            Primitive::PublicKeySign(_) => families::PUBLIC_KEY_SIGN,
            Primitive::PublicKeyVerify(_) => families::PUBLIC_KEY_VERIFY,
        }
    }

    /// Unwrap an AEAD primitive
    pub fn into_aead(self) -> Result<Box<dyn Aead>> {
        match self {
            Primitive::Aead(aead) => Ok(aead),
            other => Err(other.mismatch()),
        }
    }

    /// Unwrap a signing primitive
    pub fn into_public_key_sign(self) -> Result<Box<dyn PublicKeySign>> {
        match self {
            Primitive::PublicKeySign(signer) => Ok(signer),
            other => Err(other.mismatch()),
        }
    }

    /// Unwrap a verifying primitive
    pub fn into_public_key_verify(self) -> Result<Box<dyn PublicKeyVerify>> {
        match self {
            Primitive::PublicKeyVerify(verifier) => Ok(verifier),
            other => Err(other.mismatch()),
        }
    }

    fn mismatch(&self) -> Error {
        Error::UnsupportedFamily {
            family: self.family().to_string(),
        }
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive({})", self.family())
    }
}
