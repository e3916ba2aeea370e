/*!
Error handling for the key registry.

Every registry, catalogue and key manager operation returns either the
requested value or exactly one of these errors. The variants carry the
offending type identifier, family or version so callers can branch on
them without parsing message text.
*/

use std::fmt;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for registry, catalogue and key manager operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key material failed structural validation
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A key format failed validation before generation
    #[error("invalid key format: {0}")]
    InvalidFormat(String),

    /// Serialized key material or key format could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// The registry holds no manager for the type identifier
    #[error("no key manager registered for key type {type_id}")]
    UnknownKeyType {
        type_id: String,
    },

    /// The catalogue has no entry for the type identifier
    #[error("no support for primitive with key type {type_id}")]
    UnsupportedKeyType {
        type_id: String,
    },

    /// The catalogue entry for the type serves a different family
    #[error("no support for primitive {family}")]
    UnsupportedFamily {
        family: String,
    },

    /// The registered manager is older than the caller requires
    #[error("no key manager for {type_id} with version at least {min_version}")]
    VersionTooOld {
        type_id: String,
        min_version: u32,
    },

    /// A registration would downgrade a manager or escalate a new-key permission
    #[error("registration conflict for key type {type_id}: {reason}")]
    RegistrationConflict {
        type_id: String,
        reason: String,
    },

    /// New keys may not be generated for this key type
    #[error("new key generation is not permitted for key type {type_id}")]
    NewKeyNotAllowed {
        type_id: String,
    },

    /// A primitive operation failed (limited details for security)
    #[error("Cryptographic operation failed")]
    Crypto(#[source] CryptoError),
}

/// Cryptographic errors with limited details to prevent leaking information
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Generic encryption error
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Generic decryption error
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Ciphertext or signature has the wrong size
    #[error("Invalid input length")]
    InvalidLength,
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKey,
    InvalidFormat,
    ParseError,
    UnknownKeyType,
    UnsupportedPrimitive,
    VersionTooOld,
    RegistrationConflict,
    NewKeyNotAllowed,
    Crypto,
}

impl Error {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Error::Parse(_) => ErrorKind::ParseError,
            Error::UnknownKeyType { .. } => ErrorKind::UnknownKeyType,
            Error::UnsupportedKeyType { .. } | Error::UnsupportedFamily { .. } => {
                ErrorKind::UnsupportedPrimitive
            }
            Error::VersionTooOld { .. } => ErrorKind::VersionTooOld,
            Error::RegistrationConflict { .. } => ErrorKind::RegistrationConflict,
            Error::NewKeyNotAllowed { .. } => ErrorKind::NewKeyNotAllowed,
            Error::Crypto(_) => ErrorKind::Crypto,
        }
    }

    pub(crate) fn conflict(type_id: &str, reason: impl Into<String>) -> Self {
        Error::RegistrationConflict {
            type_id: type_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::InvalidFormat => "InvalidFormat",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::UnknownKeyType => "UnknownKeyType",
            ErrorKind::UnsupportedPrimitive => "UnsupportedPrimitive",
            ErrorKind::VersionTooOld => "VersionTooOld",
            ErrorKind::RegistrationConflict => "RegistrationConflict",
            ErrorKind::NewKeyNotAllowed => "NewKeyNotAllowed",
            ErrorKind::Crypto => "Crypto",
        };
        f.write_str(name)
    }
}

/// Create an invalid key error
#[macro_export]
macro_rules! invalid_key_err {
    ($msg:expr) => {
        Err($crate::core::error::Error::InvalidKey($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Error::InvalidKey(format!($fmt, $($arg)*)))
    };
}

/// Create an invalid key format error
#[macro_export]
macro_rules! invalid_format_err {
    ($msg:expr) => {
        Err($crate::core::error::Error::InvalidFormat($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Error::InvalidFormat(format!($fmt, $($arg)*)))
    };
}

/// Create a parse error
#[macro_export]
macro_rules! parse_err {
    ($msg:expr) => {
        Err($crate::core::error::Error::Parse($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Error::Parse(format!($fmt, $($arg)*)))
    };
}

/// Create a crypto error
#[macro_export]
macro_rules! crypto_err {
    ($err:expr) => {
        Err($crate::core::error::Error::Crypto($err))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedKeyType { type_id: "unknown".into() };
        assert_eq!(format!("{}", err), "no support for primitive with key type unknown");

        let err = Error::UnsupportedFamily { family: "Verify".into() };
        assert_eq!(format!("{}", err), "no support for primitive Verify");

        let err = Error::VersionTooOld { type_id: "T1".into(), min_version: 1 };
        assert_eq!(format!("{}", err), "no key manager for T1 with version at least 1");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::UnsupportedKeyType { type_id: "a".into() }.kind(),
            ErrorKind::UnsupportedPrimitive
        );
        assert_eq!(
            Error::UnsupportedFamily { family: "a".into() }.kind(),
            ErrorKind::UnsupportedPrimitive
        );
        assert_eq!(Error::conflict("a", "downgrade").kind(), ErrorKind::RegistrationConflict);
        assert_eq!(Error::from(CryptoError::DecryptionFailed).kind(), ErrorKind::Crypto);
        assert_eq!(ErrorKind::ParseError.to_string(), "ParseError");
    }

    #[test]
    fn test_crypto_error_hides_details() {
        let err = Error::Crypto(CryptoError::DecryptionFailed);
        assert_eq!(format!("{}", err), "Cryptographic operation failed");
    }

    #[test]
    fn test_error_macros() {
        let res: Result<()> = invalid_key_err!("bad length {}", 31);
        assert_eq!(res, Err(Error::InvalidKey("bad length 31".into())));

        let res: Result<()> = parse_err!("truncated");
        assert_eq!(res.unwrap_err().kind(), ErrorKind::ParseError);
    }
}
