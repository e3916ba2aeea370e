/*!
Constants shared across the key registry.

This module collects the type identifiers of the built-in key managers,
the primitive family names their catalogues serve, and the key sizes
their validators enforce.
*/

/// Current key manager version of every built-in key type
pub const MANAGER_VERSION: u32 = 0;

/// Type identifiers of the built-in key managers
pub mod type_ids {
    /// Prefix shared by every built-in type identifier
    pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/google.crypto.tink.";

    /// ChaCha20-Poly1305 symmetric key
    pub const CHACHA20_POLY1305: &str = "type.googleapis.com/google.crypto.tink.ChaCha20Poly1305Key";

    /// XChaCha20-Poly1305 symmetric key
    pub const XCHACHA20_POLY1305: &str = "type.googleapis.com/google.crypto.tink.XChaCha20Poly1305Key";

    /// Ed25519 private (signing) key
    pub const ED25519_PRIVATE: &str = "type.googleapis.com/google.crypto.tink.Ed25519PrivateKey";

    /// Ed25519 public (verifying) key
    pub const ED25519_PUBLIC: &str = "type.googleapis.com/google.crypto.tink.Ed25519PublicKey";
}

/// Primitive family names as they appear in registry configurations
pub mod families {
    /// Authenticated encryption with associated data
    pub const AEAD: &str = "Aead";

    /// Signature creation
    pub const PUBLIC_KEY_SIGN: &str = "PublicKeySign";

    /// Signature verification
    pub const PUBLIC_KEY_VERIFY: &str = "PublicKeyVerify";
}

/// Catalogue names used by the built-in configurations
pub mod catalogues {
    /// Catalogue serving the AEAD family
    pub const AEAD: &str = "TinkAead";

    /// Catalogue serving the signing and verifying families
    pub const SIGNATURE: &str = "TinkSignature";
}

/// Key and wire sizes in bytes
pub mod sizes {
    /// Size of the key material header (version + payload length)
    pub const MATERIAL_HEADER_SIZE: usize = 8;

    /// Size of an encoded symmetric key format (key size)
    pub const SYMMETRIC_FORMAT_SIZE: usize = 4;

    /// ChaCha20-Poly1305 sizes
    pub mod chacha {
        /// Size of ChaCha20-Poly1305 key in bytes
        pub const KEY_SIZE: usize = 32;

        /// Size of ChaCha20-Poly1305 nonce in bytes
        pub const NONCE_SIZE: usize = 12;

        /// Size of XChaCha20-Poly1305 nonce in bytes
        pub const XNONCE_SIZE: usize = 24;

        /// Size of the Poly1305 tag in bytes
        pub const TAG_SIZE: usize = 16;
    }

    /// Ed25519 sizes
    pub mod ed25519 {
        /// Size of an Ed25519 private key seed in bytes
        pub const SECRET_KEY_SIZE: usize = 32;

        /// Size of an Ed25519 public key in bytes
        pub const PUBLIC_KEY_SIZE: usize = 32;

        /// Size of an Ed25519 signature in bytes
        pub const SIGNATURE_SIZE: usize = 64;
    }
}
